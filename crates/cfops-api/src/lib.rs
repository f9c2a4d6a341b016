// cfops-api: Async Rust client for the Cloud Foundry Cloud Controller (v2 + v3)
// and the UAA token endpoint.

pub mod auth;
pub mod client;
pub mod error;
pub mod pagination;
pub mod transport;
pub mod uaa;
pub mod v2;
pub mod v3;

pub use auth::{StaticToken, TokenProvider};
pub use client::CloudControllerClient;
pub use error::Error;
pub use pagination::{Page, collect_pages, request_pages};
pub use transport::{TlsMode, TransportConfig};
pub use uaa::UaaTokenProvider;
