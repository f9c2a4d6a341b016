//! Cloud Controller v2 endpoints.
//!
//! Wire types live in [`types`]; endpoints are inherent methods on
//! [`CloudControllerClient`](crate::CloudControllerClient), grouped by
//! resource family. Every list endpoint takes a [`ListQuery`] plus a page
//! number and returns one [`Page`](crate::Page), which makes it a page
//! fetcher for [`request_pages`](crate::request_pages).

mod applications;
mod jobs;
mod organizations;
mod query;
mod routes;
mod services;
pub mod types;

pub use query::{ListQuery, OrderDirection};
