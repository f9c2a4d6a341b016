//! Operations layer between `cfops-api` and consumers (CLI, scripts).
//!
//! - **[`Operations`]**: per-resource facades (`applications()`,
//!   `services()`, `routes()`, ...) that take human-readable names, resolve
//!   them to GUIDs, issue the primary request, and poll any asynchronous
//!   job the platform hands back.
//!
//! - **[`Context`]**: the targeted organization and space. Each GUID is
//!   resolved at most once per `Context`, even under concurrent first use,
//!   and a missing name fails before any request is sent.
//!
//! - **Name resolution** ([`resolve`]): first match over a lazy paged
//!   stream, stopping as soon as the match is seen. [`NameResolution::Strict`]
//!   rejects duplicate names instead.
//!
//! - **Job polling** ([`job`]): `queued → running → finished | failed`,
//!   with an injectable interval, an optional timeout, and cancellation.

pub mod config;
pub mod context;
pub mod error;
pub mod job;
pub mod model;
pub mod operations;
pub mod requests;
pub mod resolve;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AuthCredentials, ClientConfig, TlsVerification};
pub use context::Context;
pub use error::{ContextScope, CoreError, ErrorKind};
pub use job::PollConfig;
pub use operations::{OperationSettings, Operations};
pub use resolve::{NameResolution, Named};

pub use model::{
    AppState, ApplicationDetail, ApplicationSummary, DomainKind, DomainSummary,
    OrganizationDetail, OrganizationSummary, RouteSummary, ServiceInstanceDetail,
    ServiceInstanceKind, ServiceInstanceSummary, SpaceDetail, SpaceSummary,
};
pub use requests::{
    BindRouteServiceRequest, BindServiceRequest, CreateRouteRequest, CreateServiceInstanceRequest,
    DeleteApplicationRequest, MapRouteRequest, RouteRef, UnbindRouteServiceRequest,
    UnbindServiceRequest,
};
