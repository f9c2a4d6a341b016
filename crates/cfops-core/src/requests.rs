// ── Named-argument requests for the operations layer ──
//
// Every resource is referenced by name; the operations resolve names to
// GUIDs before sending anything that mutates.

use serde_json::Value;

/// Delete an application, optionally deleting its routes first.
#[derive(Debug, Clone, Default)]
pub struct DeleteApplicationRequest {
    pub name: String,
    pub delete_routes: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CreateServiceInstanceRequest {
    pub name: String,
    /// Service label in the marketplace.
    pub service: String,
    pub plan: String,
    pub parameters: Option<Value>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BindServiceRequest {
    pub application: String,
    pub service_instance: String,
    pub parameters: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct UnbindServiceRequest {
    pub application: String,
    pub service_instance: String,
}

/// Identifies a route by its parts. An empty `host` or `path` means none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRef {
    pub domain: String,
    pub host: String,
    pub path: String,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default)]
pub struct BindRouteServiceRequest {
    pub service_instance: String,
    pub route: RouteRef,
    pub parameters: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct UnbindRouteServiceRequest {
    pub service_instance: String,
    pub route: RouteRef,
}

pub type CreateRouteRequest = RouteRef;

/// Map (or unmap) a route to an application.
#[derive(Debug, Clone, Default)]
pub struct MapRouteRequest {
    pub application: String,
    pub route: RouteRef,
}
