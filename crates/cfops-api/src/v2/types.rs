// Cloud Controller v2 wire types.
//
// Every v2 resource arrives wrapped as `{ metadata: {...}, entity: {...} }`
// and list endpoints add `total_results` / `total_pages` around them.
// Fields the platform omits on some foundations are `Option` + `default`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::Page;

// ── Envelopes ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub guid: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A single v2 resource: metadata plus a typed entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<E> {
    pub metadata: Metadata,
    pub entity: E,
}

impl<E> Resource<E> {
    /// The resource GUID.
    pub fn id(&self) -> &str {
        &self.metadata.guid
    }
}

/// Paginated v2 list response.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<E> {
    #[serde(default)]
    pub total_results: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub prev_url: Option<String>,
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default = "Vec::new")]
    pub resources: Vec<Resource<E>>,
}

impl<E> ListResponse<E> {
    /// Convert into a [`Page`] for the page number that was requested.
    pub fn into_page(self, page: u32) -> Page<Resource<E>> {
        Page::new(self.resources, page, self.total_pages)
    }
}

// ── Info ─────────────────────────────────────────────────────────────

/// `GET /v2/info` response.
#[derive(Debug, Clone, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub build: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub authorization_endpoint: Option<String>,
    pub token_endpoint: String,
    #[serde(default)]
    pub doppler_logging_endpoint: Option<String>,
    #[serde(default)]
    pub routing_endpoint: Option<String>,
}

// ── Organizations & spaces ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationEntity {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub billing_enabled: Option<bool>,
    #[serde(default)]
    pub quota_definition_guid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceEntity {
    pub name: String,
    pub organization_guid: String,
    #[serde(default)]
    pub allow_ssh: Option<bool>,
    #[serde(default)]
    pub space_quota_definition_guid: Option<String>,
}

// ── Applications ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationEntity {
    pub name: String,
    pub space_guid: String,
    /// `STARTED` or `STOPPED`.
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub instances: Option<u32>,
    /// Memory limit in MB.
    #[serde(default)]
    pub memory: Option<u64>,
    /// Disk quota in MB.
    #[serde(default)]
    pub disk_quota: Option<u64>,
    #[serde(default)]
    pub buildpack: Option<String>,
    #[serde(default)]
    pub detected_buildpack: Option<String>,
    #[serde(default)]
    pub stack_guid: Option<String>,
    #[serde(default)]
    pub package_state: Option<String>,
    #[serde(default)]
    pub health_check_type: Option<String>,
    #[serde(default)]
    pub environment_json: Option<serde_json::Value>,
}

/// Body for `PUT /v2/apps/:guid`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateApplicationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instances: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_quota: Option<u64>,
}

// ── Services ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntity {
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub bindable: Option<bool>,
    #[serde(default)]
    pub service_broker_guid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePlanEntity {
    pub name: String,
    pub service_guid: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub free: Option<bool>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastOperation {
    #[serde(rename = "type", default)]
    pub operation_type: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInstanceEntity {
    pub name: String,
    #[serde(default)]
    pub space_guid: Option<String>,
    #[serde(default)]
    pub service_plan_guid: Option<String>,
    #[serde(default)]
    pub service_guid: Option<String>,
    /// `managed_service_instance` or `user_provided_service_instance`.
    #[serde(rename = "type", default)]
    pub instance_type: Option<String>,
    #[serde(default)]
    pub dashboard_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub last_operation: Option<LastOperation>,
}

/// Body for `POST /v2/service_instances`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateServiceInstanceRequest {
    pub name: String,
    pub space_guid: String,
    pub service_plan_guid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceBindingEntity {
    pub app_guid: String,
    pub service_instance_guid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_operation: Option<LastOperation>,
}

/// Body for `POST /v2/service_bindings`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateServiceBindingRequest {
    pub app_guid: String,
    pub service_instance_guid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// Body for `PUT /v2/service_instances/:guid/routes/:route_guid`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BindRouteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

// ── Domains & routes ─────────────────────────────────────────────────

/// Shared and private domains share one entity shape; private domains
/// carry an owning organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEntity {
    pub name: String,
    #[serde(default)]
    pub owning_organization_guid: Option<String>,
    #[serde(default)]
    pub router_group_guid: Option<String>,
    #[serde(default)]
    pub router_group_type: Option<String>,
    #[serde(default)]
    pub internal: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntity {
    #[serde(default)]
    pub host: String,
    pub domain_guid: String,
    pub space_guid: String,
    /// Empty string when the route has no path.
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub service_instance_guid: Option<String>,
}

/// Body for `POST /v2/routes`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRouteRequest {
    pub domain_guid: String,
    pub space_guid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

// ── Jobs ─────────────────────────────────────────────────────────────

/// Lifecycle of an asynchronous platform job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Finished,
    Failed,
    /// Any status this client does not know; treated as still in progress.
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// `finished` and `failed` end polling.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Finished => "finished",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobErrorDetails {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEntity {
    #[serde(default)]
    pub guid: Option<String>,
    pub status: JobStatus,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_details: Option<JobErrorDetails>,
}

pub type JobResource = Resource<JobEntity>;
