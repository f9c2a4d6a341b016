// ── Domain model returned by the operations layer ──
//
// Flat, name-resolved views of Cloud Controller resources: GUID
// references are replaced by the names a person would type.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use cfops_api::v2::types::{
    ApplicationEntity, OrganizationEntity, Resource, ServiceInstanceEntity, SpaceEntity,
};

// ── Organizations & spaces ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSummary {
    pub id: String,
    pub name: String,
    pub status: Option<String>,
}

impl From<Resource<OrganizationEntity>> for OrganizationSummary {
    fn from(r: Resource<OrganizationEntity>) -> Self {
        Self {
            id: r.metadata.guid,
            name: r.entity.name,
            status: r.entity.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationDetail {
    pub id: String,
    pub name: String,
    pub status: Option<String>,
    pub quota_definition_id: Option<String>,
    pub spaces: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceSummary {
    pub id: String,
    pub name: String,
    pub organization_id: String,
}

impl From<Resource<SpaceEntity>> for SpaceSummary {
    fn from(r: Resource<SpaceEntity>) -> Self {
        Self {
            id: r.metadata.guid,
            name: r.entity.name,
            organization_id: r.entity.organization_guid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceDetail {
    pub id: String,
    pub name: String,
    pub organization: String,
    pub allow_ssh: Option<bool>,
    pub applications: Vec<String>,
    pub services: Vec<String>,
}

// ── Applications ─────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum AppState {
    Started,
    Stopped,
    #[default]
    Unknown,
}

impl AppState {
    fn from_platform(state: Option<&str>) -> Self {
        state
            .and_then(|s| s.parse().ok())
            .unwrap_or(Self::Unknown)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSummary {
    pub id: String,
    pub name: String,
    pub state: AppState,
    pub instances: Option<u32>,
    /// MB.
    pub memory_limit: Option<u64>,
    /// MB.
    pub disk_quota: Option<u64>,
}

impl From<Resource<ApplicationEntity>> for ApplicationSummary {
    fn from(r: Resource<ApplicationEntity>) -> Self {
        Self {
            state: AppState::from_platform(r.entity.state.as_deref()),
            id: r.metadata.guid,
            name: r.entity.name,
            instances: r.entity.instances,
            memory_limit: r.entity.memory,
            disk_quota: r.entity.disk_quota,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDetail {
    #[serde(flatten)]
    pub summary: ApplicationSummary,
    pub buildpack: Option<String>,
    pub detected_buildpack: Option<String>,
    pub health_check_type: Option<String>,
    pub package_state: Option<String>,
    /// Mapped routes rendered as URLs.
    pub urls: Vec<String>,
}

// ── Services ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ServiceInstanceKind {
    Managed,
    UserProvided,
}

impl ServiceInstanceKind {
    pub(crate) fn of(entity: &ServiceInstanceEntity) -> Self {
        match entity.instance_type.as_deref() {
            Some("user_provided_service_instance") => Self::UserProvided,
            _ => Self::Managed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstanceSummary {
    pub id: String,
    pub name: String,
    pub kind: ServiceInstanceKind,
    /// Service label; `None` for user-provided instances.
    pub service: Option<String>,
    pub plan: Option<String>,
    /// e.g. `create succeeded`.
    pub last_operation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstanceDetail {
    #[serde(flatten)]
    pub summary: ServiceInstanceSummary,
    pub description: Option<String>,
    pub dashboard_url: Option<String>,
    pub tags: Vec<String>,
    pub applications: Vec<String>,
}

// ── Domains & routes ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DomainKind {
    Private,
    Shared,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSummary {
    pub id: String,
    pub name: String,
    pub kind: DomainKind,
    pub owning_organization_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub id: String,
    pub host: String,
    pub domain: String,
    pub path: String,
    pub port: Option<u16>,
    pub applications: Vec<String>,
}

impl RouteSummary {
    pub fn url(&self) -> String {
        route_url(&self.host, &self.domain, &self.path, self.port)
    }
}

/// `host.domain/path`, or `domain:port` for TCP routes.
pub fn route_url(host: &str, domain: &str, path: &str, port: Option<u16>) -> String {
    let mut url = if host.is_empty() {
        domain.to_owned()
    } else {
        format!("{host}.{domain}")
    };
    if let Some(port) = port {
        url.push_str(&format!(":{port}"));
    }
    url.push_str(path);
    url
}
