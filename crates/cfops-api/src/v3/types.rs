// Cloud Controller v3 wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::Page;

// ── Query ────────────────────────────────────────────────────────────

/// Filters shared by the v3 list endpoints. Multiple values in one filter
/// are sent comma-separated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct V3Query {
    pub names: Vec<String>,
    pub organization_guids: Vec<String>,
    pub space_guids: Vec<String>,
    pub per_page: Option<u32>,
}

impl V3Query {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn organization_guid(mut self, guid: impl Into<String>) -> Self {
        self.organization_guids.push(guid.into());
        self
    }

    pub fn space_guid(mut self, guid: impl Into<String>) -> Self {
        self.space_guids.push(guid.into());
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub(crate) fn to_params(&self, page: u32) -> Vec<(String, String)> {
        let mut params = Vec::new();
        for (key, values) in [
            ("names", &self.names),
            ("organization_guids", &self.organization_guids),
            ("space_guids", &self.space_guids),
        ] {
            if !values.is_empty() {
                params.push((key.to_owned(), values.join(",")));
            }
        }
        params.push(("page".to_owned(), page.to_string()));
        if let Some(per_page) = self.per_page {
            params.push(("per_page".to_owned(), per_page.to_string()));
        }
        params
    }
}

// ── Envelopes ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total_results: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub first: Option<Link>,
    #[serde(default)]
    pub last: Option<Link>,
    #[serde(default)]
    pub next: Option<Link>,
    #[serde(default)]
    pub previous: Option<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    pub pagination: Pagination,
    #[serde(default = "Vec::new")]
    pub resources: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    pub fn into_page(self, page: u32) -> Page<T> {
        Page::new(self.resources, page, self.pagination.total_pages)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToOne {
    #[serde(default)]
    pub data: Option<RelationshipData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipData {
    pub guid: String,
}

// ── Resources ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrganizationV3 {
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub suspended: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpaceRelationships {
    pub organization: ToOne,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpaceV3 {
    pub guid: String,
    pub name: String,
    pub relationships: SpaceRelationships,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SpaceV3 {
    pub fn organization_guid(&self) -> Option<&str> {
        self.relationships
            .organization
            .data
            .as_ref()
            .map(|d| d.guid.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApplicationRelationships {
    pub space: ToOne,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApplicationV3 {
    pub guid: String,
    pub name: String,
    /// `STARTED` or `STOPPED`.
    pub state: String,
    pub relationships: ApplicationRelationships,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_joins_multi_value_filters() {
        let params = V3Query::default()
            .name("dev")
            .name("prod")
            .organization_guid("org-1")
            .per_page(50)
            .to_params(2);

        assert_eq!(
            params,
            vec![
                ("names".to_owned(), "dev,prod".to_owned()),
                ("organization_guids".to_owned(), "org-1".to_owned()),
                ("page".to_owned(), "2".to_owned()),
                ("per_page".to_owned(), "50".to_owned()),
            ]
        );
    }

    #[test]
    fn empty_query_only_sends_page() {
        assert_eq!(
            V3Query::default().to_params(1),
            vec![("page".to_owned(), "1".to_owned())]
        );
    }
}
