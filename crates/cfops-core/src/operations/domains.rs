use cfops_api::collect_pages;
use cfops_api::v2::ListQuery;
use cfops_api::v2::types::{DomainEntity, Resource};

use super::Operations;
use crate::error::CoreError;
use crate::model::{DomainKind, DomainSummary};

/// Domain verbs.
pub struct Domains<'a> {
    ops: &'a Operations,
}

impl<'a> Domains<'a> {
    pub(super) fn new(ops: &'a Operations) -> Self {
        Self { ops }
    }

    /// Private domains of the targeted organization, then shared domains.
    pub async fn list(&self) -> Result<Vec<DomainSummary>, CoreError> {
        let organization_id = self.ops.context.organization_id().await?;
        let query = ListQuery::new();

        let private = collect_pages(|page| {
            self.ops
                .client
                .list_organization_private_domains(organization_id, &query, page)
        })
        .await?;
        let shared = collect_pages(|page| self.ops.client.list_shared_domains(&query, page)).await?;

        Ok(private
            .into_iter()
            .map(|d| summary(d, DomainKind::Private))
            .chain(shared.into_iter().map(|d| summary(d, DomainKind::Shared)))
            .collect())
    }
}

fn summary(domain: Resource<DomainEntity>, kind: DomainKind) -> DomainSummary {
    DomainSummary {
        id: domain.metadata.guid,
        name: domain.entity.name,
        kind,
        owning_organization_id: domain.entity.owning_organization_guid,
    }
}
