//! Name → resource resolution over lazy paged streams.
//!
//! The Cloud Controller does not enforce name uniqueness on every
//! resource type, so the default is first-match-wins: consumption stops at
//! the first item whose name matches, which also means later pages are
//! never requested. [`NameResolution::Strict`] keeps reading until it sees
//! a second match and rejects the name as ambiguous.

use std::pin::pin;

use futures_util::{Stream, TryStreamExt};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::trace;

use cfops_api::v2::types::{
    ApplicationEntity, DomainEntity, OrganizationEntity, Resource, ServiceEntity,
    ServiceInstanceEntity, ServicePlanEntity, SpaceEntity,
};
use cfops_api::v3::types::{ApplicationV3, OrganizationV3, SpaceV3};

use crate::error::CoreError;

/// How duplicate names are treated.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NameResolution {
    /// Return the first match in page order.
    #[default]
    FirstMatch,
    /// Fail with [`CoreError::Ambiguous`] if a second match exists.
    Strict,
}

/// A resource addressable by a human-readable name.
pub trait Named {
    fn name(&self) -> &str;
}

impl<E: Named> Named for Resource<E> {
    fn name(&self) -> &str {
        self.entity.name()
    }
}

macro_rules! named_by {
    ($field:ident: $($ty:ty),+ $(,)?) => {
        $(impl Named for $ty {
            fn name(&self) -> &str {
                &self.$field
            }
        })+
    };
}

named_by!(name: OrganizationEntity, SpaceEntity, ApplicationEntity, ServicePlanEntity);
named_by!(name: ServiceInstanceEntity, DomainEntity);
named_by!(name: OrganizationV3, SpaceV3, ApplicationV3);
// Services are addressed by their label.
named_by!(label: ServiceEntity);

/// Return the item of `items` whose name equals `name`.
pub async fn resolve_by_name<T, S>(
    items: S,
    name: &str,
    resource_type: &str,
    mode: NameResolution,
) -> Result<T, CoreError>
where
    T: Named,
    S: Stream<Item = Result<T, cfops_api::Error>>,
{
    resolve_first(items, resource_type, name, mode, |item| item.name() == name).await
}

/// Return the item of `items` matching `predicate`; `name` is only used to
/// describe the target in errors.
///
/// Stream errors are propagated as soon as they are seen.
pub async fn resolve_first<T, S, P>(
    items: S,
    resource_type: &str,
    name: &str,
    mode: NameResolution,
    mut predicate: P,
) -> Result<T, CoreError>
where
    S: Stream<Item = Result<T, cfops_api::Error>>,
    P: FnMut(&T) -> bool,
{
    let mut items = pin!(items);
    let mut found = None;

    while let Some(item) = items.try_next().await? {
        if !predicate(&item) {
            continue;
        }
        match mode {
            NameResolution::FirstMatch => {
                trace!(resource_type, name, "resolved on first match");
                return Ok(item);
            }
            NameResolution::Strict if found.is_some() => {
                return Err(CoreError::Ambiguous {
                    resource_type: resource_type.to_owned(),
                    name: name.to_owned(),
                });
            }
            NameResolution::Strict => found = Some(item),
        }
    }

    found.ok_or_else(|| CoreError::not_found(resource_type, name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use cfops_api::{Page, request_pages};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Org {
        id: &'static str,
        name: &'static str,
    }

    impl Named for Org {
        fn name(&self) -> &str {
            self.name
        }
    }

    const PAGES: [&[Org]; 2] = [
        &[Org {
            id: "test-id-1",
            name: "test-name-1",
        }],
        &[Org {
            id: "test-id-2",
            name: "test-name-2",
        }],
    ];

    fn fetch(calls: &AtomicU32, page: u32) -> impl Future<Output = Result<Page<Org>, cfops_api::Error>> + use<> {
        calls.fetch_add(1, Ordering::SeqCst);
        let items = PAGES[usize::try_from(page - 1).unwrap()].to_vec();
        async move { Ok(Page::new(items, page, 2)) }
    }

    #[tokio::test]
    async fn match_on_second_page_fetches_both() {
        let calls = AtomicU32::new(0);
        let org = resolve_by_name(
            request_pages(|page| fetch(&calls, page)),
            "test-name-2",
            "Organization",
            NameResolution::FirstMatch,
        )
        .await
        .unwrap();

        assert_eq!(org.id, "test-id-2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn match_on_first_page_short_circuits() {
        let calls = AtomicU32::new(0);
        let org = resolve_by_name(
            request_pages(|page| fetch(&calls, page)),
            "test-name-1",
            "Organization",
            NameResolution::FirstMatch,
        )
        .await
        .unwrap();

        assert_eq!(org.id, "test-id-1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn no_match_names_target_and_type() {
        let calls = AtomicU32::new(0);
        let err = resolve_by_name(
            request_pages(|page| fetch(&calls, page)),
            "missing",
            "Service instance",
            NameResolution::FirstMatch,
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Service instance missing does not exist");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_collection_is_not_found() {
        let items = futures_util::stream::iter(Vec::<Result<Org, cfops_api::Error>>::new());
        let err = resolve_by_name(items, "x", "Space", NameResolution::FirstMatch)
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::NotFound { ref name, .. } if name == "x"));
    }

    #[tokio::test]
    async fn first_match_wins_on_duplicates() {
        let items = futures_util::stream::iter(vec![
            Ok(Org { id: "a", name: "dup" }),
            Ok(Org { id: "b", name: "dup" }),
        ]);
        let org = resolve_by_name(items, "dup", "Space", NameResolution::FirstMatch)
            .await
            .unwrap();

        assert_eq!(org.id, "a");
    }

    #[tokio::test]
    async fn strict_rejects_duplicates() {
        let items = futures_util::stream::iter(vec![
            Ok(Org { id: "a", name: "dup" }),
            Ok(Org { id: "b", name: "other" }),
            Ok(Org { id: "c", name: "dup" }),
        ]);
        let err = resolve_by_name(items, "dup", "Space", NameResolution::Strict)
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Ambiguous { .. }));
    }

    #[tokio::test]
    async fn strict_accepts_unique_name() {
        let items = futures_util::stream::iter(vec![
            Ok(Org { id: "a", name: "one" }),
            Ok(Org { id: "b", name: "two" }),
        ]);
        let org = resolve_by_name(items, "two", "Space", NameResolution::Strict)
            .await
            .unwrap();

        assert_eq!(org.id, "b");
    }

    #[test]
    fn resolution_mode_parses_from_config_strings() {
        assert_eq!("strict".parse::<NameResolution>().unwrap(), NameResolution::Strict);
        assert_eq!(NameResolution::FirstMatch.to_string(), "first-match");
    }
}
