//! Page-number pagination shared by every list endpoint.
//!
//! Cloud Controller list endpoints accept a `page` query parameter and
//! report `total_pages`. [`request_pages`] turns a single-page fetcher into
//! one lazy, ordered stream of items: page 1 first, then `2..=total_pages`
//! strictly in sequence. A page is only requested once the consumer has
//! pulled every item of the previous one, so a consumer that stops early
//! (e.g. a name lookup that found its match) never pays for later pages.

use std::future::Future;

use async_stream::try_stream;
use futures_util::{Stream, TryStreamExt};
use tracing::trace;

use crate::error::Error;

/// One page of a list response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    current_page: u32,
    total_pages: u32,
}

impl<T> Page<T> {
    /// Build a page, normalising the counters so that
    /// `1 <= current_page <= total_pages` always holds.
    ///
    /// Empty collections are reported with `total_pages: 0`; that becomes a
    /// single (empty) page.
    pub fn new(items: Vec<T>, current_page: u32, total_pages: u32) -> Self {
        let current_page = current_page.max(1);
        Self {
            items,
            current_page,
            total_pages: total_pages.max(current_page),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn is_last(&self) -> bool {
        self.current_page >= self.total_pages
    }

    /// Transform every item, keeping the page counters.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
        }
    }
}

/// Flatten a paged collection into one lazy stream of items.
///
/// `fetch` is called with page numbers starting at 1. The total page count
/// is taken from the first response only. Errors from `fetch` end the
/// stream and are yielded unchanged; nothing is retried. Each call starts
/// over from page 1.
pub fn request_pages<T, F, Fut>(fetch: F) -> impl Stream<Item = Result<T, Error>>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, Error>>,
{
    try_stream! {
        let first = fetch(1).await?;
        let total_pages = first.total_pages();
        trace!(total_pages, "fetched page 1");

        for item in first.into_items() {
            yield item;
        }

        for page in 2..=total_pages {
            let next = fetch(page).await?;
            trace!(page, total_pages, "fetched page");
            for item in next.into_items() {
                yield item;
            }
        }
    }
}

/// Collect every page into a single `Vec<T>`.
pub async fn collect_pages<T, F, Fut>(fetch: F) -> Result<Vec<T>, Error>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, Error>>,
{
    request_pages(fetch).try_collect().await
}
