//! Wire-facing page DTOs.
//!
//! `PageQuery` is the loosely-typed request an HTTP or RPC layer receives;
//! `PageResponse` is the JSON-ready page it sends back.

use courtside_core::{
    direction::{OrderDirection, PageDirection},
    page::{PageRequest, PageResult},
};
use serde::{Deserialize, Serialize};

///
/// PageQuery
///
/// String-typed page request. Unknown `direction` values read as `next`;
/// unknown `order` values fall back to the sort field's default order.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageQuery {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<i64>,
    pub direction: Option<String>,
}

impl PageQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    #[must_use]
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    #[must_use]
    pub fn cursor(mut self, token: impl Into<String>) -> Self {
        self.cursor = Some(token.into());
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    /// Resolve string inputs into an engine request.
    #[must_use]
    pub fn into_request(self) -> PageRequest {
        let direction = self.direction.as_deref().map_or(PageDirection::Next, |label| {
            PageDirection::parse(label).unwrap_or_else(|| {
                tracing::debug!(direction = label, "unknown page direction; using next");
                PageDirection::Next
            })
        });
        let order = self.order.as_deref().and_then(|label| {
            let order = OrderDirection::parse(label);
            if order.is_none() {
                tracing::debug!(order = label, "unknown sort order; using field default");
            }
            order
        });

        PageRequest {
            sort_by: self.sort_by,
            order,
            cursor: self.cursor,
            limit: self.limit,
            direction,
        }
    }
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        query.into_request()
    }
}

///
/// PageResponse
///
/// JSON-ready page: `{ items, nextCursor, prevCursor, hasMore }`.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<E> {
    pub items: Vec<E>,
    pub next_cursor: Option<String>,
    pub prev_cursor: Option<String>,
    pub has_more: bool,
}

impl<E> From<PageResult<E>> for PageResponse<E> {
    fn from(page: PageResult<E>) -> Self {
        let (items, next_cursor, prev_cursor, has_more) = page.into_parts();

        Self {
            items,
            next_cursor,
            prev_cursor,
            has_more,
        }
    }
}

///
/// TESTS
///
