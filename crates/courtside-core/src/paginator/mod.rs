//! Module: paginator
//! Responsibility: keyset page execution over an entity source.
//! Does not own: sort-field declaration, cursor wire format, or storage.
//! Boundary: `PageRequest` in, `PageResult` or `InternalError` out.


use crate::{
    config::PaginationConfig,
    cursor::{CursorBoundary, CursorState, decode_boundary, encode_cursor},
    error::InternalError,
    obs::{GlobalMetricsSink, MetricsEvent, MetricsSink},
    page::{PageRequest, PageResult},
    sort::{KeysetFilter, KeysetOrder},
    source::{EntitySource, SourceError, SourceQuery},
    traits::EntityKind,
};
use std::{fmt, marker::PhantomData, sync::Arc};
use tokio_util::sync::CancellationToken;

///
/// KeysetPaginator
///
/// Generic keyset paginator for one entity type. Stateless between calls;
/// safe to share across concurrent requests.
///

pub struct KeysetPaginator<E, S> {
    source: S,
    config: PaginationConfig,
    sink: Arc<dyn MetricsSink>,
    _marker: PhantomData<fn() -> E>,
}

impl<E, S> KeysetPaginator<E, S>
where
    E: EntityKind,
    S: EntitySource<E>,
{
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_config(source, PaginationConfig::default())
    }

    #[must_use]
    pub fn with_config(source: S, config: PaginationConfig) -> Self {
        Self {
            source,
            config,
            sink: Arc::new(GlobalMetricsSink),
            _marker: PhantomData,
        }
    }

    /// Route this paginator's metrics events to `sink` instead of the
    /// process-wide counters.
    #[must_use]
    pub fn with_metrics_sink(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub const fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Fetch one page.
    pub async fn get_page(&self, request: PageRequest) -> Result<PageResult<E>, InternalError> {
        self.get_page_with_cancel(request, CancellationToken::new())
            .await
    }

    /// Fetch one page, aborting when `cancel` fires.
    ///
    /// Cursor and sort-field problems never fail the request; source
    /// timeouts, cancellation, and unavailability always do.
    pub async fn get_page_with_cancel(
        &self,
        request: PageRequest,
        cancel: CancellationToken,
    ) -> Result<PageResult<E>, InternalError> {
        self.sink.record(MetricsEvent::PageStart {
            entity_path: E::PATH,
            direction: request.direction,
        });

        let plan = self.plan(&request);
        let rows = self.fetch(plan.query(), &cancel).await?;
        let fetched = rows.len();
        let page = plan.finish(rows)?;

        tracing::debug!(
            entity = E::PATH,
            field = plan.order.field().name(),
            order = ?plan.order.order(),
            direction = ?plan.order.page_direction(),
            limit = plan.limit,
            fetched,
            returned = page.len(),
            has_more = page.has_more(),
            "page served"
        );
        self.sink.record(MetricsEvent::PageFinish {
            entity_path: E::PATH,
            rows_fetched: fetched as u64,
            rows_returned: page.len() as u64,
            has_more: page.has_more(),
        });

        Ok(page)
    }

    // Resolve sort field, order, limit, and cursor boundary for one request.
    // Every recoverable input problem is logged and substituted here.
    fn plan(&self, request: &PageRequest) -> PagePlan<E> {
        let (field, fallback) = E::SORT.resolve_or_default(request.sort_by.as_deref());
        if let Some(err) = fallback {
            tracing::warn!(
                entity = E::PATH,
                requested = %err.requested,
                fallback = field.name(),
                "unknown sort field; using default"
            );
            self.sink.record(MetricsEvent::SortFallback {
                entity_path: E::PATH,
            });
        }

        let limit = self.config.resolve_limit(request.limit);
        if limit.clamped {
            tracing::debug!(
                entity = E::PATH,
                requested = ?request.limit,
                limit = limit.limit,
                "page limit clamped"
            );
            self.sink.record(MetricsEvent::LimitClamped {
                entity_path: E::PATH,
            });
        }

        let order = KeysetOrder::new(
            field,
            request.order.unwrap_or_else(|| field.default_order()),
            request.direction,
        );

        let boundary = request
            .cursor
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .and_then(|token| match decode_boundary(token, field) {
                Ok(boundary) => Some(boundary),
                Err(err) => {
                    tracing::warn!(
                        entity = E::PATH,
                        field = field.name(),
                        error = %err,
                        "cursor rejected; serving first page"
                    );
                    self.sink.record(MetricsEvent::CursorFallback {
                        entity_path: E::PATH,
                    });
                    None
                }
            });

        PagePlan {
            order,
            boundary,
            limit: limit.limit,
        }
    }

    // Run the source query under the fetch deadline and the caller's
    // cancellation token.
    async fn fetch(
        &self,
        query: SourceQuery<E>,
        cancel: &CancellationToken,
    ) -> Result<Vec<E>, InternalError> {
        // The source sees a child token that also fires when this fetch is
        // abandoned on timeout.
        let fetch_cancel = cancel.child_token();
        let _abandon = fetch_cancel.clone().drop_guard();

        let deadline = self.config.fetch_timeout();
        let fetch = tokio::time::timeout(deadline, self.source.execute(query, fetch_cancel));

        let outcome = match cancel.run_until_cancelled(fetch).await {
            None => Err(SourceError::Cancelled),
            Some(Err(_elapsed)) => Err(SourceError::Timeout),
            Some(Ok(result)) => result,
        };

        outcome.map_err(|err| {
            let err = InternalError::from(err);
            tracing::error!(
                entity = E::PATH,
                class = %err.class,
                error = %err.message,
                timeout_ms = self.config.fetch_timeout_ms,
                "entity source fetch failed"
            );
            self.sink.record(MetricsEvent::SourceFailure {
                entity_path: E::PATH,
                class: err.class,
            });

            err
        })
    }
}

impl<E, S> fmt::Debug for KeysetPaginator<E, S>
where
    E: EntityKind,
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeysetPaginator")
            .field("entity", &E::PATH)
            .field("source", &self.source)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

///
/// PagePlan
///
/// Resolved scan for one request: ordering, optional resume boundary, and
/// the effective page size.
///

struct PagePlan<E: 'static> {
    order: KeysetOrder<E>,
    boundary: Option<CursorBoundary>,
    limit: usize,
}

impl<E: EntityKind> PagePlan<E> {
    // Sentinel over-fetch: one row beyond the page reveals whether more exist.
    fn query(&self) -> SourceQuery<E> {
        let query = SourceQuery::new()
            .order_by(self.order)
            .take(self.limit.saturating_add(1));

        match &self.boundary {
            Some(boundary) => query.filter(KeysetFilter::new(self.order, boundary.clone())),
            None => query,
        }
    }

    // Trim the sentinel, derive cursors from scan order, then restore
    // nominal display order.
    fn finish(&self, mut rows: Vec<E>) -> Result<PageResult<E>, InternalError> {
        let fetched = rows.len();
        let take = self.limit.saturating_add(1);
        if fetched > take {
            return Err(InternalError::paginator_invariant(format!(
                "entity source returned {fetched} rows for take({take})"
            )));
        }

        let has_more = fetched == take;
        rows.truncate(self.limit);

        let field = self.order.field();
        let cursor_for = |row: &E| encode_cursor(&CursorState::from_entity(field, row));

        let next_cursor = if has_more {
            rows.last().map(cursor_for)
        } else {
            None
        };
        let prev_cursor = if self.boundary.is_some() {
            rows.first().map(cursor_for)
        } else {
            None
        };

        if self.order.page_direction().is_previous() {
            rows.reverse();
        }

        Ok(PageResult::new(rows, next_cursor, prev_cursor, has_more))
    }
}
