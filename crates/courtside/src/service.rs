//! Module: service
//! Responsibility: the public paging surface for players, games, and courts.
//! Does not own: ordering, cursor protocol, or storage.
//! Boundary: string-typed inputs in, `PageResponse` or public `Error` out.

use crate::{
    Error,
    entity::{Court, Game, Player},
    page::{PageQuery, PageResponse},
};
use courtside_core::{
    config::PaginationConfig,
    obs::MetricsSink,
    paginator::KeysetPaginator,
    source::{EntitySource, MemSource},
    traits::EntityKind,
};
use std::{fmt, sync::Arc};
use tokio_util::sync::CancellationToken;

///
/// Pages
///
/// Paging endpoint for one entity type.
///

pub struct Pages<E, S> {
    paginator: KeysetPaginator<E, S>,
}

impl<E, S> Pages<E, S>
where
    E: EntityKind,
    S: EntitySource<E>,
{
    #[must_use]
    pub fn new(source: S, config: PaginationConfig) -> Self {
        Self {
            paginator: KeysetPaginator::with_config(source, config),
        }
    }

    #[must_use]
    pub fn with_metrics_sink(self, sink: Arc<dyn MetricsSink>) -> Self {
        Self {
            paginator: self.paginator.with_metrics_sink(sink),
        }
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        self.paginator.source()
    }

    /// `getPage(sortBy, cursor, limit, direction)`.
    ///
    /// `direction` is `"next"` or `"previous"`; anything else reads as next.
    pub async fn get_page(
        &self,
        sort_by: &str,
        cursor: Option<&str>,
        limit: i64,
        direction: &str,
    ) -> Result<PageResponse<E>, Error> {
        let mut query = PageQuery::new()
            .sort_by(sort_by)
            .limit(limit)
            .direction(direction);
        query.cursor = cursor.map(str::to_string);

        self.query(query).await
    }

    pub async fn query(&self, query: PageQuery) -> Result<PageResponse<E>, Error> {
        self.query_with_cancel(query, CancellationToken::new())
            .await
    }

    pub async fn query_with_cancel(
        &self,
        query: PageQuery,
        cancel: CancellationToken,
    ) -> Result<PageResponse<E>, Error> {
        let page = self
            .paginator
            .get_page_with_cancel(query.into_request(), cancel)
            .await?;

        Ok(page.into())
    }
}

impl<E, S> fmt::Debug for Pages<E, S>
where
    E: EntityKind,
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pages")
            .field("paginator", &self.paginator)
            .finish()
    }
}

///
/// Courtside
///
/// Application data layer: one paging endpoint per entity.
///

#[derive(Debug)]
pub struct Courtside<P, G, C> {
    players: Pages<Player, P>,
    games: Pages<Game, G>,
    courts: Pages<Court, C>,
}

impl<P, G, C> Courtside<P, G, C>
where
    P: EntitySource<Player>,
    G: EntitySource<Game>,
    C: EntitySource<Court>,
{
    #[must_use]
    pub fn new(players: P, games: G, courts: C, config: PaginationConfig) -> Self {
        Self {
            players: Pages::new(players, config),
            games: Pages::new(games, config),
            courts: Pages::new(courts, config),
        }
    }

    /// Route every endpoint's metrics events to `sink`.
    #[must_use]
    pub fn with_metrics_sink(self, sink: Arc<dyn MetricsSink>) -> Self {
        Self {
            players: self.players.with_metrics_sink(Arc::clone(&sink)),
            games: self.games.with_metrics_sink(Arc::clone(&sink)),
            courts: self.courts.with_metrics_sink(sink),
        }
    }

    #[must_use]
    pub const fn players(&self) -> &Pages<Player, P> {
        &self.players
    }

    #[must_use]
    pub const fn games(&self) -> &Pages<Game, G> {
        &self.games
    }

    #[must_use]
    pub const fn courts(&self) -> &Pages<Court, C> {
        &self.courts
    }

    pub async fn players_page(&self, query: PageQuery) -> Result<PageResponse<Player>, Error> {
        self.players.query(query).await
    }

    pub async fn games_page(&self, query: PageQuery) -> Result<PageResponse<Game>, Error> {
        self.games.query(query).await
    }

    pub async fn courts_page(&self, query: PageQuery) -> Result<PageResponse<Court>, Error> {
        self.courts.query(query).await
    }
}

/// In-process deployment backed by snapshot stores.
pub type InMemoryCourtside =
    Courtside<Arc<MemSource<Player>>, Arc<MemSource<Game>>, Arc<MemSource<Court>>>;

impl InMemoryCourtside {
    /// Empty in-memory stores; populate through each endpoint's `source()`.
    #[must_use]
    pub fn in_memory(config: PaginationConfig) -> Self {
        Self::new(
            Arc::new(MemSource::new()),
            Arc::new(MemSource::new()),
            Arc::new(MemSource::new()),
            config,
        )
    }
}
