//! ## Crate layout
//! - `core`: the keyset engine (values, sort tables, cursor codec, entity
//!   sources, paginator, config, observability).
//! - `entity`: players, games, and courts with their sort tables.
//! - `page`: string-typed page queries and JSON-ready page responses.
//! - `service`: per-entity paging endpoints and the `Courtside` data layer.
//! - `error`: the public error type with a stable kind taxonomy.

pub use courtside_core as core;

pub mod entity;
pub mod error;
pub mod page;
pub mod service;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Error, ErrorKind};
pub use service::{Courtside, InMemoryCourtside, Pages};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Courtside, Error, ErrorKind,
        entity::{Court, Game, GameStatus, Player, PlayerStatus},
        page::{PageQuery, PageResponse},
    };
    pub use courtside_core::{config::PaginationConfig, traits::EntityKind as _};
}
