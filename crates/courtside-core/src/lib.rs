//! Core runtime for Courtside: scalar values, declarative sort tables, the
//! opaque cursor codec, the entity-source seam, and the generic keyset
//! paginator, plus the ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod cursor;
pub mod direction;
pub mod error;
pub mod obs;
pub mod page;
pub mod paginator;
pub mod sort;
pub mod source;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sources, codecs, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        direction::{OrderDirection, PageDirection},
        page::{PageRequest, PageResult},
        sort::{SortField, SortTable},
        traits::EntityKind,
        value::{Value, ValueKind},
    };
}
