//! Domain entities and their declarative sort tables.
//!
//! The first field of each table is the default used when `sortBy` is absent
//! or unrecognized: players by points, games by start time, courts by name.

mod court;
mod game;
mod player;

pub use court::Court;
pub use game::{Game, GameStatus};
pub use player::{Player, PlayerStatus};
