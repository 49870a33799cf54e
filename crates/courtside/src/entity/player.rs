use courtside_core::prelude::*;
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Player
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub points: i64,
    pub rating: Option<f64>,
    pub status: PlayerStatus,
    /// Unix seconds.
    pub joined_at: i64,
}

impl Player {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            points: 0,
            rating: None,
            status: PlayerStatus::Active,
            joined_at: 0,
        }
    }

    #[must_use]
    pub const fn with_points(mut self, points: i64) -> Self {
        self.points = points;
        self
    }

    #[must_use]
    pub const fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: PlayerStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub const fn joined_at(mut self, unix_secs: i64) -> Self {
        self.joined_at = unix_secs;
        self
    }
}

///
/// PlayerStatus
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    #[default]
    #[display("active")]
    Active,
    #[display("injured")]
    Injured,
    #[display("inactive")]
    Inactive,
}

const PLAYER_SORT_FIELDS: &[SortField<Player>] = &[
    SortField::new(
        "points",
        ValueKind::Int,
        OrderDirection::Desc,
        |player: &Player| Value::Int(player.points),
    ),
    SortField::new(
        "name",
        ValueKind::Text,
        OrderDirection::Asc,
        |player: &Player| Value::Text(player.name.clone()),
    ),
    SortField::nullable(
        "rating",
        ValueKind::Float,
        OrderDirection::Desc,
        |player: &Player| Value::from_option(player.rating),
    ),
    SortField::new(
        "joinedAt",
        ValueKind::Int,
        OrderDirection::Desc,
        |player: &Player| Value::Int(player.joined_at),
    ),
    SortField::new(
        "status",
        ValueKind::Text,
        OrderDirection::Asc,
        |player: &Player| Value::Text(player.status.to_string()),
    ),
];

impl EntityKind for Player {
    const PATH: &'static str = "courtside::player";
    const SORT: SortTable<Self> = SortTable::new("player", PLAYER_SORT_FIELDS);

    fn id(&self) -> &str {
        &self.id
    }
}
