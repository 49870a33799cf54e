use courtside_core::prelude::*;
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Game
///
/// One scheduled pickup game at a court.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub court_id: String,
    pub title: String,
    /// Unix seconds.
    pub starts_at: i64,
    /// 1 (casual) to 5 (competitive); unset for open runs.
    pub skill_level: Option<i64>,
    pub open_spots: u32,
    pub status: GameStatus,
}

impl Game {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        court_id: impl Into<String>,
        title: impl Into<String>,
        starts_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            court_id: court_id.into(),
            title: title.into(),
            starts_at,
            skill_level: None,
            open_spots: 0,
            status: GameStatus::Scheduled,
        }
    }

    #[must_use]
    pub const fn with_skill_level(mut self, level: i64) -> Self {
        self.skill_level = Some(level);
        self
    }

    #[must_use]
    pub const fn with_open_spots(mut self, spots: u32) -> Self {
        self.open_spots = spots;
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: GameStatus) -> Self {
        self.status = status;
        self
    }
}

///
/// GameStatus
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    #[display("scheduled")]
    Scheduled,
    #[display("full")]
    Full,
    #[display("cancelled")]
    Cancelled,
    #[display("finished")]
    Finished,
}

const GAME_SORT_FIELDS: &[SortField<Game>] = &[
    SortField::new(
        "startsAt",
        ValueKind::Int,
        OrderDirection::Asc,
        |game: &Game| Value::Int(game.starts_at),
    ),
    SortField::new(
        "openSpots",
        ValueKind::Int,
        OrderDirection::Desc,
        |game: &Game| Value::from(game.open_spots),
    ),
    SortField::nullable(
        "skillLevel",
        ValueKind::Int,
        OrderDirection::Asc,
        |game: &Game| Value::from_option(game.skill_level),
    ),
    SortField::new(
        "title",
        ValueKind::Text,
        OrderDirection::Asc,
        |game: &Game| Value::Text(game.title.clone()),
    ),
];

impl EntityKind for Game {
    const PATH: &'static str = "courtside::game";
    const SORT: SortTable<Self> = SortTable::new("game", GAME_SORT_FIELDS);

    fn id(&self) -> &str {
        &self.id
    }
}
