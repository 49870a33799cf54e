use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// OrderDirection
///
/// Nominal sort direction requested for the primary field.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Apply this direction to one ascending base ordering.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// Parse `asc`/`ascending`/`desc`/`descending`, case-insensitively.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();

        if label.eq_ignore_ascii_case("asc") || label.eq_ignore_ascii_case("ascending") {
            Some(Self::Asc)
        } else if label.eq_ignore_ascii_case("desc") || label.eq_ignore_ascii_case("descending") {
            Some(Self::Desc)
        } else {
            None
        }
    }
}

///
/// PageDirection
///
/// Which way a page request walks away from its cursor.
/// `Previous` scans the inverse ordering; results are always returned in
/// nominal display order.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageDirection {
    #[default]
    Next,
    Previous,
}

impl PageDirection {
    #[must_use]
    pub const fn is_previous(self) -> bool {
        matches!(self, Self::Previous)
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Next => Self::Previous,
            Self::Previous => Self::Next,
        }
    }

    /// Parse `next`/`previous`/`prev`, case-insensitively.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();

        if label.eq_ignore_ascii_case("next") {
            Some(Self::Next)
        } else if label.eq_ignore_ascii_case("previous") || label.eq_ignore_ascii_case("prev") {
            Some(Self::Previous)
        } else {
            None
        }
    }
}

///
/// TESTS
///
