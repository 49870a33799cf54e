use courtside_core::prelude::*;
use serde::{Deserialize, Serialize};

///
/// Court
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    pub id: String,
    pub name: String,
    pub city: String,
    pub rating: Option<f64>,
    pub indoor: bool,
}

impl Court {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            city: city.into(),
            rating: None,
            indoor: false,
        }
    }

    #[must_use]
    pub const fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    #[must_use]
    pub const fn indoor(mut self) -> Self {
        self.indoor = true;
        self
    }
}

const COURT_SORT_FIELDS: &[SortField<Court>] = &[
    SortField::new(
        "name",
        ValueKind::Text,
        OrderDirection::Asc,
        |court: &Court| Value::Text(court.name.clone()),
    ),
    SortField::nullable(
        "rating",
        ValueKind::Float,
        OrderDirection::Desc,
        |court: &Court| Value::from_option(court.rating),
    ),
    SortField::new(
        "city",
        ValueKind::Text,
        OrderDirection::Asc,
        |court: &Court| Value::Text(court.city.clone()),
    ),
    SortField::new(
        "indoor",
        ValueKind::Bool,
        OrderDirection::Desc,
        |court: &Court| Value::Bool(court.indoor),
    ),
];

impl EntityKind for Court {
    const PATH: &'static str = "courtside::court";
    const SORT: SortTable<Self> = SortTable::new("court", COURT_SORT_FIELDS);

    fn id(&self) -> &str {
        &self.id
    }
}
