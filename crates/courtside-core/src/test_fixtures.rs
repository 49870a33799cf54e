use crate::{
    direction::OrderDirection,
    sort::{SortField, SortTable},
    traits::EntityKind,
    value::{Value, ValueKind},
};

///
/// Roster
///
/// Minimal player-shaped entity used across engine tests.
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Roster {
    pub(crate) id: String,
    pub(crate) points: i64,
    pub(crate) name: String,
    pub(crate) rating: Option<f64>,
}

impl Roster {
    pub(crate) fn new(id: &str, points: i64) -> Self {
        Self {
            id: id.to_string(),
            points,
            name: format!("player-{id}"),
            rating: None,
        }
    }

    pub(crate) fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub(crate) const fn rated(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }
}

const ROSTER_SORT_FIELDS: &[SortField<Roster>] = &[
    SortField::new(
        "points",
        ValueKind::Int,
        OrderDirection::Desc,
        |row: &Roster| Value::Int(row.points),
    ),
    SortField::new(
        "name",
        ValueKind::Text,
        OrderDirection::Asc,
        |row: &Roster| Value::Text(row.name.clone()),
    ),
    SortField::nullable(
        "rating",
        ValueKind::Float,
        OrderDirection::Desc,
        |row: &Roster| Value::from_option(row.rating),
    ),
];

impl EntityKind for Roster {
    const PATH: &'static str = "test::roster";
    const SORT: SortTable<Self> = SortTable::new("roster", ROSTER_SORT_FIELDS);

    fn id(&self) -> &str {
        &self.id
    }
}

/// Ids of a slice of rows, in order.
pub(crate) fn ids(rows: &[Roster]) -> Vec<&str> {
    rows.iter().map(|row| row.id.as_str()).collect()
}

/// The three-row scenario: A(10,"1"), B(10,"2"), C(5,"3").
pub(crate) fn tie_break_rows() -> Vec<Roster> {
    vec![
        Roster::new("1", 10),
        Roster::new("2", 10),
        Roster::new("3", 5),
    ]
}

/// `count` rows with heavily duplicated point values.
pub(crate) fn duplicate_heavy_rows(count: usize) -> Vec<Roster> {
    (0..count)
        .map(|i| {
            let points = i64::try_from(i % 4).unwrap_or_default() * 10;
            let row = Roster::new(&format!("p-{i:03}"), points);
            if i % 3 == 0 {
                row
            } else {
                row.rated(f64::from(u32::try_from(i % 5).unwrap_or_default()))
            }
        })
        .collect()
}
