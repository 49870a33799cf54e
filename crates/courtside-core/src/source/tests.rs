use crate::{
    cursor::CursorBoundary,
    direction::{OrderDirection, PageDirection},
    sort::{KeysetFilter, KeysetOrder},
    source::{EntitySource, MemSource, SourceError, SourceQuery},
    test_fixtures::{Roster, duplicate_heavy_rows, ids, tie_break_rows},
    traits::EntityKind,
    value::Value,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn points_order(direction: OrderDirection) -> KeysetOrder<Roster> {
    let field = Roster::SORT.field("points").expect("points should exist");

    KeysetOrder::new(field, direction, PageDirection::Next)
}

#[test]
fn apply_sorts_then_takes_prefix() {
    let rows = tie_break_rows();
    let query = SourceQuery::new()
        .order_by(points_order(OrderDirection::Asc))
        .take(2);

    let out = query.apply(rows.iter());

    assert_eq!(ids(&out), vec!["3", "1"]);
}

#[test]
fn apply_bounded_sort_matches_full_sort_prefix() {
    let rows = duplicate_heavy_rows(40);
    let order = points_order(OrderDirection::Desc);

    let bounded = SourceQuery::new().order_by(order).take(7).apply(rows.iter());
    let mut full = SourceQuery::new().order_by(order).apply(rows.iter());
    full.truncate(7);

    assert_eq!(bounded, full);
}

#[test]
fn apply_filters_before_ordering() {
    let rows = tie_break_rows();
    let order = points_order(OrderDirection::Desc);
    let query = SourceQuery::new()
        .filter(KeysetFilter::new(
            order,
            CursorBoundary::new(Value::Int(10), "1"),
        ))
        .order_by(order);

    let out = query.apply(rows.iter());

    assert_eq!(ids(&out), vec!["2", "3"]);
}

#[test]
fn apply_take_zero_returns_nothing() {
    let rows = tie_break_rows();
    let out = SourceQuery::new()
        .order_by(points_order(OrderDirection::Asc))
        .take(0)
        .apply(rows.iter());

    assert!(out.is_empty());
}

#[tokio::test]
async fn mem_source_executes_query_against_snapshot() {
    let source = MemSource::from_rows(tie_break_rows());
    let query = SourceQuery::new()
        .order_by(points_order(OrderDirection::Desc))
        .take(2);

    let out = source
        .execute(query, CancellationToken::new())
        .await
        .expect("in-memory fetch should succeed");

    assert_eq!(ids(&out), vec!["1", "2"]);
}

#[tokio::test]
async fn mem_source_honors_cancellation() {
    let source = MemSource::from_rows(tie_break_rows());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = source
        .execute(SourceQuery::new(), cancel)
        .await
        .expect_err("cancelled fetch should fail");

    assert!(matches!(err, SourceError::Cancelled));
}

#[tokio::test]
async fn arc_wrapped_source_delegates() {
    let source = Arc::new(MemSource::from_rows(tie_break_rows()));

    let out = source
        .execute(SourceQuery::new(), CancellationToken::new())
        .await
        .expect("shared source should delegate");

    assert_eq!(out.len(), 3);
}

#[test]
fn snapshots_are_isolated_from_later_writes() {
    let source = MemSource::from_rows(tie_break_rows());
    let before = source.snapshot();

    source.insert(Roster::new("4", 1));
    let replaced = source.upsert(Roster::new("1", 99));
    let removed = source.remove("3");

    assert_eq!(before.len(), 3);
    assert_eq!(replaced.map(|row| row.points), Some(10));
    assert_eq!(removed.map(|row| row.id), Some("3".to_string()));

    let after = source.snapshot();
    assert_eq!(ids(&after), vec!["1", "2", "4"]);
    assert_eq!(after[0].points, 99);
}

#[test]
fn upsert_appends_unknown_ids_and_remove_misses_cleanly() {
    let source = MemSource::<Roster>::new();
    assert!(source.is_empty());

    assert!(source.upsert(Roster::new("a", 1)).is_none());
    assert!(source.remove("zzz").is_none());
    assert_eq!(source.len(), 1);
}
