use crate::{
    cursor::{
        CursorBoundary, CursorDecodeError, CursorState, decode_boundary, decode_cursor,
        encode_cursor,
    },
    sort::SortField,
    test_fixtures::Roster,
    traits::EntityKind,
    value::{Value, ValueKind},
};
use proptest::prelude::*;

fn field(name: &str) -> &'static SortField<Roster> {
    Roster::SORT.field(name).expect("fixture field should exist")
}

#[test]
fn boundary_for_accepts_matching_kind() {
    let state = CursorState::new("2").with_value("points", Value::Int(10));
    let boundary = state
        .boundary_for(field("points"))
        .expect("int snapshot should validate for int field");

    assert_eq!(boundary, CursorBoundary::new(Value::Int(10), "2"));
}

#[test]
fn boundary_for_rejects_kind_mismatch() {
    let state = CursorState::new("2").with_value("points", Value::from("ten"));
    let err = state
        .boundary_for(field("points"))
        .expect_err("text snapshot must not validate for int field");

    assert_eq!(
        err,
        CursorDecodeError::TypeMismatch {
            field: "points".to_string(),
            expected: ValueKind::Int,
        }
    );
}

#[test]
fn boundary_for_treats_missing_key_as_null_for_nullable_fields() {
    let state = CursorState::new("c-4");
    let boundary = state
        .boundary_for(field("rating"))
        .expect("missing nullable snapshot should read as null");

    assert_eq!(boundary.value, Value::Null);
}

#[test]
fn boundary_for_rejects_missing_key_for_required_fields() {
    let state = CursorState::new("c-4").with_value("rating", Value::Float(3.5));
    let err = state
        .boundary_for(field("points"))
        .expect_err("cursor from another sort field must not validate");

    assert_eq!(
        err,
        CursorDecodeError::MissingValue {
            field: "points".to_string()
        }
    );
}

#[test]
fn boundary_for_widens_int_into_float_fields() {
    let state = CursorState::new("c-4").with_value("rating", Value::Int(4));
    let boundary = state
        .boundary_for(field("rating"))
        .expect("int snapshot should widen into float field");

    assert_eq!(boundary.value, Value::Int(4));
}

#[test]
fn decode_boundary_composes_decode_and_validation() {
    let token = encode_cursor(&CursorState::new("2").with_value("points", Value::Int(10)));
    let boundary = decode_boundary(&token, field("points")).expect("token should decode");

    assert_eq!(boundary, CursorBoundary::new(Value::Int(10), "2"));
    assert!(decode_boundary(&token, field("name")).is_err());
}

#[test]
fn from_entity_snapshots_only_the_active_field() {
    let row = Roster::new("7", 42).named("Mo").rated(4.5);
    let state = CursorState::from_entity(field("name"), &row);

    assert_eq!(state.id(), "7");
    assert_eq!(state.values().len(), 1);
    assert_eq!(state.value("name"), Some(&Value::from("Mo")));
}

#[test]
fn infinite_float_cursor_is_not_read_as_null() {
    let state = CursorState::new("a").with_value("rating", Value::Float(f64::INFINITY));
    let boundary = decode_boundary(&encode_cursor(&state), field("rating"))
        .expect("infinite rating should validate for a float field");

    assert_eq!(boundary, CursorBoundary::new(Value::Float(f64::INFINITY), "a"));
}

#[test]
fn full_precision_float_cursor_round_trips() {
    let state = CursorState::new("b").with_value("rating", Value::Float(1.344_067_997_014_926_5));

    assert_eq!(decode_cursor(&encode_cursor(&state)), Ok(state));
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>()
            .prop_filter("nan never equals itself", |n| !n.is_nan())
            .prop_map(Value::Float),
        "[a-zA-Z0-9 _\\-\"\\\\]{0,12}".prop_map(Value::Text),
    ]
}

fn arb_state() -> impl Strategy<Value = CursorState> {
    (
        ".{0,16}",
        prop::collection::btree_map("[a-zA-Z_]{1,10}", arb_value(), 0..3),
    )
        .prop_map(|(id, values)| {
            values
                .into_iter()
                .filter(|(key, _)| key != "id")
                .fold(CursorState::new(id), |state, (key, value)| {
                    state.with_value(key, value)
                })
        })
}

proptest! {
    #[test]
    fn cursor_round_trip_is_lossless(state in arb_state()) {
        let decoded = decode_cursor(&encode_cursor(&state));

        prop_assert_eq!(decoded, Ok(state));
    }

    #[test]
    fn decode_cursor_never_panics_on_arbitrary_input(token in ".{0,64}") {
        let _ = decode_cursor(&token);
    }
}
