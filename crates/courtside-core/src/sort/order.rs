use crate::{
    cursor::CursorBoundary,
    direction::{OrderDirection, PageDirection},
    sort::{ID_FIELD, SortField},
    traits::EntityKind,
    value::{Value, canonical_cmp},
};
use std::{cmp::Ordering, fmt};

///
/// NullsPlacement
///
/// Where null primary values land in one scan.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NullsPlacement {
    First,
    Last,
}

///
/// OrderKey
///
/// One `(field, direction)` pair of the scan ordering, in the shape an
/// external ordered-query engine needs to translate it.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OrderKey {
    pub field: &'static str,
    pub direction: OrderDirection,
    pub nulls: NullsPlacement,
}

///
/// KeysetOrder
///
/// Strict total ordering for one page scan.
///
/// The nominal ordering is the primary field in the requested direction with
/// nulls last, then `id` ascending. A `Previous` scan walks the exact reverse
/// of the nominal ordering, so nulls come first and ids descend.
///

pub struct KeysetOrder<E: 'static> {
    field: &'static SortField<E>,
    order: OrderDirection,
    page: PageDirection,
}

impl<E: 'static> KeysetOrder<E> {
    #[must_use]
    pub const fn new(
        field: &'static SortField<E>,
        order: OrderDirection,
        page: PageDirection,
    ) -> Self {
        Self { field, order, page }
    }

    #[must_use]
    pub const fn field(&self) -> &'static SortField<E> {
        self.field
    }

    /// Nominal (display) direction of the primary field.
    #[must_use]
    pub const fn order(&self) -> OrderDirection {
        self.order
    }

    #[must_use]
    pub const fn page_direction(&self) -> PageDirection {
        self.page
    }

    /// Scan keys in priority order: primary field, then the `id` tie-break.
    #[must_use]
    pub const fn keys(&self) -> [OrderKey; 2] {
        let (primary, nulls, id) = if self.page.is_previous() {
            (self.order.reverse(), NullsPlacement::First, OrderDirection::Desc)
        } else {
            (self.order, NullsPlacement::Last, OrderDirection::Asc)
        };

        [
            OrderKey {
                field: self.field.name(),
                direction: primary,
                nulls,
            },
            OrderKey {
                field: ID_FIELD,
                direction: id,
                nulls: NullsPlacement::Last,
            },
        ]
    }

    /// Compare two entities in scan order.
    pub fn compare(&self, left: &E, right: &E) -> Ordering
    where
        E: EntityKind,
    {
        let left_value = self.field.value_of(left);
        let right_value = self.field.value_of(right);

        self.compare_keys(&left_value, left.id(), &right_value, right.id())
    }

    /// Compare one entity against a cursor boundary in scan order.
    pub fn compare_to_boundary(&self, entity: &E, boundary: &CursorBoundary) -> Ordering
    where
        E: EntityKind,
    {
        let value = self.field.value_of(entity);

        self.compare_keys(&value, entity.id(), &boundary.value, &boundary.id)
    }

    // Scan-order comparison of two `(value, id)` keys.
    fn compare_keys(
        &self,
        left: &Value,
        left_id: &str,
        right: &Value,
        right_id: &str,
    ) -> Ordering {
        let nominal = self
            .compare_primary(left, right)
            .then_with(|| left_id.cmp(right_id));

        if self.page.is_previous() {
            nominal.reverse()
        } else {
            nominal
        }
    }

    // Nulls sort last in the nominal order regardless of direction.
    fn compare_primary(&self, left: &Value, right: &Value) -> Ordering {
        match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.order.apply(canonical_cmp(left, right)),
        }
    }
}

impl<E: 'static> Clone for KeysetOrder<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: 'static> Copy for KeysetOrder<E> {}

impl<E: 'static> fmt::Debug for KeysetOrder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeysetOrder")
            .field("field", &self.field.name())
            .field("order", &self.order)
            .field("page", &self.page)
            .finish()
    }
}

///
/// KeysetFilter
///
/// "Strictly beyond the cursor" predicate for one scan.
///
/// Forward ascending scans keep rows with `field > cursor.field`, or an equal
/// field and `id > cursor.id`; descending scans flip the primary inequality.
///

pub struct KeysetFilter<E: 'static> {
    order: KeysetOrder<E>,
    boundary: CursorBoundary,
}

impl<E: 'static> KeysetFilter<E> {
    #[must_use]
    pub const fn new(order: KeysetOrder<E>, boundary: CursorBoundary) -> Self {
        Self { order, boundary }
    }

    #[must_use]
    pub const fn order(&self) -> &KeysetOrder<E> {
        &self.order
    }

    #[must_use]
    pub const fn boundary(&self) -> &CursorBoundary {
        &self.boundary
    }

    /// Whether `entity` lies strictly beyond the boundary in scan order.
    pub fn matches(&self, entity: &E) -> bool
    where
        E: EntityKind,
    {
        self.order.compare_to_boundary(entity, &self.boundary) == Ordering::Greater
    }
}

impl<E: 'static> Clone for KeysetFilter<E> {
    fn clone(&self) -> Self {
        Self {
            order: self.order,
            boundary: self.boundary.clone(),
        }
    }
}

impl<E: 'static> fmt::Debug for KeysetFilter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeysetFilter")
            .field("order", &self.order)
            .field("boundary", &self.boundary)
            .finish()
    }
}
