//! Module: sort
//! Responsibility: declarative per-entity sort tables and the keyset comparator builder.
//! Does not own: cursor token encoding or source execution.
//! Boundary: turns `(sortBy, order, page direction, boundary)` into an ordering and predicate.

mod order;


pub use order::{KeysetFilter, KeysetOrder, NullsPlacement, OrderKey};

use crate::{
    direction::OrderDirection,
    value::{Value, ValueKind},
};
use std::fmt;
use thiserror::Error as ThisError;

/// Name of the implicit tie-break key appended to every ordering.
pub const ID_FIELD: &str = "id";

///
/// SortField
///
/// One sortable attribute of an entity: its wire name, declared kind,
/// nullability, default direction, and accessor.
///

pub struct SortField<E> {
    name: &'static str,
    kind: ValueKind,
    nullable: bool,
    default_order: OrderDirection,
    accessor: fn(&E) -> Value,
}

impl<E> SortField<E> {
    /// Declare a non-nullable field.
    #[must_use]
    pub const fn new(
        name: &'static str,
        kind: ValueKind,
        default_order: OrderDirection,
        accessor: fn(&E) -> Value,
    ) -> Self {
        Self {
            name,
            kind,
            nullable: false,
            default_order,
            accessor,
        }
    }

    /// Declare a field whose value may be null.
    #[must_use]
    pub const fn nullable(
        name: &'static str,
        kind: ValueKind,
        default_order: OrderDirection,
        accessor: fn(&E) -> Value,
    ) -> Self {
        Self {
            name,
            kind,
            nullable: true,
            default_order,
            accessor,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[must_use]
    pub const fn default_order(&self) -> OrderDirection {
        self.default_order
    }

    /// Read this field's current value from an entity.
    pub fn value_of(&self, entity: &E) -> Value {
        (self.accessor)(entity)
    }

    #[must_use]
    pub fn matches_name(&self, requested: &str) -> bool {
        self.name.eq_ignore_ascii_case(requested.trim())
    }
}

impl<E> Clone for SortField<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for SortField<E> {}

impl<E> fmt::Debug for SortField<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortField")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .field("default_order", &self.default_order)
            .finish_non_exhaustive()
    }
}

///
/// SortTable
///
/// Declarative table of every field an entity may be sorted by.
/// The first entry is the documented default used when `sortBy` is absent
/// or unrecognized.
///

pub struct SortTable<E: 'static> {
    entity: &'static str,
    fields: &'static [SortField<E>],
}

impl<E: 'static> SortTable<E> {
    #[must_use]
    pub const fn new(entity: &'static str, fields: &'static [SortField<E>]) -> Self {
        assert!(!fields.is_empty(), "sort table must declare at least one field");

        Self { entity, fields }
    }

    #[must_use]
    pub const fn entity(&self) -> &'static str {
        self.entity
    }

    #[must_use]
    pub const fn fields(&self) -> &'static [SortField<E>] {
        self.fields
    }

    #[must_use]
    pub const fn default_field(&self) -> &'static SortField<E> {
        let fields = self.fields;

        &fields[0]
    }

    /// Case-insensitive lookup of one declared field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static SortField<E>> {
        let fields = self.fields;

        fields.iter().find(|field| field.matches_name(name))
    }

    /// Resolve a requested sort field.
    ///
    /// `None` resolves to the default field. An unrecognized name is reported
    /// as [`InvalidSortFieldError`], which callers recover from by using
    /// [`Self::default_field`].
    pub fn resolve(
        &self,
        requested: Option<&str>,
    ) -> Result<&'static SortField<E>, InvalidSortFieldError> {
        let Some(requested) = requested.filter(|name| !name.trim().is_empty()) else {
            return Ok(self.default_field());
        };

        self.field(requested)
            .ok_or_else(|| InvalidSortFieldError::new(self.entity, requested))
    }

    /// Resolve a requested sort field, substituting the default on failure.
    #[must_use]
    pub fn resolve_or_default(
        &self,
        requested: Option<&str>,
    ) -> (&'static SortField<E>, Option<InvalidSortFieldError>) {
        match self.resolve(requested) {
            Ok(field) => (field, None),
            Err(err) => (self.default_field(), Some(err)),
        }
    }
}

impl<E: 'static> fmt::Debug for SortTable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortTable")
            .field("entity", &self.entity)
            .field("fields", &self.fields)
            .finish()
    }
}

///
/// InvalidSortFieldError
///
/// Requested `sortBy` is not declared by the entity's sort table.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unknown sort field '{requested}' for '{entity}'")]
pub struct InvalidSortFieldError {
    pub entity: &'static str,
    pub requested: String,
}

impl InvalidSortFieldError {
    pub(crate) fn new(entity: &'static str, requested: &str) -> Self {
        Self {
            entity,
            requested: requested.to_string(),
        }
    }
}
