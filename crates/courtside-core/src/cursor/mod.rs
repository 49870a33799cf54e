//! Module: cursor
//! Responsibility: cursor state, boundary validation, and the opaque token codec.
//! Does not own: ordering semantics or source execution.
//! Boundary: everything the client holds between two page requests.

pub(crate) mod codec;

#[cfg(test)]
mod tests;

pub use codec::{CursorDecodeError, MAX_CURSOR_TOKEN_LEN, decode_cursor, encode_cursor};

use crate::{sort::SortField, traits::EntityKind, value::Value};
use std::collections::BTreeMap;

///
/// CursorState
///
/// Decoded cursor payload: the id of the last row in scan order plus a
/// snapshot of the sort-field values it was positioned by.
/// There is no fixed key set; keys absent from the snapshot read as null.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CursorState {
    id: String,
    values: BTreeMap<String, Value>,
}

impl CursorState {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: BTreeMap::new(),
        }
    }

    /// Attach one sort-field value snapshot.
    #[must_use]
    pub fn with_value(mut self, field: impl Into<String>, value: Value) -> Self {
        self.values.insert(field.into(), value);
        self
    }

    /// Snapshot the active sort field of one entity.
    #[must_use]
    pub fn from_entity<E: EntityKind>(field: &SortField<E>, entity: &E) -> Self {
        Self::new(entity.id()).with_value(field.name(), field.value_of(entity))
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw snapshot value for `field`, if the key was present.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    #[must_use]
    pub const fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Validate this state against the active sort field and produce the
    /// boundary the comparator resumes from.
    ///
    /// A missing key or explicit null is accepted only for nullable fields;
    /// a value of the wrong kind is a semantic decode failure.
    pub fn boundary_for<E>(
        &self,
        field: &SortField<E>,
    ) -> Result<CursorBoundary, CursorDecodeError> {
        let value = self.value(field.name()).cloned().unwrap_or(Value::Null);

        if value.is_null() {
            if !field.is_nullable() {
                return Err(CursorDecodeError::MissingValue {
                    field: field.name().to_string(),
                });
            }
        } else if !field.kind().accepts(&value) {
            return Err(CursorDecodeError::TypeMismatch {
                field: field.name().to_string(),
                expected: field.kind(),
            });
        }

        Ok(CursorBoundary {
            value,
            id: self.id.clone(),
        })
    }
}

///
/// CursorBoundary
///
/// Validated `(value, id)` position a scan resumes strictly beyond.
///

#[derive(Clone, Debug, PartialEq)]
pub struct CursorBoundary {
    pub value: Value,
    pub id: String,
}

impl CursorBoundary {
    #[must_use]
    pub fn new(value: Value, id: impl Into<String>) -> Self {
        Self {
            value,
            id: id.into(),
        }
    }
}

/// Decode an opaque token straight into a boundary for the active field.
pub fn decode_boundary<E>(
    token: &str,
    field: &SortField<E>,
) -> Result<CursorBoundary, CursorDecodeError> {
    decode_cursor(token)?.boundary_for(field)
}
