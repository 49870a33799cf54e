//! Cursor codec.
//!
//! Owns the opaque wire-token format: URL-safe base64 (no padding) of a UTF-8
//! JSON object holding `id` plus whichever sort-field values were active,
//! e.g. `{"id":"p-123","points":4200}`. Decoding accepts the standard
//! alphabet and padded input as well.

use crate::{
    cursor::CursorState,
    sort::ID_FIELD,
    value::{Value, ValueKind},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde_json::{Map as JsonMap, Value as JsonValue};
use thiserror::Error as ThisError;

/// Decode bound for untrusted cursor token input.
pub const MAX_CURSOR_TOKEN_LEN: usize = 8 * 1024;

///
/// CursorDecodeError
///
/// Malformed, truncated, foreign, or semantically invalid cursor token.
/// Callers recover by treating the request as a first-page request.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CursorDecodeError {
    #[error("cursor token is empty")]
    Empty,

    #[error("cursor token exceeds max length: {len} chars (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("cursor token is not valid base64: {reason}")]
    InvalidBase64 { reason: String },

    #[error("cursor payload is not valid json: {reason}")]
    InvalidJson { reason: String },

    #[error("cursor payload must be a json object")]
    NotAnObject,

    #[error("cursor payload is missing 'id'")]
    MissingId,

    #[error("cursor payload 'id' must be a string")]
    InvalidId,

    #[error("cursor payload value for '{key}' is not a scalar")]
    UnsupportedValue { key: String },

    #[error("cursor payload has no value for non-nullable field '{field}'")]
    MissingValue { field: String },

    #[error("cursor payload value for '{field}' is not of kind {expected}")]
    TypeMismatch { field: String, expected: ValueKind },
}

/// Encode cursor state as an opaque token.
///
/// A snapshot key named `id` is shadowed by the row id.
#[must_use]
pub fn encode_cursor(state: &CursorState) -> String {
    let mut object = JsonMap::new();
    for (field, value) in state.values() {
        value.insert_into(field, &mut object);
    }
    object.insert(
        ID_FIELD.to_string(),
        JsonValue::String(state.id().to_string()),
    );

    URL_SAFE_NO_PAD.encode(JsonValue::Object(object).to_string())
}

/// Decode an opaque token into cursor state.
///
/// The token may include surrounding whitespace, which is trimmed.
pub fn decode_cursor(token: &str) -> Result<CursorState, CursorDecodeError> {
    let token = token.trim();

    if token.is_empty() {
        return Err(CursorDecodeError::Empty);
    }

    if token.len() > MAX_CURSOR_TOKEN_LEN {
        return Err(CursorDecodeError::TooLong {
            len: token.len(),
            max: MAX_CURSOR_TOKEN_LEN,
        });
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(normalize_alphabet(token))
        .map_err(|err| CursorDecodeError::InvalidBase64 {
            reason: err.to_string(),
        })?;

    let json: JsonValue =
        serde_json::from_slice(&bytes).map_err(|err| CursorDecodeError::InvalidJson {
            reason: err.to_string(),
        })?;
    let JsonValue::Object(mut object) = json else {
        return Err(CursorDecodeError::NotAnObject);
    };

    let id = match object.remove(ID_FIELD) {
        Some(JsonValue::String(id)) => id,
        Some(_) => return Err(CursorDecodeError::InvalidId),
        None => return Err(CursorDecodeError::MissingId),
    };

    let mut state = CursorState::new(id);
    for (key, json) in object {
        let Some(value) = Value::from_json(&json) else {
            return Err(CursorDecodeError::UnsupportedValue { key });
        };
        state = state.with_value(key, value);
    }

    Ok(state)
}

// Fold the standard alphabet and padding into the URL-safe unpadded form.
fn normalize_alphabet(token: &str) -> String {
    token
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

///
/// TESTS
///
