//! Value coercion for embedded parameter values and result payloads.
//!
//! Only object- or array-shaped text is ever interpreted as JSON. Scalars and
//! prose stay text, so numeric-looking ids survive untouched. Malformed JSON
//! gets exactly one repair attempt (trailing commas) before falling back to
//! the original fragment.

use super::types::CoercedValue;
use crate::json_scan::strip_trailing_commas;
use std::borrow::Cow;

/// Interpret `raw` as a structured value where it looks like one.
///
/// Always returns a value: every failure path yields `raw` unchanged as a
/// JSON string.
#[must_use]
pub fn coerce(raw: &str) -> CoercedValue {
    let trimmed = raw.trim();
    if !should_attempt_json_parse(trimmed) {
        return CoercedValue::String(raw.to_string());
    }

    if let Ok(value) = serde_json::from_str(trimmed) {
        return value;
    }

    let repaired = strip_trailing_commas(trimmed);
    if let Cow::Owned(repaired) = &repaired {
        match serde_json::from_str(repaired) {
            Ok(value) => {
                tracing::debug!("coerced value after trailing-comma repair");
                return value;
            }
            Err(err) => {
                tracing::debug!("repaired value still not JSON: {err}");
            }
        }
    }

    CoercedValue::String(raw.to_string())
}

#[inline]
fn should_attempt_json_parse(trimmed: &str) -> bool {
    matches!(trimmed.as_bytes().first(), Some(b'{' | b'['))
}
