//! Annotation classifier: recognises which call/result encoding a transcript
//! entry carries and pulls out its raw fields.
//!
//! Encodings are tried in a fixed priority order. Later, looser patterns can
//! false-positive on text meant for earlier ones, so the order is part of the
//! wire contract:
//!
//! 1. current call (`<function_call>` wrapper)
//! 2. current result (`<function_result>` wrapper)
//! 3. legacy bracket call (`<call:{...}>`)
//! 4. legacy prose result (`Result of p.f: ...`)
//! 5. legacy prose call (`Function Call: p.f with parameters: [...]`)
//!
//! The first encoding whose marker is present owns the entry. When its fields
//! are incomplete the entry is plain text; lower-priority encodings are not
//! consulted.

use super::types::{Classification, FunctionCallRecord, Parameter, RawParameter, RawParameters};
use crate::json_scan::{balanced_end, skip_ws};
use memchr::memmem;
use regex_lite::Regex;
use serde::Deserialize;
use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

pub(crate) const FUNCTION_CALL_OPEN: &str = "<function_call>";
pub(crate) const FUNCTION_CALL_CLOSE: &str = "</function_call>";
const FUNCTION_RESULT_OPEN: &str = "<function_result>";
const PLATFORM_OPEN: &str = "<platform>";
const PLATFORM_CLOSE: &str = "</platform>";
const FUNCTION_OPEN: &str = "<function>";
const FUNCTION_CLOSE: &str = "</function>";
const RESULT_OPEN: &str = "<result>";
const RESULT_CLOSE: &str = "</result>";
const SHORT_RESULT_OPEN: &str = "<r>";
const SHORT_RESULT_CLOSE: &str = "</r>";
pub(crate) const LEGACY_CALL_MARKER: &str = "<call:";
const PROSE_RESULT_MARKER: &str = "Result of";
const PROSE_CALL_MARKER: &str = "Function Call:";

static PARAMETER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<parameter\s+name="([^"]+)">(.*?)</parameter>"#)
        .expect("parameter pattern is valid")
});
static PROSE_RESULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Result of ([^:.]+)\.([^:]+): (.*)").expect("prose result pattern is valid")
});
static PROSE_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Function Call: ([^.]+)\.([^ ]+) with parameters: (.*)")
        .expect("prose call pattern is valid")
});

// ---------------------------------------------------------------------------
// Encoding table
// ---------------------------------------------------------------------------

type Extractor = for<'a> fn(&'a str) -> Option<Classification<'a>>;

struct Encoding {
    name: &'static str,
    marker: &'static str,
    extract: Extractor,
}

const ENCODINGS: &[Encoding] = &[
    Encoding {
        name: "current-call",
        marker: FUNCTION_CALL_OPEN,
        extract: extract_current_call,
    },
    Encoding {
        name: "current-result",
        marker: FUNCTION_RESULT_OPEN,
        extract: extract_current_result,
    },
    Encoding {
        name: "legacy-bracket-call",
        marker: LEGACY_CALL_MARKER,
        extract: extract_bracket_call,
    },
    Encoding {
        name: "legacy-prose-result",
        marker: PROSE_RESULT_MARKER,
        extract: extract_prose_result,
    },
    Encoding {
        name: "legacy-prose-call",
        marker: PROSE_CALL_MARKER,
        extract: extract_prose_call,
    },
];

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Classify one transcript entry.
///
/// Total and side-effect free: every input maps to exactly one
/// [`Classification`], malformed annotations included.
#[must_use]
pub fn classify(text: &str) -> Classification<'_> {
    let Some(encoding) = ENCODINGS
        .iter()
        .find(|encoding| contains(text, encoding.marker))
    else {
        return Classification::PlainText;
    };

    match (encoding.extract)(text) {
        Some(classification) => {
            tracing::debug!(
                "classified entry as {} ({})",
                classification.kind_label(),
                encoding.name
            );
            classification
        }
        None => {
            tracing::debug!(
                "{} marker present but annotation incomplete; treating as plain text",
                encoding.name
            );
            Classification::PlainText
        }
    }
}

/// Current-format call fields, or `None` when the entry is not a complete
/// current-format call.
#[must_use]
pub(crate) fn classify_current_call(text: &str) -> Option<Classification<'_>> {
    if !contains(text, FUNCTION_CALL_OPEN) {
        return None;
    }
    extract_current_call(text)
}

// ---------------------------------------------------------------------------
// Current format
// ---------------------------------------------------------------------------

fn extract_current_call(text: &str) -> Option<Classification<'_>> {
    let (platform, function) = extract_platform_and_function(text)?;
    let parameters = PARAMETER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            Some(RawParameter {
                name: caps.get(1)?.as_str(),
                value: caps.get(2)?.as_str(),
            })
        })
        .collect();

    Some(Classification::Call {
        platform: Cow::Borrowed(platform),
        function: Cow::Borrowed(function),
        parameters: RawParameters::Tagged(parameters),
    })
}

fn extract_current_result(text: &str) -> Option<Classification<'_>> {
    let (platform, function) = extract_platform_and_function(text)?;
    let body = extract_tag_text(text, RESULT_OPEN, RESULT_CLOSE)
        .or_else(|| extract_tag_text(text, SHORT_RESULT_OPEN, SHORT_RESULT_CLOSE))
        .unwrap_or("");

    Some(Classification::Result {
        platform: Cow::Borrowed(platform),
        function: Cow::Borrowed(function),
        body,
    })
}

/// Block-level field extraction shared with multi-call output scanning.
pub(crate) fn extract_platform_and_function(text: &str) -> Option<(&str, &str)> {
    let platform = extract_tag_text(text, PLATFORM_OPEN, PLATFORM_CLOSE)
        .map(str::trim)
        .filter(|platform| !platform.is_empty())?;
    let function = extract_tag_text(text, FUNCTION_OPEN, FUNCTION_CLOSE)
        .map(str::trim)
        .filter(|function| !function.is_empty())?;
    Some((platform, function))
}

/// Body of the first `open ... close` region.
#[inline]
pub(crate) fn extract_tag_text<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let bytes = text.as_bytes();
    let start = memmem::find(bytes, open.as_bytes())?;
    let content_start = start + open.len();
    let end_rel = memmem::find(&bytes[content_start..], close.as_bytes())?;
    text.get(content_start..content_start + end_rel)
}

#[inline]
fn contains(text: &str, marker: &str) -> bool {
    memmem::find(text.as_bytes(), marker.as_bytes()).is_some()
}

// ---------------------------------------------------------------------------
// Legacy formats
// ---------------------------------------------------------------------------

fn extract_bracket_call(text: &str) -> Option<Classification<'_>> {
    let marker = memmem::find(text.as_bytes(), LEGACY_CALL_MARKER.as_bytes())?;
    let span = legacy_payload_span(text, marker + LEGACY_CALL_MARKER.len())?;
    let record = decode_legacy_call(&text[span])?;

    Some(Classification::Call {
        platform: Cow::Owned(record.platform),
        function: Cow::Owned(record.function),
        parameters: RawParameters::Decoded(record.parameters),
    })
}

/// Byte range of the braced JSON payload starting at `from` (leading
/// whitespace allowed).
pub(crate) fn legacy_payload_span(text: &str, from: usize) -> Option<Range<usize>> {
    let bytes = text.as_bytes();
    let open = skip_ws(bytes, from);
    if bytes.get(open) != Some(&b'{') {
        return None;
    }
    let end = balanced_end(bytes, open).ok()?;
    Some(open..end)
}

#[derive(Deserialize)]
struct LegacyCallWire {
    #[serde(default)]
    platform: String,
    #[serde(default)]
    function: String,
    #[serde(default)]
    parameters: serde_json::Value,
}

/// Decode a legacy JSON call payload. Incomplete or malformed payloads yield
/// `None`; the payload is never repaired.
pub(crate) fn decode_legacy_call(payload: &str) -> Option<FunctionCallRecord> {
    let wire: LegacyCallWire = match serde_json::from_str(payload) {
        Ok(wire) => wire,
        Err(err) => {
            tracing::debug!("legacy call payload is not a call object: {err}");
            return None;
        }
    };

    let platform = wire.platform.trim();
    let function = wire.function.trim();
    if platform.is_empty() || function.is_empty() {
        return None;
    }

    Some(FunctionCallRecord {
        platform: platform.to_string(),
        function: function.to_string(),
        parameters: legacy_parameters(wire.parameters),
    })
}

/// Normalise a legacy parameter payload into named parameters.
///
/// `{"name": .., "value": ..}` elements keep their name; anything else is
/// named by its position. Objects map key-by-key in document order.
pub(crate) fn legacy_parameters(value: serde_json::Value) -> Vec<Parameter> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                serde_json::Value::Object(mut fields)
                    if fields.get("name").is_some_and(serde_json::Value::is_string) =>
                {
                    let name = match fields.remove("name") {
                        Some(serde_json::Value::String(name)) => name,
                        _ => index.to_string(),
                    };
                    let value = fields.remove("value").unwrap_or(serde_json::Value::Null);
                    Parameter::new(name, value)
                }
                other => Parameter::new(index.to_string(), other),
            })
            .collect(),
        serde_json::Value::Object(fields) => fields
            .into_iter()
            .map(|(name, value)| Parameter::new(name, value))
            .collect(),
        _ => Vec::new(),
    }
}

fn extract_prose_result(text: &str) -> Option<Classification<'_>> {
    let caps = PROSE_RESULT_RE.captures(text)?;
    let platform = required_field(caps.get(1))?;
    let function = required_field(caps.get(2))?;
    Some(Classification::Result {
        platform: Cow::Borrowed(platform),
        function: Cow::Borrowed(function),
        body: caps.get(3)?.as_str(),
    })
}

fn extract_prose_call(text: &str) -> Option<Classification<'_>> {
    // Current-format text is never re-read through the legacy prose grammar.
    if contains(text, FUNCTION_CALL_OPEN) {
        return None;
    }

    let caps = PROSE_CALL_RE.captures(text)?;
    let platform = required_field(caps.get(1))?;
    let function = required_field(caps.get(2))?;
    let params_text = caps.get(3)?.as_str();
    let parameters = match serde_json::from_str::<serde_json::Value>(params_text) {
        Ok(value @ serde_json::Value::Array(_)) => legacy_parameters(value),
        Ok(_) => {
            tracing::debug!("legacy prose call parameters are not an array");
            Vec::new()
        }
        Err(err) => {
            tracing::debug!("failed to parse legacy prose call parameters: {err}");
            Vec::new()
        }
    };

    Some(Classification::Call {
        platform: Cow::Borrowed(platform),
        function: Cow::Borrowed(function),
        parameters: RawParameters::Decoded(parameters),
    })
}

/// Trimmed capture text; `None` when the group is missing or blank.
fn required_field(capture: Option<regex_lite::Match<'_>>) -> Option<&str> {
    capture
        .map(|m| m.as_str().trim())
        .filter(|field| !field.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
