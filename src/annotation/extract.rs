//! Multi-call extraction from a complete model output.
//!
//! Unlike [`classify`](super::classify), which reads one transcript entry,
//! this walks an entire output and returns every call in document order.
//! Current-format blocks take precedence; the legacy `<call:{...}>` encoding
//! is only scanned when no `<function_call>` marker is present at all.

use super::classifier::{
    classify_current_call, decode_legacy_call, legacy_payload_span, FUNCTION_CALL_CLOSE,
    FUNCTION_CALL_OPEN, LEGACY_CALL_MARKER,
};
use super::coerce;
use super::types::{Classification, FunctionCallRecord, Parameter, RawParameters};
use memchr::memmem;

/// Extract every function call contained in `output`.
///
/// Blocks that lack a platform or function, and legacy payloads that fail to
/// decode, are skipped.
#[must_use]
pub fn extract_all_calls(output: &str) -> Vec<FunctionCallRecord> {
    let bytes = output.as_bytes();
    if memmem::find(bytes, FUNCTION_CALL_OPEN.as_bytes()).is_some() {
        return extract_current_blocks(output);
    }
    if memmem::find(bytes, LEGACY_CALL_MARKER.as_bytes()).is_some() {
        tracing::debug!("no <function_call> blocks; scanning legacy <call: payloads");
        return extract_legacy_calls(output);
    }
    Vec::new()
}

fn extract_current_blocks(output: &str) -> Vec<FunctionCallRecord> {
    let bytes = output.as_bytes();
    let mut calls = Vec::new();
    let mut cursor = 0usize;

    while let Some(open_rel) = memmem::find(&bytes[cursor..], FUNCTION_CALL_OPEN.as_bytes()) {
        let block_start = cursor + open_rel;
        let content_start = block_start + FUNCTION_CALL_OPEN.len();
        let Some(close_rel) = memmem::find(&bytes[content_start..], FUNCTION_CALL_CLOSE.as_bytes())
        else {
            tracing::warn!("unterminated <function_call> block at byte {block_start}; skipping");
            break;
        };
        let block_end = content_start + close_rel + FUNCTION_CALL_CLOSE.len();
        let block = &output[block_start..block_end];

        match classify_current_call(block) {
            Some(Classification::Call {
                platform,
                function,
                parameters,
            }) => {
                let parameters = match parameters {
                    RawParameters::Tagged(raw) => raw
                        .into_iter()
                        .map(|param| Parameter::new(param.name.trim(), coerce(param.value)))
                        .collect(),
                    RawParameters::Decoded(decoded) => decoded,
                };
                calls.push(FunctionCallRecord {
                    platform: platform.into_owned(),
                    function: function.into_owned(),
                    parameters,
                });
            }
            _ => {
                tracing::warn!(
                    "skipping <function_call> block without platform or function: {}",
                    preview(block)
                );
            }
        }

        cursor = block_end;
    }

    calls
}

fn extract_legacy_calls(output: &str) -> Vec<FunctionCallRecord> {
    let bytes = output.as_bytes();
    let mut calls = Vec::new();
    let mut cursor = 0usize;

    while let Some(marker_rel) = memmem::find(&bytes[cursor..], LEGACY_CALL_MARKER.as_bytes()) {
        let payload_from = cursor + marker_rel + LEGACY_CALL_MARKER.len();
        match legacy_payload_span(output, payload_from) {
            Some(span) => {
                let payload = &output[span.clone()];
                match decode_legacy_call(payload) {
                    Some(call) => calls.push(call),
                    None => {
                        tracing::warn!("skipping undecodable legacy call: {}", preview(payload));
                    }
                }
                cursor = span.end;
            }
            None => {
                tracing::warn!("legacy call marker without a balanced JSON payload");
                cursor = payload_from;
            }
        }
    }

    calls
}

fn preview(text: &str) -> &str {
    const PREVIEW_CHARS: usize = 100;
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
