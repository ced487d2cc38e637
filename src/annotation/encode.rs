//! Writers for the current annotation format.
//!
//! Output is what the upstream call loop appends to `call_responses`, so it
//! round-trips through [`classify`](super::classify). Values are written
//! unescaped: JSON parameter bodies go between the tags verbatim.

use super::types::{CoercedValue, FunctionCallRecord};
use std::fmt::Write as _;

/// Compact `io.continue` control call.
pub const CONTINUE_CALL: &str = "<function_call><platform>io</platform><function>continue</function><parameters></parameters></function_call>";

/// Compact `io.end` control call.
pub const END_CALL: &str =
    "<function_call><platform>io</platform><function>end</function><parameters></parameters></function_call>";

/// Render a call record as a `<function_call>` block.
#[must_use]
pub fn format_function_call(call: &FunctionCallRecord) -> String {
    let mut parameters_xml = String::new();
    for param in &call.parameters {
        let _ = writeln!(
            parameters_xml,
            "    <parameter name=\"{}\">{}</parameter>",
            param.name,
            value_text(&param.value)
        );
    }

    format!(
        "<function_call>\n  <platform>{}</platform>\n  <function>{}</function>\n  <parameters>\n{parameters_xml}  </parameters>\n</function_call>",
        call.platform, call.function
    )
}

/// Render a function result as a `<function_result>` block.
///
/// Objects and arrays are written as compact JSON. A string that already
/// holds JSON is re-serialized compactly; any other string is kept verbatim.
#[must_use]
pub fn format_function_result(platform: &str, function: &str, result: &CoercedValue) -> String {
    let result_text = match result {
        CoercedValue::String(text) => match serde_json::from_str::<CoercedValue>(text) {
            Ok(parsed) => compact_json(&parsed),
            Err(_) => text.clone(),
        },
        other => value_text(other),
    };

    format!(
        "<function_result>\n  <platform>{platform}</platform>\n  <function>{function}</function>\n  <result>{result_text}</result>\n</function_result>"
    )
}

fn value_text(value: &CoercedValue) -> String {
    match value {
        CoercedValue::String(text) => text.clone(),
        other => compact_json(other),
    }
}

fn compact_json(value: &CoercedValue) -> String {
    // Serializing an in-memory `Value` cannot fail.
    serde_json::to_string(value).unwrap_or_default()
}
