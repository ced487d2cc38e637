use super::*;
use serde_json::json;

fn call_parts<'a>(c: &'a Classification<'a>) -> (&'a str, &'a str, &'a RawParameters<'a>) {
    match c {
        Classification::Call {
            platform,
            function,
            parameters,
        } => (platform.as_ref(), function.as_ref(), parameters),
        other => panic!("expected call, got {other:?}"),
    }
}

fn result_parts<'a>(c: &'a Classification<'a>) -> (&'a str, &'a str, &'a str) {
    match c {
        Classification::Result {
            platform,
            function,
            body,
        } => (platform.as_ref(), function.as_ref(), body),
        other => panic!("expected result, got {other:?}"),
    }
}

// -- plain text ---------------------------------------------------------

#[test]
fn classify_plain_text() {
    assert_eq!(classify("Here is your schedule."), Classification::PlainText);
    assert_eq!(classify(""), Classification::PlainText);
}

#[test]
fn classify_error_line_is_plain_text() {
    let text = "Error in gsheets.write_cells: sheet not found";
    assert_eq!(classify(text), Classification::PlainText);
}

// -- current call -------------------------------------------------------

#[test]
fn classify_current_call_with_parameters_in_order() {
    let text = r#"<function_call>
  <platform> gsheets </platform>
  <function>write_cells</function>
  <parameters>
    <parameter name="sheet_name">Sheet1</parameter>
    <parameter name="cells">{"A1": {"value": 1}}</parameter>
    <parameter name="note">multi
line</parameter>
  </parameters>
</function_call>"#;
    let c = classify(text);
    let (platform, function, parameters) = call_parts(&c);
    assert_eq!(platform, "gsheets");
    assert_eq!(function, "write_cells");
    let RawParameters::Tagged(params) = parameters else {
        panic!("expected tagged parameters");
    };
    let names: Vec<&str> = params.iter().map(|p| p.name).collect();
    assert_eq!(names, ["sheet_name", "cells", "note"]);
    assert_eq!(params[1].value, r#"{"A1": {"value": 1}}"#);
    assert_eq!(params[2].value, "multi\nline");
}

#[test]
fn classify_current_call_without_parameters() {
    let text = "<function_call><platform>io</platform><function>continue</function><parameters></parameters></function_call>";
    let c = classify(text);
    let (platform, function, parameters) = call_parts(&c);
    assert_eq!((platform, function), ("io", "continue"));
    assert!(parameters.is_empty());
}

#[test]
fn classify_current_call_embedded_in_prose() {
    let text = "Sure, creating it now.\n<function_call><platform>cal</platform>\
                <function>create</function></function_call>\nDone.";
    let c = classify(text);
    assert_eq!(call_parts(&c).0, "cal");
}

#[test]
fn classify_current_call_uses_first_platform_region() {
    let text = "<function_call><platform>a</platform><platform>b</platform>\
                <function>f</function></function_call>";
    let c = classify(text);
    assert_eq!(call_parts(&c).0, "a");
}

#[test]
fn classify_current_call_missing_function_is_plain_text() {
    let text = "<function_call><platform>cal</platform></function_call>";
    assert_eq!(classify(text), Classification::PlainText);
}

#[test]
fn classify_current_call_blank_platform_is_plain_text() {
    let text = "<function_call><platform>  \n </platform><function>f</function></function_call>";
    assert_eq!(classify(text), Classification::PlainText);
}

#[test]
fn classify_incomplete_current_call_does_not_fall_through() {
    // A prose result in the same entry is not consulted once the call marker
    // owns the text.
    let text = "<function_call><platform></platform></function_call> Result of a.b: 1";
    assert_eq!(classify(text), Classification::PlainText);
}

#[test]
fn classify_parameter_without_name_is_skipped() {
    let text = "<function_call><platform>p</platform><function>f</function>\
                <parameter>orphan</parameter><parameter name=\"x\">1</parameter></function_call>";
    let c = classify(text);
    let RawParameters::Tagged(params) = call_parts(&c).2 else {
        panic!("expected tagged parameters");
    };
    assert_eq!(params.len(), 1);
    assert_eq!(params[0], RawParameter { name: "x", value: "1" });
}

// -- current result -----------------------------------------------------

#[test]
fn classify_current_result() {
    let text = "<function_result>\n  <platform>gsheets</platform>\n  \
                <function>read_sheet</function>\n  <result>[[1,2],[3,4]]</result>\n</function_result>";
    let c = classify(text);
    assert_eq!(
        result_parts(&c),
        ("gsheets", "read_sheet", "[[1,2],[3,4]]")
    );
}

#[test]
fn classify_current_result_short_tag_fallback() {
    let text = "<function_result><platform>cal</platform><function>list</function>\
                <r>{\"events\": []}</r></function_result>";
    let c = classify(text);
    assert_eq!(result_parts(&c).2, "{\"events\": []}");
}

#[test]
fn classify_current_result_prefers_primary_region() {
    let text = "<function_result><platform>p</platform><function>f</function>\
                <r>short</r><result>long</result></function_result>";
    let c = classify(text);
    assert_eq!(result_parts(&c).2, "long");
}

#[test]
fn classify_current_result_missing_body_is_empty() {
    let text = "<function_result><platform>p</platform><function>f</function></function_result>";
    let c = classify(text);
    assert_eq!(result_parts(&c), ("p", "f", ""));
}

#[test]
fn classify_current_result_missing_platform_is_plain_text() {
    let text = "<function_result><function>f</function><result>1</result></function_result>";
    assert_eq!(classify(text), Classification::PlainText);
}

#[test]
fn classify_call_marker_wins_over_result_marker() {
    let text = "<function_result><platform>r</platform><function>rf</function></function_result>\
                <function_call><platform>c</platform><function>cf</function></function_call>";
    // Priority decides, not position: the call marker outranks the result.
    assert!(matches!(classify(text), Classification::Call { .. }));
}

// -- legacy bracket call ------------------------------------------------

#[test]
fn classify_legacy_bracket_call() {
    let text = r#"<call:{"platform":"p","function":"f","parameters":[]}>"#;
    let c = classify(text);
    let (platform, function, parameters) = call_parts(&c);
    assert_eq!((platform, function), ("p", "f"));
    assert_eq!(parameters, &RawParameters::Decoded(Vec::new()));
}

#[test]
fn classify_legacy_bracket_call_with_named_parameters() {
    let text = r#"Calling now <call:{"platform":"cal","function":"create","parameters":[{"name":"title","value":"Standup"},{"name":"attendees","value":["a","b"]}]}> ok"#;
    let c = classify(text);
    let RawParameters::Decoded(params) = call_parts(&c).2 else {
        panic!("expected decoded parameters");
    };
    assert_eq!(params[0], Parameter::new("title", json!("Standup")));
    assert_eq!(params[1], Parameter::new("attendees", json!(["a", "b"])));
}

#[test]
fn classify_legacy_bracket_call_tolerates_angle_bracket_in_values() {
    let text = r#"<call:{"platform":"math","function":"cmp","parameters":[{"name":"expr","value":"a > b"}]}>"#;
    let c = classify(text);
    assert_eq!(call_parts(&c).1, "cmp");
}

#[test]
fn classify_legacy_bracket_call_parameter_map() {
    let text = r#"<call:{"platform":"p","function":"f","parameters":{"b":2,"a":1}}>"#;
    let c = classify(text);
    let RawParameters::Decoded(params) = call_parts(&c).2 else {
        panic!("expected decoded parameters");
    };
    let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["b", "a"]);
}

#[test]
fn classify_legacy_bracket_call_malformed_is_plain_text() {
    assert_eq!(
        classify(r#"<call:{"platform":"p","function":"f",}>"#),
        Classification::PlainText
    );
    assert_eq!(classify("<call:not json>"), Classification::PlainText);
    assert_eq!(
        classify(r#"<call:{"platform":"p"}>"#),
        Classification::PlainText
    );
}

// -- legacy prose result ------------------------------------------------

#[test]
fn classify_legacy_prose_result() {
    let c = classify("Result of cal.create: {\"id\":5}");
    assert_eq!(result_parts(&c), ("cal", "create", "{\"id\":5}"));
}

#[test]
fn classify_legacy_prose_result_stops_at_line_end() {
    let c = classify("Result of gsheets.read_sheet: ok\nnext line");
    assert_eq!(result_parts(&c), ("gsheets", "read_sheet", "ok"));
}

#[test]
fn classify_legacy_prose_result_platform_ends_at_first_dot() {
    let c = classify("Result of a.b.c: done");
    assert_eq!(result_parts(&c), ("a", "b.c", "done"));
}

#[test]
fn classify_legacy_prose_result_trims_fields() {
    let c = classify("Result of  cal.create: 5");
    assert_eq!(result_parts(&c), ("cal", "create", "5"));
}

#[test]
fn classify_legacy_prose_result_blank_platform_is_plain_text() {
    assert_eq!(classify("Result of  .create: 5"), Classification::PlainText);
}

#[test]
fn classify_legacy_prose_result_without_pattern_is_plain_text() {
    assert_eq!(
        classify("Result of the meeting was positive."),
        Classification::PlainText
    );
}

// -- legacy prose call --------------------------------------------------

#[test]
fn classify_legacy_prose_call() {
    let text = r#"Function Call: gsheets.write_cells with parameters: [{"name":"cells","value":{"A1":1}}]"#;
    let c = classify(text);
    let (platform, function, parameters) = call_parts(&c);
    assert_eq!((platform, function), ("gsheets", "write_cells"));
    assert_eq!(
        parameters,
        &RawParameters::Decoded(vec![Parameter::new("cells", json!({"A1": 1}))])
    );
}

#[test]
fn classify_legacy_prose_call_bad_params_is_empty_list() {
    let text = "Function Call: cal.list with parameters: {oops";
    let c = classify(text);
    let (platform, function, parameters) = call_parts(&c);
    assert_eq!((platform, function), ("cal", "list"));
    assert!(parameters.is_empty());
}

#[test]
fn classify_legacy_prose_call_non_array_params_is_empty_list() {
    let text = r#"Function Call: cal.list with parameters: {"a":1}"#;
    let c = classify(text);
    assert!(call_parts(&c).2.is_empty());
}

#[test]
fn classify_legacy_prose_call_positional_parameters() {
    let text = r#"Function Call: math.add with parameters: [1, 2]"#;
    let c = classify(text);
    assert_eq!(
        call_parts(&c).2,
        &RawParameters::Decoded(vec![
            Parameter::new("0", json!(1)),
            Parameter::new("1", json!(2)),
        ])
    );
}

#[test]
fn classify_legacy_prose_call_blank_platform_is_plain_text() {
    assert_eq!(
        classify("Function Call:  .x with parameters: []"),
        Classification::PlainText
    );
}

#[test]
fn classify_legacy_prose_call_trims_fields() {
    let c = classify("Function Call:  cal .list with parameters: []");
    let (platform, function, parameters) = call_parts(&c);
    assert_eq!((platform, function), ("cal", "list"));
    assert!(parameters.is_empty());
}

#[test]
fn prose_call_extractor_refuses_current_format_text() {
    let text = "Function Call: a.b with parameters: [] <function_call>";
    assert_eq!(extract_prose_call(text), None);
}

// -- helpers ------------------------------------------------------------

#[test]
fn classify_current_call_helper_requires_marker() {
    assert!(classify_current_call("<platform>io</platform><function>end</function>").is_none());
    assert!(classify_current_call(
        "<function_call><platform>io</platform><function>end</function></function_call>"
    )
    .is_some());
}

#[test]
fn legacy_parameters_named_without_value_defaults_to_null() {
    let params = legacy_parameters(json!([{"name": "flag"}]));
    assert_eq!(params, vec![Parameter::new("flag", serde_json::Value::Null)]);
}

#[test]
fn legacy_parameters_scalar_payload_is_empty() {
    assert!(legacy_parameters(json!("nope")).is_empty());
    assert!(legacy_parameters(serde_json::Value::Null).is_empty());
}
