use callview::annotation::{
    annotate, annotate_entries, classify, coerce, extract_all_calls, filter_control_calls,
    format_function_call, Annotation, Classification, FunctionCallRecord, FunctionResultRecord,
    Parameter, CONTINUE_CALL, END_CALL,
};
use serde_json::json;

fn call_text(platform: &str, function: &str, params: &[(&str, &str)]) -> String {
    let params: String = params
        .iter()
        .map(|(name, value)| format!("<parameter name=\"{name}\">{value}</parameter>"))
        .collect();
    format!(
        "<function_call><platform>{platform}</platform><function>{function}</function><parameters>{params}</parameters></function_call>"
    )
}

#[test]
fn test_unmarked_text_is_plain_and_verbatim() {
    for text in [
        "",
        "Hello there.",
        "  {\"looks\": \"like json\"}  ",
        "[1, 2, 3]",
        "Result is 42",
        "Function call pending",
    ] {
        assert!(matches!(classify(text), Classification::PlainText), "{text:?}");
        assert_eq!(annotate(text), Annotation::PlainText(text.to_string()));
    }
}

#[test]
fn test_current_call_preserves_parameter_order() {
    let text = call_text(
        "cal",
        "create_event",
        &[("title", "Standup"), ("attendees", "[\"a\", \"b\"]"), ("all_day", "false")],
    );
    let Annotation::Call(call) = annotate(&text) else {
        panic!("expected call");
    };
    let names: Vec<&str> = call.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["title", "attendees", "all_day"]);
    assert_eq!(call.parameters[1].value, json!(["a", "b"]));
    // Scalars stay text.
    assert_eq!(call.parameters[2].value, json!("false"));
}

#[test]
fn test_empty_platform_or_function_is_plain_text() {
    let cases = [
        call_text("", "f", &[]),
        call_text("p", "   ", &[]),
        "<function_result><platform> </platform><function>f</function><result>1</result></function_result>".to_string(),
        "<function_result><platform>p</platform><function></function><result>1</result></function_result>".to_string(),
    ];
    for text in &cases {
        assert!(matches!(classify(text), Classification::PlainText), "{text}");
    }
}

#[test]
fn test_coerce_scenarios() {
    assert_eq!(coerce("{\"a\":1,}"), json!({"a": 1}));
    assert_eq!(coerce("{not json"), json!("{not json"));
    assert_eq!(coerce("42"), json!("42"));
}

#[test]
fn test_legacy_bracket_call_with_empty_parameters() {
    let text = r#"<call:{"platform":"p","function":"f","parameters":[]}>"#;
    assert_eq!(
        annotate(text),
        Annotation::Call(FunctionCallRecord {
            platform: "p".into(),
            function: "f".into(),
            parameters: Vec::new(),
        })
    );
}

#[test]
fn test_legacy_prose_result() {
    assert_eq!(
        annotate("Result of cal.create: {\"id\":5}"),
        Annotation::Result(FunctionResultRecord {
            platform: "cal".into(),
            function: "create".into(),
            result: json!({"id": 5}),
        })
    );
}

#[test]
fn test_filter_control_calls_scenario() {
    let other = call_text("cal", "list", &[]);
    let entries = vec![
        CONTINUE_CALL.to_string(),
        "Thinking about it.".to_string(),
        END_CALL.to_string(),
        other.clone(),
    ];
    assert_eq!(filter_control_calls(&entries), ["Thinking about it.", other.as_str()]);
}

#[test]
fn test_annotate_entries_full_turn() {
    let entries = vec![
        call_text("gsheets", "read_sheet", &[("sheet_name", "Sheet1")]),
        CONTINUE_CALL.to_string(),
        "<function_result><platform>gsheets</platform><function>read_sheet</function><result>{\"rows\": [[1, 2],]}</result></function_result>".to_string(),
        "Here is the sheet.".to_string(),
        END_CALL.to_string(),
    ];
    let annotations = annotate_entries(&entries);
    assert_eq!(annotations.len(), 3);
    assert!(matches!(&annotations[0], Annotation::Call(call) if call.qualified_name() == "gsheets.read_sheet"));
    assert!(matches!(
        &annotations[1],
        Annotation::Result(result) if result.result == json!({"rows": [[1, 2]]})
    ));
    assert_eq!(annotations[2], Annotation::PlainText("Here is the sheet.".into()));
}

#[test]
fn test_extract_all_calls_matches_formatted_blocks() {
    let first = FunctionCallRecord {
        platform: "cal".into(),
        function: "create_event".into(),
        parameters: vec![Parameter::new("title", json!("Standup"))],
    };
    let second = FunctionCallRecord {
        platform: "gmail".into(),
        function: "send".into(),
        parameters: vec![Parameter::new("to", json!(["a@example.com"]))],
    };
    let output = format!(
        "Let me do both.\n{}\nand then\n{}\n",
        format_function_call(&first),
        format_function_call(&second)
    );
    assert_eq!(extract_all_calls(&output), vec![first, second]);
}
