pub mod classifier;
pub mod coerce;
pub mod control;
pub mod encode;
pub mod extract;
pub mod filter;
pub mod types;

pub use classifier::classify;
pub use coerce::coerce;
pub use control::{control_signal, ControlSignal, CONTROL_PLATFORM};
pub use encode::{format_function_call, format_function_result, CONTINUE_CALL, END_CALL};
pub use extract::extract_all_calls;
pub use filter::filter_control_calls;
pub use types::{
    Annotation, Classification, CoercedValue, FunctionCallRecord, FunctionResultRecord,
    Parameter, RawParameter, RawParameters,
};

/// Classify one entry and coerce its captured fields into a final record.
///
/// Plain text is returned verbatim and never passes through coercion.
#[must_use]
pub fn annotate(text: &str) -> Annotation {
    match classify(text) {
        Classification::Call {
            platform,
            function,
            parameters,
        } => Annotation::Call(FunctionCallRecord {
            platform: platform.into_owned(),
            function: function.into_owned(),
            parameters: coerce_parameters(parameters),
        }),
        Classification::Result {
            platform,
            function,
            body,
        } => Annotation::Result(FunctionResultRecord {
            platform: platform.into_owned(),
            function: function.into_owned(),
            result: coerce(body),
        }),
        Classification::PlainText => Annotation::PlainText(text.to_string()),
    }
}

/// Display pipeline for one turn: hide control calls, then annotate each
/// remaining entry independently.
#[must_use]
pub fn annotate_entries<S: AsRef<str>>(entries: &[S]) -> Vec<Annotation> {
    filter_control_calls(entries)
        .into_iter()
        .map(annotate)
        .collect()
}

fn coerce_parameters(parameters: RawParameters<'_>) -> Vec<Parameter> {
    match parameters {
        RawParameters::Tagged(raw) => raw
            .into_iter()
            .map(|param| Parameter::new(param.name, coerce(param.value)))
            .collect(),
        RawParameters::Decoded(decoded) => decoded,
    }
}
