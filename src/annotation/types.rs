use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Best-effort typed interpretation of an embedded value.
///
/// Text that was never attempted, or could not be repaired, is kept as
/// [`serde_json::Value::String`] holding the original fragment.
pub type CoercedValue = serde_json::Value;

/// A single named call argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: CoercedValue,
}

impl Parameter {
    #[must_use]
    pub fn new(name: impl Into<String>, value: CoercedValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A function call extracted from a transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallRecord {
    pub platform: String,
    pub function: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl FunctionCallRecord {
    /// `platform.function`, as shown in rendered headers.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.platform, self.function)
    }
}

/// A function result extracted from a transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResultRecord {
    pub platform: String,
    pub function: String,
    pub result: CoercedValue,
}

impl FunctionResultRecord {
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.platform, self.function)
    }
}

/// Final structured form of one transcript entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    Call(FunctionCallRecord),
    Result(FunctionResultRecord),
    /// No annotation recognised; the entry text verbatim.
    PlainText(String),
}

impl Annotation {
    #[must_use]
    pub fn is_plain_text(&self) -> bool {
        matches!(self, Annotation::PlainText(_))
    }
}

// ---------------------------------------------------------------------------
// Classifier intermediates
// ---------------------------------------------------------------------------

/// A parameter region of the current call format, before coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawParameter<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Parameters as found by the classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum RawParameters<'a> {
    /// Tagged `<parameter>` regions whose bodies still need coercion.
    Tagged(Vec<RawParameter<'a>>),
    /// Legacy encodings that carried the parameters as JSON already.
    Decoded(Vec<Parameter>),
}

impl RawParameters<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            RawParameters::Tagged(params) => params.len(),
            RawParameters::Decoded(params) => params.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tagged intermediate produced by [`classify`](super::classify).
#[derive(Debug, Clone, PartialEq)]
pub enum Classification<'a> {
    Call {
        platform: Cow<'a, str>,
        function: Cow<'a, str>,
        parameters: RawParameters<'a>,
    },
    Result {
        platform: Cow<'a, str>,
        function: Cow<'a, str>,
        body: &'a str,
    },
    PlainText,
}

impl Classification<'_> {
    /// Short label for log lines.
    #[must_use]
    pub fn kind_label(&self) -> &'static str {
        match self {
            Classification::Call { .. } => "call",
            Classification::Result { .. } => "result",
            Classification::PlainText => "none",
        }
    }
}
