use super::classifier::classify_current_call;
use super::types::{Classification, FunctionCallRecord};
use std::fmt;

/// Platform reserved for flow-control calls.
pub const CONTROL_PLATFORM: &str = "io";

/// Administrative call emitted by the upstream model to steer the
/// call/result loop. Never rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlSignal {
    /// `io.continue`: more calls follow once results are fed back.
    Continue,
    /// `io.end`: the turn is complete.
    End,
}

impl ControlSignal {
    #[must_use]
    pub fn from_parts(platform: &str, function: &str) -> Option<Self> {
        if platform != CONTROL_PLATFORM {
            return None;
        }
        match function {
            "continue" => Some(ControlSignal::Continue),
            "end" => Some(ControlSignal::End),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_record(record: &FunctionCallRecord) -> Option<Self> {
        Self::from_parts(&record.platform, &record.function)
    }

    #[must_use]
    pub fn function_name(self) -> &'static str {
        match self {
            ControlSignal::Continue => "continue",
            ControlSignal::End => "end",
        }
    }
}

impl fmt::Display for ControlSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CONTROL_PLATFORM}.{}", self.function_name())
    }
}

/// Control signal carried by a current-format call entry, if any.
#[must_use]
pub fn control_signal(text: &str) -> Option<ControlSignal> {
    match classify_current_call(text)? {
        Classification::Call {
            platform, function, ..
        } => ControlSignal::from_parts(&platform, &function),
        _ => None,
    }
}
