pub mod annotation;
pub mod config;
pub mod display;
pub mod error;
pub mod observability;
pub mod transcript;

pub(crate) mod json_scan;

pub use annotation::{annotate, annotate_entries, classify, coerce, filter_control_calls};
pub use display::{DisplayState, RenderedEntry, Renderer};
pub use error::CallviewError;
