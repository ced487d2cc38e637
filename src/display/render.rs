use std::fmt;

use serde::Serialize;

use super::state::DisplayState;
use crate::annotation::{annotate, annotate_entries, Annotation};
use crate::config::DisplayConfig;

/// Presentation of one transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedEntry {
    Call {
        /// `platform.function`.
        name: String,
        /// Pretty-printed `[{name, value}]` listing; `None` without parameters.
        parameters: Option<String>,
    },
    Result {
        name: String,
        /// Pretty-printed result value.
        result: String,
    },
    Text {
        /// Visible text (clamped when collapsed).
        text: String,
        /// Long enough to get a show more/less toggle.
        collapsible: bool,
        /// Some lines are hidden.
        truncated: bool,
        expanded: bool,
    },
}

/// Turns annotated entries into [`RenderedEntry`] values.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: DisplayConfig,
    hide_control_calls: bool,
}

impl Renderer {
    #[must_use]
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            config,
            hide_control_calls: true,
        }
    }

    #[must_use]
    pub fn hide_control_calls(mut self, hide: bool) -> Self {
        self.hide_control_calls = hide;
        self
    }

    /// Render every entry of a turn. Indices passed to `state` refer to the
    /// entry positions after control calls were hidden.
    #[must_use]
    pub fn render_entries<S: AsRef<str>>(
        &self,
        entries: &[S],
        state: &DisplayState,
    ) -> Vec<RenderedEntry> {
        let annotations = if self.hide_control_calls {
            annotate_entries(entries)
        } else {
            entries.iter().map(|entry| annotate(entry.as_ref())).collect()
        };
        annotations
            .iter()
            .enumerate()
            .map(|(index, annotation)| self.render(annotation, index, state))
            .collect()
    }

    #[must_use]
    pub fn render(
        &self,
        annotation: &Annotation,
        index: usize,
        state: &DisplayState,
    ) -> RenderedEntry {
        match annotation {
            Annotation::Call(call) => RenderedEntry::Call {
                name: call.qualified_name(),
                parameters: (!call.parameters.is_empty())
                    .then(|| self.pretty_json(&call.parameters)),
            },
            Annotation::Result(result) => RenderedEntry::Result {
                name: result.qualified_name(),
                result: self.pretty_json(&result.result),
            },
            Annotation::PlainText(text) => self.render_text(text, state.is_expanded(index)),
        }
    }

    /// Plain text; clamped to `collapsed_lines` visual lines (each source
    /// line wrapped at `wrap_width` characters) when long and collapsed.
    #[must_use]
    pub fn render_text(&self, text: &str, expanded: bool) -> RenderedEntry {
        let collapsible = text.chars().count() > self.config.collapse_threshold;
        if !collapsible || expanded {
            return RenderedEntry::Text {
                text: text.to_string(),
                collapsible,
                truncated: false,
                expanded,
            };
        }

        let (visible, truncated) =
            clamp_lines(text, self.config.collapsed_lines, self.config.wrap_width);
        RenderedEntry::Text {
            text: visible,
            collapsible,
            truncated,
            expanded,
        }
    }

    fn pretty_json<T: Serialize + ?Sized>(&self, value: &T) -> String {
        let indent = " ".repeat(self.config.indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        if let Err(err) = value.serialize(&mut serializer) {
            tracing::warn!("failed to pretty-print value: {err}");
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DisplayConfig::default())
    }
}

impl fmt::Display for RenderedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderedEntry::Call { name, parameters } => {
                write!(f, "Function Call: {name}")?;
                if let Some(parameters) = parameters {
                    write!(f, "\n  Parameters:")?;
                    write_indented(f, parameters, "    ")?;
                }
                Ok(())
            }
            RenderedEntry::Result { name, result } => {
                write!(f, "Result: {name}")?;
                write_indented(f, result, "  ")
            }
            RenderedEntry::Text {
                text,
                collapsible,
                truncated,
                expanded,
            } => {
                f.write_str(text)?;
                if *truncated {
                    f.write_str("\n...")?;
                }
                if *collapsible {
                    let label = if *expanded { "Show less" } else { "Show more" };
                    write!(f, "\n[{label}]")?;
                }
                Ok(())
            }
        }
    }
}

/// First `max_lines` visual lines of `text`, and whether anything was cut.
fn clamp_lines(text: &str, max_lines: usize, wrap_width: usize) -> (String, bool) {
    let wrap_width = wrap_width.max(1);
    let mut remaining = max_lines;
    let mut visible = String::new();

    for (i, line) in text.lines().enumerate() {
        if remaining == 0 {
            return (visible, true);
        }
        if i > 0 {
            visible.push('\n');
        }
        let segments = line.chars().count().div_ceil(wrap_width).max(1);
        if segments > remaining {
            visible.extend(line.chars().take(remaining * wrap_width));
            return (visible, true);
        }
        visible.push_str(line);
        remaining -= segments;
    }
    (visible, false)
}

fn write_indented(f: &mut fmt::Formatter<'_>, block: &str, prefix: &str) -> fmt::Result {
    for line in block.lines() {
        write!(f, "\n{prefix}{line}")?;
    }
    Ok(())
}
