use super::control::control_signal;

/// Drop administrative `io.continue` / `io.end` calls from a list of entries.
///
/// Only current-format calls are considered. Plain text, results, legacy
/// encodings and calls on any other platform pass through in their original
/// order.
#[must_use]
pub fn filter_control_calls<S: AsRef<str>>(entries: &[S]) -> Vec<&str> {
    entries
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|entry| match control_signal(entry) {
            Some(signal) => {
                tracing::debug!("hiding control call {signal}");
                false
            }
            None => true,
        })
        .collect()
}
