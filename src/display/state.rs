use crate::config::ExpandMode;
use rustc_hash::FxHashSet;

/// Per-entry expand/collapse flags owned by the UI shell.
///
/// Entries are identified by their index in the filtered entry list and start
/// collapsed. The annotation core never reads this state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    mode: ExpandMode,
    expanded: FxHashSet<usize>,
}

impl DisplayState {
    #[must_use]
    pub fn new(mode: ExpandMode) -> Self {
        Self {
            mode,
            expanded: FxHashSet::default(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> ExpandMode {
        self.mode
    }

    #[must_use]
    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    /// Flip the flag for `index`; returns the new state.
    ///
    /// In [`ExpandMode::Exclusive`] expanding one entry collapses whichever
    /// entry was expanded before.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.expanded.remove(&index) {
            return false;
        }
        if self.mode == ExpandMode::Exclusive {
            self.expanded.clear();
        }
        self.expanded.insert(index);
        true
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Expanded indices in ascending order.
    #[must_use]
    pub fn expanded_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.expanded.iter().copied().collect();
        indices.sort_unstable();
        indices
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new(ExpandMode::default())
    }
}
