//! Snapshot history — stack-based undo over the editor state.
//!
//! DESIGN
//! ======
//! A snapshot is a deep clone of `EditorState`, never a reference into it.
//! `save` pushes one, `undo` pops the most recent and replaces the editor
//! wholesale, including the in-progress path buffer. Because the orchestrator
//! saves before every vertex append, undo unwinds a partially drawn path one
//! vertex at a time.

use crate::state::EditorState;

/// Immutable copy of the editor at one instant.
#[derive(Debug, Clone)]
pub struct Snapshot {
    state: EditorState,
}

#[derive(Debug, Default)]
pub struct SnapshotHistory {
    stack: Vec<Snapshot>,
}

impl SnapshotHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&mut self, state: &EditorState) {
        self.stack.push(Snapshot { state: state.clone() });
    }

    /// Restore the most recent snapshot into `state`.
    ///
    /// Returns `false` when there is nothing to undo; `state` is untouched.
    pub fn undo(&mut self, state: &mut EditorState) -> bool {
        let Some(snapshot) = self.stack.pop() else {
            return false;
        };
        *state = snapshot.state;
        true
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
