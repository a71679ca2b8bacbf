use crate::core::models::residue::AngleKind;

/// A single accepted angle edit, carrying both values so it can be replayed
/// in either direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditRecord {
    pub index: usize,
    pub kind: AngleKind,
    pub previous: f64, // Radians
    pub new: f64,      // Radians
}

/// Undo and redo stacks of accepted edits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    undo: Vec<EditRecord>,
    redo: Vec<EditRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a freshly applied edit. Any redo branch is discarded.
    pub fn record(&mut self, edit: EditRecord) {
        self.undo.push(edit);
        self.redo.clear();
    }

    /// Moves the most recent edit onto the redo stack and returns it.
    pub fn step_back(&mut self) -> Option<EditRecord> {
        let edit = self.undo.pop()?;
        self.redo.push(edit);
        Some(edit)
    }

    /// Moves the most recently undone edit back onto the undo stack and returns it.
    pub fn step_forward(&mut self) -> Option<EditRecord> {
        let edit = self.redo.pop()?;
        self.undo.push(edit);
        Some(edit)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Undoable edits, oldest first.
    pub fn undo_stack(&self) -> &[EditRecord] {
        &self.undo
    }

    /// Redoable edits, the next one to redo last.
    pub fn redo_stack(&self) -> &[EditRecord] {
        &self.redo
    }

    /// Drops the redo branch, leaving the undo stack as it is.
    pub fn clear_redo(&mut self) {
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(index: usize, previous: f64, new: f64) -> EditRecord {
        EditRecord {
            index,
            kind: AngleKind::Dihedral,
            previous,
            new,
        }
    }

    #[test]
    fn step_back_and_forward_move_records_between_stacks() {
        let mut history = History::new();
        history.record(edit(1, 0.1, 0.2));
        history.record(edit(2, 0.3, 0.4));

        assert_eq!(history.step_back(), Some(edit(2, 0.3, 0.4)));
        assert!(history.can_undo());
        assert!(history.can_redo());
        assert_eq!(history.step_forward(), Some(edit(2, 0.3, 0.4)));
        assert_eq!(history.undo_stack().len(), 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn empty_stacks_return_none() {
        let mut history = History::new();
        assert_eq!(history.step_back(), None);
        assert_eq!(history.step_forward(), None);
    }

    #[test]
    fn recording_discards_the_redo_branch() {
        let mut history = History::new();
        history.record(edit(1, 0.1, 0.2));
        history.step_back();
        assert!(history.can_redo());

        history.record(edit(3, 0.5, 0.6));
        assert!(!history.can_redo());
        assert_eq!(history.undo_stack(), &[edit(3, 0.5, 0.6)]);
    }

    #[test]
    fn clear_redo_keeps_undoable_edits() {
        let mut history = History::new();
        history.record(edit(1, 0.1, 0.2));
        history.record(edit(2, 0.2, 0.3));
        history.step_back();
        history.clear_redo();
        assert!(!history.can_redo());
        assert_eq!(history.undo_stack(), &[edit(1, 0.1, 0.2)]);
    }
}
