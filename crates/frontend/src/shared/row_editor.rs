//! Single-draft editor for rows of a grid.
//!
//! `Idle → Drafting(new | existing) → Saving → Idle`. At most one draft
//! exists per grid. While a save is in flight the draft is frozen: commits
//! are ignored and the draft cannot be cancelled. A failed save returns to
//! `Drafting` with the values exactly as entered.

/// A row type the editor can draft
pub trait DraftRow: Clone {
    type Id: Clone + PartialEq + std::fmt::Debug;

    /// Empty row used by "add"
    fn blank() -> Self;

    fn draft_id(&self) -> Self::Id;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DraftMode<Id> {
    New,
    Existing(Id),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorState<R: DraftRow> {
    Idle,
    Drafting { mode: DraftMode<R::Id>, row: R },
    Saving { mode: DraftMode<R::Id>, row: R },
}

/// Outcome of [`DraftEditor::try_commit`]
#[derive(Debug, Clone, PartialEq)]
pub enum CommitStart<R, E> {
    /// Nothing to commit, or a save is already running
    NotDrafting,
    /// Validation failed; the draft stays open
    Rejected(E),
    /// The editor is now saving this row
    Started(R),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftEditor<R: DraftRow> {
    state: EditorState<R>,
}

impl<R: DraftRow> Default for DraftEditor<R> {
    fn default() -> Self {
        Self {
            state: EditorState::Idle,
        }
    }
}

impl<R: DraftRow> DraftEditor<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, EditorState::Idle)
    }

    pub fn is_saving(&self) -> bool {
        matches!(self.state, EditorState::Saving { .. })
    }

    /// "Add" is only offered when no draft exists
    pub fn can_add(&self) -> bool {
        self.is_idle()
    }

    pub fn can_cancel(&self) -> bool {
        matches!(self.state, EditorState::Drafting { .. })
    }

    /// The draft, whether being edited or being saved
    pub fn draft(&self) -> Option<&R> {
        match &self.state {
            EditorState::Idle => None,
            EditorState::Drafting { row, .. } | EditorState::Saving { row, .. } => Some(row),
        }
    }

    pub fn mode(&self) -> Option<&DraftMode<R::Id>> {
        match &self.state {
            EditorState::Idle => None,
            EditorState::Drafting { mode, .. } | EditorState::Saving { mode, .. } => Some(mode),
        }
    }

    /// True when `id` is the stored row currently open in the editor
    pub fn is_editing(&self, id: &R::Id) -> bool {
        matches!(self.mode(), Some(DraftMode::Existing(current)) if current == id)
    }

    pub fn start_new(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.state = EditorState::Drafting {
            mode: DraftMode::New,
            row: R::blank(),
        };
        true
    }

    pub fn start_edit(&mut self, row: &R) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.state = EditorState::Drafting {
            mode: DraftMode::Existing(row.draft_id()),
            row: row.clone(),
        };
        true
    }

    /// Mutates the draft. Ignored unless drafting.
    pub fn edit(&mut self, f: impl FnOnce(&mut R)) -> bool {
        match &mut self.state {
            EditorState::Drafting { row, .. } => {
                f(row);
                true
            }
            EditorState::Idle | EditorState::Saving { .. } => false,
        }
    }

    /// Validates the draft and, on success, moves to `Saving` and returns
    /// the row to send.
    pub fn try_commit<E>(&mut self, validate: impl FnOnce(&R) -> Result<(), E>) -> CommitStart<R, E> {
        let EditorState::Drafting { mode, row } = &self.state else {
            return CommitStart::NotDrafting;
        };
        if let Err(e) = validate(row) {
            return CommitStart::Rejected(e);
        }
        let row = row.clone();
        self.state = EditorState::Saving {
            mode: mode.clone(),
            row: row.clone(),
        };
        CommitStart::Started(row)
    }

    pub fn commit_succeeded(&mut self) {
        if self.is_saving() {
            self.state = EditorState::Idle;
        }
    }

    pub fn commit_failed(&mut self) {
        if let EditorState::Saving { mode, row } = &self.state {
            self.state = EditorState::Drafting {
                mode: mode.clone(),
                row: row.clone(),
            };
        }
    }

    /// Discards the draft. Refused while saving.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            EditorState::Saving { .. } => false,
            EditorState::Idle | EditorState::Drafting { .. } => {
                self.state = EditorState::Idle;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        qty: f64,
    }

    impl DraftRow for Row {
        type Id = i64;

        fn blank() -> Self {
            Row { id: 0, qty: 0.0 }
        }

        fn draft_id(&self) -> i64 {
            self.id
        }
    }

    fn validate(row: &Row) -> Result<(), &'static str> {
        if row.qty > 0.0 {
            Ok(())
        } else {
            Err("qty required")
        }
    }

    fn stored() -> Row {
        Row { id: 11, qty: 3.0 }
    }

    #[test]
    fn test_single_draft_per_grid() {
        let mut editor: DraftEditor<Row> = DraftEditor::new();
        assert!(editor.can_add());
        assert!(editor.start_new());
        assert!(!editor.can_add());
        assert!(!editor.start_new());
        assert!(!editor.start_edit(&stored()));
        assert_eq!(editor.mode(), Some(&DraftMode::New));
    }

    #[test]
    fn test_edit_existing_clones_row() {
        let mut editor: DraftEditor<Row> = DraftEditor::new();
        let row = stored();
        editor.start_edit(&row);
        assert!(editor.is_editing(&11));

        editor.edit(|r| r.qty = 4.0);
        assert_eq!(editor.draft().map(|r| r.qty), Some(4.0));
        assert_eq!(row.qty, 3.0);
    }

    #[test]
    fn test_rejected_commit_keeps_drafting() {
        let mut editor: DraftEditor<Row> = DraftEditor::new();
        editor.start_new();
        assert_eq!(editor.try_commit(validate), CommitStart::Rejected("qty required"));
        assert!(editor.can_cancel());
    }

    #[test]
    fn test_saving_blocks_commit_and_cancel() {
        let mut editor: DraftEditor<Row> = DraftEditor::new();
        editor.start_edit(&stored());
        assert_eq!(editor.try_commit(validate), CommitStart::Started(stored()));
        assert!(editor.is_saving());

        assert_eq!(editor.try_commit(validate), CommitStart::NotDrafting);
        assert!(!editor.cancel());
        assert!(!editor.edit(|r| r.qty = 99.0));
        assert!(editor.is_saving());
    }

    #[test]
    fn test_failed_save_leaves_values_as_entered() {
        let mut editor: DraftEditor<Row> = DraftEditor::new();
        editor.start_edit(&stored());
        editor.edit(|r| r.qty = 12.25);
        let before = editor.draft().cloned();

        let _ = editor.try_commit(validate);
        editor.commit_failed();

        assert!(editor.can_cancel());
        assert_eq!(editor.draft().cloned(), before);
        assert!(editor.is_editing(&11));
    }

    #[test]
    fn test_successful_save_clears_draft() {
        let mut editor: DraftEditor<Row> = DraftEditor::new();
        editor.start_edit(&stored());
        let _ = editor.try_commit(validate);
        editor.commit_succeeded();
        assert!(editor.is_idle());
        assert!(editor.draft().is_none());
    }

    #[test]
    fn test_cancel_discards() {
        let mut editor: DraftEditor<Row> = DraftEditor::new();
        editor.start_new();
        editor.edit(|r| r.qty = 2.0);
        assert!(editor.cancel());
        assert!(editor.is_idle());
    }
}
