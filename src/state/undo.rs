// Undo stack - invertible mutations only
use crate::model::ItemType;

/// A confirmed mutation carrying enough data to run it in reverse.
/// Deletions are excluded: restoring soft-deleted records is the trash
/// viewer's job.
#[derive(Clone, Debug, PartialEq)]
pub enum UndoableAction {
    Move {
        item_type: ItemType,
        item_id: i64,
        name: String,
        from: (ItemType, i64),
        to: (ItemType, i64),
    },
    Rename {
        item_type: ItemType,
        id: i64,
        old_name: String,
        new_name: String,
    },
}

impl UndoableAction {
    pub fn inverse(&self) -> UndoableAction {
        match self {
            UndoableAction::Move {
                item_type,
                item_id,
                name,
                from,
                to,
            } => UndoableAction::Move {
                item_type: *item_type,
                item_id: *item_id,
                name: name.clone(),
                from: *to,
                to: *from,
            },
            UndoableAction::Rename {
                item_type,
                id,
                old_name,
                new_name,
            } => UndoableAction::Rename {
                item_type: *item_type,
                id: *id,
                old_name: new_name.clone(),
                new_name: old_name.clone(),
            },
        }
    }

}

#[derive(Default)]
pub struct UndoStack {
    undo: Vec<UndoableAction>,
    redo: Vec<UndoableAction>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly confirmed mutation. Any redo branch dies here,
    /// the same way forward history dies on a fresh visit.
    pub fn record(&mut self, action: UndoableAction) {
        self.undo.push(action);
        self.redo.clear();
    }

    /// Pop the newest action and return the mutation that reverses it.
    pub fn undo(&mut self) -> Option<UndoableAction> {
        let action = self.undo.pop()?;
        self.redo.push(action.clone());
        Some(action.inverse())
    }

    /// Pop the newest undone action and return it for re-application.
    pub fn redo(&mut self) -> Option<UndoableAction> {
        let action = self.redo.pop()?;
        self.undo.push(action.clone());
        Some(action)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn move_action() -> UndoableAction {
        UndoableAction::Move {
            item_type: ItemType::Student,
            item_id: 5,
            name: "Алексеев Иван".into(),
            from: (ItemType::Group, 1),
            to: (ItemType::Group, 2),
        }
    }

    #[test]
    fn test_move_inverse_swaps_endpoints() {
        let inverse = move_action().inverse();
        match inverse {
            UndoableAction::Move { from, to, .. } => {
                assert_eq!(from, (ItemType::Group, 2));
                assert_eq!(to, (ItemType::Group, 1));
            }
            _ => panic!("expected a move"),
        }
    }

    #[test]
    fn test_rename_inverse_swaps_names() {
        let action = UndoableAction::Rename {
            item_type: ItemType::Group,
            id: 3,
            old_name: "Group A".into(),
            new_name: "Group B".into(),
        };
        match action.inverse() {
            UndoableAction::Rename {
                old_name, new_name, ..
            } => {
                assert_eq!(old_name, "Group B");
                assert_eq!(new_name, "Group A");
            }
            _ => panic!("expected a rename"),
        }
    }

    #[test]
    fn test_undo_then_redo_restores_action() {
        let mut stack = UndoStack::new();
        stack.record(move_action());

        let undone = stack.undo().unwrap();
        assert_eq!(undone, move_action().inverse());
        assert!(stack.can_redo());

        let redone = stack.redo().unwrap();
        assert_eq!(redone, move_action());
        assert!(stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_new_record_clears_redo_branch() {
        let mut stack = UndoStack::new();
        stack.record(move_action());
        stack.undo();
        assert!(stack.can_redo());

        stack.record(move_action());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_empty_stack_yields_nothing() {
        let mut stack = UndoStack::new();
        assert!(stack.undo().is_none());
        assert!(stack.redo().is_none());
    }
}
