// Transient interaction state - delete confirmation and inline rename
use crate::model::ItemType;

/// Held between opening the delete prompt and confirm/cancel.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingDeletion {
    pub item_type: ItemType,
    pub id: i64,
    pub name: String,
}

/// Inline rename: the label becomes an edit field immediately, but the
/// displayed name only changes for good once the server confirms.
#[derive(Clone, Debug)]
pub struct RenameEdit {
    pub item_type: ItemType,
    pub id: i64,
    pub original: String,
    pub buffer: String,
}

impl RenameEdit {
    pub fn begin(item_type: ItemType, id: i64, original: impl Into<String>) -> Self {
        let original = original.into();
        Self {
            item_type,
            id,
            buffer: original.clone(),
            original,
        }
    }

    pub fn matches(&self, item_type: ItemType, id: i64) -> bool {
        self.item_type == item_type && self.id == id
    }

    pub fn new_name(&self) -> &str {
        self.buffer.trim()
    }

    /// Whether submitting would actually change anything.
    pub fn changed(&self) -> bool {
        !self.new_name().is_empty() && self.new_name() != self.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_buffer_is_not_a_change() {
        let edit = RenameEdit::begin(ItemType::Group, 1, "Group A");
        assert!(!edit.changed());
    }

    #[test]
    fn test_whitespace_only_is_not_a_change() {
        let mut edit = RenameEdit::begin(ItemType::Group, 1, "Group A");
        edit.buffer = "   ".into();
        assert!(!edit.changed());
    }

    #[test]
    fn test_edited_buffer_is_a_change() {
        let mut edit = RenameEdit::begin(ItemType::Group, 1, "Group A");
        edit.buffer = " Group B ".into();
        assert!(edit.changed());
        assert_eq!(edit.new_name(), "Group B");
        assert_eq!(edit.original, "Group A");
        assert!(edit.matches(ItemType::Group, 1));
        assert!(!edit.matches(ItemType::Course, 1));
    }
}
