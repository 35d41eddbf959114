// In-memory drag/copy clipboard consumed by paste
use crate::model::ItemType;

/// The item most recently dragged or copied, with the container it was
/// taken from when known.
#[derive(Clone, Debug, PartialEq)]
pub struct DraggedItem {
    pub item_type: ItemType,
    pub id: i64,
    pub name: String,
    pub source: Option<(ItemType, i64)>,
}

#[derive(Clone, Debug, Default)]
pub struct DragClipboard {
    item: Option<DraggedItem>,
}

impl DragClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, item: DraggedItem) {
        self.item = Some(item);
    }

    pub fn get(&self) -> Option<&DraggedItem> {
        self.item.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_item_wins() {
        let mut clipboard = DragClipboard::new();
        assert!(clipboard.get().is_none());

        clipboard.set(DraggedItem {
            item_type: ItemType::Student,
            id: 42,
            name: "Алексеев Иван".into(),
            source: Some((ItemType::Group, 3)),
        });
        assert_eq!(clipboard.get().unwrap().id, 42);

        clipboard.set(DraggedItem {
            item_type: ItemType::Student,
            id: 7,
            name: "Борисов Олег".into(),
            source: None,
        });
        let item = clipboard.get().unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.source, None);
    }
}
