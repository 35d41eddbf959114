// A single addressable node in the hierarchy, the unit of navigation
use crate::model::ItemType;

#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub item_type: ItemType,
    pub id: i64,
    pub title: String,
    pub timestamp: i64,
}

impl Location {
    pub fn new(item_type: ItemType, id: i64, title: impl Into<String>) -> Self {
        Self {
            item_type,
            id,
            title: title.into(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    pub fn key(&self) -> (ItemType, i64) {
        (self.item_type, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key() {
        let loc = Location::new(ItemType::Group, 7, "SPD-103");
        assert_eq!(loc.key(), (ItemType::Group, 7));
        assert_eq!(loc.title, "SPD-103");
    }
}
