// Hierarchy node types and their structural rules
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Level,
    Form,
    Course,
    Group,
    Student,
    Department,
    Employee,
}

impl ItemType {
    pub fn wire_name(&self) -> &'static str {
        match self {
            ItemType::Level => "level",
            ItemType::Form => "form",
            ItemType::Course => "course",
            ItemType::Group => "group",
            ItemType::Student => "student",
            ItemType::Department => "department",
            ItemType::Employee => "employee",
        }
    }

    pub fn from_wire(name: &str) -> Option<ItemType> {
        match name {
            "level" => Some(ItemType::Level),
            "form" => Some(ItemType::Form),
            "course" => Some(ItemType::Course),
            "group" => Some(ItemType::Group),
            "student" => Some(ItemType::Student),
            "department" => Some(ItemType::Department),
            "employee" => Some(ItemType::Employee),
            _ => None,
        }
    }

    /// Container types can hold children and accept drops; everything
    /// else is a leaf.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ItemType::Level | ItemType::Form | ItemType::Course | ItemType::Group
        )
    }

    /// The type of children nested directly under this node.
    pub fn child_type(&self) -> Option<ItemType> {
        match self {
            ItemType::Level => Some(ItemType::Form),
            ItemType::Form => Some(ItemType::Course),
            ItemType::Course => Some(ItemType::Group),
            ItemType::Group => Some(ItemType::Student),
            ItemType::Department => Some(ItemType::Employee),
            ItemType::Student | ItemType::Employee => None,
        }
    }

    /// The container type a freshly created node of this type is
    /// attached to.
    pub fn parent_type(&self) -> Option<ItemType> {
        match self {
            ItemType::Form => Some(ItemType::Level),
            ItemType::Course => Some(ItemType::Form),
            ItemType::Group => Some(ItemType::Course),
            ItemType::Student => Some(ItemType::Group),
            ItemType::Employee => Some(ItemType::Department),
            ItemType::Level | ItemType::Department => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ItemType::Level => "education level",
            ItemType::Form => "study form",
            ItemType::Course => "course",
            ItemType::Group => "group",
            ItemType::Student => "student",
            ItemType::Department => "department",
            ItemType::Employee => "employee",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ItemType::Level => "🗄",
            ItemType::Form => "🗂",
            ItemType::Course => "📚",
            ItemType::Group => "👥",
            ItemType::Student => "👤",
            ItemType::Department => "🏢",
            ItemType::Employee => "💼",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_rule() {
        assert!(ItemType::Level.is_container());
        assert!(ItemType::Form.is_container());
        assert!(ItemType::Course.is_container());
        assert!(ItemType::Group.is_container());
        assert!(!ItemType::Student.is_container());
        assert!(!ItemType::Department.is_container());
        assert!(!ItemType::Employee.is_container());
    }

    #[test]
    fn test_wire_names_round_trip() {
        for t in [
            ItemType::Level,
            ItemType::Form,
            ItemType::Course,
            ItemType::Group,
            ItemType::Student,
            ItemType::Department,
            ItemType::Employee,
        ] {
            assert_eq!(ItemType::from_wire(t.wire_name()), Some(t));
        }
        assert_eq!(ItemType::from_wire("root"), None);
    }

    #[test]
    fn test_parent_chain() {
        assert_eq!(ItemType::Student.parent_type(), Some(ItemType::Group));
        assert_eq!(ItemType::Group.parent_type(), Some(ItemType::Course));
        assert_eq!(ItemType::Course.parent_type(), Some(ItemType::Form));
        assert_eq!(ItemType::Form.parent_type(), Some(ItemType::Level));
        assert_eq!(ItemType::Level.parent_type(), None);
    }

    #[test]
    fn test_serde_wire_format() {
        let t: ItemType = serde_json::from_str("\"course\"").unwrap();
        assert_eq!(t, ItemType::Course);
        assert_eq!(serde_json::to_string(&ItemType::Group).unwrap(), "\"group\"");
    }
}
