// Folder content as rendered in the central pane
use crate::model::ItemType;
use lexical_sort::lexical_cmp;

#[derive(Clone, Debug, PartialEq)]
pub struct PathSegment {
    pub item_type: ItemType,
    pub id: i64,
    pub name: String,
}

/// One child tile in a folder listing.
#[derive(Clone, Debug, PartialEq)]
pub struct FolderChild {
    pub item_type: ItemType,
    pub id: i64,
    pub name: String,
    pub count: u64,
}

/// One row in a group's student listing.
#[derive(Clone, Debug, PartialEq)]
pub struct StudentRow {
    pub id: i64,
    pub full_name: String,
    pub login: String,
    pub email: String,
    pub phone: String,
    pub is_elder: bool,
    pub is_active: bool,
}

/// Explicitly tagged payload so rendering never has to sniff the
/// response shape.
#[derive(Clone, Debug, PartialEq)]
pub enum ContentPayload {
    Folder { children: Vec<FolderChild> },
    Students { students: Vec<StudentRow> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct FolderContent {
    /// None for the synthetic root listing.
    pub item_type: Option<ItemType>,
    pub id: i64,
    pub title: String,
    pub path: Vec<PathSegment>,
    pub payload: ContentPayload,
}

impl FolderContent {
    pub fn location(&self) -> Option<(ItemType, i64)> {
        self.item_type.map(|t| (t, self.id))
    }

    pub fn item_count(&self) -> usize {
        match &self.payload {
            ContentPayload::Folder { children } => children.len(),
            ContentPayload::Students { students } => students.len(),
        }
    }
}

/// Display ordering for student listings. Comparison transliterates
/// non-ASCII, so Cyrillic names collate the way a reader expects.
pub fn sort_students(students: &mut [StudentRow]) {
    students.sort_by(|a, b| lexical_cmp(&a.full_name, &b.full_name));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(name: &str) -> StudentRow {
        StudentRow {
            id: 0,
            full_name: name.to_string(),
            login: String::new(),
            email: String::new(),
            phone: String::new(),
            is_elder: false,
            is_active: true,
        }
    }

    #[test]
    fn test_cyrillic_names_sort_ascending() {
        let mut students = vec![student("Яковлев Пётр"), student("Алексеев Иван")];
        sort_students(&mut students);
        assert_eq!(students[0].full_name, "Алексеев Иван");
        assert_eq!(students[1].full_name, "Яковлев Пётр");
    }

    #[test]
    fn test_sort_is_stable_for_mixed_input() {
        let mut students = vec![
            student("Смирнова Анна"),
            student("Борисов Олег"),
            student("Алексеев Иван"),
        ];
        sort_students(&mut students);
        let names: Vec<_> = students.iter().map(|s| s.full_name.as_str()).collect();
        assert_eq!(
            names,
            ["Алексеев Иван", "Борисов Олег", "Смирнова Анна"]
        );
    }

    #[test]
    fn test_location_of_root_is_none() {
        let content = FolderContent {
            item_type: None,
            id: 0,
            title: String::new(),
            path: Vec::new(),
            payload: ContentPayload::Folder { children: Vec::new() },
        };
        assert_eq!(content.location(), None);
        assert_eq!(content.item_count(), 0);
    }
}
