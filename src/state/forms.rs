// Modal form state for create/edit dialogs and the trash viewer
use crate::api::types::{CreateRequest, StudentDetail, StudentUpdate, TrashEntry};
use crate::model::ItemType;

/// Buffers behind the create dialog. One struct covers every creatable
/// type; each type reads only its own fields.
#[derive(Clone, Debug)]
pub struct CreateForm {
    pub item_type: ItemType,
    pub parent: Option<(ItemType, i64)>,
    pub full_name: String,
    pub login: String,
    pub email: String,
    pub phone: String,
    pub is_elder: bool,
    pub name: String,
    pub order: String,
    pub number: String,
    pub submitting: bool,
}

impl CreateForm {
    pub fn new(item_type: ItemType, parent: Option<(ItemType, i64)>) -> Self {
        Self {
            item_type,
            parent,
            full_name: String::new(),
            login: String::new(),
            email: String::new(),
            phone: String::new(),
            is_elder: false,
            name: String::new(),
            order: "1".to_string(),
            number: "1".to_string(),
            submitting: false,
        }
    }

    /// Required fields only; everything else is the server's problem.
    pub fn is_valid(&self) -> bool {
        match self.item_type {
            ItemType::Student => {
                !self.full_name.trim().is_empty() && !self.login.trim().is_empty()
            }
            ItemType::Level | ItemType::Form | ItemType::Group => !self.name.trim().is_empty(),
            ItemType::Course => self.number.trim().parse::<i64>().is_ok(),
            ItemType::Department | ItemType::Employee => false,
        }
    }

    pub fn to_request(&self) -> Option<CreateRequest> {
        if !self.is_valid() {
            return None;
        }
        let parent_id = parent_id_for(self.item_type, self.parent);
        match self.item_type {
            ItemType::Student => Some(CreateRequest::Student {
                group_id: parent_id,
                full_name: self.full_name.trim().to_string(),
                login: self.login.trim().to_string(),
                email: self.email.trim().to_string(),
                phone: self.phone.trim().to_string(),
                is_elder: self.is_elder,
            }),
            ItemType::Level => Some(CreateRequest::Level {
                name: self.name.trim().to_string(),
                order: self.order.trim().parse().unwrap_or(1),
            }),
            ItemType::Form => Some(CreateRequest::StudyForm {
                level_id: parent_id,
                name: self.name.trim().to_string(),
                order: self.order.trim().parse().unwrap_or(1),
            }),
            ItemType::Course => Some(CreateRequest::Course {
                form_id: parent_id,
                number: self.number.trim().parse().ok()?,
            }),
            ItemType::Group => Some(CreateRequest::Group {
                course_id: parent_id,
                name: self.name.trim().to_string(),
            }),
            ItemType::Department | ItemType::Employee => None,
        }
    }
}

/// The parent id is attached only when the opener's container type
/// matches what the created type actually nests under.
fn parent_id_for(created: ItemType, parent: Option<(ItemType, i64)>) -> Option<i64> {
    let expected = created.parent_type()?;
    match parent {
        Some((item_type, id)) if item_type == expected => Some(id),
        _ => None,
    }
}

/// The edit dialog first fetches the record, then shows the form.
#[derive(Clone, Debug)]
pub enum EditStudentModal {
    Loading { id: i64 },
    Failed { id: i64, message: String },
    Ready(EditStudentForm),
}

#[derive(Clone, Debug)]
pub struct EditStudentForm {
    pub id: i64,
    pub full_name: String,
    pub login: String,
    pub password: String,
    pub show_password: bool,
    pub email: String,
    pub phone: String,
    pub user_type: String,
    pub is_active: bool,
    pub group_name: String,
    pub created_at: String,
    pub submitting: bool,
}

pub const USER_TYPES: &[(&str, &str)] = &[
    ("student", "Student"),
    ("elder", "Elder"),
    ("dean", "Dean's office"),
    ("department", "Department"),
    ("teacher", "Teacher"),
    ("admin", "Administrator"),
];

impl EditStudentForm {
    pub fn from_detail(detail: StudentDetail) -> Self {
        // An elder flag on a plain student preselects the elder type.
        let user_type = if detail.user_type == "student" && detail.is_elder {
            "elder".to_string()
        } else {
            detail.user_type
        };
        Self {
            id: detail.id,
            full_name: detail.full_name,
            login: detail.login,
            password: detail.password,
            show_password: false,
            email: detail.email,
            phone: detail.phone,
            user_type,
            is_active: detail.is_active,
            group_name: detail.group_name,
            created_at: detail.created_at,
            submitting: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.full_name.trim().is_empty() && !self.login.trim().is_empty()
    }

    pub fn to_update(&self) -> StudentUpdate {
        StudentUpdate {
            id: self.id,
            full_name: self.full_name.trim().to_string(),
            login: self.login.trim().to_string(),
            password: self.password.clone(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            user_type: self.user_type.clone(),
            is_active: self.is_active,
        }
    }
}

#[derive(Debug, Default)]
pub struct TrashModal {
    pub loading: bool,
    pub items: Vec<TrashEntry>,
    pub error: Option<String>,
    pub confirm_clear: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_student_requires_name_and_login() {
        let mut form = CreateForm::new(ItemType::Student, Some((ItemType::Group, 10)));
        assert!(!form.is_valid());

        form.full_name = "Алексеев Иван".into();
        assert!(!form.is_valid());

        form.login = "alekseev.i".into();
        assert!(form.is_valid());

        match form.to_request().unwrap() {
            CreateRequest::Student { group_id, .. } => assert_eq!(group_id, Some(10)),
            _ => panic!("expected a student request"),
        }
    }

    #[test]
    fn test_parent_attaches_only_when_types_line_up() {
        // A student created while a course folder is open gets no group.
        let mut form = CreateForm::new(ItemType::Student, Some((ItemType::Course, 7)));
        form.full_name = "X".into();
        form.login = "x".into();
        match form.to_request().unwrap() {
            CreateRequest::Student { group_id, .. } => assert_eq!(group_id, None),
            _ => panic!("expected a student request"),
        }
    }

    #[test]
    fn test_course_number_must_parse() {
        let mut form = CreateForm::new(ItemType::Course, Some((ItemType::Form, 2)));
        form.number = "two".into();
        assert!(!form.is_valid());
        assert!(form.to_request().is_none());

        form.number = "2".into();
        match form.to_request().unwrap() {
            CreateRequest::Course { form_id, number } => {
                assert_eq!(form_id, Some(2));
                assert_eq!(number, 2);
            }
            _ => panic!("expected a course request"),
        }
    }

    #[test]
    fn test_edit_form_round_trip() {
        let detail: StudentDetail = serde_json::from_value(serde_json::json!({
            "id": 5,
            "full_name": "Алексеев Иван",
            "login": "alekseev.i",
            "password": "secret",
            "user_type": "elder",
            "is_elder": true,
            "group_name": "СПД-103",
        }))
        .unwrap();
        let form = EditStudentForm::from_detail(detail);
        assert!(form.is_valid());
        assert!(!form.show_password);

        let update = form.to_update();
        assert_eq!(update.id, 5);
        assert_eq!(update.user_type, "elder");
        assert_eq!(update.password, "secret");
    }

    #[test]
    fn test_elder_flag_preselects_elder_type() {
        let detail: StudentDetail = serde_json::from_value(serde_json::json!({
            "id": 6,
            "full_name": "Борисов Олег",
            "login": "borisov.o",
            "user_type": "student",
            "is_elder": true,
        }))
        .unwrap();
        let form = EditStudentForm::from_detail(detail);
        assert_eq!(form.user_type, "elder");
    }
}
