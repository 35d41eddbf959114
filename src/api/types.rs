// Wire types for the records API
use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

use crate::api::ApiError;
use crate::model::{
    sort_students, ContentPayload, FolderChild, FolderContent, ItemType, Location, PathSegment,
    StudentRow,
};

/// The server echoes query parameters back as strings, so ids arrive as
/// either numbers or numeric strings.
fn lenient_id<'de, D>(de: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "an integer or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(E::custom)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            v.trim().parse().map_err(E::custom)
        }

        fn visit_unit<E: de::Error>(self) -> Result<i64, E> {
            Ok(0)
        }
    }

    de.deserialize_any(IdVisitor)
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathSegmentDto {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(deserialize_with = "lenient_id")]
    pub id: i64,
    pub name: String,
}

/// Raw body of the folder-content endpoint. `items` stays untyped until
/// the response tag tells us whether they are children or students.
#[derive(Debug, Deserialize)]
pub struct FolderContentDto {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub path: Vec<PathSegmentDto>,
    #[serde(default)]
    pub items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ChildItemDto {
    #[serde(rename = "type")]
    item_type: ItemType,
    #[serde(deserialize_with = "lenient_id")]
    id: i64,
    name: String,
    #[serde(default)]
    count: u64,
}

#[derive(Debug, Deserialize)]
struct StudentItemDto {
    #[serde(deserialize_with = "lenient_id")]
    id: i64,
    full_name: String,
    #[serde(default)]
    login: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    is_elder: bool,
    #[serde(default = "default_true")]
    is_active: bool,
}

impl FolderContentDto {
    pub fn into_content(self) -> Result<FolderContent, ApiError> {
        let path = self
            .path
            .into_iter()
            .map(|p| PathSegment {
                item_type: p.item_type,
                id: p.id,
                name: p.name,
            })
            .collect();

        let payload = if self.kind == "group" {
            let mut students = Vec::with_capacity(self.items.len());
            for item in self.items {
                let dto: StudentItemDto = serde_json::from_value(item)?;
                students.push(StudentRow {
                    id: dto.id,
                    full_name: dto.full_name,
                    login: dto.login,
                    email: dto.email,
                    phone: dto.phone,
                    is_elder: dto.is_elder,
                    is_active: dto.is_active,
                });
            }
            sort_students(&mut students);
            ContentPayload::Students { students }
        } else {
            let mut children = Vec::with_capacity(self.items.len());
            for item in self.items {
                let dto: ChildItemDto = serde_json::from_value(item)?;
                children.push(FolderChild {
                    item_type: dto.item_type,
                    id: dto.id,
                    name: dto.name,
                    count: dto.count,
                });
            }
            ContentPayload::Folder { children }
        };

        Ok(FolderContent {
            item_type: ItemType::from_wire(&self.kind),
            id: self.id,
            title: self.title,
            path,
            payload,
        })
    }
}

/// Full student record, used by the edit form.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentDetail {
    pub id: i64,
    pub full_name: String,
    pub login: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "StudentDetail::default_user_type")]
    pub user_type: String,
    #[serde(default)]
    pub is_elder: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub created_at: String,
}

impl StudentDetail {
    fn default_user_type() -> String {
        "student".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub is_elder: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryEntryDto>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryEntryDto {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(deserialize_with = "lenient_id")]
    pub object_id: i64,
    #[serde(default)]
    pub title: String,
}

/// The server lists visits newest first; history wants them oldest
/// first.
pub fn history_to_locations(entries: Vec<HistoryEntryDto>) -> Vec<Location> {
    entries
        .into_iter()
        .rev()
        .map(|e| Location::new(e.item_type, e.object_id, e.title))
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActionLogEntry {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub details: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    pub ip: Option<String>,
}

impl ActionLogEntry {
    pub fn details_line(&self) -> String {
        let Some(details) = &self.details else {
            return String::new();
        };
        details
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => format!("{key}: {s}"),
                other => format!("{key}: {other}"),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Vec<ActionLogEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrashEntry {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub deleted_at: String,
    #[serde(default)]
    pub expires_at: String,
    #[serde(default)]
    pub deleted_by: String,
}

impl TrashEntry {
    pub fn display_name(&self) -> &str {
        self.data
            .get("full_name")
            .or_else(|| self.data.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("(unnamed)")
    }
}

#[derive(Debug, Deserialize)]
pub struct TrashResponse {
    #[serde(default)]
    pub items: Vec<TrashEntry>,
}

/// Shared acknowledgment shape of every mutating endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MutationAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Type-specific create forms. The parent id field name depends on the
/// created type.
#[derive(Clone, Debug, PartialEq)]
pub enum CreateRequest {
    Student {
        group_id: Option<i64>,
        full_name: String,
        login: String,
        email: String,
        phone: String,
        is_elder: bool,
    },
    Level {
        name: String,
        order: i64,
    },
    StudyForm {
        level_id: Option<i64>,
        name: String,
        order: i64,
    },
    Course {
        form_id: Option<i64>,
        number: i64,
    },
    Group {
        course_id: Option<i64>,
        name: String,
    },
}

impl CreateRequest {
    pub fn item_type(&self) -> ItemType {
        match self {
            CreateRequest::Student { .. } => ItemType::Student,
            CreateRequest::Level { .. } => ItemType::Level,
            CreateRequest::StudyForm { .. } => ItemType::Form,
            CreateRequest::Course { .. } => ItemType::Course,
            CreateRequest::Group { .. } => ItemType::Group,
        }
    }

    pub fn to_body(&self) -> Value {
        match self {
            CreateRequest::Student {
                group_id,
                full_name,
                login,
                email,
                phone,
                is_elder,
            } => {
                let mut body = json!({
                    "type": "student",
                    "full_name": full_name,
                    "login": login,
                    "email": email,
                    "phone": phone,
                    "is_elder": is_elder,
                });
                if let Some(group_id) = group_id {
                    body["group_id"] = json!(group_id);
                }
                body
            }
            CreateRequest::Level { name, order } => json!({
                "type": "level",
                "name": name,
                "order": order,
            }),
            CreateRequest::StudyForm {
                level_id,
                name,
                order,
            } => {
                let mut body = json!({
                    "type": "form",
                    "name": name,
                    "order": order,
                });
                if let Some(level_id) = level_id {
                    body["level_id"] = json!(level_id);
                }
                body
            }
            CreateRequest::Course { form_id, number } => {
                let mut body = json!({
                    "type": "course",
                    "number": number,
                });
                if let Some(form_id) = form_id {
                    body["form_id"] = json!(form_id);
                }
                body
            }
            CreateRequest::Group { course_id, name } => {
                let mut body = json!({
                    "type": "group",
                    "name": name,
                });
                if let Some(course_id) = course_id {
                    body["course_id"] = json!(course_id);
                }
                body
            }
        }
    }
}

/// Changed fields of the student edit form.
#[derive(Clone, Debug, PartialEq)]
pub struct StudentUpdate {
    pub id: i64,
    pub full_name: String,
    pub login: String,
    pub password: String,
    pub email: String,
    pub phone: String,
    pub user_type: String,
    pub is_active: bool,
}

impl StudentUpdate {
    pub fn to_body(&self) -> Value {
        json!({
            "type": "student",
            "id": self.id,
            "full_name": self.full_name,
            "login": self.login,
            "password": self.password,
            "email": self.email,
            "phone": self.phone,
            "user_type": self.user_type,
            "is_active": self.is_active,
        })
    }
}

/// A mutating request plus the client-side context needed to follow it
/// up (names for notifications, source containers for undo). Only the
/// wire fields reach the body.
#[derive(Clone, Debug)]
pub enum Mutation {
    Create(CreateRequest),
    UpdateStudent(StudentUpdate),
    Delete {
        item_type: ItemType,
        id: i64,
        name: String,
    },
    Rename {
        item_type: ItemType,
        id: i64,
        old_name: String,
        new_name: String,
    },
    Move {
        item_type: ItemType,
        item_id: i64,
        name: String,
        source: Option<(ItemType, i64)>,
        target: (ItemType, i64),
    },
    Restore {
        cache_id: i64,
    },
    ClearCache,
    GeneratePassword {
        student_id: i64,
    },
}

impl Mutation {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Mutation::Create(_) => "api/create/",
            Mutation::UpdateStudent(_) => "api/update/",
            Mutation::Delete { .. } => "api/delete/",
            Mutation::Rename { .. } => "api/rename/",
            Mutation::Move { .. } => "api/move-item/",
            Mutation::Restore { .. } => "api/restore/",
            Mutation::ClearCache => "api/clear-cache/",
            Mutation::GeneratePassword { .. } => "api/generate-password/",
        }
    }

    pub fn to_body(&self) -> Value {
        match self {
            Mutation::Create(request) => request.to_body(),
            Mutation::UpdateStudent(update) => update.to_body(),
            Mutation::Delete { item_type, id, .. } => json!({
                "type": item_type.wire_name(),
                "id": id,
            }),
            Mutation::Rename {
                item_type,
                id,
                new_name,
                ..
            } => json!({
                "type": item_type.wire_name(),
                "id": id,
                "name": new_name,
            }),
            Mutation::Move {
                item_type,
                item_id,
                target,
                ..
            } => json!({
                "type": item_type.wire_name(),
                "item_id": item_id,
                "target_type": target.0.wire_name(),
                "target_id": target.1,
            }),
            Mutation::Restore { cache_id } => json!({ "cache_id": cache_id }),
            Mutation::ClearCache => json!({}),
            Mutation::GeneratePassword { student_id } => json!({ "student_id": student_id }),
        }
    }

    pub fn success_message(&self) -> String {
        match self {
            Mutation::Create(request) => {
                format!("Created {}", request.item_type().display_name())
            }
            Mutation::UpdateStudent(_) => "Changes saved".to_string(),
            Mutation::Delete { name, .. } => format!("Deleted \"{name}\""),
            Mutation::Rename {
                old_name, new_name, ..
            } => format!("Renamed \"{old_name}\" to \"{new_name}\""),
            Mutation::Move { name, .. } => format!("Moved \"{name}\""),
            Mutation::Restore { .. } => "Item restored".to_string(),
            Mutation::ClearCache => "Trash cache cleared".to_string(),
            Mutation::GeneratePassword { .. } => "Password generated".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_folder_listing() {
        let body = json!({
            "type": "course",
            "id": "7",
            "title": "2 курс",
            "path": [
                {"type": "level", "id": 1, "name": "Бакалавриат"},
                {"type": "form", "id": 2, "name": "Очная форма"},
                {"type": "course", "id": "7", "name": "2 курс"},
            ],
            "items": [
                {"type": "group", "id": 10, "name": "СПД-103", "icon": "bi-people", "count": 24},
            ],
        });
        let dto: FolderContentDto = serde_json::from_value(body).unwrap();
        let content = dto.into_content().unwrap();

        assert_eq!(content.location(), Some((ItemType::Course, 7)));
        assert_eq!(content.path.len(), 3);
        match content.payload {
            ContentPayload::Folder { children } => {
                assert_eq!(children.len(), 1);
                assert_eq!(children[0].item_type, ItemType::Group);
                assert_eq!(children[0].count, 24);
            }
            _ => panic!("expected a folder payload"),
        }
    }

    #[test]
    fn test_decode_group_listing_sorts_students() {
        let body = json!({
            "type": "group",
            "id": 10,
            "title": "СПД-103",
            "items": [
                {"id": 1, "full_name": "Яковлев Пётр", "login": "yakovlev.p"},
                {"id": 2, "full_name": "Алексеев Иван", "login": "alekseev.i", "is_elder": true},
            ],
        });
        let dto: FolderContentDto = serde_json::from_value(body).unwrap();
        let content = dto.into_content().unwrap();

        match content.payload {
            ContentPayload::Students { students } => {
                assert_eq!(students[0].full_name, "Алексеев Иван");
                assert!(students[0].is_elder);
                assert!(students[0].is_active);
                assert_eq!(students[1].full_name, "Яковлев Пётр");
            }
            _ => panic!("expected a student payload"),
        }
    }

    #[test]
    fn test_decode_root_listing_has_no_location() {
        let body = json!({
            "type": "root",
            "id": 0,
            "items": [
                {"type": "level", "id": 1, "name": "Бакалавриат", "count": 120},
            ],
        });
        let dto: FolderContentDto = serde_json::from_value(body).unwrap();
        let content = dto.into_content().unwrap();
        assert_eq!(content.location(), None);
        assert_eq!(content.item_count(), 1);
    }

    #[test]
    fn test_malformed_item_is_a_decode_error() {
        let body = json!({
            "type": "level",
            "id": 1,
            "items": [{"type": "form", "name": "missing id"}],
        });
        let dto: FolderContentDto = serde_json::from_value(body).unwrap();
        assert!(matches!(dto.into_content(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_move_body_keys() {
        let mutation = Mutation::Move {
            item_type: ItemType::Student,
            item_id: 5,
            name: "Алексеев Иван".into(),
            source: Some((ItemType::Group, 1)),
            target: (ItemType::Group, 2),
        };
        let body = mutation.to_body();
        assert_eq!(body["type"], "student");
        assert_eq!(body["item_id"], 5);
        assert_eq!(body["target_type"], "group");
        assert_eq!(body["target_id"], 2);
        // Client-side context stays off the wire.
        assert!(body.get("source").is_none());
        assert!(body.get("name").is_none());
        assert_eq!(mutation.endpoint(), "api/move-item/");
    }

    #[test]
    fn test_create_student_body_includes_parent_group() {
        let request = CreateRequest::Student {
            group_id: Some(10),
            full_name: "Алексеев Иван".into(),
            login: "alekseev.i".into(),
            email: String::new(),
            phone: String::new(),
            is_elder: false,
        };
        let body = request.to_body();
        assert_eq!(body["type"], "student");
        assert_eq!(body["group_id"], 10);

        let orphan = CreateRequest::Student {
            group_id: None,
            full_name: "X".into(),
            login: "x".into(),
            email: String::new(),
            phone: String::new(),
            is_elder: false,
        };
        assert!(orphan.to_body().get("group_id").is_none());
    }

    #[test]
    fn test_rename_body_carries_new_name_only() {
        let mutation = Mutation::Rename {
            item_type: ItemType::Group,
            id: 3,
            old_name: "Group A".into(),
            new_name: "Group B".into(),
        };
        let body = mutation.to_body();
        assert_eq!(body["name"], "Group B");
        assert!(body.get("old_name").is_none());
    }

    #[test]
    fn test_history_entries_reverse_into_chronological_order() {
        let entries = vec![
            HistoryEntryDto {
                item_type: ItemType::Group,
                object_id: 2,
                title: "newest".into(),
            },
            HistoryEntryDto {
                item_type: ItemType::Level,
                object_id: 1,
                title: "oldest".into(),
            },
        ];
        let locations = history_to_locations(entries);
        assert_eq!(locations[0].title, "oldest");
        assert_eq!(locations[1].title, "newest");
    }

    #[test]
    fn test_ack_decode_with_error() {
        let ack: MutationAck =
            serde_json::from_value(json!({"success": false, "error": "Логин уже существует"}))
                .unwrap();
        assert!(!ack.success);
        assert_eq!(ack.error.as_deref(), Some("Логин уже существует"));

        let ack: MutationAck =
            serde_json::from_value(json!({"success": true, "password": "xK3z9pQ2"})).unwrap();
        assert!(ack.success);
        assert_eq!(ack.password.as_deref(), Some("xK3z9pQ2"));
    }

    #[test]
    fn test_trash_entry_display_name() {
        let entry: TrashEntry = serde_json::from_value(json!({
            "id": 1,
            "type": "student",
            "data": {"full_name": "Алексеев Иван", "login": "alekseev.i"},
            "deleted_at": "01.09.2025 10:00",
            "deleted_by": "admin",
        }))
        .unwrap();
        assert_eq!(entry.display_name(), "Алексеев Иван");

        let nameless: TrashEntry = serde_json::from_value(json!({"id": 2})).unwrap();
        assert_eq!(nameless.display_name(), "(unnamed)");
    }

    #[test]
    fn test_log_details_line() {
        let entry: ActionLogEntry = serde_json::from_value(json!({
            "time": "01.09.2025 10:00:00",
            "user": "admin",
            "action": "move",
            "model": "Student",
            "details": {"from": "СПД-103", "to": "СПД-104"},
            "ip": "127.0.0.1",
        }))
        .unwrap();
        assert_eq!(entry.details_line(), "from: СПД-103, to: СПД-104");

        let bare: ActionLogEntry = serde_json::from_value(json!({"action": "login"})).unwrap();
        assert_eq!(bare.details_line(), "");
    }
}
