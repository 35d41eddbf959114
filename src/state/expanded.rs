// Expanded tree branches, persisted across sessions
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::model::ItemType;

const STATE_FILE: &str = "expanded_nodes.json";

pub fn node_key(item_type: ItemType, id: i64) -> String {
    format!("{}:{}", item_type.wire_name(), id)
}

/// Which tree branches are open. Lives in its own state file so it
/// survives restarts independently of navigation history.
#[derive(Debug, Default)]
pub struct ExpandedNodes {
    keys: HashSet<String>,
}

impl ExpandedNodes {
    pub fn load() -> Self {
        let Some(path) = Self::state_path() else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(contents) => Self::from_json(&contents),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) {
        let Some(path) = Self::state_path() else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("could not create state directory: {e}");
                return;
            }
        }
        match serde_json::to_string(&self.keys) {
            Ok(contents) => {
                if let Err(e) = fs::write(&path, contents) {
                    log::warn!("could not persist expanded nodes: {e}");
                }
            }
            Err(e) => log::warn!("could not serialize expanded nodes: {e}"),
        }
    }

    pub fn contains(&self, item_type: ItemType, id: i64) -> bool {
        self.keys.contains(&node_key(item_type, id))
    }

    /// Flip a node and report whether it is now expanded.
    pub fn toggle(&mut self, item_type: ItemType, id: i64) -> bool {
        let key = node_key(item_type, id);
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    pub fn insert(&mut self, item_type: ItemType, id: i64) {
        self.keys.insert(node_key(item_type, id));
    }

    pub fn from_json(contents: &str) -> Self {
        match serde_json::from_str::<HashSet<String>>(contents) {
            Ok(keys) => Self { keys },
            Err(e) => {
                log::warn!("discarding unreadable expanded-node state: {e}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.keys).unwrap_or_else(|_| "[]".to_string())
    }

    fn state_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "dekanat")
            .map(|dirs| dirs.data_dir().join(STATE_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_contains() {
        let mut expanded = ExpandedNodes::default();
        assert!(!expanded.contains(ItemType::Level, 1));

        assert!(expanded.toggle(ItemType::Level, 1));
        assert!(expanded.contains(ItemType::Level, 1));

        assert!(!expanded.toggle(ItemType::Level, 1));
        assert!(!expanded.contains(ItemType::Level, 1));
    }

    #[test]
    fn test_json_round_trip() {
        let mut expanded = ExpandedNodes::default();
        expanded.insert(ItemType::Level, 1);
        expanded.insert(ItemType::Course, 12);

        let restored = ExpandedNodes::from_json(&expanded.to_json());
        assert!(restored.contains(ItemType::Level, 1));
        assert!(restored.contains(ItemType::Course, 12));
        assert!(!restored.contains(ItemType::Group, 5));
    }

    #[test]
    fn test_garbage_state_falls_back_to_empty() {
        let restored = ExpandedNodes::from_json("{not json");
        assert!(!restored.contains(ItemType::Level, 1));
    }
}
