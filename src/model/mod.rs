mod clipboard;
mod content;
mod item;
mod location;

pub use clipboard::{DragClipboard, DraggedItem};
pub use content::{sort_students, ContentPayload, FolderChild, FolderContent, PathSegment, StudentRow};
pub use item::ItemType;
pub use location::Location;
