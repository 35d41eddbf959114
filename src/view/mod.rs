pub mod content;
pub mod modals;
pub mod toolbar;
pub mod tree;

use crate::model::{DraggedItem, ItemType};
use crate::state::PendingDeletion;

/// Deferred UI effects. Render code pushes these instead of mutating
/// coordinator state mid-frame; the app applies them after all panels
/// are drawn.
#[derive(Clone, Debug)]
pub enum UiAction {
    Select(ItemType, i64),
    Back,
    Forward,
    Up,
    Refresh,
    Undo,
    Redo,
    OpenCreate {
        item_type: ItemType,
        parent: Option<(ItemType, i64)>,
    },
    OpenEdit(i64),
    OpenDelete(PendingDeletion),
    DeleteConfirmed,
    BeginRename {
        item_type: ItemType,
        id: i64,
        name: String,
    },
    CommitRename,
    CancelRename,
    DragStarted(DraggedItem),
    Drop {
        item: DraggedItem,
        target: (ItemType, i64),
    },
    SubmitCreate,
    SubmitEdit,
    CloseModal,
    OpenTrash,
    Restore(i64),
    ClearCache,
    ToggleLogs,
    ReloadLogs,
    GeneratePassword(i64),
    OpenSearchHit(i64),
    DismissSearch,
}
