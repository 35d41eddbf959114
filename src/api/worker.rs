// Background worker - runs API calls off the UI thread
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use crate::api::client::ApiClient;
use crate::api::types::{
    ActionLogEntry, Mutation, MutationAck, SearchResponse, StudentDetail, TrashEntry,
};
use crate::api::ApiError;
use crate::model::{FolderContent, ItemType, Location};

/// What a content fetch is aimed at. The synthetic root target lists
/// the education levels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContentTarget {
    Root,
    Node(ItemType, i64),
}

impl ContentTarget {
    pub fn wire_name(&self) -> &'static str {
        match self {
            ContentTarget::Root => "root",
            ContentTarget::Node(item_type, _) => item_type.wire_name(),
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            ContentTarget::Root => 0,
            ContentTarget::Node(_, id) => *id,
        }
    }

    pub fn node(&self) -> Option<(ItemType, i64)> {
        match self {
            ContentTarget::Root => None,
            ContentTarget::Node(item_type, id) => Some((*item_type, *id)),
        }
    }
}

/// Why a content fetch was issued; decides what the response commits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContentIntent {
    /// A fresh visit: pushes onto navigation history on success.
    Visit,
    /// Cursor moves; the stack itself stays untouched.
    Back,
    Forward,
    /// Re-fetch of the current folder, e.g. after a mutation.
    Refresh,
    /// Fetch issued to discover the parent from the breadcrumb path.
    Parent,
    /// Tree children cache fill; never touches history or the pane.
    Tree,
}

pub enum ApiCommand {
    LoadContent {
        seq: u64,
        intent: ContentIntent,
        target: ContentTarget,
    },
    Search {
        seq: u64,
        query: String,
    },
    LoadStudent {
        id: i64,
    },
    LoadHistory,
    LoadLogs,
    LoadTrash,
    Mutate {
        mutation: Mutation,
        replay: bool,
    },
}

pub enum ApiEvent {
    ContentLoaded {
        seq: u64,
        intent: ContentIntent,
        target: ContentTarget,
        result: Result<FolderContent, ApiError>,
    },
    SearchDone {
        seq: u64,
        result: Result<SearchResponse, ApiError>,
    },
    StudentLoaded {
        id: i64,
        result: Result<StudentDetail, ApiError>,
    },
    HistoryLoaded(Result<Vec<Location>, ApiError>),
    LogsLoaded(Result<Vec<ActionLogEntry>, ApiError>),
    TrashLoaded(Result<Vec<TrashEntry>, ApiError>),
    MutationDone {
        mutation: Mutation,
        replay: bool,
        result: Result<MutationAck, ApiError>,
    },
}

pub fn spawn_worker(
    ctx: eframe::egui::Context,
    mut client: ApiClient,
) -> (Sender<ApiCommand>, Receiver<ApiEvent>) {
    let (cmd_tx, cmd_rx) = channel();
    let (res_tx, res_rx) = channel();

    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            let event = match cmd {
                ApiCommand::LoadContent {
                    seq,
                    intent,
                    target,
                } => {
                    let result = client.folder_content(target.wire_name(), target.id());
                    ApiEvent::ContentLoaded {
                        seq,
                        intent,
                        target,
                        result,
                    }
                }
                ApiCommand::Search { seq, query } => ApiEvent::SearchDone {
                    seq,
                    result: client.search(&query),
                },
                ApiCommand::LoadStudent { id } => ApiEvent::StudentLoaded {
                    id,
                    result: client.student(id),
                },
                ApiCommand::LoadHistory => ApiEvent::HistoryLoaded(client.navigation_history()),
                ApiCommand::LoadLogs => ApiEvent::LogsLoaded(client.action_logs()),
                ApiCommand::LoadTrash => ApiEvent::TrashLoaded(client.trash()),
                ApiCommand::Mutate { mutation, replay } => {
                    let result = client.mutate(&mutation);
                    ApiEvent::MutationDone {
                        mutation,
                        replay,
                        result,
                    }
                }
            };
            if res_tx.send(event).is_err() {
                break;
            }
            ctx.request_repaint();
        }
    });

    (cmd_tx, res_rx)
}
