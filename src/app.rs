// Application state and event handling for the admin console
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use eframe::egui;

use crate::api::client::ApiClient;
use crate::api::types::{ActionLogEntry, Mutation, MutationAck};
use crate::api::worker::{
    spawn_worker, ApiCommand, ApiEvent, ContentIntent, ContentTarget,
};
use crate::api::ApiError;
use crate::config::Config;
use crate::model::{
    ContentPayload, DragClipboard, FolderChild, FolderContent, ItemType, Location, PathSegment,
};
use crate::state::{
    node_key, CreateForm, EditStudentForm, EditStudentModal, ExpandedNodes, NavigationHistory,
    PendingDeletion, RenameEdit, SearchState, TrashModal, UndoStack, UndoableAction,
};
use crate::style;
use crate::view::UiAction;

/// What the central pane is currently showing.
pub enum ContentPane {
    Idle,
    Loading,
    Ready(FolderContent),
    Failed(String),
}

pub enum Modal {
    None,
    Create(CreateForm),
    EditStudent(EditStudentModal),
    ConfirmDelete {
        pending: PendingDeletion,
        submitting: bool,
    },
    Trash(TrashModal),
}

pub struct Dekanat {
    pub config: Config,
    command_tx: Sender<ApiCommand>,
    event_rx: Receiver<ApiEvent>,

    // Navigation
    pub history: NavigationHistory,
    pub current_folder: Option<(ItemType, i64)>,
    pub content: ContentPane,
    pub breadcrumb: Vec<PathSegment>,
    content_seq: u64,
    pending_content_seq: Option<u64>,

    // Hierarchy tree
    pub tree_roots: Option<Vec<FolderChild>>,
    pub tree_children: HashMap<String, Vec<FolderChild>>,
    pub tree_loading: HashSet<String>,
    pub expanded: ExpandedNodes,
    pub selected_node: Option<(ItemType, i64)>,

    // Search
    pub search: SearchState,

    // Transient interaction state
    pub rename_edit: Option<RenameEdit>,
    pub clipboard: DragClipboard,
    pub undo: UndoStack,
    pub modal: Modal,

    // Action log panel
    pub show_logs: bool,
    pub logs: Option<Vec<ActionLogEntry>>,
    pub logs_error: Option<String>,
    pub logs_loading: bool,

    // Messages
    pub info_message: Option<(String, Instant)>,
    pub error_message: Option<(String, Instant)>,
    pub focus_input: bool,
}

impl Dekanat {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, client: ApiClient) -> Self {
        style::Theme::from_mode(&config.theme.mode).apply(&cc.egui_ctx);

        let (command_tx, event_rx) = spawn_worker(cc.egui_ctx.clone(), client);

        let mut app = Self {
            config,
            command_tx,
            event_rx,
            history: NavigationHistory::new(),
            current_folder: None,
            content: ContentPane::Idle,
            breadcrumb: Vec::new(),
            content_seq: 0,
            pending_content_seq: None,
            tree_roots: None,
            tree_children: HashMap::new(),
            tree_loading: HashSet::new(),
            expanded: ExpandedNodes::load(),
            selected_node: None,
            search: SearchState::new(),
            rename_edit: None,
            clipboard: DragClipboard::new(),
            undo: UndoStack::new(),
            modal: Modal::None,
            show_logs: false,
            logs: None,
            logs_error: None,
            logs_loading: false,
            info_message: None,
            error_message: None,
            focus_input: false,
        };

        app.request_tree_roots();
        let _ = app.command_tx.send(ApiCommand::LoadHistory);
        app
    }

    // --- Requests ---

    fn request_content(&mut self, intent: ContentIntent, target: ContentTarget) {
        self.content_seq += 1;
        self.pending_content_seq = Some(self.content_seq);
        if !matches!(intent, ContentIntent::Parent | ContentIntent::Tree) {
            self.content = ContentPane::Loading;
        }
        let _ = self.command_tx.send(ApiCommand::LoadContent {
            seq: self.content_seq,
            intent,
            target,
        });
    }

    pub(crate) fn request_tree_roots(&mut self) {
        if !self.tree_loading.insert("root".to_string()) {
            return;
        }
        let _ = self.command_tx.send(ApiCommand::LoadContent {
            seq: 0,
            intent: ContentIntent::Tree,
            target: ContentTarget::Root,
        });
    }

    pub(crate) fn request_tree_children(&mut self, item_type: ItemType, id: i64) {
        if !self.tree_loading.insert(node_key(item_type, id)) {
            return;
        }
        let _ = self.command_tx.send(ApiCommand::LoadContent {
            seq: 0,
            intent: ContentIntent::Tree,
            target: ContentTarget::Node(item_type, id),
        });
    }

    fn submit_mutation(&self, mutation: Mutation, replay: bool) {
        let _ = self
            .command_tx
            .send(ApiCommand::Mutate { mutation, replay });
    }

    fn reload_logs(&mut self) {
        self.logs_loading = true;
        self.logs_error = None;
        let _ = self.command_tx.send(ApiCommand::LoadLogs);
    }

    // --- Navigation ---

    pub(crate) fn navigate_to(&mut self, item_type: ItemType, id: i64) {
        self.selected_node = Some((item_type, id));
        self.rename_edit = None;
        self.request_content(ContentIntent::Visit, ContentTarget::Node(item_type, id));
    }

    fn go_back(&mut self) {
        if let Some(location) = self.history.peek_back().cloned() {
            let (item_type, id) = location.key();
            self.request_content(ContentIntent::Back, ContentTarget::Node(item_type, id));
        }
    }

    fn go_forward(&mut self) {
        if let Some(location) = self.history.peek_forward().cloned() {
            let (item_type, id) = location.key();
            self.request_content(ContentIntent::Forward, ContentTarget::Node(item_type, id));
        }
    }

    fn go_up(&mut self) {
        if let Some((item_type, id)) = self.current_folder {
            self.request_content(ContentIntent::Parent, ContentTarget::Node(item_type, id));
        }
    }

    fn refetch_current(&mut self) {
        if let Some((item_type, id)) = self.current_folder {
            self.request_content(ContentIntent::Refresh, ContentTarget::Node(item_type, id));
        }
    }

    // --- Event handling ---

    fn drain_events(&mut self) {
        let events: Vec<ApiEvent> = self.event_rx.try_iter().collect();
        for event in events {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::ContentLoaded {
                seq,
                intent,
                target,
                result,
            } => {
                if intent == ContentIntent::Tree {
                    self.handle_tree_loaded(target, result);
                } else {
                    self.handle_content_loaded(seq, intent, result);
                }
            }
            ApiEvent::SearchDone { seq, result } => match result {
                Ok(response) => {
                    self.search.apply(seq, response.results, response.count);
                }
                Err(err) => {
                    log::warn!("search failed: {err}");
                    self.search.fail(seq);
                    self.set_error(err.user_message());
                }
            },
            ApiEvent::StudentLoaded { id, result } => self.handle_student_loaded(id, result),
            ApiEvent::HistoryLoaded(result) => match result {
                Ok(locations) => self.history.hydrate(locations),
                Err(err) => log::warn!("navigation history unavailable: {err}"),
            },
            ApiEvent::LogsLoaded(result) => {
                self.logs_loading = false;
                match result {
                    Ok(entries) => {
                        self.logs = Some(entries);
                        self.logs_error = None;
                    }
                    Err(err) => {
                        log::warn!("action log load failed: {err}");
                        self.logs_error = Some(err.user_message());
                    }
                }
            }
            ApiEvent::TrashLoaded(result) => {
                if let Modal::Trash(trash) = &mut self.modal {
                    trash.loading = false;
                    match result {
                        Ok(items) => {
                            trash.items = items;
                            trash.error = None;
                        }
                        Err(err) => {
                            log::warn!("trash load failed: {err}");
                            trash.error = Some(err.user_message());
                        }
                    }
                }
            }
            ApiEvent::MutationDone {
                mutation,
                replay,
                result,
            } => match result {
                Ok(ack) => self.mutation_succeeded(mutation, replay, ack),
                Err(err) => self.mutation_failed(mutation, err),
            },
        }
    }

    fn handle_content_loaded(
        &mut self,
        seq: u64,
        intent: ContentIntent,
        result: Result<FolderContent, ApiError>,
    ) {
        // Only the most recent request may touch the pane; a slow
        // response for a folder the user already left is dropped.
        if self.pending_content_seq != Some(seq) {
            log::debug!("discarding stale content response (seq {seq})");
            return;
        }
        self.pending_content_seq = None;

        match result {
            Ok(content) => self.apply_content(intent, content),
            Err(err) => {
                log::warn!("content load failed: {err}");
                if intent == ContentIntent::Parent {
                    self.set_error(err.user_message());
                } else {
                    self.content = ContentPane::Failed(err.user_message());
                }
            }
        }
    }

    fn apply_content(&mut self, intent: ContentIntent, content: FolderContent) {
        if intent == ContentIntent::Parent {
            // Second-to-last path entry is the immediate parent; at the
            // root there is nowhere further up.
            if content.path.len() >= 2 {
                let parent = content.path[content.path.len() - 2].clone();
                self.navigate_to(parent.item_type, parent.id);
            }
            return;
        }

        match intent {
            ContentIntent::Visit => {
                if let Some((item_type, id)) = content.location() {
                    self.history
                        .visit(Location::new(item_type, id, content.title.clone()));
                }
            }
            ContentIntent::Back => {
                self.history.go_back();
            }
            ContentIntent::Forward => {
                self.history.go_forward();
            }
            _ => {}
        }

        if matches!(intent, ContentIntent::Back | ContentIntent::Forward)
            && content.path.len() > 1
        {
            // Re-open the tree along the way to the revisited node.
            for segment in &content.path[..content.path.len() - 1] {
                self.expanded.insert(segment.item_type, segment.id);
            }
            self.expanded.save();
        }

        self.current_folder = content.location();
        self.selected_node = content.location();
        self.breadcrumb = content.path.clone();
        self.cache_children(content.location(), &content);
        self.content = ContentPane::Ready(content);
    }

    fn handle_tree_loaded(
        &mut self,
        target: ContentTarget,
        result: Result<FolderContent, ApiError>,
    ) {
        let key = match target.node() {
            Some((item_type, id)) => node_key(item_type, id),
            None => "root".to_string(),
        };
        self.tree_loading.remove(&key);

        match result {
            Ok(content) => self.cache_children(target.node(), &content),
            Err(err) => {
                log::warn!("tree load failed for {key}: {err}");
                self.set_error(err.user_message());
            }
        }
    }

    fn cache_children(&mut self, node: Option<(ItemType, i64)>, content: &FolderContent) {
        if let ContentPayload::Folder { children } = &content.payload {
            match node {
                Some((item_type, id)) => {
                    self.tree_children
                        .insert(node_key(item_type, id), children.clone());
                }
                None => self.tree_roots = Some(children.clone()),
            }
        }
    }

    fn handle_student_loaded(
        &mut self,
        id: i64,
        result: Result<crate::api::types::StudentDetail, ApiError>,
    ) {
        let Modal::EditStudent(modal) = &mut self.modal else {
            return;
        };
        let expected = match modal {
            EditStudentModal::Loading { id } => *id,
            EditStudentModal::Failed { id, .. } => *id,
            EditStudentModal::Ready(form) => form.id,
        };
        if expected != id {
            return;
        }
        match result {
            Ok(detail) => {
                *modal = EditStudentModal::Ready(EditStudentForm::from_detail(detail));
                self.focus_input = true;
            }
            Err(err) => {
                log::warn!("student {id} load failed: {err}");
                *modal = EditStudentModal::Failed {
                    id,
                    message: err.user_message(),
                };
            }
        }
    }

    // --- Mutation coordinator ---

    fn mutation_succeeded(&mut self, mutation: Mutation, replay: bool, ack: MutationAck) {
        match &mutation {
            Mutation::GeneratePassword { student_id } => {
                if let Modal::EditStudent(EditStudentModal::Ready(form)) = &mut self.modal {
                    if form.id == *student_id {
                        if let Some(password) = ack.password {
                            form.password = password;
                            form.show_password = true;
                        }
                    }
                }
                self.set_info(mutation.success_message());
                return;
            }
            Mutation::Restore { .. } | Mutation::ClearCache => {
                if let Modal::Trash(trash) = &mut self.modal {
                    trash.loading = true;
                    trash.confirm_clear = false;
                    let _ = self.command_tx.send(ApiCommand::LoadTrash);
                }
                self.set_info(mutation.success_message());
                if matches!(mutation, Mutation::Restore { .. }) {
                    self.refetch_current();
                }
                return;
            }
            Mutation::Create(_) | Mutation::UpdateStudent(_) | Mutation::Delete { .. } => {
                self.modal = Modal::None;
            }
            Mutation::Rename {
                item_type,
                id,
                old_name,
                new_name,
            } => {
                self.rename_edit = None;
                // Show the confirmed name right away; the refetch below
                // brings the rest of the listing in line.
                if let ContentPane::Ready(content) = &mut self.content {
                    if let ContentPayload::Folder { children } = &mut content.payload {
                        for child in children.iter_mut() {
                            if child.item_type == *item_type && child.id == *id {
                                child.name = new_name.clone();
                            }
                        }
                    }
                }
                if !replay {
                    self.undo.record(UndoableAction::Rename {
                        item_type: *item_type,
                        id: *id,
                        old_name: old_name.clone(),
                        new_name: new_name.clone(),
                    });
                }
            }
            Mutation::Move {
                item_type,
                item_id,
                name,
                source,
                target,
            } => {
                if !replay {
                    if let Some(from) = source {
                        self.undo.record(UndoableAction::Move {
                            item_type: *item_type,
                            item_id: *item_id,
                            name: name.clone(),
                            from: *from,
                            to: *target,
                        });
                    }
                }
            }
        }

        self.set_info(mutation.success_message());
        self.refetch_current();
    }

    fn mutation_failed(&mut self, mutation: Mutation, err: ApiError) {
        log::warn!("{} failed: {err}", mutation.endpoint());
        match &mutation {
            // The editable field disappears and the original name stays.
            Mutation::Rename { .. } => self.rename_edit = None,
            Mutation::UpdateStudent(_) => {
                if let Modal::EditStudent(EditStudentModal::Ready(form)) = &mut self.modal {
                    form.submitting = false;
                }
            }
            Mutation::Create(_) => {
                if let Modal::Create(form) = &mut self.modal {
                    form.submitting = false;
                }
            }
            Mutation::Delete { .. } => {
                if let Modal::ConfirmDelete { submitting, .. } = &mut self.modal {
                    *submitting = false;
                }
            }
            Mutation::Restore { .. } | Mutation::ClearCache => {
                if let Modal::Trash(trash) = &mut self.modal {
                    trash.loading = false;
                }
            }
            _ => {}
        }
        self.set_error(err.user_message());
    }

    // --- Undo / paste ---

    fn undo_last(&mut self) {
        match self.undo.undo() {
            Some(action) => self.submit_mutation(Self::action_to_mutation(action), true),
            None => self.set_info("Nothing to undo"),
        }
    }

    fn redo_last(&mut self) {
        match self.undo.redo() {
            Some(action) => self.submit_mutation(Self::action_to_mutation(action), true),
            None => self.set_info("Nothing to redo"),
        }
    }

    fn action_to_mutation(action: UndoableAction) -> Mutation {
        match action {
            UndoableAction::Move {
                item_type,
                item_id,
                name,
                from,
                to,
            } => Mutation::Move {
                item_type,
                item_id,
                name,
                source: Some(from),
                target: to,
            },
            UndoableAction::Rename {
                item_type,
                id,
                old_name,
                new_name,
            } => Mutation::Rename {
                item_type,
                id,
                old_name,
                new_name,
            },
        }
    }

    fn paste_clipboard(&mut self) {
        let Some(item) = self.clipboard.get().cloned() else {
            return;
        };
        let Some((folder_type, folder_id)) = self.current_folder else {
            return;
        };
        if folder_type != ItemType::Group || item.item_type != ItemType::Student {
            return;
        }
        if item.source == Some((folder_type, folder_id)) {
            return;
        }
        self.submit_mutation(
            Mutation::Move {
                item_type: item.item_type,
                item_id: item.id,
                name: item.name,
                source: item.source,
                target: (folder_type, folder_id),
            },
            false,
        );
    }

    // --- Deferred UI actions ---

    fn apply_action(&mut self, action: UiAction) {
        match action {
            UiAction::Select(item_type, id) => self.navigate_to(item_type, id),
            UiAction::Back => self.go_back(),
            UiAction::Forward => self.go_forward(),
            UiAction::Up => self.go_up(),
            UiAction::Refresh => self.refetch_current(),
            UiAction::Undo => self.undo_last(),
            UiAction::Redo => self.redo_last(),
            UiAction::OpenCreate { item_type, parent } => {
                self.modal = Modal::Create(CreateForm::new(item_type, parent));
                self.focus_input = true;
            }
            UiAction::OpenEdit(id) | UiAction::OpenSearchHit(id) => {
                self.search.dismiss();
                self.modal = Modal::EditStudent(EditStudentModal::Loading { id });
                let _ = self.command_tx.send(ApiCommand::LoadStudent { id });
            }
            UiAction::OpenDelete(pending) => {
                self.modal = Modal::ConfirmDelete {
                    pending,
                    submitting: false,
                };
            }
            UiAction::DeleteConfirmed => {
                if let Modal::ConfirmDelete {
                    pending,
                    submitting,
                } = &mut self.modal
                {
                    if !*submitting {
                        *submitting = true;
                        let mutation = Mutation::Delete {
                            item_type: pending.item_type,
                            id: pending.id,
                            name: pending.name.clone(),
                        };
                        let _ = self.command_tx.send(ApiCommand::Mutate {
                            mutation,
                            replay: false,
                        });
                    }
                }
            }
            UiAction::BeginRename {
                item_type,
                id,
                name,
            } => {
                self.rename_edit = Some(RenameEdit::begin(item_type, id, name));
                self.focus_input = true;
            }
            UiAction::CommitRename => {
                let mut mutation = None;
                let mut close = false;
                if let Some(edit) = &self.rename_edit {
                    if edit.changed() {
                        mutation = Some(Mutation::Rename {
                            item_type: edit.item_type,
                            id: edit.id,
                            old_name: edit.original.clone(),
                            new_name: edit.new_name().to_string(),
                        });
                    } else {
                        close = true;
                    }
                }
                if close {
                    self.rename_edit = None;
                }
                if let Some(mutation) = mutation {
                    self.submit_mutation(mutation, false);
                }
            }
            UiAction::CancelRename => self.rename_edit = None,
            UiAction::DragStarted(item) => self.clipboard.set(item),
            UiAction::Drop { item, target } => {
                if target.0.is_container()
                    && (item.item_type, item.id) != target
                    && item.source != Some(target)
                {
                    self.submit_mutation(
                        Mutation::Move {
                            item_type: item.item_type,
                            item_id: item.id,
                            name: item.name,
                            source: item.source,
                            target,
                        },
                        false,
                    );
                }
            }
            UiAction::SubmitCreate => {
                let mut request = None;
                if let Modal::Create(form) = &mut self.modal {
                    if !form.submitting {
                        if let Some(r) = form.to_request() {
                            form.submitting = true;
                            request = Some(r);
                        }
                    }
                }
                if let Some(request) = request {
                    self.submit_mutation(Mutation::Create(request), false);
                }
            }
            UiAction::SubmitEdit => {
                let mut update = None;
                if let Modal::EditStudent(EditStudentModal::Ready(form)) = &mut self.modal {
                    if !form.submitting && form.is_valid() {
                        form.submitting = true;
                        update = Some(form.to_update());
                    }
                }
                if let Some(update) = update {
                    self.submit_mutation(Mutation::UpdateStudent(update), false);
                }
            }
            UiAction::CloseModal => self.modal = Modal::None,
            UiAction::OpenTrash => {
                self.modal = Modal::Trash(TrashModal {
                    loading: true,
                    ..Default::default()
                });
                let _ = self.command_tx.send(ApiCommand::LoadTrash);
            }
            UiAction::Restore(cache_id) => {
                self.submit_mutation(Mutation::Restore { cache_id }, false)
            }
            UiAction::ClearCache => self.submit_mutation(Mutation::ClearCache, false),
            UiAction::ToggleLogs => {
                self.show_logs = !self.show_logs;
                if self.show_logs {
                    self.reload_logs();
                }
            }
            UiAction::ReloadLogs => self.reload_logs(),
            UiAction::GeneratePassword(student_id) => {
                self.submit_mutation(Mutation::GeneratePassword { student_id }, false)
            }
            UiAction::DismissSearch => self.search.dismiss(),
        }
    }

    // --- Frame upkeep ---

    fn poll_search(&mut self, ctx: &egui::Context, now: Instant) {
        if let Some((seq, query)) = self.search.poll_due(now) {
            let _ = self.command_tx.send(ApiCommand::Search { seq, query });
        }
        if let Some(remaining) = self.search.time_until_due(now) {
            ctx.request_repaint_after(remaining);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (back, forward, up, paste) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft) && i.modifiers.alt,
                i.key_pressed(egui::Key::ArrowRight) && i.modifiers.alt,
                i.key_pressed(egui::Key::Backspace) && i.modifiers.is_none(),
                i.key_pressed(egui::Key::V) && i.modifiers.ctrl,
            )
        });
        if back {
            self.go_back();
        }
        if forward {
            self.go_forward();
        }
        if up {
            self.go_up();
        }
        if paste {
            self.paste_clipboard();
        }
    }

    pub(crate) fn set_info(&mut self, message: impl Into<String>) {
        self.info_message = Some((message.into(), Instant::now()));
        self.error_message = None;
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some((message.into(), Instant::now()));
        self.info_message = None;
    }

    fn clear_expired_messages(&mut self) {
        if let Some((_, since)) = &self.info_message {
            if since.elapsed().as_secs() >= style::MESSAGE_TIMEOUT_SECS {
                self.info_message = None;
            }
        }
        if let Some((_, since)) = &self.error_message {
            if since.elapsed().as_secs() >= style::MESSAGE_TIMEOUT_SECS {
                self.error_message = None;
            }
        }
    }
}

impl eframe::App for Dekanat {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.drain_events();
        self.poll_search(ctx, now);
        self.clear_expired_messages();
        if self.info_message.is_some() || self.error_message.is_some() {
            // Keep repainting so the notification disappears on time.
            ctx.request_repaint_after(Duration::from_millis(500));
        }
        self.handle_shortcuts(ctx);

        let mut actions: Vec<UiAction> = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.render_toolbar(ui, &mut actions);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        if self.show_logs {
            egui::TopBottomPanel::bottom("logs_panel")
                .resizable(true)
                .default_height(self.config.panel.logs_height)
                .show(ctx, |ui| {
                    self.render_logs_panel(ui, &mut actions);
                });
        }

        egui::SidePanel::left("tree_panel")
            .resizable(true)
            .default_width(self.config.panel.tree_width)
            .show(ctx, |ui| {
                self.render_tree_panel(ui, &mut actions);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_content_pane(ui, &mut actions);
        });

        self.render_modals(ctx, &mut actions);

        for action in actions {
            self.apply_action(action);
        }
    }
}
