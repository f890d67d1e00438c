//! Profile ViewModel
//!
//! User picker plus the selected user's task list. The task list is a mirror
//! of the last successful response for the current selection:
//! - responses tagged with an older selection are dropped
//! - a task with a request in flight cannot be edited, saved or deleted again
//! - every failed request comes back as an error message for the notice bar

use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui;
use todo_core::{ActiveEdit, Selection, TaskMirror, TodoApi, TokenStore, User};
use todo_shared::constants::MSG_TASK_PROMPT;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::events::{AppEvent, ProfileEvent};

pub struct ProfileViewModel {
    pub users: Vec<User>,
    pub tasks: TaskMirror,
    pub new_task_title: String,
    pub active_edit: Option<ActiveEdit>,
    /// Blocking prompt, shown until acknowledged.
    pub prompt: Option<String>,
    pub loading_users: bool,
    pub loading_tasks: bool,
    pub creating: bool,
    selection: Selection,
    in_flight: HashSet<String>,
    api: Arc<dyn TodoApi>,
    session: Arc<dyn TokenStore>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl ProfileViewModel {
    pub fn new(
        api: Arc<dyn TodoApi>,
        session: Arc<dyn TokenStore>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            users: Vec::new(),
            tasks: TaskMirror::new(),
            new_task_title: String::new(),
            active_edit: None,
            prompt: None,
            loading_users: false,
            loading_tasks: false,
            creating: false,
            selection: Selection::default(),
            in_flight: HashSet::new(),
            api,
            session,
            event_tx,
        }
    }

    pub fn selected_email(&self) -> Option<&str> {
        self.selection.email()
    }

    pub fn is_busy(&self, task_id: &str) -> bool {
        self.in_flight.contains(task_id)
    }

    fn emit(
        &self,
        ctx: &egui::Context,
        fut: impl std::future::Future<Output = ProfileEvent> + Send + 'static,
    ) {
        let tx = self.event_tx.clone();
        let ctx = ctx.clone();
        tokio::spawn(async move {
            let event = fut.await;
            let _ = tx.send(AppEvent::Profile(event));
            ctx.request_repaint();
        });
    }

    /// Fetches the user list once, on entering the screen.
    pub fn load_users(&mut self, ctx: &egui::Context) {
        if self.loading_users {
            return;
        }
        self.loading_users = true;

        let api = Arc::clone(&self.api);
        self.emit(ctx, async move {
            let result = api
                .list_users()
                .await
                .map_err(|e| format!("Could not load users: {}", e));
            ProfileEvent::UsersLoaded(result)
        });
    }

    /// Changes the selected user. A real change drops the mirror and any edit;
    /// an email triggers one fetch, the empty option triggers none.
    pub fn select_user(&mut self, email: Option<String>, ctx: &egui::Context) -> bool {
        let Some(selection) = self.selection.select(email) else {
            return false;
        };

        self.tasks.clear();
        self.active_edit = None;
        self.in_flight.clear();
        self.creating = false;

        let Some(email) = self.selection.email().map(str::to_owned) else {
            self.loading_tasks = false;
            return false;
        };
        self.loading_tasks = true;

        let api = Arc::clone(&self.api);
        self.emit(ctx, async move {
            let result = api
                .list_tasks(&email)
                .await
                .map_err(|e| format!("Could not load tasks: {}", e));
            ProfileEvent::TasksLoaded { selection, result }
        });
        true
    }

    /// Creates a task for the selected user. Blank title or no selection shows
    /// the prompt instead. Returns true if a request was started.
    pub fn add_task(&mut self, ctx: &egui::Context) -> bool {
        let blank = self.new_task_title.trim().is_empty();
        let email = match self.selection.email() {
            Some(email) if !blank => email.to_string(),
            _ => {
                self.prompt = Some(MSG_TASK_PROMPT.to_string());
                return false;
            }
        };
        if self.creating {
            return false;
        }
        self.creating = true;

        // Sent as typed; trimming only decides whether the input is blank.
        let title = self.new_task_title.clone();
        let selection = self.selection.token();
        let api = Arc::clone(&self.api);
        self.emit(ctx, async move {
            let result = api
                .create_task(&title, &email)
                .await
                .map_err(|e| format!("Could not add task: {}", e));
            ProfileEvent::TaskCreated { selection, result }
        });
        true
    }

    /// Enters edit mode for `task_id`, replacing any other active edit.
    pub fn begin_edit(&mut self, task_id: &str) {
        if self.is_busy(task_id) {
            return;
        }
        if let Some(task) = self.tasks.get(task_id) {
            self.active_edit = Some(ActiveEdit::begin(task));
        }
    }

    pub fn cancel_edit(&mut self) {
        self.active_edit = None;
    }

    /// Sends the draft title of the active edit. Returns true if a request was started.
    pub fn save_edit(&mut self, ctx: &egui::Context) -> bool {
        let Some(edit) = self.active_edit.clone() else {
            return false;
        };
        if !self.in_flight.insert(edit.task_id.clone()) {
            return false;
        }

        let selection = self.selection.token();
        let api = Arc::clone(&self.api);
        self.emit(ctx, async move {
            let result = api
                .update_task(&edit.task_id, &edit.draft_title)
                .await
                .map_err(|e| format!("Could not update task: {}", e));
            ProfileEvent::TaskUpdated {
                selection,
                task_id: edit.task_id,
                result,
            }
        });
        true
    }

    /// Returns true if a request was started.
    pub fn delete_task(&mut self, task_id: &str, ctx: &egui::Context) -> bool {
        if self.tasks.get(task_id).is_none() || !self.in_flight.insert(task_id.to_string()) {
            return false;
        }

        let selection = self.selection.token();
        let task_id = task_id.to_string();
        let api = Arc::clone(&self.api);
        self.emit(ctx, async move {
            let result = api
                .delete_task(&task_id)
                .await
                .map_err(|e| format!("Could not delete task: {}", e));
            ProfileEvent::TaskDeleted {
                selection,
                task_id,
                result,
            }
        });
        true
    }

    pub fn dismiss_prompt(&mut self) {
        self.prompt = None;
    }

    /// Clears the local session and asks for the login screen. The server is
    /// not told.
    pub fn logout(&mut self) {
        if let Err(e) = self.session.clear_token() {
            error!("Failed to clear session token: {}", e);
        }
        info!("Logged out");
        let _ = self.event_tx.send(AppEvent::Navigate("/login".to_string()));
    }

    /// Applies a finished request. Returns an error message to surface, if any.
    pub fn apply(&mut self, event: ProfileEvent) -> Option<String> {
        match event {
            ProfileEvent::UsersLoaded(result) => {
                self.loading_users = false;
                match result {
                    Ok(users) => {
                        debug!(count = users.len(), "Users loaded");
                        self.users = users;
                        None
                    }
                    Err(msg) => Some(msg),
                }
            }
            ProfileEvent::TasksLoaded { selection, result } => {
                if !self.selection.is_current(selection) {
                    debug!("Discarding task list for a previous selection");
                    return None;
                }
                self.loading_tasks = false;
                match result {
                    Ok(tasks) => {
                        self.tasks.replace(tasks);
                        None
                    }
                    Err(msg) => Some(msg),
                }
            }
            ProfileEvent::TaskCreated { selection, result } => {
                if !self.selection.is_current(selection) {
                    debug!("Discarding created task for a previous selection");
                    return result.err();
                }
                self.creating = false;
                match result {
                    Ok(task) => {
                        self.tasks.append(task);
                        self.new_task_title.clear();
                        None
                    }
                    Err(msg) => Some(msg),
                }
            }
            ProfileEvent::TaskUpdated {
                selection,
                task_id,
                result,
            } => {
                if !self.selection.is_current(selection) {
                    return result.err();
                }
                self.in_flight.remove(&task_id);
                match result {
                    Ok(task) => {
                        if !self.tasks.replace_by_id(&task_id, task) {
                            warn!(%task_id, "Updated task is no longer mirrored");
                        }
                        if self.active_edit.as_ref().is_some_and(|e| e.is_for(&task_id)) {
                            self.active_edit = None;
                        }
                        None
                    }
                    // Edit mode stays so the user can retry or cancel.
                    Err(msg) => Some(msg),
                }
            }
            ProfileEvent::TaskDeleted {
                selection,
                task_id,
                result,
            } => {
                if !self.selection.is_current(selection) {
                    return result.err();
                }
                self.in_flight.remove(&task_id);
                match result {
                    Ok(()) => {
                        self.tasks.remove_by_id(&task_id);
                        if self.active_edit.as_ref().is_some_and(|e| e.is_for(&task_id)) {
                            self.active_edit = None;
                        }
                        None
                    }
                    Err(msg) => Some(msg),
                }
            }
        }
    }
}
