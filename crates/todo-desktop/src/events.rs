//! Application Events
//!
//! Results of background requests, delivered to the UI thread over a channel.

use todo_core::{SelectionToken, Task, User};

#[derive(Debug)]
pub enum AppEvent {
    /// Registration accepted by the server
    SignupSucceeded,
    /// Registration rejected, message ready for display
    SignupFailed(String),
    /// Login accepted, carries the session token
    LoginSucceeded(String),
    /// Login rejected, message ready for display
    LoginFailed(String),
    /// Navigation request from a view (path, e.g. "/login")
    Navigate(String),
    /// Profile screen results
    Profile(ProfileEvent),
}

/// Task/user request outcomes. Errors are already formatted for the user.
#[derive(Debug)]
pub enum ProfileEvent {
    UsersLoaded(Result<Vec<User>, String>),
    TasksLoaded {
        selection: SelectionToken,
        result: Result<Vec<Task>, String>,
    },
    TaskCreated {
        selection: SelectionToken,
        result: Result<Task, String>,
    },
    TaskUpdated {
        selection: SelectionToken,
        task_id: String,
        result: Result<Task, String>,
    },
    TaskDeleted {
        selection: SelectionToken,
        task_id: String,
        result: Result<(), String>,
    },
}
