//! # Todo Core
//!
//! Domain models, form schemas, the remote API client, session token storage,
//! route gating and the local task mirror.

pub mod api;
pub mod error;
pub mod forms;
pub mod models;
pub mod router;
pub mod session;
pub mod tasks;

pub use api::{HttpTodoApi, TodoApi};
pub use error::{ApiError, StoreError};
pub use forms::{FieldErrors, LoginForm, SignupForm};
pub use models::{LoginResponse, Task, User};
pub use router::Route;
pub use session::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use tasks::{ActiveEdit, Selection, SelectionToken, TaskMirror};
