//! Application-wide constants

/// Name of the persisted entry holding the session token.
pub const TOKEN_KEY: &str = "token";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TOKEN_PATH: &str = ".todo-session.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// User-facing messages
pub const MSG_LOGIN_SUCCESS: &str = "Login successful!";
pub const MSG_LOGIN_FAILED: &str = "Login failed!";
pub const MSG_REGISTER_SUCCESS: &str = "Registration successful! Please log in.";
pub const MSG_REGISTER_FAILED: &str = "Registration failed!";
pub const MSG_TASK_PROMPT: &str = "Please enter a task and select a user.";
