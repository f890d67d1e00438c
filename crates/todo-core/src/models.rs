//! API models

use serde::{Deserialize, Serialize};

/// User as listed by `GET /api/users`. Only the email is used here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Task owned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateTaskRequest<'a> {
    pub title: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateTaskRequest<'a> {
    pub title: &'a str,
}

/// Error body returned by the API on failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
