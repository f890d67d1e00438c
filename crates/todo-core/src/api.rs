//! Remote API client
//!
//! Thin pass-through to the users/tasks HTTP API. No retries, no caching.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use todo_shared::utils::mask_email;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::forms::{LoginForm, SignupForm};
use crate::models::{CreateTaskRequest, ErrorBody, LoginResponse, Task, UpdateTaskRequest, User};
use crate::session::TokenStore;

#[async_trait]
pub trait TodoApi: Send + Sync {
    /// `POST /api/users/register`. The created user is returned as raw JSON.
    async fn register(&self, form: &SignupForm) -> Result<serde_json::Value, ApiError>;

    /// `POST /api/users/login`
    async fn login(&self, form: &LoginForm) -> Result<LoginResponse, ApiError>;

    /// `GET /api/users`
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// `GET /api/tasks/{email}`
    async fn list_tasks(&self, email: &str) -> Result<Vec<Task>, ApiError>;

    /// `POST /api/tasks`
    async fn create_task(&self, title: &str, email: &str) -> Result<Task, ApiError>;

    /// `PUT /api/tasks/{id}`
    async fn update_task(&self, id: &str, title: &str) -> Result<Task, ApiError>;

    /// `DELETE /api/tasks/{id}`
    async fn delete_task(&self, id: &str) -> Result<(), ApiError>;
}

pub struct HttpTodoApi {
    client: Client,
    base_url: Url,
    tokens: Option<Arc<dyn TokenStore>>,
}

impl HttpTodoApi {
    /// `timeout` of `None` leaves the transport default in place.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: parsed,
            tokens: None,
        })
    }

    /// Sends the stored session token as a bearer credential when one exists.
    pub fn with_token_store(mut self, tokens: Arc<dyn TokenStore>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!(%method, path = url.path(), "API request");

        let mut request = self.client.request(method, url);
        if let Some(token) = self.tokens.as_ref().and_then(|t| t.get_token()) {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn send(request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!("API transport error: {}", e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            warn!(status = status.as_u16(), ?message, "API request rejected");
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }
        Ok(body.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let body = Self::send(request).await?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!("Undecodable API response: {}", e);
            ApiError::Decode(e)
        })
    }
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn register(&self, form: &SignupForm) -> Result<serde_json::Value, ApiError> {
        debug!(email = %mask_email(&form.email), "Registering user");
        let request = self
            .request(Method::POST, &["api", "users", "register"])
            .json(form);
        Self::send_json(request).await
    }

    async fn login(&self, form: &LoginForm) -> Result<LoginResponse, ApiError> {
        debug!(email = %mask_email(&form.email), "Logging in");
        let request = self
            .request(Method::POST, &["api", "users", "login"])
            .json(form);
        Self::send_json(request).await
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        Self::send_json(self.request(Method::GET, &["api", "users"])).await
    }

    async fn list_tasks(&self, email: &str) -> Result<Vec<Task>, ApiError> {
        Self::send_json(self.request(Method::GET, &["api", "tasks", email])).await
    }

    async fn create_task(&self, title: &str, email: &str) -> Result<Task, ApiError> {
        let request = self
            .request(Method::POST, &["api", "tasks"])
            .json(&CreateTaskRequest { title, email });
        Self::send_json(request).await
    }

    async fn update_task(&self, id: &str, title: &str) -> Result<Task, ApiError> {
        let request = self
            .request(Method::PUT, &["api", "tasks", id])
            .json(&UpdateTaskRequest { title });
        Self::send_json(request).await
    }

    async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        Self::send(self.request(Method::DELETE, &["api", "tasks", id])).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> HttpTodoApi {
        HttpTodoApi::new(&server.uri(), None).unwrap()
    }

    #[tokio::test]
    async fn test_login_posts_form_and_reads_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users/login"))
            .and(body_json(json!({"email": "a@x.com", "password": "secret1"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"token": "abc123", "user": {}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let form = LoginForm {
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
        };
        let response = client(&server).login(&form).await.unwrap();
        assert_eq!(response.token, "abc123");
    }

    #[tokio::test]
    async fn test_register_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users/register"))
            .and(body_json(
                json!({"name": "Alice", "email": "a@x.com", "password": "secret1"}),
            ))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "User already exists"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let form = SignupForm {
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
        };
        let err = client(&server).register(&form).await.unwrap_err();
        match &err {
            ApiError::Server { status, message } => {
                assert_eq!(*status, 400);
                assert_eq!(message.as_deref(), Some("User already exists"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.user_message("Registration failed!"), "User already exists");
    }

    #[tokio::test]
    async fn test_error_without_json_body_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users/login"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = client(&server).login(&LoginForm::default()).await.unwrap_err();
        assert_eq!(err.user_message("Login failed!"), "Login failed!");
    }

    #[tokio::test]
    async fn test_list_tasks_uses_email_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks/a@x.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "1", "title": "one", "email": "a@x.com"},
                {"_id": "2", "title": "two", "email": "a@x.com"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let tasks = client(&server).list_tasks("a@x.com").await.unwrap();
        let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[tokio::test]
    async fn test_task_mutations() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tasks"))
            .and(body_json(json!({"title": "Buy milk", "email": "a@x.com"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(
                json!({"_id": "t1", "title": "Buy milk", "email": "a@x.com"}),
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/tasks/t1"))
            .and(body_json(json!({"title": "Buy oat milk"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"_id": "t1", "title": "Buy oat milk", "email": "a@x.com"}),
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/tasks/t1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Task deleted"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server);
        let created = api.create_task("Buy milk", "a@x.com").await.unwrap();
        assert_eq!(created.id, "t1");

        let updated = api.update_task("t1", "Buy oat milk").await.unwrap();
        assert_eq!(updated.title, "Buy oat milk");

        api.delete_task("t1").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/tasks/t9"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        client(&server).delete_task("t9").await.unwrap();
    }

    #[tokio::test]
    async fn test_bearer_token_attached_when_present() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(header("authorization", "Bearer abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"email": "a@x.com"}])))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server)
            .with_token_store(Arc::new(MemoryTokenStore::with_token("abc123")));
        let users = api.list_users().await.unwrap();
        assert_eq!(users[0].email, "a@x.com");
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&server).list_users().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let api = HttpTodoApi::new("http://localhost:5000/v1/", None).unwrap();
        assert_eq!(
            api.endpoint(&["api", "tasks", "a@x.com"]).as_str(),
            "http://localhost:5000/v1/api/tasks/a@x.com"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpTodoApi::new("not a url", None),
            Err(ApiError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            HttpTodoApi::new("mailto:a@x.com", None),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }
}
