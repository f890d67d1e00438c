//! Login ViewModel
//!
//! State and logic for the login form, with async submission.

use std::sync::Arc;

use eframe::egui;
use todo_core::{FieldErrors, LoginForm, TodoApi, TokenStore};
use todo_shared::constants::MSG_LOGIN_FAILED;
use todo_shared::utils::mask_email;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::events::AppEvent;

pub struct LoginViewModel {
    pub form: LoginForm,
    pub field_errors: FieldErrors,
    pub server_error: Option<String>,
    pub is_loading: bool,
    pub show_password: bool,
    api: Arc<dyn TodoApi>,
    session: Arc<dyn TokenStore>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl LoginViewModel {
    pub fn new(
        api: Arc<dyn TodoApi>,
        session: Arc<dyn TokenStore>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            form: LoginForm::default(),
            field_errors: FieldErrors::default(),
            server_error: None,
            is_loading: false,
            show_password: false,
            api,
            session,
            event_tx,
        }
    }

    /// Attempt login - non-blocking. Returns true if a request was started.
    pub fn login(&mut self, ctx: &egui::Context) -> bool {
        if self.is_loading {
            return false;
        }
        self.server_error = None;

        if let Err(errors) = self.form.check() {
            self.field_errors = errors;
            return false;
        }
        self.field_errors.clear();
        self.is_loading = true;

        let form = self.form.clone();
        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        let ctx = ctx.clone();

        tokio::spawn(async move {
            let event = match api.login(&form).await {
                Ok(response) => {
                    info!(email = %mask_email(&form.email), "Login accepted");
                    AppEvent::LoginSucceeded(response.token)
                }
                Err(e) => {
                    warn!("Login failed: {}", e);
                    AppEvent::LoginFailed(e.user_message(MSG_LOGIN_FAILED))
                }
            };
            let _ = tx.send(event);
            ctx.request_repaint();
        });
        true
    }

    /// Persists the session token. The password is wiped either way.
    /// An empty token would not pass the session gate, so it counts as a
    /// failed login and nothing is stored.
    pub fn on_login_success(&mut self, token: &str) -> Result<(), String> {
        self.is_loading = false;
        self.form.password.clear();
        self.form.password.shrink_to_fit();

        if token.trim().is_empty() {
            warn!("Login response carried an empty token");
            return Err(MSG_LOGIN_FAILED.to_string());
        }
        self.session
            .set_token(token)
            .map_err(|e| format!("Could not save session: {}", e))
    }

    pub fn on_login_failed(&mut self, error: String) {
        self.is_loading = false;
        self.server_error = Some(error);
    }

    pub fn go_to_signup(&self) {
        let _ = self.event_tx.send(AppEvent::Navigate("/signup".to_string()));
    }
}
