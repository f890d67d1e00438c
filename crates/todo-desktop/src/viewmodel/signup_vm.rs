//! Signup ViewModel
//!
//! Validates the account form, then submits it once. `is_loading` blocks
//! resubmission until the request settles.

use std::sync::Arc;

use eframe::egui;
use todo_core::{FieldErrors, SignupForm, TodoApi};
use todo_shared::constants::MSG_REGISTER_FAILED;
use todo_shared::utils::mask_email;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::events::AppEvent;

pub struct SignupViewModel {
    pub form: SignupForm,
    pub field_errors: FieldErrors,
    pub server_error: Option<String>,
    pub is_loading: bool,
    pub show_password: bool,
    api: Arc<dyn TodoApi>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl SignupViewModel {
    pub fn new(api: Arc<dyn TodoApi>, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            form: SignupForm::default(),
            field_errors: FieldErrors::default(),
            server_error: None,
            is_loading: false,
            show_password: false,
            api,
            event_tx,
        }
    }

    /// Returns true if a request was started.
    pub fn submit(&mut self, ctx: &egui::Context) -> bool {
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
            let event = match api.register(&form).await {
                Ok(_) => {
                    info!(email = %mask_email(&form.email), "Registration succeeded");
                    AppEvent::SignupSucceeded
                }
                Err(e) => {
                    warn!("Registration failed: {}", e);
                    AppEvent::SignupFailed(e.user_message(MSG_REGISTER_FAILED))
                }
            };
            let _ = tx.send(event);
            ctx.request_repaint();
        });
        true
    }

    pub fn on_signup_success(&mut self) {
        self.is_loading = false;
        self.form = SignupForm::default();
    }

    pub fn on_signup_failed(&mut self, error: String) {
        self.is_loading = false;
        self.server_error = Some(error);
    }

    pub fn go_to_login(&self) {
        let _ = self.event_tx.send(AppEvent::Navigate("/login".to_string()));
    }
}
