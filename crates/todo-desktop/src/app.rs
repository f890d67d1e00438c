//! Root Application
//!
//! Holds the active screen and routes background events to it.
//!
//! ## Window Layout Reference:
//! - Signup / Login: compact centered card
//! - Profile: wider window for the task list

use std::sync::Arc;

use eframe::egui;
use todo_core::{Route, TodoApi, TokenStore};
use todo_shared::constants::{MSG_LOGIN_SUCCESS, MSG_REGISTER_SUCCESS};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::events::AppEvent;
use crate::notice::Notifications;
use crate::theme;
use crate::view::{render_login, render_notices, render_profile, render_signup};
use crate::viewmodel::{LoginViewModel, ProfileViewModel, SignupViewModel};

// ============================================================================
// WINDOW SIZE CONSTANTS
// ============================================================================

pub const AUTH_WINDOW: egui::Vec2 = egui::vec2(420.0, 560.0);
pub const PROFILE_WINDOW: egui::Vec2 = egui::vec2(760.0, 680.0);

// ============================================================================

/// One screen per route. Leaving a screen drops its state.
pub enum Screen {
    Signup(SignupViewModel),
    Login(LoginViewModel),
    Profile(ProfileViewModel),
}

impl Screen {
    pub fn route(&self) -> Route {
        match self {
            Screen::Signup(_) => Route::Signup,
            Screen::Login(_) => Route::Login,
            Screen::Profile(_) => Route::Profile,
        }
    }
}

pub struct TodoApp {
    pub screen: Screen,
    pub notices: Notifications,
    api: Arc<dyn TodoApi>,
    session: Arc<dyn TokenStore>,
    ctx: egui::Context,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl TodoApp {
    pub fn new(
        ctx: egui::Context,
        api: Arc<dyn TodoApi>,
        session: Arc<dyn TokenStore>,
        start_path: &str,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let login = LoginViewModel::new(Arc::clone(&api), Arc::clone(&session), event_tx.clone());

        let mut app = Self {
            screen: Screen::Login(login),
            notices: Notifications::new(),
            api,
            session,
            ctx,
            event_tx,
            event_rx,
        };
        app.navigate(start_path);
        app
    }

    /// Resolves `path` through the session gate and mounts the resulting screen.
    pub fn navigate(&mut self, path: &str) -> Route {
        let route = Route::resolve(path, self.session.as_ref());
        debug!(requested = path, resolved = route.path(), "Navigate");

        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        self.screen = match route {
            Route::Signup => Screen::Signup(SignupViewModel::new(api, tx)),
            Route::Login => {
                Screen::Login(LoginViewModel::new(api, Arc::clone(&self.session), tx))
            }
            Route::Profile => {
                let mut vm = ProfileViewModel::new(api, Arc::clone(&self.session), tx);
                vm.load_users(&self.ctx);
                Screen::Profile(vm)
            }
        };

        let size = if route == Route::Profile {
            PROFILE_WINDOW
        } else {
            AUTH_WINDOW
        };
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::InnerSize(size));
        route
    }

    /// Drains finished requests. Events for a screen that is no longer
    /// mounted are dropped.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
            self.ctx.request_repaint();
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Navigate(path) => {
                self.navigate(&path);
            }
            AppEvent::SignupSucceeded => {
                let Screen::Signup(vm) = &mut self.screen else {
                    return self.unmounted("signup result");
                };
                vm.on_signup_success();
                self.notices.info(MSG_REGISTER_SUCCESS);
                self.navigate(Route::Login.path());
            }
            AppEvent::SignupFailed(msg) => match &mut self.screen {
                Screen::Signup(vm) => vm.on_signup_failed(msg),
                _ => self.unmounted("signup result"),
            },
            AppEvent::LoginSucceeded(token) => {
                let Screen::Login(vm) = &mut self.screen else {
                    return self.unmounted("login result");
                };
                match vm.on_login_success(&token) {
                    Ok(()) => {
                        info!("Session started");
                        self.notices.info(MSG_LOGIN_SUCCESS);
                        self.navigate(Route::Profile.path());
                    }
                    Err(msg) => vm.on_login_failed(msg),
                }
            }
            AppEvent::LoginFailed(msg) => match &mut self.screen {
                Screen::Login(vm) => vm.on_login_failed(msg),
                _ => self.unmounted("login result"),
            },
            AppEvent::Profile(event) => match &mut self.screen {
                Screen::Profile(vm) => {
                    if let Some(msg) = vm.apply(event) {
                        self.notices.error(msg);
                    }
                }
                _ => self.unmounted("profile result"),
            },
        }
    }

    fn unmounted(&self, what: &str) {
        debug!(screen = self.screen.route().path(), "Dropping {} for unmounted screen", what);
    }
}

impl eframe::App for TodoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_events();
        theme::apply(ctx);

        match &mut self.screen {
            Screen::Signup(vm) => render_signup(ctx, vm),
            Screen::Login(vm) => render_login(ctx, vm),
            Screen::Profile(vm) => render_profile(ctx, vm),
        }

        render_notices(ctx, &mut self.notices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use todo_core::{HttpTodoApi, MemoryTokenStore};
    use todo_shared::constants::MSG_LOGIN_FAILED;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app(server: &MockServer, session: Arc<MemoryTokenStore>, start: &str) -> TodoApp {
        let api = Arc::new(HttpTodoApi::new(&server.uri(), None).unwrap());
        TodoApp::new(egui::Context::default(), api, session, start)
    }

    async fn mount_users(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"email": "a@x.com"}])))
            .mount(server)
            .await;
    }

    /// Waits until at least one event has been processed.
    async fn pump(app: &mut TodoApp) {
        let event = app.event_rx.recv().await.unwrap();
        app.handle_event(event);
        app.process_events();
    }

    #[tokio::test]
    async fn test_start_paths() {
        let server = MockServer::start().await;
        mount_users(&server).await;
        let session = Arc::new(MemoryTokenStore::new());

        assert_eq!(app(&server, session.clone(), "/").screen.route(), Route::Login);
        assert_eq!(app(&server, session.clone(), "/nowhere").screen.route(), Route::Login);
        assert_eq!(app(&server, session.clone(), "/signup").screen.route(), Route::Signup);
        assert_eq!(app(&server, session.clone(), "/profile").screen.route(), Route::Login);

        session.set_token("abc123").unwrap();
        assert_eq!(app(&server, session.clone(), "/profile").screen.route(), Route::Profile);
    }

    #[tokio::test]
    async fn test_removing_token_gates_profile_again() {
        let server = MockServer::start().await;
        mount_users(&server).await;
        let session = Arc::new(MemoryTokenStore::with_token("abc123"));
        let mut app = app(&server, session.clone(), "/profile");
        assert_eq!(app.screen.route(), Route::Profile);

        session.clear_token().unwrap();
        assert_eq!(app.navigate("/profile"), Route::Login);
        assert!(matches!(app.screen, Screen::Login(_)));
    }

    #[tokio::test]
    async fn test_login_flow_lands_on_profile() {
        let server = MockServer::start().await;
        mount_users(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/users/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc123"})))
            .expect(1)
            .mount(&server)
            .await;

        let session = Arc::new(MemoryTokenStore::new());
        let mut app = app(&server, session.clone(), "/login");
        let ctx = app.ctx.clone();
        if let Screen::Login(vm) = &mut app.screen {
            vm.form.email = "a@x.com".to_string();
            vm.form.password = "secret1".to_string();
            assert!(vm.login(&ctx));
        }
        pump(&mut app).await;

        assert_eq!(session.get_token().as_deref(), Some("abc123"));
        assert_eq!(app.screen.route(), Route::Profile);
        assert!(app.notices.iter().any(|n| n.message == MSG_LOGIN_SUCCESS));

        // The profile screen loads users on entry.
        pump(&mut app).await;
        match &app.screen {
            Screen::Profile(vm) => assert_eq!(vm.users.len(), 1),
            _ => panic!("expected profile screen"),
        }
    }

    #[tokio::test]
    async fn test_empty_token_keeps_login_screen() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": ""})))
            .expect(1)
            .mount(&server)
            .await;

        let session = Arc::new(MemoryTokenStore::new());
        let mut app = app(&server, session.clone(), "/login");
        let ctx = app.ctx.clone();
        if let Screen::Login(vm) = &mut app.screen {
            vm.form.email = "a@x.com".to_string();
            vm.form.password = "secret1".to_string();
            assert!(vm.login(&ctx));
        }
        pump(&mut app).await;

        assert!(!session.has_token());
        assert!(app.notices.is_empty());
        match &app.screen {
            Screen::Login(vm) => assert_eq!(vm.server_error.as_deref(), Some(MSG_LOGIN_FAILED)),
            _ => panic!("expected login screen"),
        }
    }

    #[tokio::test]
    async fn test_signup_flow_lands_on_login() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users/register"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"email": "a@x.com"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app(&server, Arc::new(MemoryTokenStore::new()), "/signup");
        let ctx = app.ctx.clone();
        if let Screen::Signup(vm) = &mut app.screen {
            vm.form.name = "Alice".to_string();
            vm.form.email = "a@x.com".to_string();
            vm.form.password = "secret1".to_string();
            assert!(vm.submit(&ctx));
        }
        pump(&mut app).await;

        assert_eq!(app.screen.route(), Route::Login);
        assert!(app.notices.iter().any(|n| n.message == MSG_REGISTER_SUCCESS));
    }

    #[tokio::test]
    async fn test_logout_from_profile() {
        let server = MockServer::start().await;
        mount_users(&server).await;
        let session = Arc::new(MemoryTokenStore::with_token("abc123"));
        let mut app = app(&server, session.clone(), "/profile");
        pump(&mut app).await;

        if let Screen::Profile(vm) = &mut app.screen {
            vm.logout();
        }
        app.process_events();

        assert!(!session.has_token());
        assert_eq!(app.screen.route(), Route::Login);
    }

    #[tokio::test]
    async fn test_task_failure_becomes_error_notice() {
        let server = MockServer::start().await;
        mount_users(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/tasks/a@x.com"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
            .mount(&server)
            .await;

        let mut app = app(&server, Arc::new(MemoryTokenStore::with_token("abc123")), "/profile");
        pump(&mut app).await;

        let ctx = app.ctx.clone();
        if let Screen::Profile(vm) = &mut app.screen {
            assert!(vm.select_user(Some("a@x.com".to_string()), &ctx));
        }
        pump(&mut app).await;

        let errors: Vec<_> = app.notices.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("boom"));
    }

    #[tokio::test]
    async fn test_late_profile_event_after_leaving_is_dropped() {
        let server = MockServer::start().await;
        mount_users(&server).await;
        let session = Arc::new(MemoryTokenStore::with_token("abc123"));
        let mut app = app(&server, session, "/profile");

        app.navigate("/signup");
        pump(&mut app).await;
        assert_eq!(app.screen.route(), Route::Signup);
        assert!(app.notices.is_empty());
    }
}
