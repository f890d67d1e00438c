//! Todo Desktop - Desktop Application
//!
//! eGUI client for the task server with an MVVM layout:
//! viewmodels own screen state, views only draw it.

mod app;
mod events;
mod notice;
mod theme;
mod ui_helpers;
mod view;
mod viewmodel;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use app::{TodoApp, AUTH_WINDOW};
use todo_core::{FileTokenStore, HttpTodoApi, TokenStore};
use todo_shared::telemetry::init_telemetry;
use todo_shared::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let _log_guard = init_telemetry(&config.log)?;

    let session: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&config.session.token_path));
    let api = HttpTodoApi::new(
        &config.api.base_url,
        config.api.timeout_seconds.map(Duration::from_secs),
    )?
    .with_token_store(Arc::clone(&session));

    // Optional start route, e.g. `todo-desktop /signup`
    let start_path = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    info!(api = %config.api.base_url, start = %start_path, "Starting Todo Desktop");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(AUTH_WINDOW)
            .with_min_inner_size([360.0, 420.0])
            .with_title("Todo"),
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        "Todo Desktop",
        native_options,
        Box::new(move |cc| {
            let app = TodoApp::new(cc.egui_ctx.clone(), Arc::new(api), session, &start_path);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}
