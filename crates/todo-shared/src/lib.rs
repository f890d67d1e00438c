//! # Todo Shared
//!
//! Shared configuration, telemetry, constants and error types for the todo client.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod utils;

pub use config::AppConfig;
pub use error::AppError;
