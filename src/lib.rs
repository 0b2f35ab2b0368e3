//! Excerpt PDF text service
//!
//! A small Rust service that accepts an uploaded PDF document and returns
//! its plain-text content, tolerating malformed and partially damaged files.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
