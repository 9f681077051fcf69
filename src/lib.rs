//! hogwarts-tui library: API client, record models, and the terminal UI core.

pub mod api;
pub mod app_core;
pub mod model;
pub mod portrait;
pub mod theme;
pub mod ui;

pub use app_core::state::{AppState, FocusPane};
