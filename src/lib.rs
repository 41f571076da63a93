pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod ui;

pub use error::{AppError, Result};
