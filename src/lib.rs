pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod registration;
pub mod services;
pub mod session;
pub mod ui;

pub use error::{AppError, Result};
