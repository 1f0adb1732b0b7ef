// shop/src/lib.rs

//! PlugPoint: an online shop for electrical goods served as a JSON API.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod notice;
pub mod pipelines;
pub mod server;
pub mod services;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod web;

pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use state::AppState;
