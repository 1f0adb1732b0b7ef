// shop/src/services/mod.rs

pub mod auth_service;
pub mod catalog_seed;
pub mod session_service;
