// src/core/mod.rs
//! Backing-store plumbing shared by the swipe and profile services

pub mod backend;
pub mod config_manager;
pub mod database;
pub mod fs_ops;
pub mod service_client;

pub use backend::StoreBackend;
pub use config_manager::{ConfigManager, StoreConfig};
pub use database::Database;
pub use fs_ops::FsOps;
pub use service_client::ServiceClient;
