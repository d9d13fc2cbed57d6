// src/lib.rs
//! Job offer swipes, superlikes and candidate profiles backed by a relational store.

/// Logging entry point used across the crate: `app_log!(info, "...", args)`.
#[macro_export]
macro_rules! app_log {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}

pub mod cli;
pub mod core;
pub mod error;
pub mod profiles;
pub mod swipes;
pub mod types;
pub mod web;

pub use crate::core::{ConfigManager, Database, ServiceClient, StoreBackend};
pub use error::{StoreError, StoreResult};
pub use profiles::ProfileService;
pub use swipes::SwipeStore;
pub use web::start_web_server;
