//! LabVault Common Library
//!
//! Shared code for the LabVault services including:
//! - Entity models for the lab-asset domain
//! - Document store abstraction (Postgres JSONB + in-memory)
//! - Per-entity services consumed by both the HTTP gateway and the agent
//!   tool server
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod errors;
pub mod id;
pub mod metrics;
pub mod models;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use id::DocumentId;
pub use services::Services;
pub use store::{DocumentStore, SharedStore};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
