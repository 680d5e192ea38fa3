//! API handlers module
//!
//! Thin translation layer between HTTP and the entity services: parse the
//! path id, hand the body to the service, shape the response. All domain
//! rules live in `labvault_common::services`.

pub mod analytics;
pub mod asset;
pub mod department;
pub mod health;
pub mod institute;
pub mod laboratory;
pub mod organisation;
pub mod procedure;
pub mod report;
pub mod role;
pub mod run;
pub mod script;
pub mod user;

use serde::Serialize;

/// Legacy `{ "message": ... }` body returned by the delete endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
