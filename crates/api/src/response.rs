//! Response bodies for write operations.
//!
//! Reads return the registry types directly; writes answer with a short
//! confirmation message.

use serde::Serialize;

/// `{ "message": ... }` confirmation for a successful write.
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

/// Confirmation for a delete, carrying the number of removed records.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted: u64,
}

impl DeleteResponse {
    pub fn new(deleted: u64) -> Self {
        Self {
            message: format!("Delete completed successful. Deleted {deleted} records"),
            deleted,
        }
    }
}
