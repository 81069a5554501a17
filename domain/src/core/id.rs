//! Identifier and timestamp helpers.
//!
//! Every protocol entity gets a random UUID v4 string id and a UTC
//! timestamp at creation time.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a fresh random identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC time.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
