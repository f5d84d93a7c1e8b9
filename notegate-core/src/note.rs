//! The note record: one per submitting user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::payload::Position;

/// A single in-world note, keyed by the submitting user's Discord id.
///
/// Upsert semantics at the store mean a user has at most one active
/// note; `username` is denormalized at submission time and may go
/// stale. This struct is also the mirror document's element type, so
/// the serialized field names are part of the wire contract the game
/// client reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub discord_id: String,
    pub username: String,
    pub pos_x: f64,
    pub pos_y: f64,
    pub pos_z: f64,
    pub message: String,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Build a note from a decoded submission, stamped with the
    /// current UTC time.
    #[must_use]
    pub fn new(
        discord_id: impl Into<String>,
        username: impl Into<String>,
        position: Position,
        message: impl Into<String>,
    ) -> Self {
        Self {
            discord_id: discord_id.into(),
            username: username.into(),
            pos_x: position.x,
            pos_y: position.y,
            pos_z: position.z,
            message: message.into(),
            updated_at: Utc::now(),
        }
    }
}
