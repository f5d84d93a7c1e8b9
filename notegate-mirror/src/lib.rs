//! Mirror publishing: republishes the full note set to a location the
//! game client can fetch without a database connection.
//!
//! The concrete target is a GitHub Gist holding `notes.json`; the
//! [`MirrorPublisher`] trait keeps the pipeline testable without the
//! network. Publishes are serialized through the single-writer
//! [`sync::MirrorSync`] worker so two submissions can never leave the
//! mirror on an older snapshot than the store.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod publisher;
pub mod sync;

pub use publisher::{GistPublisher, MirrorPublisher};
pub use sync::MirrorSync;

/// Errors produced while publishing the mirror document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MirrorError {
    /// The note set could not be serialized.
    #[error("serialize notes: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The request could not be sent or the response not read.
    #[error("gist request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The Gist API answered with a non-success status.
    #[error("gist API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The pre-publish snapshot read failed.
    #[error("snapshot read failed: {0}")]
    Snapshot(#[from] notegate_store::StoreError),

    /// The blocking snapshot task was cancelled or panicked.
    #[error("snapshot task failed: {0}")]
    SnapshotTask(String),
}
