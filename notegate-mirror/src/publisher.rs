//! The publisher seam and its GitHub Gist implementation.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use notegate_core::Note;

use crate::MirrorError;

/// File name inside the Gist; the game client fetches it by raw URL.
pub const MIRROR_FILE: &str = "notes.json";

/// Something that can overwrite the mirror document with a full
/// snapshot. Implementations must be `Send + Sync` so the sync worker
/// can hold one across awaits.
#[async_trait]
pub trait MirrorPublisher: Send + Sync {
    /// Replace the mirror document with `notes`.
    ///
    /// # Errors
    /// Returns [`MirrorError`] if serialization or the remote update
    /// fails. The operation is a total replacement and is safe to
    /// retry with the same or a newer snapshot.
    async fn publish(&self, notes: &[Note]) -> Result<(), MirrorError>;
}

/// Publishes snapshots to a fixed GitHub Gist via authenticated PATCH.
#[derive(Debug, Clone)]
pub struct GistPublisher {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl GistPublisher {
    /// Target the Gist with the given id, authenticating with a
    /// personal access token that has the `gist` scope.
    #[must_use]
    pub fn new(gist_id: &str, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("https://api.github.com/gists/{gist_id}"),
            token: token.into(),
        }
    }

    /// The PATCH body replacing the mirror file's content.
    ///
    /// # Errors
    /// Returns [`MirrorError::Serialize`] if the notes fail to encode.
    fn patch_body(notes: &[Note]) -> Result<serde_json::Value, MirrorError> {
        let content = serde_json::to_string(notes)?;
        Ok(json!({ "files": { (MIRROR_FILE): { "content": content } } }))
    }
}

#[async_trait]
impl MirrorPublisher for GistPublisher {
    async fn publish(&self, notes: &[Note]) -> Result<(), MirrorError> {
        let body = Self::patch_body(notes)?;
        let resp = self
            .client
            .patch(&self.url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github+json")
            // GitHub rejects requests without a User-Agent.
            .header("User-Agent", "notegate")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MirrorError::Api { status: status.as_u16(), body });
        }
        debug!(count = notes.len(), "mirror published");
        Ok(())
    }
}
