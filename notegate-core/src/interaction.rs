//! Discord interaction wire types.
//!
//! Only the fields this webhook reads are modeled; serde ignores the
//! rest of Discord's payload. Discriminant values follow the public
//! interactions API: request types PING = 1 and MODAL_SUBMIT = 5,
//! response types PONG = 1 and CHANNEL_MESSAGE_WITH_SOURCE = 4.

use serde::{Deserialize, Serialize};

/// `custom_id` the note submission modal is created with.
pub const NOTE_MODAL_ID: &str = "note_modal";

/// Response flag making a channel message visible to the submitter only.
pub const FLAG_EPHEMERAL: u64 = 64;

/// Inbound interaction discriminant, decoded from the numeric `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionType {
    /// Liveness probe sent by Discord to verify the endpoint.
    Ping,
    /// A user submitted a modal form.
    ModalSubmit,
    /// Any discriminant this webhook does not handle.
    Other(u8),
}

impl From<u8> for InteractionType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Ping,
            5 => Self::ModalSubmit,
            other => Self::Other(other),
        }
    }
}

/// An inbound interaction, parsed after signature verification.
#[derive(Debug, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(default)]
    pub data: Option<ModalData>,
    #[serde(default)]
    pub member: Option<Member>,
    /// Set instead of `member` when the interaction arrives via DM.
    #[serde(default)]
    pub user: Option<User>,
}

impl Interaction {
    /// The decoded discriminant.
    #[must_use]
    pub fn kind(&self) -> InteractionType {
        InteractionType::from(self.kind)
    }

    /// The submitting user, wherever Discord put it.
    #[must_use]
    pub fn submitter(&self) -> Option<&User> {
        self.member
            .as_ref()
            .map(|m| &m.user)
            .or(self.user.as_ref())
    }
}

/// `data` object of a modal submission.
#[derive(Debug, Deserialize)]
pub struct ModalData {
    pub custom_id: String,
    #[serde(default)]
    pub components: Vec<ActionRow>,
}

impl ModalData {
    /// Value of the text input in action row `row`, if present.
    #[must_use]
    pub fn field_value(&self, row: usize) -> Option<&str> {
        self.components
            .get(row)
            .and_then(|r| r.components.first())
            .map(|input| input.value.as_str())
    }
}

/// One action row wrapping a single text input.
#[derive(Debug, Deserialize)]
pub struct ActionRow {
    #[serde(default)]
    pub components: Vec<TextInput>,
}

/// A submitted text input.
#[derive(Debug, Deserialize)]
pub struct TextInput {
    pub custom_id: String,
    #[serde(default)]
    pub value: String,
}

/// Guild member wrapper around the submitting user.
#[derive(Debug, Deserialize)]
pub struct Member {
    pub user: User,
}

/// The submitting user's identity.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

// ── Responses ─────────────────────────────────────────────────────────────────

const RESPONSE_PONG: u8 = 1;
const RESPONSE_CHANNEL_MESSAGE: u8 = 4;

/// Body of the webhook's 200 reply.
#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

/// Message payload of a channel-message response.
#[derive(Debug, Serialize)]
pub struct ResponseData {
    pub content: String,
    pub flags: u64,
}

impl InteractionResponse {
    /// Acknowledgement for a PING.
    #[must_use]
    pub fn pong() -> Self {
        Self { kind: RESPONSE_PONG, data: None }
    }

    /// A message visible only to the submitter.
    #[must_use]
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            kind: RESPONSE_CHANNEL_MESSAGE,
            data: Some(ResponseData { content: content.into(), flags: FLAG_EPHEMERAL }),
        }
    }
}
