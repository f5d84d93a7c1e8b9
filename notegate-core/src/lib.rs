//! Core types for the notegate Discord interactions webhook.
//!
//! Defines the interaction wire format, the note record, position-code
//! decoding, the truncated-HMAC integrity check, and Ed25519 request
//! verification. Everything here is pure: no I/O, no async.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod integrity;
pub mod interaction;
pub mod note;
pub mod payload;
pub mod verify;

pub use error::CoreError;
pub use interaction::{Interaction, InteractionResponse, InteractionType, ResponseData};
pub use note::Note;
pub use payload::{Position, PositionCode, MESSAGE_MAX_CHARS};
pub use verify::RequestVerifier;
