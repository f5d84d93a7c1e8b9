//! HTTP endpoint for the notes-board Discord interactions webhook.
//!
//! Receives interaction callbacks, verifies their Ed25519 signatures
//! over the raw body, decodes modal submissions into notes, stores
//! them, and signals the mirror sync worker.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod routes;
