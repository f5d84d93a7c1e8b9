//! Fuzz target: interaction body deserialization.
//!
//! The handler parses the verified body with serde; arbitrary bytes
//! must never panic it. Errors are expected and fine.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = serde_json::from_slice::<notegate_core::Interaction>(data);
});
