//! Fuzz target: position-code parser.
//!
//! Arbitrary input must never panic the parser, and anything it
//! accepts must carry finite coordinates.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(code) = std::str::from_utf8(data) {
        if let Ok(parsed) = notegate_core::payload::parse_position_code(code) {
            assert!(parsed.position.x.is_finite());
            assert!(parsed.position.y.is_finite());
            assert!(parsed.position.z.is_finite());
            assert!(!parsed.tag.is_empty());
        }
    }
});
