//! Truncated-HMAC verification of the position code's trailing tag.
//!
//! The game client computes HMAC-SHA256 over the raw coordinate
//! substring `"<x>|<y>|<z>"` with a secret shared with this service,
//! and appends the first [`TAG_BYTES`] bytes as hex. Verifying over
//! the raw substring (not re-formatted floats) keeps the client's
//! number formatting out of the contract.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::CoreError;

type HmacSha256 = Hmac<Sha256>;

/// Bytes of HMAC output carried in the tag.
pub const TAG_BYTES: usize = 4;

/// Hex length of a well-formed tag.
pub const TAG_HEX_LEN: usize = 2 * TAG_BYTES;

/// Verify a position code's tag against the raw coordinate substring.
///
/// Comparison happens inside the MAC implementation in constant time.
/// Hex decoding is case-insensitive.
///
/// # Errors
/// Returns [`CoreError::MalformedCode`] for a tag of the wrong shape
/// and [`CoreError::IntegrityMismatch`] when the MAC does not match.
pub fn verify_tag(secret: &[u8], raw_coords: &str, tag_hex: &str) -> Result<(), CoreError> {
    if tag_hex.len() != TAG_HEX_LEN {
        return Err(CoreError::MalformedCode {
            reason: format!("tag must be {TAG_HEX_LEN} hex characters"),
        });
    }
    let tag = hex::decode(tag_hex).map_err(|_| CoreError::MalformedCode {
        reason: "tag is not valid hex".to_owned(),
    })?;

    mac_over(secret, raw_coords)
        .verify_truncated_left(&tag)
        .map_err(|_| CoreError::IntegrityMismatch)
}

/// Compute the tag the game client would attach to `raw_coords`.
///
/// This is the reference implementation of the Udon-side hashing and
/// is what tests (and the in-world script) use to mint codes.
#[must_use]
pub fn compute_tag(secret: &[u8], raw_coords: &str) -> String {
    let digest = mac_over(secret, raw_coords).finalize().into_bytes();
    hex::encode_upper(&digest[..TAG_BYTES])
}

fn mac_over(secret: &[u8], raw_coords: &str) -> HmacSha256 {
    #[expect(clippy::expect_used, reason = "HMAC accepts keys of any length")]
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC key of any length is valid");
    mac.update(raw_coords.as_bytes());
    mac
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"vrc-shared-secret";

    #[test]
    fn computed_tag_verifies() {
        let tag = compute_tag(SECRET, "1.5|2.0|-3.25");
        assert_eq!(tag.len(), TAG_HEX_LEN);
        assert!(verify_tag(SECRET, "1.5|2.0|-3.25", &tag).is_ok());
    }

    #[test]
    fn tag_is_case_insensitive() {
        let tag = compute_tag(SECRET, "0|0|0");
        assert!(verify_tag(SECRET, "0|0|0", &tag.to_ascii_lowercase()).is_ok());
    }

    #[test]
    fn wrong_coordinates_fail() {
        let tag = compute_tag(SECRET, "1|2|3");
        match verify_tag(SECRET, "1|2|4", &tag) {
            Err(CoreError::IntegrityMismatch) => {}
            other => panic!("expected IntegrityMismatch, got {other:?}"),
        }
    }

    #[test]
    fn wrong_secret_fails() {
        let tag = compute_tag(SECRET, "1|2|3");
        match verify_tag(b"other-secret", "1|2|3", &tag) {
            Err(CoreError::IntegrityMismatch) => {}
            other => panic!("expected IntegrityMismatch, got {other:?}"),
        }
    }

    #[test]
    fn reformatted_coordinates_fail() {
        // "2.0" and "2" are the same number but different bytes; the
        // MAC runs over bytes, so the tag must not transfer.
        let tag = compute_tag(SECRET, "1|2.0|3");
        assert!(verify_tag(SECRET, "1|2|3", &tag).is_err());
    }

    #[test]
    fn malformed_tags_are_rejected_before_mac() {
        match verify_tag(SECRET, "1|2|3", "AB12") {
            Err(CoreError::MalformedCode { .. }) => {}
            other => panic!("expected MalformedCode, got {other:?}"),
        }
        match verify_tag(SECRET, "1|2|3", "ZZZZZZZZ") {
            Err(CoreError::MalformedCode { .. }) => {}
            other => panic!("expected MalformedCode, got {other:?}"),
        }
    }
}
