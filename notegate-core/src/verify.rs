//! Ed25519 verification of inbound webhook requests.
//!
//! Discord signs `timestamp ++ body` with the application's key and
//! sends the signature and timestamp as headers. Verification must run
//! over the body bytes exactly as transmitted; parsing the JSON and
//! re-serializing it before verifying would change the byte sequence
//! and break otherwise-valid signatures.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use crate::CoreError;

/// Holds the application's public key and checks request signatures.
#[derive(Debug, Clone)]
pub struct RequestVerifier {
    key: VerifyingKey,
}

impl RequestVerifier {
    /// Build a verifier from the hex-encoded public key Discord shows
    /// in the application portal.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidPublicKey`] if the string is not
    /// 32 bytes of hex or not a valid curve point.
    pub fn from_hex(public_key_hex: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(public_key_hex.trim()).map_err(|e| CoreError::InvalidPublicKey {
            reason: format!("not hex: {e}"),
        })?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| CoreError::InvalidPublicKey {
            reason: format!("expected 32 bytes, got {}", b.len()),
        })?;
        let key = VerifyingKey::from_bytes(&bytes).map_err(|e| CoreError::InvalidPublicKey {
            reason: e.to_string(),
        })?;
        Ok(Self { key })
    }

    /// Check a request signature over the timestamp and raw body.
    ///
    /// # Errors
    /// Returns [`CoreError::MalformedSignature`] if the signature
    /// header is not 64 bytes of hex, and [`CoreError::SignatureInvalid`]
    /// if the signature does not verify.
    pub fn verify(
        &self,
        signature_hex: &str,
        timestamp: &str,
        raw_body: &[u8],
    ) -> Result<(), CoreError> {
        let bytes = hex::decode(signature_hex).map_err(|e| CoreError::MalformedSignature {
            reason: format!("not hex: {e}"),
        })?;
        let bytes: [u8; 64] =
            bytes.try_into().map_err(|b: Vec<u8>| CoreError::MalformedSignature {
                reason: format!("expected 64 bytes, got {}", b.len()),
            })?;
        let signature = Signature::from_bytes(&bytes);

        let mut message = Vec::with_capacity(timestamp.len() + raw_body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(raw_body);

        self.key
            .verify(&message, &signature)
            .map_err(|_| CoreError::SignatureInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn keypair() -> (SigningKey, RequestVerifier) {
        let signing = SigningKey::from_bytes(&[7u8; 32]);
        let verifier = match RequestVerifier::from_hex(&hex::encode(
            signing.verifying_key().to_bytes(),
        )) {
            Ok(v) => v,
            Err(e) => panic!("verifier construction failed: {e}"),
        };
        (signing, verifier)
    }

    fn sign(signing: &SigningKey, timestamp: &str, body: &[u8]) -> String {
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body);
        hex::encode(signing.sign(&message).to_bytes())
    }

    #[test]
    fn valid_signature_passes() {
        let (signing, verifier) = keypair();
        let body = br#"{"type":1}"#;
        let sig = sign(&signing, "1700000000", body);
        assert!(verifier.verify(&sig, "1700000000", body).is_ok());
    }

    #[test]
    fn tampered_body_fails() {
        let (signing, verifier) = keypair();
        let sig = sign(&signing, "1700000000", br#"{"type":1}"#);
        match verifier.verify(&sig, "1700000000", br#"{"type": 1}"#) {
            Err(CoreError::SignatureInvalid) => {}
            other => panic!("expected SignatureInvalid, got {other:?}"),
        }
    }

    #[test]
    fn tampered_timestamp_fails() {
        let (signing, verifier) = keypair();
        let body = br#"{"type":1}"#;
        let sig = sign(&signing, "1700000000", body);
        assert!(verifier.verify(&sig, "1700000001", body).is_err());
    }

    #[test]
    fn wrong_key_fails() {
        let (signing, _) = keypair();
        let other_key = SigningKey::from_bytes(&[9u8; 32]).verifying_key();
        let verifier = match RequestVerifier::from_hex(&hex::encode(other_key.to_bytes())) {
            Ok(v) => v,
            Err(e) => panic!("verifier construction failed: {e}"),
        };
        let body = br#"{"type":1}"#;
        let sig = sign(&signing, "1700000000", body);
        assert!(verifier.verify(&sig, "1700000000", body).is_err());
    }

    #[test]
    fn malformed_signature_header_fails() {
        let (_, verifier) = keypair();
        match verifier.verify("not-hex", "1700000000", b"{}") {
            Err(CoreError::MalformedSignature { .. }) => {}
            other => panic!("expected MalformedSignature, got {other:?}"),
        }
        match verifier.verify("abcd", "1700000000", b"{}") {
            Err(CoreError::MalformedSignature { .. }) => {}
            other => panic!("expected MalformedSignature, got {other:?}"),
        }
    }

    #[test]
    fn bad_public_key_is_rejected_at_construction() {
        assert!(RequestVerifier::from_hex("zz").is_err());
        assert!(RequestVerifier::from_hex("abcd").is_err());
    }
}
