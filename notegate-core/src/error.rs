/// Errors produced by the `notegate-core` crate.
///
/// The gateway maps the first three variants to `401 Unauthorized`; the
/// rest carry user-presentable `Display` text and surface as ephemeral
/// chat replies rather than HTTP errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// The configured Discord public key is not a valid Ed25519 point.
    #[error("invalid Ed25519 public key: {reason}")]
    InvalidPublicKey { reason: String },

    /// A signature header is missing, non-hex, or the wrong length.
    #[error("malformed signature header: {reason}")]
    MalformedSignature { reason: String },

    /// The signature does not verify against timestamp ++ body.
    #[error("request signature verification failed")]
    SignatureInvalid,

    /// The position code does not match the `X|Y|Z|TAG` shape.
    #[error("invalid position code ({reason}); expected the code copied from in-game, like `1.2|0.5|-5.3|9A4F11B0`")]
    MalformedCode { reason: String },

    /// The integrity tag does not match the coordinates.
    #[error("this code failed verification; copy it again from in-game without editing it")]
    IntegrityMismatch,

    /// The note message is empty or over the length bound.
    #[error("message must be between 1 and {max} characters")]
    InvalidMessage { max: usize },
}
