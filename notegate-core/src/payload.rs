//! Decoding of the pipe-delimited position code and note message.
//!
//! The game client emits `"<x>|<y>|<z>|<tag>"`: three coordinates and
//! a truncated-HMAC tag over the coordinate substring (see
//! [`crate::integrity`]). Decoding is strict: wrong token counts and
//! non-finite or unparseable numbers are rejected rather than coerced,
//! so NaN never reaches the store.

use crate::CoreError;

/// Maximum note message length, matching the modal's field bound.
pub const MESSAGE_MAX_CHARS: usize = 100;

/// A decoded world-space position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A parsed position code, keeping the raw coordinate substring so the
/// integrity tag can be verified over the exact bytes the client
/// hashed (re-formatting the floats would change them).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionCode<'a> {
    pub position: Position,
    /// The `"<x>|<y>|<z>"` substring as transmitted.
    pub raw_coords: &'a str,
    /// The trailing tag token, hex, unverified at this stage.
    pub tag: &'a str,
}

/// Parse a position code of the form `X|Y|Z|TAG`.
///
/// Surrounding whitespace is tolerated (the code is pasted by hand);
/// interior structure is not.
///
/// # Errors
/// Returns [`CoreError::MalformedCode`] if the token count is not
/// exactly four or any coordinate fails to parse as a finite float.
pub fn parse_position_code(code: &str) -> Result<PositionCode<'_>, CoreError> {
    let code = code.trim();
    let Some((raw_coords, tag)) = code.rsplit_once('|') else {
        return Err(CoreError::MalformedCode { reason: "no `|` separators".to_owned() });
    };

    let mut coords = raw_coords.split('|');
    let (Some(x), Some(y), Some(z), None) =
        (coords.next(), coords.next(), coords.next(), coords.next())
    else {
        return Err(CoreError::MalformedCode {
            reason: "expected exactly 4 `|`-separated tokens".to_owned(),
        });
    };

    if tag.is_empty() {
        return Err(CoreError::MalformedCode { reason: "empty tag token".to_owned() });
    }

    let position = Position {
        x: parse_coord(x, "X")?,
        y: parse_coord(y, "Y")?,
        z: parse_coord(z, "Z")?,
    };

    Ok(PositionCode { position, raw_coords, tag })
}

fn parse_coord(token: &str, axis: &str) -> Result<f64, CoreError> {
    let value: f64 = token.parse().map_err(|_| CoreError::MalformedCode {
        reason: format!("{axis} coordinate `{token}` is not a number"),
    })?;
    if !value.is_finite() {
        return Err(CoreError::MalformedCode {
            reason: format!("{axis} coordinate `{token}` is not finite"),
        });
    }
    Ok(value)
}

/// Validate and trim a note message.
///
/// # Errors
/// Returns [`CoreError::InvalidMessage`] if the trimmed message is
/// empty or longer than [`MESSAGE_MAX_CHARS`] characters. The modal
/// enforces the bound client-side; the server does not trust it.
pub fn validate_message(message: &str) -> Result<&str, CoreError> {
    let message = message.trim();
    if message.is_empty() || message.chars().count() > MESSAGE_MAX_CHARS {
        return Err(CoreError::InvalidMessage { max: MESSAGE_MAX_CHARS });
    }
    Ok(message)
}
