//! Armoring: packed bytes ↔ printable `TGD.<base64>` text
//!
//! The signature prefix is the only marker separating sealed values from
//! legacy plaintext, so its absence is a tagged outcome, not an error.

use base64::{engine::general_purpose::STANDARD as B64, Engine};

use crate::error::SecureResult;

/// Marker prefix identifying armored ciphertext.
pub const SIGNATURE: &str = "TGD.";

/// Outcome of [`unarmor`]: either decoded packed bytes, or the input
/// passed back untouched because it carries no signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unarmored<'a> {
    Packed(Vec<u8>),
    Plain(&'a str),
}

/// Armor packed bytes as printable text. Always succeeds; empty input
/// yields just the signature.
pub fn armor(packed: &[u8]) -> String {
    format!("{SIGNATURE}{}", B64.encode(packed))
}

/// Undo [`armor`], trimming surrounding whitespace first.
///
/// Input without the signature comes back as [`Unarmored::Plain`]. The
/// signature followed by invalid base64 is a hard error: such a value
/// claims to be armored and is not legacy plaintext.
pub fn unarmor(value: &str) -> SecureResult<Unarmored<'_>> {
    match value.trim().strip_prefix(SIGNATURE) {
        Some(b64) => Ok(Unarmored::Packed(B64.decode(b64)?)),
        None => Ok(Unarmored::Plain(value)),
    }
}

/// Cheap probe: does this value look armored? Does not decode anything.
pub fn is_armored(value: &str) -> bool {
    value.trim().starts_with(SIGNATURE)
}
