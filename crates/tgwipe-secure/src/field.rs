//! Encrypted scalar fields for the credential document
//!
//! [`SecureString`] and [`SecureInt`] are explicit `Absent | Present` sums:
//! the document omits absent fields, and the "nothing to encrypt" skip is
//! a visible branch instead of a zero-value comparison. `seal` produces the
//! armored document text, `open` accepts armored text or legacy plaintext.

use crate::cipher::{decrypt, encrypt, Decrypted};
use crate::error::{SecureError, SecureResult};
use crate::kdf::Key;

/// A protected text value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SecureString {
    #[default]
    Absent,
    Present(String),
}

impl SecureString {
    /// Wrap a value; the empty string normalizes to `Absent`.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            SecureString::Absent
        } else {
            SecureString::Present(value)
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SecureString::Absent => None,
            SecureString::Present(s) => Some(s),
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            SecureString::Absent => None,
            SecureString::Present(s) => Some(s),
        }
    }

    /// Produce the armored document value, or `None` when absent.
    pub fn seal(&self, key: &Key) -> SecureResult<Option<String>> {
        match self {
            SecureString::Absent => Ok(None),
            SecureString::Present(s) => encrypt(s, key, None).map(Some),
        }
    }

    /// Read back a document value: armored text decrypts, text without the
    /// signature is accepted as legacy plaintext, anything else fails with
    /// the raw field attached for diagnostics.
    pub fn open(field: Option<&str>, key: &Key) -> SecureResult<Self> {
        let Some(raw) = field.map(str::trim).filter(|r| !r.is_empty()) else {
            return Ok(SecureString::Absent);
        };
        match decrypt(raw, key) {
            Ok(outcome) => Ok(SecureString::Present(outcome.into_string())),
            Err(err) => Err(field_error(raw, err)),
        }
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        SecureString::new(value)
    }
}

/// A protected integer value. Round-trips through decimal text on both
/// sides of the cipher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SecureInt {
    #[default]
    Absent,
    Present(i64),
}

impl SecureInt {
    /// Wrap a value; zero normalizes to `Absent`.
    pub fn new(value: i64) -> Self {
        if value == 0 {
            SecureInt::Absent
        } else {
            SecureInt::Present(value)
        }
    }

    pub fn value(&self) -> Option<i64> {
        match self {
            SecureInt::Absent => None,
            SecureInt::Present(v) => Some(*v),
        }
    }

    /// Produce the armored document value, or `None` when absent.
    pub fn seal(&self, key: &Key) -> SecureResult<Option<String>> {
        match self {
            SecureInt::Absent => Ok(None),
            SecureInt::Present(v) => encrypt(&v.to_string(), key, None).map(Some),
        }
    }

    /// Read back a document value. A decrypted or fallback value that is
    /// not decimal digits is a hard error, never a silent zero.
    pub fn open(field: Option<&str>, key: &Key) -> SecureResult<Self> {
        let Some(raw) = field.map(str::trim).filter(|r| !r.is_empty()) else {
            return Ok(SecureInt::Absent);
        };
        let text = match decrypt(raw, key) {
            Ok(Decrypted::Secret(s)) => s,
            Ok(Decrypted::Plain(s)) => s,
            Err(err) => return Err(field_error(raw, err)),
        };
        let value = text
            .parse::<i64>()
            .map_err(|err| field_error(raw, SecureError::from(err)))?;
        Ok(SecureInt::Present(value))
    }
}

impl From<i64> for SecureInt {
    fn from(value: i64) -> Self {
        SecureInt::new(value)
    }
}

fn field_error(raw: &str, source: SecureError) -> SecureError {
    SecureError::Field {
        field: raw.to_string(),
        source: Box::new(source),
    }
}
