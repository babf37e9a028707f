//! Key derivation: short passphrase → 256-bit key, whitened by a fixed salt
//!
//! The passphrase (1–32 bytes, e.g. a MAC address) is repeated to fill the
//! 32 key bytes, then each byte is XORed with the salt at a rotation chosen
//! by the passphrase's first byte:
//!
//! ```text
//! key[i] = pass[i % len(pass)] ^ SALT[(i + pass[0]) % 256]
//! ```
//!
//! The salt is a compiled-in constant, identical across installations. It
//! is not a secret; it only keeps a short passphrase from appearing
//! verbatim in the key.

use zeroize::Zeroize;

use crate::error::{SecureError, SecureResult};
use crate::KEY_SIZE;

/// Fixed whitening salt. Must never change: every credential file ever
/// written was keyed against these exact bytes.
pub(crate) static SALT: [u8; 256] = [
    0x1a, 0x98, 0x15, 0x70, 0xbf, 0x57, 0x16, 0x35, 0xba, 0x78, 0x1e, 0xbc,
    0x97, 0x09, 0x24, 0x47, 0xe7, 0xa6, 0xac, 0x72, 0x0d, 0x60, 0x28, 0x8b,
    0x40, 0x13, 0x02, 0x0d, 0xd6, 0x38, 0xa3, 0xfa, 0x95, 0x14, 0xc6, 0x7d,
    0x65, 0x3d, 0xb2, 0xd9, 0x86, 0x4f, 0x61, 0x5f, 0xa5, 0xe7, 0xdc, 0x30,
    0x52, 0x49, 0x0c, 0x6d, 0x1a, 0xea, 0x2b, 0x5b, 0xf6, 0x4a, 0x5f, 0xd2,
    0xfd, 0x01, 0x1a, 0xc8, 0x48, 0x68, 0xcf, 0x7b, 0xfa, 0x64, 0xc7, 0x46,
    0x82, 0xdc, 0x78, 0xb6, 0xc0, 0x80, 0x07, 0xb5, 0xa0, 0x79, 0x3f, 0xcb,
    0xe5, 0xee, 0x55, 0x72, 0x74, 0x66, 0x6d, 0xe4, 0x8e, 0xed, 0xd1, 0xff,
    0xba, 0x6b, 0x51, 0xf7, 0xca, 0xfe, 0x43, 0x3f, 0xbd, 0x37, 0xb5, 0x37,
    0xa3, 0xa4, 0x05, 0x44, 0xd4, 0x1f, 0xb9, 0xd9, 0xc0, 0x2f, 0x41, 0xa6,
    0xe9, 0x14, 0x6b, 0xef, 0xdd, 0x67, 0x0d, 0x5e, 0x10, 0x31, 0xca, 0xdc,
    0xd1, 0x42, 0xdd, 0x9d, 0xef, 0x14, 0x7f, 0xff, 0x4d, 0x03, 0x65, 0xdc,
    0x66, 0x5d, 0x92, 0x4c, 0x23, 0x89, 0xf7, 0x62, 0x9d, 0x2a, 0x06, 0xe1,
    0x66, 0x0a, 0x47, 0x24, 0xd3, 0x08, 0xc1, 0x04, 0x45, 0xb5, 0xcd, 0x1c,
    0x61, 0x08, 0x52, 0xf5, 0x4e, 0xb8, 0xbd, 0x47, 0x69, 0x30, 0xec, 0x02,
    0x61, 0xf9, 0xd8, 0xc9, 0x93, 0x20, 0x8b, 0x33, 0xe9, 0x96, 0xab, 0xd4,
    0x43, 0x91, 0x59, 0xe0, 0x4e, 0x45, 0x5c, 0xda, 0x57, 0x0e, 0x12, 0x77,
    0xa4, 0xe2, 0x0d, 0x7e, 0xee, 0xe3, 0x2e, 0x80, 0x98, 0x39, 0xd1, 0x98,
    0x34, 0x4e, 0x3f, 0xff, 0xcf, 0xca, 0x1f, 0xe6, 0x36, 0xfc, 0x58, 0x12,
    0xfd, 0x8e, 0x28, 0x83, 0x74, 0xbc, 0xf9, 0xeb, 0xf8, 0xd3, 0x4f, 0x39,
    0x35, 0x74, 0x5d, 0xa7, 0x65, 0x64, 0x0b, 0x13, 0x38, 0x0e, 0x4b, 0x63,
    0xcf, 0x47, 0x64, 0xf2,
];

/// A 256-bit encryption key.
///
/// Zeroized on drop to prevent secrets lingering in memory. Built once at
/// startup and passed by reference into every cipher and field operation.
#[derive(Clone)]
pub struct Key {
    bytes: [u8; KEY_SIZE],
}

impl Key {
    /// Derive a key from a 1–32 byte passphrase.
    ///
    /// Deterministic: the same passphrase always yields the same key.
    pub fn derive(passphrase: &[u8]) -> SecureResult<Self> {
        if passphrase.is_empty() {
            return Err(SecureError::EmptyPassphrase);
        }
        if passphrase.len() > KEY_SIZE {
            return Err(SecureError::PassphraseTooBig(passphrase.len()));
        }

        // Starting offset into the salt is the first passphrase byte.
        let offset = passphrase[0] as usize;
        let mut bytes = [0u8; KEY_SIZE];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = passphrase[i % passphrase.len()] ^ SALT[(i + offset) % SALT.len()];
        }
        Ok(Self { bytes })
    }

    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Build a key from raw bytes, rejecting anything but exactly 32.
    pub fn from_slice(bytes: &[u8]) -> SecureResult<Self> {
        let bytes: [u8; KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| SecureError::InvalidKeySize(bytes.len()))?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key").field("bytes", &"[REDACTED]").finish()
    }
}
