//! Authenticated encryption of scalar values with AES-256-GCM
//!
//! `encrypt` seals a plaintext under a fresh random 12-byte nonce and
//! returns armored text; `decrypt` opens armored text, falling back to a
//! tagged plaintext outcome for values without the armor signature. A
//! failed authentication tag always surfaces as [`SecureError::Cipher`],
//! never as plausible wrong plaintext.

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Nonce,
};
use rand::RngCore;

use crate::armor::{armor, unarmor, Unarmored};
use crate::error::{SecureError, SecureResult};
use crate::kdf::Key;
use crate::pack::{pack, unpack, Envelope};
use crate::{MAX_DATA_SIZE, NONCE_SIZE};

/// Outcome of [`decrypt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decrypted {
    /// Armored input that authenticated and opened under the key.
    Secret(String),
    /// Input without the armor signature, passed through unchanged for
    /// legacy-plaintext handling.
    Plain(String),
}

impl Decrypted {
    pub fn into_string(self) -> String {
        match self {
            Decrypted::Secret(s) | Decrypted::Plain(s) => s,
        }
    }
}

/// Encrypt a plaintext to armored text under the given key.
///
/// The nonce is 12 random bytes drawn fresh per call from the OS CSPRNG;
/// it is never derived from the input. Empty plaintext is rejected (there
/// is no envelope for "nothing"), as is AAD longer than 255 bytes.
pub fn encrypt(plaintext: &str, key: &Key, additional_data: Option<&[u8]>) -> SecureResult<String> {
    if plaintext.is_empty() {
        return Err(SecureError::NothingToEncrypt);
    }
    let aad = additional_data.unwrap_or_default();
    if aad.len() > MAX_DATA_SIZE {
        return Err(SecureError::DataOverflow(aad.len()));
    }

    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let mut nonce = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(
            Nonce::from_slice(&nonce),
            Payload {
                msg: plaintext.as_bytes(),
                aad,
            },
        )
        .map_err(SecureError::Cipher)?;

    let envelope = Envelope {
        nonce,
        ciphertext,
        additional_data: (!aad.is_empty()).then(|| aad.to_vec()),
    };
    Ok(armor(&pack(&envelope)?))
}

/// Decrypt an armored value, or pass a legacy plaintext through.
///
/// Returns [`Decrypted::Plain`] with the input unchanged when the armor
/// signature is absent. Any structural or authentication failure of an
/// armored value is a hard error.
pub fn decrypt(value: &str, key: &Key) -> SecureResult<Decrypted> {
    let packed = match unarmor(value)? {
        Unarmored::Packed(packed) => packed,
        Unarmored::Plain(plain) => return Ok(Decrypted::Plain(plain.to_string())),
    };

    let envelope = unpack(&packed)?;
    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let plaintext = cipher
        .decrypt(
            Nonce::from_slice(&envelope.nonce),
            Payload {
                msg: &envelope.ciphertext,
                aad: envelope.additional_data.as_deref().unwrap_or_default(),
            },
        )
        .map_err(SecureError::Cipher)?;

    Ok(Decrypted::Secret(String::from_utf8(plaintext)?))
}
