//! tgwipe-secure: encryption envelope for API credentials
//!
//! Protects small scalar values (the Telegram `api_id`/`api_hash`) at rest
//! without a user-managed password: the key is derived from a short,
//! locally-available passphrase (typically a hardware address) whitened
//! against a fixed 256-byte salt, and values are sealed with AES-256-GCM.
//!
//! Wire format of a sealed value:
//! ```text
//! "TGD." + base64( [1 byte: AAD length][AAD][12 bytes: nonce][ciphertext + tag] )
//! ```
//!
//! The `TGD.` signature is the only thing distinguishing a sealed value
//! from legacy plaintext; every decode path reports that case as a tagged
//! outcome ([`Unarmored::Plain`], [`Decrypted::Plain`]) rather than an
//! error, so documents written before encryption existed keep loading.
//!
//! There is no process-global key: [`Key`] is built once (usually via
//! [`Key::derive`]) and passed by reference into every operation.

pub mod armor;
pub mod cipher;
pub mod error;
pub mod field;
pub mod kdf;
pub mod pack;

pub use armor::{armor, is_armored, unarmor, Unarmored, SIGNATURE};
pub use cipher::{decrypt, encrypt, Decrypted};
pub use error::{SecureError, SecureResult};
pub use field::{SecureInt, SecureString};
pub use kdf::Key;
pub use pack::{pack, unpack, Envelope};

/// Size of an encryption key in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// Size of an AES-GCM nonce.
pub const NONCE_SIZE: usize = 12;

/// Size of the additional-data length prefix in the packed layout.
pub const ADL_SIZE: usize = 1;

/// Maximum additional data size: its length must fit the one-byte prefix.
pub const MAX_DATA_SIZE: usize = (1 << (ADL_SIZE * 8)) - 1;
