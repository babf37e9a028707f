use thiserror::Error;

pub type SecureResult<T> = Result<T, SecureError>;

#[derive(Debug, Error)]
pub enum SecureError {
    #[error("empty passphrase")]
    EmptyPassphrase,

    #[error("passphrase is too big: {0} bytes (max 32)")]
    PassphraseTooBig(usize),

    #[error("no encryption key")]
    NoEncryptionKey,

    #[error("invalid key size: {0} bytes (want 32)")]
    InvalidKeySize(usize),

    #[error("nothing to encrypt")]
    NothingToEncrypt,

    #[error("additional data overflow: {0} bytes (max 255)")]
    DataOverflow(usize),

    #[error("pack: no ciphertext")]
    EmptyCiphertext,

    /// Structurally invalid packed bytes, caught before the AEAD ever runs.
    /// Carries the offending bytes for diagnostics.
    #[error("corrupt packed data ({} bytes)", .0.len())]
    Corrupt(Vec<u8>),

    /// Authentication tag did not verify under the supplied key/nonce/AAD.
    #[error("cipher: {0}")]
    Cipher(aes_gcm::Error),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decrypted value is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("not an integer: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    /// A field failed to open; keeps the raw field text so a corrupt
    /// document can be diagnosed without re-exposing the secret.
    #[error("{source}, while decrypting {field:?}")]
    Field {
        field: String,
        #[source]
        source: Box<SecureError>,
    },
}

impl SecureError {
    /// True for failures of the decryption pipeline itself (bad tag or
    /// mangled packed bytes), as opposed to misuse or plain decode errors.
    pub fn is_decrypt_error(&self) -> bool {
        match self {
            SecureError::Cipher(_) | SecureError::Corrupt(_) => true,
            SecureError::Field { source, .. } => source.is_decrypt_error(),
            _ => false,
        }
    }
}
