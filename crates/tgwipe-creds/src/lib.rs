//! tgwipe-creds: encrypted API credential storage
//!
//! Persists the Telegram `api_id`/`api_hash` pair as a one-line JSON
//! document whose values are armored ciphertext:
//!
//! ```json
//! {"api_id":"TGD.<base64>","api_hash":"TGD.<base64>"}
//! ```
//!
//! Documents written before encryption existed (plain values) load
//! unchanged through the legacy-plaintext fallback of the field types.
//! Store failures are meant to be non-fatal at the application boundary:
//! the caller falls back to prompting for credentials.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use tgwipe_secure::{Key, SecureError, SecureInt, SecureString};

/// On-disk credential document. Both fields are armored (or legacy plain)
/// text and omitted entirely when absent.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CredsDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_hash: Option<String>,
}

/// Credential store bound to one file and one passphrase.
///
/// Both are optional so a partially-configured store can exist; callers
/// check [`CredsStorage::is_available`] before attempting a stored-credential
/// flow.
#[derive(Default)]
pub struct CredsStorage {
    filename: Option<PathBuf>,
    passphrase: Option<Zeroizing<Vec<u8>>>,
}

impl std::fmt::Debug for CredsStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredsStorage")
            .field("filename", &self.filename)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl CredsStorage {
    pub fn new(filename: impl Into<PathBuf>, passphrase: &[u8]) -> Self {
        Self::default()
            .with_file(filename)
            .with_passphrase(passphrase)
    }

    pub fn with_file(mut self, filename: impl Into<PathBuf>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_passphrase(mut self, passphrase: &[u8]) -> Self {
        self.passphrase = Some(Zeroizing::new(passphrase.to_vec()));
        self
    }

    /// Whether both a target file and a passphrase are configured.
    pub fn is_available(&self) -> bool {
        self.filename.is_some() && self.passphrase.as_ref().is_some_and(|p| !p.is_empty())
    }

    fn key(&self) -> Result<Key, SecureError> {
        let passphrase = self.passphrase.as_ref().ok_or(SecureError::NoEncryptionKey)?;
        Key::derive(passphrase)
    }

    fn path(&self) -> Result<&Path> {
        self.filename
            .as_deref()
            .context("no credentials file configured")
    }

    /// Encrypt and write the credential pair.
    pub fn save(&self, api_id: i64, api_hash: &str) -> Result<()> {
        let key = self.key()?;
        let path = self.path()?;

        let doc = encode(api_id, api_hash, &key)?;
        let json = serde_json::to_string(&doc).context("serializing credentials")?;
        fs::write(path, json)
            .with_context(|| format!("writing credentials: {}", path.display()))?;

        debug!(path = %path.display(), "credentials saved");
        Ok(())
    }

    /// Read and decrypt the credential pair. Absent fields come back as
    /// `(0, "")`; a missing file or corrupt document is an error.
    pub fn load(&self) -> Result<(i64, String)> {
        let key = self.key()?;
        let path = self.path()?;

        let json = fs::read_to_string(path)
            .with_context(|| format!("reading credentials: {}", path.display()))?;
        let doc: CredsDoc = serde_json::from_str(&json)
            .with_context(|| format!("parsing credentials: {}", path.display()))?;

        let creds = decode(&doc, &key)
            .with_context(|| format!("decrypting credentials: {}", path.display()))?;
        debug!(path = %path.display(), "credentials loaded");
        Ok(creds)
    }
}

fn encode(api_id: i64, api_hash: &str, key: &Key) -> Result<CredsDoc, SecureError> {
    Ok(CredsDoc {
        api_id: SecureInt::new(api_id).seal(key)?,
        api_hash: SecureString::new(api_hash).seal(key)?,
    })
}

fn decode(doc: &CredsDoc, key: &Key) -> Result<(i64, String), SecureError> {
    let api_id = SecureInt::open(doc.api_id.as_deref(), key)?;
    let api_hash = SecureString::open(doc.api_hash.as_deref(), key)?;
    Ok((
        api_id.value().unwrap_or(0),
        api_hash.into_string().unwrap_or_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSPHRASE: &[u8] = b"11:22:33:44:55:66";

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredsStorage::new(dir.path().join("creds.json"), PASSPHRASE);

        store.save(12345, "0123456789abcdef").unwrap();
        assert_eq!(store.load().unwrap(), (12345, "0123456789abcdef".into()));
    }

    #[test]
    fn document_values_are_armored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds.json");
        let store = CredsStorage::new(&path, PASSPHRASE);

        store.save(12345, "0123456789abcdef").unwrap();
        let json = fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(doc["api_id"].as_str().unwrap().starts_with("TGD."));
        assert!(doc["api_hash"].as_str().unwrap().starts_with("TGD."));
    }

    #[test]
    fn zero_and_empty_fields_are_omitted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds.json");
        let store = CredsStorage::new(&path, PASSPHRASE);

        store.save(0, "").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        assert_eq!(store.load().unwrap(), (0, String::new()));
    }

    #[test]
    fn legacy_plaintext_document_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds.json");
        fs::write(&path, r#"{"api_id":"12345","api_hash":"cafebabe"}"#).unwrap();

        let store = CredsStorage::new(&path, PASSPHRASE);
        assert_eq!(store.load().unwrap(), (12345, "cafebabe".into()));
    }

    #[test]
    fn corrupt_armored_field_fails_without_spurious_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds.json");
        fs::write(&path, r#"{"api_id":"TGD.not!!valid!!base64"}"#).unwrap();

        let store = CredsStorage::new(&path, PASSPHRASE);
        assert!(store.load().is_err());
    }

    #[test]
    fn wrong_passphrase_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds.json");
        CredsStorage::new(&path, PASSPHRASE)
            .save(12345, "0123456789abcdef")
            .unwrap();

        let err = CredsStorage::new(&path, b"aa:bb:cc:dd:ee:ff")
            .load()
            .unwrap_err();
        let secure = err
            .chain()
            .find_map(|e| e.downcast_ref::<SecureError>())
            .expect("a SecureError in the chain");
        assert!(secure.is_decrypt_error());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredsStorage::new(dir.path().join("nope.json"), PASSPHRASE);
        assert!(store.load().is_err());
    }

    #[test]
    fn availability_requires_file_and_passphrase() {
        assert!(!CredsStorage::default().is_available());
        assert!(!CredsStorage::default().with_file("creds.json").is_available());
        assert!(!CredsStorage::default()
            .with_file("creds.json")
            .with_passphrase(b"")
            .is_available());
        assert!(!CredsStorage::default()
            .with_passphrase(PASSPHRASE)
            .is_available());
        assert!(CredsStorage::new("creds.json", PASSPHRASE).is_available());
    }

    #[test]
    fn unconfigured_store_reports_missing_key() {
        let err = CredsStorage::default()
            .with_file("creds.json")
            .save(1, "x")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SecureError>(),
            Some(SecureError::NoEncryptionKey)
        ));
    }
}
