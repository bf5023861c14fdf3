// Keys - Ed25519 key files for fee authorities
use crate::types::AccountId;
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON key file layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyFile {
    pub scheme: String,
    pub secret_key: String,
    pub public_key: String,
    pub account_id: AccountId,
}

impl KeyFile {
    pub fn from_signing_key(signing_key: &SigningKey) -> Self {
        Self {
            scheme: "ed25519".to_string(),
            secret_key: format!("0x{}", hex::encode(signing_key.to_bytes())),
            public_key: format!("0x{}", hex::encode(signing_key.verifying_key().to_bytes())),
            account_id: AccountId::from_signing_key(signing_key),
        }
    }

    /// Generate a new keypair
    pub fn generate() -> (Self, SigningKey) {
        let signing_key = SigningKey::generate(&mut OsRng);
        (Self::from_signing_key(&signing_key), signing_key)
    }

    /// Recover the signing key; the stored account id must match it
    pub fn signing_key(&self) -> Result<SigningKey, KeyFileError> {
        if self.scheme != "ed25519" {
            return Err(KeyFileError::UnsupportedScheme(self.scheme.clone()));
        }

        let hex_str = self.secret_key.strip_prefix("0x").unwrap_or(&self.secret_key);
        let key_bytes = hex::decode(hex_str).map_err(|e| KeyFileError::InvalidHex(e.to_string()))?;
        let bytes: [u8; 32] = key_bytes
            .try_into()
            .map_err(|b: Vec<u8>| KeyFileError::InvalidLength(b.len()))?;

        let signing_key = SigningKey::from_bytes(&bytes);
        if AccountId::from_signing_key(&signing_key) != self.account_id {
            return Err(KeyFileError::AccountMismatch);
        }
        Ok(signing_key)
    }

    pub fn to_json(&self) -> Result<String, KeyFileError> {
        serde_json::to_string_pretty(self).map_err(|e| KeyFileError::Parse(e.to_string()))
    }

    /// Writes the key file readable by its owner only
    pub fn save(&self, path: &Path) -> Result<(), KeyFileError> {
        let json = self.to_json()?;
        write_secret(path, json.as_bytes()).map_err(|e| {
            KeyFileError::Io(format!("Failed to write key file {}: {}", path.display(), e))
        })
    }

    pub fn load(path: &Path) -> Result<Self, KeyFileError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            KeyFileError::Io(format!("Failed to read key file {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| KeyFileError::Parse(e.to_string()))
    }
}

#[cfg(unix)]
fn write_secret(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies to new files; an existing file keeps its bits
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_secret(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, contents)
}

/// Load the signing key stored at `path`
pub fn load_signing_key(path: &Path) -> Result<SigningKey, KeyFileError> {
    KeyFile::load(path)?.signing_key()
}

/// Key file errors
#[derive(Debug, thiserror::Error)]
pub enum KeyFileError {
    #[error("Key file I/O error: {0}")]
    Io(String),

    #[error("Invalid key file: {0}")]
    Parse(String),

    #[error("Unsupported key scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid key length: {0} bytes (expected 32)")]
    InvalidLength(usize),

    #[error("Key file account id does not match its secret key")]
    AccountMismatch,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_key_file_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("authority.json");

        let (key_file, signing_key) = KeyFile::generate();
        key_file.save(&path).unwrap();

        let loaded = load_signing_key(&path).unwrap();
        assert_eq!(loaded.to_bytes(), signing_key.to_bytes());
    }

    #[cfg(unix)]
    #[test]
    fn test_key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("authority.json");

        let (key_file, _) = KeyFile::generate();
        key_file.save(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "key file mode {:o} is readable by others", mode);
    }

    #[cfg(unix)]
    #[test]
    fn test_overwritten_key_file_is_tightened() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("authority.json");
        std::fs::write(&path, b"{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let (key_file, signing_key) = KeyFile::generate();
        key_file.save(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
        assert_eq!(load_signing_key(&path).unwrap().to_bytes(), signing_key.to_bytes());
    }

    #[test]
    fn test_key_file_account_mismatch() {
        let (mut key_file, _) = KeyFile::generate();
        key_file.account_id = AccountId::from_bytes([1; 32]);
        assert!(matches!(key_file.signing_key(), Err(KeyFileError::AccountMismatch)));
    }

    #[test]
    fn test_key_file_rejects_other_schemes() {
        let (mut key_file, _) = KeyFile::generate();
        key_file.scheme = "sr25519".to_string();
        assert!(matches!(key_file.signing_key(), Err(KeyFileError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_missing_key_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_signing_key(&temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(KeyFileError::Io(_))));
    }
}
