//! # Backup Envelope
//!
//! This module provides the encrypted envelope wrapper for user data
//! backups. The envelope is the file the user downloads: a pretty-printed
//! JSON object carrying the metadata needed for decryption plus the
//! ciphertext. No user data appears outside the ciphertext.
//!
//! ## Wire Format
//!
//! ```json
//! {
//!   "v": 1,
//!   "app": "ProfitShards",
//!   "user": "alice@example.com",
//!   "salt": "<base64, 16 bytes>",
//!   "iv": "<base64, 12 bytes>",
//!   "ciphertext": "<base64>"
//! }
//! ```
//!
//! `app` and `v` are validated before any base64 decoding or decryption is
//! attempted. Salt and iv are freshly random per envelope; two exports of
//! identical data never share them.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::codec::{self, UserDataPayload};
use crate::crypto::{self, EncryptedData, NONCE_SIZE, PBKDF2_ITERATIONS, SALT_SIZE};
use crate::error::{BackupError, Result};
use crate::validation;

/// Application id recorded in every envelope
pub const APP_ID: &str = "ProfitShards";

/// Current envelope schema version
pub const ENVELOPE_VERSION: u32 = 1;

/// File extension for exported backups
pub const FILE_EXTENSION: &str = "psbkp";

/// Default name for the downloaded backup file
pub const DEFAULT_FILE_NAME: &str = "profitshards-backup.psbkp";

/// An encrypted user data backup envelope.
#[derive(Debug, Clone)]
pub struct BackupEnvelope {
    /// Envelope schema version
    pub version: u32,
    /// Identity the backed-up data belonged to at export time
    pub owner: String,
    /// Encrypted payload with salt and nonce
    pub encrypted: EncryptedData,
}

/// JSON wire shape of the envelope. Field names are fixed by the format.
#[derive(Serialize, Deserialize)]
struct WireEnvelope {
    v: u32,
    app: String,
    user: String,
    salt: String,
    iv: String,
    ciphertext: String,
}

impl BackupEnvelope {
    /// Create a new envelope from a user data payload.
    ///
    /// Serializes the payload to JSON and encrypts it with a key derived
    /// from the password. Salt and nonce are generated fresh inside
    /// [`crypto::encrypt`].
    pub fn create(payload: &UserDataPayload, owner: &str, password: &str) -> Result<Self> {
        let plaintext = codec::serialize(payload)?;
        let encrypted = crypto::encrypt(&plaintext, password, PBKDF2_ITERATIONS)?;

        Ok(Self {
            version: ENVELOPE_VERSION,
            owner: owner.to_string(),
            encrypted,
        })
    }

    /// Decrypt the envelope and return the user data payload.
    pub fn decrypt(&self, password: &str) -> Result<UserDataPayload> {
        let plaintext = crypto::decrypt(
            &self.encrypted.ciphertext,
            password,
            &self.encrypted,
            PBKDF2_ITERATIONS,
        )?;

        codec::parse(&plaintext)
    }

    /// Serialize the envelope to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        let wire = WireEnvelope {
            v: self.version,
            app: APP_ID.to_string(),
            user: self.owner.clone(),
            salt: BASE64.encode(self.encrypted.salt),
            iv: BASE64.encode(self.encrypted.nonce),
            ciphertext: BASE64.encode(&self.encrypted.ciphertext),
        };

        serde_json::to_string_pretty(&wire).map_err(|e| BackupError::Serialize(e.to_string()))
    }

    /// Parse an envelope from JSON text.
    ///
    /// App id and version are checked first; the binary fields are only
    /// decoded once the envelope is known to be ours.
    pub fn from_json(text: &str) -> Result<Self> {
        let wire: WireEnvelope = serde_json::from_str(text)
            .map_err(|e| BackupError::Format(format!("not a valid backup file: {e}")))?;

        validation::validate_app_id(&wire.app)?;
        validation::validate_version(wire.v)?;

        let salt = decode_array::<SALT_SIZE>(&wire.salt, "salt")?;
        let nonce = decode_array::<NONCE_SIZE>(&wire.iv, "iv")?;
        let ciphertext = decode_field(&wire.ciphertext, "ciphertext")?;

        Ok(Self {
            version: wire.v,
            owner: wire.user,
            encrypted: EncryptedData {
                salt,
                nonce,
                ciphertext,
            },
        })
    }
}

/// Decode a base64 envelope field.
fn decode_field(text: &str, field: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(text)
        .map_err(|e| BackupError::Format(format!("invalid base64 in {field}: {e}")))
}

/// Decode a base64 envelope field with a fixed expected length.
fn decode_array<const N: usize>(text: &str, field: &str) -> Result<[u8; N]> {
    let bytes = decode_field(text, field)?;
    bytes
        .try_into()
        .map_err(|_| BackupError::Format(format!("{field} must be {N} bytes")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_payload() -> UserDataPayload {
        let mut payload = UserDataPayload::new();
        payload.insert(
            "worldshards-history-alice".to_string(),
            "[{\"profit\":42}]".to_string(),
        );
        payload.insert(
            "worldshards-preferences-alice".to_string(),
            "{\"theme\":\"dark\"}".to_string(),
        );
        payload
    }

    #[test]
    fn test_envelope_roundtrip() {
        let payload = create_test_payload();
        let password = "test_password";

        let envelope = BackupEnvelope::create(&payload, "alice", password).unwrap();

        let json = envelope.to_json().unwrap();
        let restored_envelope = BackupEnvelope::from_json(&json).unwrap();

        assert_eq!(restored_envelope.version, ENVELOPE_VERSION);
        assert_eq!(restored_envelope.owner, "alice");

        let restored_payload = restored_envelope.decrypt(password).unwrap();
        assert_eq!(restored_payload, payload);
    }

    #[test]
    fn test_wrong_password() {
        let envelope = BackupEnvelope::create(&create_test_payload(), "alice", "correct").unwrap();
        let json = envelope.to_json().unwrap();

        let restored = BackupEnvelope::from_json(&json).unwrap();
        let result = restored.decrypt("wrong");

        assert!(matches!(result, Err(BackupError::WrongPassword)));
    }

    #[test]
    fn test_rejects_foreign_app() {
        let envelope = BackupEnvelope::create(&create_test_payload(), "alice", "pw").unwrap();
        let json = envelope.to_json().unwrap().replace("ProfitShards", "LossShards");

        let result = BackupEnvelope::from_json(&json);
        assert!(matches!(result, Err(BackupError::AppIdMismatch(_))));
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let envelope = BackupEnvelope::create(&create_test_payload(), "alice", "pw").unwrap();
        let json = envelope.to_json().unwrap().replace("\"v\": 1", "\"v\": 2");

        let result = BackupEnvelope::from_json(&json);
        assert!(matches!(
            result,
            Err(BackupError::UnsupportedVersion(2, 1))
        ));
    }

    #[test]
    fn test_rejects_non_json() {
        let result = BackupEnvelope::from_json("BEWP\x01\x00garbage");
        assert!(matches!(result, Err(BackupError::Format(_))));
    }

    #[test]
    fn test_rejects_wrong_salt_length() {
        let envelope = BackupEnvelope::create(&create_test_payload(), "alice", "pw").unwrap();
        let short_salt = BASE64.encode([0u8; 8]);
        let json = envelope
            .to_json()
            .unwrap()
            .replace(&BASE64.encode(envelope.encrypted.salt), &short_salt);

        let result = BackupEnvelope::from_json(&json);
        assert!(matches!(result, Err(BackupError::Format(_))));
    }

    #[test]
    fn test_no_plaintext_in_envelope() {
        let envelope = BackupEnvelope::create(&create_test_payload(), "alice", "pw").unwrap();
        let json = envelope.to_json().unwrap();

        // Key names and values live only inside the ciphertext
        assert!(!json.contains("worldshards-history"));
        assert!(!json.contains("profit"));
        assert!(!json.contains("dark"));
    }

    #[test]
    fn test_fresh_salt_and_iv_per_export() {
        let payload = create_test_payload();
        let env1 = BackupEnvelope::create(&payload, "alice", "pw").unwrap();
        let env2 = BackupEnvelope::create(&payload, "alice", "pw").unwrap();

        assert_ne!(env1.encrypted.salt, env2.encrypted.salt);
        assert_ne!(env1.encrypted.nonce, env2.encrypted.nonce);
        assert_ne!(env1.encrypted.ciphertext, env2.encrypted.ciphertext);
    }
}
