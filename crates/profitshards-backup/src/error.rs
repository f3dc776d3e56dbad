//! # Error Types
//!
//! This module defines error types for the profitshards-backup crate.

use thiserror::Error;

/// Errors that can occur during backup export or import.
#[derive(Debug, Error)]
pub enum BackupError {
    /// No password was entered
    #[error("Password must not be empty")]
    EmptyPassword,

    /// No backup file was selected
    #[error("No backup file contents provided")]
    EmptyFile,

    /// Envelope is not a valid backup file
    #[error("Envelope format error: {0}")]
    Format(String),

    /// Envelope was produced by a different application
    #[error("Unknown application id: {0:?}")]
    AppIdMismatch(String),

    /// Invalid envelope version
    #[error("Unsupported envelope version: {0}, expected {1}")]
    UnsupportedVersion(u32, u32),

    /// AEAD verification failure. Deliberately covers both a wrong
    /// password and tampered/corrupted ciphertext.
    #[error("Invalid password or corrupted data")]
    WrongPassword,

    /// Key derivation error
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Encryption error
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Payload serialization error
    #[error("Payload serialization error: {0}")]
    Serialize(String),

    /// Payload deserialization error
    #[error("Payload deserialization error: {0}")]
    Deserialize(String),

    /// Key-value store read error
    #[error("Store read error: {0}")]
    StoreRead(String),

    /// Key-value store write error
    #[error("Store write error: {0}")]
    StoreWrite(String),
}

impl BackupError {
    /// Short user-facing message for this error.
    ///
    /// The UI shows only these strings; raw error detail stays in logs.
    /// `WrongPassword` keeps a single message for both bad passwords and
    /// corrupted files.
    pub fn user_message(&self) -> &'static str {
        match self {
            BackupError::EmptyPassword => "Enter the backup password.",
            BackupError::EmptyFile => "Select a backup file.",
            BackupError::WrongPassword => "Wrong password or corrupted file.",
            _ => "Import failed.",
        }
    }
}

/// Result type alias for backup operations.
pub type Result<T> = std::result::Result<T, BackupError>;
