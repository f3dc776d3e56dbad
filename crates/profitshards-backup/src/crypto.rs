//! # Cryptography Module
//!
//! This module provides encryption and key derivation for user data backups.
//!
//! ## Security Parameters
//!
//! - **KDF**: PBKDF2-HMAC-SHA256 with 100,000 iterations
//! - **Encryption**: AES-256-GCM (authenticated encryption)
//! - **Salt**: 16 bytes random
//! - **Nonce**: 12 bytes random (standard for AES-GCM)
//!
//! Salt and nonce are freshly generated on every call to [`encrypt`]; two
//! encryptions of the same plaintext with the same password never share
//! either value.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use profitshards_backup::crypto::{encrypt, decrypt, PBKDF2_ITERATIONS};
//!
//! let plaintext = b"secret data";
//! let password = "my_password";
//!
//! let encrypted = encrypt(plaintext, password, PBKDF2_ITERATIONS)?;
//! let decrypted = decrypt(&encrypted.ciphertext, password, &encrypted, PBKDF2_ITERATIONS)?;
//! assert_eq!(decrypted, plaintext);
//! ```

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{BackupError, Result};

/// Size of the encryption key in bytes (256 bits for AES-256)
pub const KEY_SIZE: usize = 32;

/// Size of the salt for PBKDF2
pub const SALT_SIZE: usize = 16;

/// Size of the nonce for AES-GCM
pub const NONCE_SIZE: usize = 12;

/// Size of the authentication tag for AES-GCM
pub const TAG_SIZE: usize = 16;

/// PBKDF2-HMAC-SHA256 iteration count used for backup envelopes.
///
/// This value is fixed by the envelope format: it is not recorded in the
/// file, so decryption must use the same count. A future envelope version
/// would carry the count explicitly before changing it.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Encrypted data along with the parameters needed for decryption.
#[derive(Debug, Clone)]
pub struct EncryptedData {
    /// Salt used for key derivation
    pub salt: [u8; SALT_SIZE],
    /// Nonce used for AES-GCM encryption
    pub nonce: [u8; NONCE_SIZE],
    /// Ciphertext with authentication tag appended
    pub ciphertext: Vec<u8>,
}

/// Derived encryption key with secure cleanup.
#[derive(Zeroize, ZeroizeOnDrop)]
struct DerivedKey([u8; KEY_SIZE]);

/// Derive an encryption key from a password using PBKDF2-HMAC-SHA256.
///
/// Deterministic: the same (password, salt, iterations) triple always
/// yields the same key.
fn derive_key(password: &str, salt: &[u8; SALT_SIZE], iterations: u32) -> Result<DerivedKey> {
    if iterations == 0 {
        return Err(BackupError::KeyDerivation(
            "iteration count must be non-zero".to_string(),
        ));
    }

    let mut key = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    Ok(DerivedKey(key))
}

/// Encrypt plaintext data using a password.
///
/// Uses PBKDF2-HMAC-SHA256 for key derivation and AES-256-GCM for
/// encryption. Generates a fresh random salt and nonce, and returns the
/// encrypted data along with both.
pub fn encrypt(plaintext: &[u8], password: &str, iterations: u32) -> Result<EncryptedData> {
    let mut salt = [0u8; SALT_SIZE];
    let mut nonce = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut salt);
    rand::thread_rng().fill_bytes(&mut nonce);

    let key = derive_key(password, &salt, iterations)?;

    let cipher =
        Aes256Gcm::new_from_slice(&key.0).map_err(|e| BackupError::Encryption(e.to_string()))?;
    let nonce_obj = Nonce::from_slice(&nonce);
    let ciphertext = cipher
        .encrypt(nonce_obj, plaintext)
        .map_err(|e| BackupError::Encryption(e.to_string()))?;

    Ok(EncryptedData {
        salt,
        nonce,
        ciphertext,
    })
}

/// Decrypt ciphertext using a password and the original encryption parameters.
///
/// Returns [`BackupError::WrongPassword`] if the password is wrong or the
/// data is corrupted. The two cases are indistinguishable through the AEAD
/// tag check and are reported identically.
pub fn decrypt(
    ciphertext: &[u8],
    password: &str,
    data: &EncryptedData,
    iterations: u32,
) -> Result<Vec<u8>> {
    let key = derive_key(password, &data.salt, iterations)?;

    let cipher =
        Aes256Gcm::new_from_slice(&key.0).map_err(|e| BackupError::Encryption(e.to_string()))?;
    let nonce = Nonce::from_slice(&data.nonce);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| BackupError::WrongPassword)
}
