//! # Validation Module
//!
//! Input and envelope validation for backup operations.
//!
//! ## Validation Rules
//!
//! 1. **Password**: Must be non-empty before any cryptographic work starts
//! 2. **File contents**: Must be non-empty before parsing
//! 3. **App id**: Must equal [`APP_ID`](crate::envelope::APP_ID)
//! 4. **Version**: Must be exactly the supported envelope version
//!
//! App id and version are checked before any decryption attempt; a
//! mismatch is a hard failure, not a warning.

use crate::envelope::{APP_ID, ENVELOPE_VERSION};
use crate::error::{BackupError, Result};

/// Validate a user-supplied password.
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(BackupError::EmptyPassword);
    }
    Ok(())
}

/// Validate uploaded backup file contents.
pub fn validate_file_contents(contents: &str) -> Result<()> {
    if contents.trim().is_empty() {
        return Err(BackupError::EmptyFile);
    }
    Ok(())
}

/// Validate the envelope's producing application id.
pub fn validate_app_id(app: &str) -> Result<()> {
    if app != APP_ID {
        return Err(BackupError::AppIdMismatch(app.to_string()));
    }
    Ok(())
}

/// Validate the envelope schema version.
pub fn validate_version(version: u32) -> Result<()> {
    if version != ENVELOPE_VERSION {
        return Err(BackupError::UnsupportedVersion(version, ENVELOPE_VERSION));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password() {
        assert!(matches!(
            validate_password(""),
            Err(BackupError::EmptyPassword)
        ));
        assert!(validate_password("p").is_ok());
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(
            validate_file_contents(""),
            Err(BackupError::EmptyFile)
        ));
        assert!(matches!(
            validate_file_contents("   \n"),
            Err(BackupError::EmptyFile)
        ));
        assert!(validate_file_contents("{}").is_ok());
    }

    #[test]
    fn test_app_id() {
        assert!(validate_app_id("ProfitShards").is_ok());
        assert!(matches!(
            validate_app_id("OtherApp"),
            Err(BackupError::AppIdMismatch(_))
        ));
    }

    #[test]
    fn test_version() {
        assert!(validate_version(1).is_ok());
        assert!(matches!(
            validate_version(0),
            Err(BackupError::UnsupportedVersion(0, 1))
        ));
        assert!(matches!(
            validate_version(2),
            Err(BackupError::UnsupportedVersion(2, 1))
        ));
    }
}
