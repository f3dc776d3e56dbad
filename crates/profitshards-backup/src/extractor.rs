//! # Backup Exporter
//!
//! Export orchestration: collect the active identity's data from the
//! key-value store, encrypt it, and produce the downloadable file.
//!
//! Export has no side effects; the artifact exists only at the end. Any
//! failure along the way leaves the store untouched.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use profitshards_backup::{BackupExporter, MemoryStore, StaticIdentity};
//!
//! let store = MemoryStore::new();
//! let identity = StaticIdentity::signed_in("alice@example.com");
//!
//! let exporter = BackupExporter::new(&store, &identity);
//! let backup = exporter.export("password")?;
//! // hand backup.contents to the file download, named backup.file_name
//! ```

use log::{debug, info};

use crate::codec::{self, UserDataPayload};
use crate::envelope::{BackupEnvelope, DEFAULT_FILE_NAME};
use crate::error::Result;
use crate::store::{active_identity, IdentityProvider, KeyValueStore};
use crate::validation;

/// A finished export, ready to hand to the file download.
#[derive(Debug, Clone)]
pub struct ExportedBackup {
    /// Suggested file name for the download
    pub file_name: String,
    /// Pretty-printed envelope JSON
    pub contents: String,
}

/// Exporter for user data backups.
pub struct BackupExporter<'a> {
    store: &'a dyn KeyValueStore,
    identity: &'a dyn IdentityProvider,
}

impl<'a> BackupExporter<'a> {
    /// Create a new backup exporter over the given collaborators.
    pub fn new(store: &'a dyn KeyValueStore, identity: &'a dyn IdentityProvider) -> Self {
        Self { store, identity }
    }

    /// Preview what would be backed up, without encrypting anything.
    ///
    /// Pure read; useful for showing the user which domains have data.
    pub fn collect(&self) -> Result<UserDataPayload> {
        let owner = active_identity(self.identity);
        codec::collect_user_data(self.store, &owner)
    }

    /// Export the active identity's data as an encrypted backup file.
    ///
    /// Fails with [`BackupError::EmptyPassword`](crate::BackupError::EmptyPassword)
    /// before any data is read if no password was entered. An identity with
    /// no stored data exports an empty (but valid) backup.
    pub fn export(&self, password: &str) -> Result<ExportedBackup> {
        validation::validate_password(password)?;

        let owner = active_identity(self.identity);
        let payload = codec::collect_user_data(self.store, &owner)?;
        debug!("collected {} keys for {owner}", payload.len());

        let envelope = BackupEnvelope::create(&payload, &owner, password)?;
        let contents = envelope.to_json()?;

        info!("exported backup for {owner} ({} keys)", payload.len());
        Ok(ExportedBackup {
            file_name: DEFAULT_FILE_NAME.to_string(),
            contents,
        })
    }
}
