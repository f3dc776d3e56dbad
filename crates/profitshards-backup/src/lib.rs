//! # ProfitShards Backup
//!
//! Password-protected backup and restore for ProfitShards user data.
//!
//! This crate provides functionality to:
//! - Export a user's locally stored, identity-scoped data to a compact,
//!   encrypted backup file
//! - Import backups and restore the data under the currently signed-in
//!   identity
//!
//! ## Features
//!
//! - **JSON Envelope**: Portable pretty-printed file with no plaintext
//!   user data outside the ciphertext
//! - **Strong Encryption**: PBKDF2-HMAC-SHA256 key derivation + AES-256-GCM
//!   authenticated encryption
//! - **Ownership Remapping**: Restored keys are rewritten from the backup's
//!   owner to the active identity using exact segment matching
//! - **Collaborator Seams**: The key-value store, identity provider and UI
//!   refresh bus are traits; the crate ships in-memory implementations
//!
//! ## Example
//!
//! ```rust,ignore
//! use profitshards_backup::{
//!     BackupExporter, BackupImporter, MemoryStore, RecordingNotifier, StaticIdentity,
//! };
//!
//! let store = MemoryStore::new();
//! let identity = StaticIdentity::signed_in("alice@example.com");
//!
//! // Export to an encrypted backup file
//! let backup = BackupExporter::new(&store, &identity).export("my_password")?;
//!
//! // Import it later, possibly as a different identity
//! let notifier = RecordingNotifier::new();
//! let result = BackupImporter::new(&store, &identity, &notifier)
//!     .import(&backup.contents, "my_password")?;
//! ```

pub mod codec;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod extractor;
pub mod importer;
pub mod store;
pub mod validation;

// Re-export error types
pub use error::{BackupError, Result};

// Re-export main functionality
pub use codec::{collect_user_data, UserDataPayload, NAMESPACES};
pub use envelope::{BackupEnvelope, APP_ID, DEFAULT_FILE_NAME, ENVELOPE_VERSION, FILE_EXTENSION};
pub use extractor::{BackupExporter, ExportedBackup};
pub use importer::{BackupImporter, ImportOptions, ImportResult};
pub use store::{
    active_identity, DataDomain, IdentityProvider, KeyValueStore, MemoryStore, RecordingNotifier,
    RefreshNotifier, StaticIdentity, GUEST_IDENTITY,
};
