//! # Backup Importer
//!
//! Import orchestration and the restore merger: parse the uploaded
//! envelope, decrypt it, rewrite key ownership, write the data back into
//! the key-value store, and broadcast refresh notifications.
//!
//! ## Identity remapping
//!
//! Backed-up keys are scoped to the identity that exported them. With
//! remapping enabled (the default), each `<namespace>-<source>` key is
//! rewritten to `<namespace>-<destination>` before the write. The rewrite
//! uses exact segment matching against the known namespace list, never a
//! raw substring replace, which could corrupt a key whose namespace
//! fragment happens to contain the identity string.
//!
//! Restore is last-write-wins: existing destination values are overwritten
//! unconditionally, and only key names are remapped, never merged. Writes
//! are applied incrementally, so a crash mid-merge leaves a partially
//! restored store; re-running the same import converges to the same state.

use log::{debug, info};

use crate::codec::{self, UserDataPayload};
use crate::envelope::BackupEnvelope;
use crate::error::Result;
use crate::store::{active_identity, DataDomain, IdentityProvider, KeyValueStore, RefreshNotifier};
use crate::validation;

/// Options for backup import.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Rewrite key ownership from the envelope's owner to the active
    /// identity (default: true)
    pub remap_to_current_identity: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            remap_to_current_identity: true,
        }
    }
}

/// Result of a backup import operation.
#[derive(Debug)]
pub struct ImportResult {
    /// Number of keys written to the store
    pub keys_restored: usize,
    /// Warnings encountered during the merge
    pub warnings: Vec<String>,
}

/// Importer for user data backups.
pub struct BackupImporter<'a> {
    store: &'a dyn KeyValueStore,
    identity: &'a dyn IdentityProvider,
    notifier: &'a dyn RefreshNotifier,
    options: ImportOptions,
}

impl<'a> BackupImporter<'a> {
    /// Create a new backup importer over the given collaborators.
    pub fn new(
        store: &'a dyn KeyValueStore,
        identity: &'a dyn IdentityProvider,
        notifier: &'a dyn RefreshNotifier,
    ) -> Self {
        Self {
            store,
            identity,
            notifier,
            options: ImportOptions::default(),
        }
    }

    /// Set import options.
    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    /// Import a backup file into the active identity's store.
    ///
    /// Validates inputs, parses and decrypts the envelope, merges the
    /// payload into the store, then broadcasts one refresh notification
    /// per data domain. Validation and decryption failures abort before
    /// any write happens.
    pub fn import(&self, file_contents: &str, password: &str) -> Result<ImportResult> {
        validation::validate_file_contents(file_contents)?;
        validation::validate_password(password)?;

        let envelope = BackupEnvelope::from_json(file_contents)?;
        let payload = envelope.decrypt(password)?;

        let destination = active_identity(self.identity);
        debug!(
            "importing {} keys from {} as {destination}",
            payload.len(),
            envelope.owner
        );

        let result = self.merge(&payload, &envelope.owner, &destination)?;

        // One-shot broadcast after all writes, not per-key
        for domain in DataDomain::ALL {
            self.notifier.notify(domain);
        }

        info!(
            "restored {} keys from backup of {}",
            result.keys_restored, envelope.owner
        );
        Ok(result)
    }

    /// Write the payload into the store, remapping ownership if enabled.
    fn merge(
        &self,
        payload: &UserDataPayload,
        source: &str,
        destination: &str,
    ) -> Result<ImportResult> {
        let mut result = ImportResult {
            keys_restored: 0,
            warnings: Vec::new(),
        };

        for (key, value) in payload {
            let target = if self.options.remap_to_current_identity {
                match remap_key(key, source, destination) {
                    Some(remapped) => remapped,
                    None => {
                        result
                            .warnings
                            .push(format!("key restored without remapping: {key}"));
                        key.clone()
                    }
                }
            } else {
                key.clone()
            };

            self.store.set(&target, value)?;
            result.keys_restored += 1;
        }

        Ok(result)
    }
}

/// Rewrite a key's ownership from `source` to `destination`.
///
/// Only a key that is exactly `<known-namespace>-<source>` is rewritten;
/// any other key is left for the caller to restore verbatim (`None`).
fn remap_key(key: &str, source: &str, destination: &str) -> Option<String> {
    match codec::split_scoped_key(key) {
        Some((namespace, identity)) if identity == source => {
            Some(codec::scoped_key(namespace, destination))
        }
        _ => None,
    }
}
