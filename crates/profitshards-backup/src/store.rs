//! # Collaborator Seams
//!
//! Traits for the external collaborators the backup flow depends on: the
//! persistent key-value store, the current-identity provider, and the UI
//! refresh bus. The crate never manages their lifecycles; it only consumes
//! these narrow interfaces.
//!
//! [`MemoryStore`] is a volatile in-memory store. All data is lost when it
//! is dropped, so it is meant for guest sessions and the test framework,
//! not as a durable browser-storage replacement.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{BackupError, Result};

/// Identity used when no user is signed in.
pub const GUEST_IDENTITY: &str = "guest";

/// A persistent string key-value store.
///
/// Last-write-wins semantics are assumed; the backup flow is the only
/// writer during an import.
pub trait KeyValueStore {
    /// Read the value stored at `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` at `key`, overwriting any existing value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Source of the currently signed-in identity.
pub trait IdentityProvider {
    /// The active identity, or `None` for a guest session.
    fn current_identity(&self) -> Option<String>;
}

/// Resolve the active identity, falling back to [`GUEST_IDENTITY`].
pub fn active_identity(provider: &dyn IdentityProvider) -> String {
    provider
        .current_identity()
        .unwrap_or_else(|| GUEST_IDENTITY.to_string())
}

/// Logical data domains whose observers are told to refresh after a restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataDomain {
    History,
    EquipmentHistory,
    EquipmentBuilds,
    MapDrops,
}

impl DataDomain {
    /// Every domain, in broadcast order.
    pub const ALL: [DataDomain; 4] = [
        DataDomain::History,
        DataDomain::EquipmentHistory,
        DataDomain::EquipmentBuilds,
        DataDomain::MapDrops,
    ];

    /// The event name broadcast on the UI bus.
    pub fn event_name(self) -> &'static str {
        match self {
            DataDomain::History => "history-updated",
            DataDomain::EquipmentHistory => "equipment-history-updated",
            DataDomain::EquipmentBuilds => "equipment-builds-updated",
            DataDomain::MapDrops => "map-drops-updated",
        }
    }
}

/// Sink for post-restore refresh notifications.
///
/// Notifications carry no payload beyond the domain; the emitter does not
/// know or care who listens.
pub trait RefreshNotifier {
    fn notify(&self, domain: DataDomain);
}

/// In-memory key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore {
            inner: Default::default(),
        }
    }

    /// All keys currently present, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|inner| inner.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of keys currently present.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| BackupError::StoreRead("poisoned lock".to_string()))?;
        Ok(inner.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| BackupError::StoreWrite("poisoned lock".to_string()))?;
        inner.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Fixed identity provider, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Option<String>);

impl StaticIdentity {
    pub fn signed_in(identity: &str) -> StaticIdentity {
        StaticIdentity(Some(identity.to_string()))
    }

    pub fn guest() -> StaticIdentity {
        StaticIdentity(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_identity(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Notifier that records every broadcast domain, for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: RwLock<Vec<DataDomain>>,
}

impl RecordingNotifier {
    pub fn new() -> RecordingNotifier {
        RecordingNotifier {
            events: Default::default(),
        }
    }

    /// Domains notified so far, in emission order.
    pub fn events(&self) -> Vec<DataDomain> {
        self.events
            .read()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl RefreshNotifier for RecordingNotifier {
    fn notify(&self, domain: DataDomain) {
        if let Ok(mut events) = self.events.write() {
            events.push(domain);
        }
    }
}
