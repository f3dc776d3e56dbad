//! # Payload Codec
//!
//! This module bridges between identity-scoped store keys and the flat
//! plaintext payload that gets encrypted into a backup.
//!
//! ## Key scheme
//!
//! Every backed-up key is `<namespace>-<identity>` where the namespace is
//! one of a fixed, enumerable set ([`NAMESPACES`]). Values are opaque
//! serialized blobs; the codec never inspects their internal structure.
//! That coupling belongs to the respective domain modules.
//!
//! ## Encoding
//!
//! The payload is a plain JSON object mapping key to value. A decrypted
//! blob that is not valid JSON is a fatal error for that import.

use std::collections::BTreeMap;

use crate::error::{BackupError, Result};
use crate::store::KeyValueStore;

/// The identity-scoped storage namespaces included in a backup.
pub const NAMESPACES: [&str; 7] = [
    "worldshards-history",
    "worldshards-preferences",
    "worldshards-equipment-session",
    "worldshards-equipment-history",
    "worldshards-equipment-builds",
    "worldshards-map-drops",
    "worldshards-form-state",
];

/// Mapping from storage key to opaque serialized value.
pub type UserDataPayload = BTreeMap<String, String>;

/// Build the store key for a namespace scoped to an identity.
pub fn scoped_key(namespace: &str, identity: &str) -> String {
    format!("{namespace}-{identity}")
}

/// Split a store key into `(namespace, identity)` parts.
///
/// Matches against the fixed namespace list with exact segment boundaries,
/// never raw substring search, so an identity that happens to collide with
/// a namespace fragment cannot confuse the split. Returns `None` for keys
/// outside the known namespaces.
pub fn split_scoped_key(key: &str) -> Option<(&'static str, &str)> {
    NAMESPACES.iter().find_map(|namespace| {
        key.strip_prefix(namespace)
            .and_then(|rest| rest.strip_prefix('-'))
            .map(|identity| (*namespace, identity))
    })
}

/// Collect the identity's data from the store into a payload.
///
/// Reads each templated key and includes only the keys actually present;
/// absent keys are omitted, not encoded as null or empty. Pure read, no
/// side effects.
pub fn collect_user_data(store: &dyn KeyValueStore, identity: &str) -> Result<UserDataPayload> {
    let mut payload = UserDataPayload::new();

    for namespace in NAMESPACES {
        let key = scoped_key(namespace, identity);
        if let Some(value) = store.get(&key)? {
            payload.insert(key, value);
        }
    }

    Ok(payload)
}

/// Serialize a payload to JSON bytes.
pub fn serialize(payload: &UserDataPayload) -> Result<Vec<u8>> {
    serde_json::to_vec(payload).map_err(|e| BackupError::Serialize(e.to_string()))
}

/// Parse a payload from JSON bytes.
pub fn parse(bytes: &[u8]) -> Result<UserDataPayload> {
    serde_json::from_slice(bytes).map_err(|e| BackupError::Deserialize(e.to_string()))
}
