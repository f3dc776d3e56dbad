//! # Format Tests
//!
//! Tests pinning the envelope wire format: field names, constants, and the
//! check ordering that rejects foreign files before any decryption work.

use profitshards_backup::*;
use serde_json::Value;

fn export_sample() -> String {
    let store = MemoryStore::new();
    store
        .set("worldshards-history-alice", "[{\"a\":1}]")
        .unwrap();
    let alice = StaticIdentity::signed_in("alice");
    BackupExporter::new(&store, &alice)
        .export("password")
        .unwrap()
        .contents
}

/// The exported file is a JSON object with exactly the documented fields.
#[test]
fn test_envelope_field_names() {
    let contents = export_sample();
    let value: Value = serde_json::from_str(&contents).unwrap();
    let object = value.as_object().unwrap();

    assert_eq!(object.len(), 6);
    for field in ["v", "app", "user", "salt", "iv", "ciphertext"] {
        assert!(object.contains_key(field), "missing field: {field}");
    }

    assert_eq!(object["v"], 1);
    assert_eq!(object["app"], "ProfitShards");
    assert_eq!(object["user"], "alice");
}

/// Binary fields decode to the documented sizes.
#[test]
fn test_envelope_field_sizes() {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    let contents = export_sample();
    let value: Value = serde_json::from_str(&contents).unwrap();

    let salt = STANDARD.decode(value["salt"].as_str().unwrap()).unwrap();
    let iv = STANDARD.decode(value["iv"].as_str().unwrap()).unwrap();
    let ciphertext = STANDARD
        .decode(value["ciphertext"].as_str().unwrap())
        .unwrap();

    assert_eq!(salt.len(), 16);
    assert_eq!(iv.len(), 12);
    // At minimum the 16-byte GCM tag, plus the encrypted JSON payload
    assert!(ciphertext.len() > 16);
}

/// Format constants are part of the file format and must not drift.
#[test]
fn test_format_constants() {
    assert_eq!(APP_ID, "ProfitShards");
    assert_eq!(ENVELOPE_VERSION, 1);
    assert_eq!(FILE_EXTENSION, "psbkp");
    assert_eq!(DEFAULT_FILE_NAME, "profitshards-backup.psbkp");
    assert_eq!(GUEST_IDENTITY, "guest");
}

/// The backed-up namespaces are a fixed, enumerable set.
#[test]
fn test_namespace_list() {
    assert_eq!(
        NAMESPACES,
        [
            "worldshards-history",
            "worldshards-preferences",
            "worldshards-equipment-session",
            "worldshards-equipment-history",
            "worldshards-equipment-builds",
            "worldshards-map-drops",
            "worldshards-form-state",
        ]
    );
}

/// A wrong app id is rejected before the ciphertext is even decoded: the
/// envelope below carries garbage base64, and the error is still the app
/// id mismatch.
#[test]
fn test_app_check_precedes_decryption() {
    let foreign = r#"{
  "v": 1,
  "app": "SomeOtherApp",
  "user": "alice",
  "salt": "!!not-base64!!",
  "iv": "!!not-base64!!",
  "ciphertext": "!!not-base64!!"
}"#;

    let result = BackupEnvelope::from_json(foreign);
    assert!(matches!(result, Err(BackupError::AppIdMismatch(_))));
}

/// Same ordering guarantee for the version check.
#[test]
fn test_version_check_precedes_decryption() {
    let future = r#"{
  "v": 99,
  "app": "ProfitShards",
  "user": "alice",
  "salt": "!!not-base64!!",
  "iv": "!!not-base64!!",
  "ciphertext": "!!not-base64!!"
}"#;

    let result = BackupEnvelope::from_json(future);
    assert!(matches!(result, Err(BackupError::UnsupportedVersion(99, 1))));
}

/// Missing fields make the file invalid, not decryptable-by-accident.
#[test]
fn test_missing_fields_rejected() {
    let incomplete = r#"{"v": 1, "app": "ProfitShards"}"#;
    let result = BackupEnvelope::from_json(incomplete);
    assert!(matches!(result, Err(BackupError::Format(_))));
}
