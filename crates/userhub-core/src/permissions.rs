//! Permission tokens and the stored permission-list codec.
//!
//! A user's permissions are an ordered list of free-form string tokens. They
//! are persisted in a single text column as a tagged, versioned JSON envelope:
//!
//! ```text
//! {"v":1,"permissions":["admin","events:write"]}
//! ```
//!
//! [`decode`] rejects anything that is not exactly that shape. Callers must
//! treat a decode failure as "no valid permissions" and never fall back to a
//! partially parsed value.
//!
//! # Example
//!
//! ```ignore
//! use userhub_core::permissions::{self, ADMIN};
//!
//! let blob = permissions::encode(&[ADMIN.to_string()]);
//! let decoded = permissions::decode(&blob)?;
//! assert!(permissions::has_permission(&decoded, ADMIN));
//! ```

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Token that grants permission-management rights.
pub const ADMIN: &str = "admin";

/// Token assigned to founders by the default configuration.
pub const FOUNDER: &str = "founder";

/// Version tag written by [`encode`].
pub const ENCODING_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionDecodeError {
    #[error("stored permissions are malformed: {0}")]
    Malformed(String),
    #[error("unsupported permission encoding version {0}")]
    UnsupportedVersion(u32),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    v: u32,
    permissions: Vec<String>,
}

pub fn encode(permissions: &[String]) -> String {
    json!({
        "v": ENCODING_VERSION,
        "permissions": permissions,
    })
    .to_string()
}

pub fn decode(blob: &str) -> Result<Vec<String>, PermissionDecodeError> {
    let envelope: Envelope = serde_json::from_str(blob)
        .map_err(|e| PermissionDecodeError::Malformed(e.to_string()))?;

    if envelope.v != ENCODING_VERSION {
        return Err(PermissionDecodeError::UnsupportedVersion(envelope.v));
    }

    Ok(envelope.permissions)
}

pub fn has_permission(permissions: &[String], token: &str) -> bool {
    permissions.iter().any(|p| p == token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_round_trip_preserves_order_and_duplicates() {
        let samples = [
            vec![],
            strings(&["admin"]),
            strings(&["b", "a", "b"]),
            strings(&["", "  spaced  ", "ünïcødé", "quote\"d", "back\\slash"]),
        ];

        for sample in samples {
            assert_eq!(decode(&encode(&sample)).unwrap(), sample);
        }
    }

    #[test]
    fn test_encode_is_tagged() {
        let blob = encode(&strings(&["admin"]));
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value["v"], 1);
        assert_eq!(value["permissions"][0], "admin");
    }

    #[test]
    fn test_decode_rejects_non_sequence_payloads() {
        let bad = [
            "",
            "admin",
            "[\"admin\"]",
            "{\"v\":1}",
            "{\"v\":1,\"permissions\":\"admin\"}",
            "{\"v\":1,\"permissions\":[\"admin\",3]}",
            "{\"v\":1,\"permissions\":{\"0\":\"admin\"}}",
            "{\"v\":1,\"permissions\":[],\"extra\":true}",
            "a:1:{i:0;s:5:\"admin\";}",
        ];

        for blob in bad {
            assert!(
                matches!(decode(blob), Err(PermissionDecodeError::Malformed(_))),
                "expected malformed for {blob:?}"
            );
        }
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        assert_eq!(
            decode("{\"v\":2,\"permissions\":[\"admin\"]}"),
            Err(PermissionDecodeError::UnsupportedVersion(2))
        );
    }

    #[test]
    fn test_has_permission_is_exact_match() {
        let perms = strings(&["admin:read", "Admin"]);
        assert!(!has_permission(&perms, ADMIN));
        assert!(has_permission(&strings(&["x", "admin"]), ADMIN));
    }
}
