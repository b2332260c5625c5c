//! Security settings inferred from the raw document.

use serde::{Deserialize, Serialize};

/// Permission set of a document without an encryption dictionary.
pub const DEFAULT_PERMISSIONS: [&str; 4] = ["print", "modify", "copy", "annotate"];

/// Permission set of an encrypted document.
pub const LIMITED_PERMISSIONS: [&str; 1] = ["limited"];

/// PDF security settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityInfo {
    pub is_encrypted: bool,
    pub has_user_password: bool,
    pub has_owner_password: bool,
    pub permissions: Vec<String>,
    pub encryption_level: String,
    /// Always false: the document was already opened without a password.
    pub is_password_needed: bool,
}

impl SecurityInfo {
    /// Security info for an unencrypted document.
    pub fn unencrypted() -> Self {
        Self {
            is_encrypted: false,
            has_user_password: false,
            has_owner_password: false,
            permissions: to_strings(&DEFAULT_PERMISSIONS),
            encryption_level: "None".to_string(),
            is_password_needed: false,
        }
    }

    /// Security info for an encrypted document with the given handler level.
    pub fn encrypted(level: impl Into<String>) -> Self {
        Self {
            is_encrypted: true,
            permissions: to_strings(&LIMITED_PERMISSIONS),
            encryption_level: level.into(),
            ..Self::unencrypted()
        }
    }
}

impl Default for SecurityInfo {
    fn default() -> Self {
        Self::unencrypted()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
