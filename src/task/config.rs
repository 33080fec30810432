//! Parser capabilities shared by every task of a list

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::grammar::scheme_of;

/// URI schemes that look like `key:value` tags but are not.
pub const DEFAULT_KEYVALUE_ALLOW: [&str; 5] = ["http", "https", "mailto", "ssh", "ftp"];

/// When `x` is followed by a completion date on output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionDatePolicy {
    /// Only write the completion date if a creation date is present too.
    /// A lone date after `x` would read back as a creation date in other
    /// todo.txt tools.
    #[default]
    RequireCreationDate,
    /// Write the completion date whenever it is set.
    Always,
}

/// Settings that change how lines are tokenized and written back.
///
/// Lists share one `TaskConfig` through an `Arc`; every task parsed by the
/// same parser sees the same allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskConfig {
    keyvalue_allow: BTreeSet<String>,
    pub completion_date: CompletionDatePolicy,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            keyvalue_allow: DEFAULT_KEYVALUE_ALLOW.iter().map(|s| s.to_string()).collect(),
            completion_date: CompletionDatePolicy::default(),
        }
    }
}

impl TaskConfig {
    /// Treat `scheme:...` words as plain text instead of attributes.
    pub fn allow_scheme(mut self, scheme: impl AsRef<str>) -> Self {
        self.keyvalue_allow.insert(scheme.as_ref().to_lowercase());
        self
    }

    pub fn with_completion_date(mut self, policy: CompletionDatePolicy) -> Self {
        self.completion_date = policy;
        self
    }

    pub fn keyvalue_allow(&self) -> impl Iterator<Item = &str> {
        self.keyvalue_allow.iter().map(String::as_str)
    }

    /// Whether `key` names an allow-listed scheme (case-insensitive).
    pub fn is_allowed_key(&self, key: &str) -> bool {
        self.keyvalue_allow.contains(&scheme_of(key).to_lowercase())
    }
}
