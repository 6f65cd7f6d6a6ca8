use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Maximum length of an owner key.
pub const MAX_OWNER_KEY_LEN: usize = 64;

/// Identifies the invitation an override record belongs to.
///
/// Lowercase ASCII letters, digits, `-` and `_`, 1 to 64 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerKey(String);

impl OwnerKey {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        if value.is_empty() {
            return Err(CoreError::Validation(
                "Owner key must not be empty".to_string(),
            ));
        }
        if value.len() > MAX_OWNER_KEY_LEN {
            return Err(CoreError::Validation(format!(
                "Owner key too long: {} chars (max {MAX_OWNER_KEY_LEN})",
                value.len()
            )));
        }
        if let Some(bad) = value
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
        {
            return Err(CoreError::Validation(format!(
                "Owner key contains invalid character '{bad}'"
            )));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OwnerKey {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OwnerKey> for String {
    fn from(key: OwnerKey) -> Self {
        key.0
    }
}
