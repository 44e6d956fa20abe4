//! User data model.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Maximum accepted age, inclusive.
pub const MAX_AGE: u8 = 150;

/// Stable numeric user identifier assigned by the store.
///
/// Identifiers are positive and monotonic: the store hands out
/// `1 + max(existing ids)`, never reusing a removed id while a higher one
/// exists.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the underlying integer.
    pub const fn get(self) -> i64 {
        self.0
    }

    /// The identifier following this one.
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// One persisted user record.
///
/// Serialized camelCase; timestamps are RFC 3339 UTC. `id` and `created_at`
/// never change after creation, `updated_at` is refreshed on every
/// successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Case-insensitive email comparison used for uniqueness checks.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

/// Validated creation fields; produced by the validator, consumed by the
/// store. Strings are stored as submitted (trimming applies to validation
/// only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: u8,
}

/// Validated partial update fields. `None` means "leave untouched".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u8>,
}

/// Loosely typed create/update fields as received from a client.
///
/// Fields stay raw JSON values so the validator can distinguish a missing
/// field from a null, a wrong type, and an invalid value, and report each
/// with its own message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UserPayload {
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Value>,
    #[schema(value_type = Option<i64>)]
    #[serde(default, deserialize_with = "present")]
    pub age: Option<Value>,
}

/// Wrap any supplied value, including an explicit `null`, in `Some`.
///
/// The derived `Option<Value>` deserializer folds `null` into `None`,
/// which would make `{"age": null}` indistinguishable from an absent
/// field. Validation treats those differently.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Simple `local@domain.tld` shape check: no whitespace or extra `@` on
/// either side, at least one dot in the domain.
pub(crate) fn is_valid_email(email: &str) -> bool {
    let re = EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    });
    re.is_match(email)
}
