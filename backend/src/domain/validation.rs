//! Stateless validation rules gating user mutations.
//!
//! Both entry points are pure functions of the payload plus current store
//! state. Every applicable rule failure is collected in rule order, and a
//! passing payload is returned as a typed value so downstream code never
//! re-checks shapes.

use std::fmt;

use serde_json::Value;

use crate::domain::store::UserStore;
use crate::domain::user::{MAX_AGE, NewUser, UserId, UserPatch, UserPayload, is_valid_email};

/// One failed validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Creation payload lacked a usable name.
    NameRequired,
    /// Update payload carried an unusable name.
    NameInvalid,
    /// Creation payload lacked a usable email.
    EmailRequired,
    /// Update payload carried an unusable email.
    EmailInvalid,
    /// The email does not match the `local@domain.tld` shape.
    EmailMalformed,
    /// Another user already owns this email (case-insensitive).
    EmailTaken,
    /// Creation payload lacked an age.
    AgeRequired,
    /// The age is not a JSON integer.
    AgeNotInteger,
    /// The age falls outside the accepted range.
    AgeOutOfRange,
    /// The update target does not exist.
    UserNotFound,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameRequired => write!(f, "Name is required and must be a non-empty string"),
            Self::NameInvalid => write!(f, "Name must be a non-empty string"),
            Self::EmailRequired => write!(f, "Email is required and must be a non-empty string"),
            Self::EmailInvalid => write!(f, "Email must be a non-empty string"),
            Self::EmailMalformed => write!(f, "Email format is invalid"),
            Self::EmailTaken => write!(f, "Email already exists"),
            Self::AgeRequired => write!(f, "Age is required"),
            Self::AgeNotInteger => write!(f, "Age must be an integer"),
            Self::AgeOutOfRange => write!(f, "Age must be between 0 and {MAX_AGE}"),
            Self::UserNotFound => write!(f, "User not found"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Ordered list of every rule failure for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    /// The failures in rule order.
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    /// Human-readable messages in rule order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// True when the only failure is a missing target record.
    pub fn is_not_found(&self) -> bool {
        self.0 == [ValidationError::UserNotFound]
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Check creation fields and produce a typed [`NewUser`].
///
/// Independent rules run independently: a malformed email still lets the
/// age check run, so a single response itemizes every problem. Email
/// uniqueness is only checked once the shape is valid, and consults the
/// store case-insensitively.
pub fn validate_creation(
    store: &UserStore,
    payload: &UserPayload,
) -> Result<NewUser, ValidationErrors> {
    let mut errors = Vec::new();

    let name = non_empty_string(payload.name.as_ref());
    if name.is_none() {
        errors.push(ValidationError::NameRequired);
    }

    let email = checked_email(
        store,
        payload.email.as_ref(),
        None,
        ValidationError::EmailRequired,
        &mut errors,
    );

    let age = match payload.age.as_ref() {
        None | Some(Value::Null) => {
            errors.push(ValidationError::AgeRequired);
            None
        }
        Some(raw) => checked_age(raw, &mut errors),
    };

    match (name, email, age) {
        (Some(name), Some(email), Some(age)) => Ok(NewUser { name, email, age }),
        _ => Err(ValidationErrors::new(errors)),
    }
}

/// Check update fields for an existing record and produce a [`UserPatch`].
///
/// Resolves the target first: an unknown id is immediately invalid with a
/// single "not found" error and no field checks. Fields absent from the
/// payload are not validated and not touched. The email uniqueness check
/// excludes the target record itself, so a user may re-submit their own
/// unchanged email.
pub fn validate_update(
    store: &UserStore,
    id: UserId,
    payload: &UserPayload,
) -> Result<UserPatch, ValidationErrors> {
    if store.find_by_id(id).is_none() {
        return Err(ValidationErrors::new(vec![ValidationError::UserNotFound]));
    }

    let mut errors = Vec::new();
    let mut patch = UserPatch::default();

    if payload.name.is_some() {
        match non_empty_string(payload.name.as_ref()) {
            Some(name) => patch.name = Some(name),
            None => errors.push(ValidationError::NameInvalid),
        }
    }

    if payload.email.is_some() {
        patch.email = checked_email(
            store,
            payload.email.as_ref(),
            Some(id),
            ValidationError::EmailInvalid,
            &mut errors,
        );
    }

    if let Some(raw) = payload.age.as_ref() {
        patch.age = checked_age(raw, &mut errors);
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(ValidationErrors::new(errors))
    }
}

/// A JSON string that is non-empty after trimming; anything else is None.
fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

/// Shape, format, and uniqueness checks for an email field.
///
/// `exclude` names the record whose own email does not count as a
/// conflict. Later rules are skipped once an earlier one fails, matching
/// the per-field check order.
fn checked_email(
    store: &UserStore,
    value: Option<&Value>,
    exclude: Option<UserId>,
    missing: ValidationError,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    let Some(email) = non_empty_string(value) else {
        errors.push(missing);
        return None;
    };
    if !is_valid_email(&email) {
        errors.push(ValidationError::EmailMalformed);
        return None;
    }
    let taken = store
        .find_by_email(&email)
        .is_some_and(|existing| Some(existing.id) != exclude);
    if taken {
        errors.push(ValidationError::EmailTaken);
        return None;
    }
    Some(email)
}

/// Integer and range checks for a present age value.
///
/// A JSON number counts as an integer when its value has no fractional
/// part, so `30.0` and `1e20` both pass the integer check and only the
/// range check decides. Non-numbers and fractional numbers are integer
/// failures.
fn checked_age(raw: &Value, errors: &mut Vec<ValidationError>) -> Option<u8> {
    let Some(age) = raw.as_f64().filter(|n| n.fract() == 0.0) else {
        errors.push(ValidationError::AgeNotInteger);
        return None;
    };
    if (0.0..=f64::from(MAX_AGE)).contains(&age) {
        // No fractional part and within u8 range, so the cast is exact.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        return Some(age as u8);
    }
    errors.push(ValidationError::AgeOutOfRange);
    None
}
