use thiserror::Error;

/// A form field that failed client-side validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Checks run before a form is sent to the backend
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Minimum password length accepted for new accounts
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(field, "is required"))
    } else {
        Ok(())
    }
}

pub(crate) fn require_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;
    if is_valid_email(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new(field, "is not a valid email address"))
    }
}

pub(crate) fn require_password(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        Err(ValidationError::new(
            field,
            format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
        ))
    } else {
        Ok(())
    }
}

/// Loose email shape check: one `@`, non-empty local part, dotted domain.
pub fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
