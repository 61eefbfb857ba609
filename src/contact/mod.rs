//! Contact form: field reading, validation, submission and inline feedback.
//!
//! DESIGN
//! ======
//! Validation is a pure function over [`RawFields`] returning a typed
//! [`ValidationError`]; the submission itself goes through the [`Submitter`]
//! trait so the simulated delay can later be swapped for a real request.
//! Results are rendered as non-blocking inline status by [`feedback`].


pub mod feedback;
mod flow;
mod submit;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::ErrorCode;
use crate::consts;
use crate::contract::FormElements;
use crate::page::{NodeId, Page};

pub use flow::{FormOutcome, submit};
pub use submit::{Receipt, SimulatedSubmitter, SubmitError, Submitter};

// Browser whitespace includes the byte order mark, Unicode `\s` does not.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").expect("email pattern is valid")
});

// `+` is accepted anywhere in the number, not only as a leading prefix.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s\x{FEFF}+()-]{10,}$").expect("phone pattern is valid"));

/// A contact form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
}

impl Field {
    /// Element id of the field's control.
    #[must_use]
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Name => consts::NAME_FIELD_ID,
            Self::Email => consts::EMAIL_FIELD_ID,
            Self::Phone => consts::PHONE_FIELD_ID,
            Self::Message => consts::MESSAGE_FIELD_ID,
        }
    }

    /// The control for this field within `form`.
    #[must_use]
    pub fn node(self, form: &FormElements) -> NodeId {
        match self {
            Self::Name => form.name,
            Self::Email => form.email,
            Self::Phone => form.phone,
            Self::Message => form.message,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Field values exactly as read from the controls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Trimmed values that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

/// Why a submission was blocked before sending.
///
/// Display strings are the user-facing messages.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more required fields are blank after trimming.
    #[error("Please fill in all required fields.")]
    MissingRequired { fields: Vec<Field> },

    /// The email does not look like `local@domain.tld`.
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    /// The optional phone number is present but malformed.
    #[error("Please enter a valid phone number.")]
    InvalidPhone,
}

impl ValidationError {
    /// Every field responsible for the failure, in form order.
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        match self {
            Self::MissingRequired { fields } => fields.clone(),
            Self::InvalidEmail => vec![Field::Email],
            Self::InvalidPhone => vec![Field::Phone],
        }
    }

    /// The first failing field.
    #[must_use]
    pub fn field(&self) -> Field {
        match self {
            Self::MissingRequired { fields } => fields.first().copied().unwrap_or(Field::Name),
            Self::InvalidEmail => Field::Email,
            Self::InvalidPhone => Field::Phone,
        }
    }
}

impl ErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRequired { .. } => "E_MISSING_FIELD",
            Self::InvalidEmail => "E_INVALID_EMAIL",
            Self::InvalidPhone => "E_INVALID_PHONE",
        }
    }
}

/// Read the current control values.
#[must_use]
pub fn read_fields(page: &dyn Page, form: &FormElements) -> RawFields {
    RawFields {
        name: page.value(form.name),
        email: page.value(form.email),
        phone: page.value(form.phone),
        message: page.value(form.message),
    }
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// Trim the way form controls do, byte order mark included.
fn trim_input(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Check the fields in order: required, email shape, then optional phone.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate(raw: &RawFields) -> Result<ContactSubmission, ValidationError> {
    let name = trim_input(&raw.name);
    let email = trim_input(&raw.email);
    let phone = trim_input(&raw.phone);
    let message = trim_input(&raw.message);

    let missing: Vec<Field> = [(Field::Name, name), (Field::Email, email), (Field::Message, message)]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingRequired { fields: missing });
    }

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    if !phone.is_empty() && !is_valid_phone(phone) {
        return Err(ValidationError::InvalidPhone);
    }

    Ok(ContactSubmission {
        name: name.to_owned(),
        email: email.to_owned(),
        phone: (!phone.is_empty()).then(|| phone.to_owned()),
        message: message.to_owned(),
    })
}
