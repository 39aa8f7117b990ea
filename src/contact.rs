use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Form control name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please fill in all fields.")]
    MissingField(ContactField),
    #[error("Please enter a valid email address.")]
    MalformedEmail,
}

impl ContactError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::MalformedEmail => "malformed_email",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        ContactField::ALL
            .iter()
            .all(|field| self.field(*field).is_empty())
    }

    /// Required fields first, then email shape. Stops at the first failure.
    pub fn validate(&self) -> Result<(), ContactError> {
        if let Some(missing) = ContactField::ALL
            .into_iter()
            .find(|field| self.field(*field).is_empty())
        {
            return Err(ContactError::MissingField(missing));
        }

        if !is_email_shaped(&self.email) {
            return Err(ContactError::MalformedEmail);
        }

        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub fn is_email_shaped(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

pub fn confirmation(name: &str) -> String {
    format!("Thank you, {name}! Your message has been received. I'll get back to you soon.")
}

/// Validates and, on success, clears the form and returns the confirmation.
/// A rejected submission is left untouched so the visitor can correct it.
pub fn submit(form: &mut ContactSubmission) -> Result<String, ContactError> {
    form.validate()?;
    let message = confirmation(&form.name);
    form.clear();
    Ok(message)
}

/// Inline status shown under the form after a submission attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormNotice {
    Rejected(ContactError),
    Accepted(String),
}

impl FormNotice {
    pub fn from_result(result: Result<String, ContactError>) -> Self {
        match result {
            Ok(message) => Self::Accepted(message),
            Err(error) => Self::Rejected(error),
        }
    }

    pub fn text(&self) -> String {
        match self {
            Self::Rejected(error) => error.to_string(),
            Self::Accepted(message) => message.clone(),
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Self::Rejected(_) => "form-status error",
            Self::Accepted(_) => "form-status success",
        }
    }
}
