use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

#[derive(Serialize, Deserialize, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Instructor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Instructor => "instructor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role `{}`", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "instructor" => Ok(Role::Instructor),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Signup payload posted to `/api/auth/signup`.
///
/// Field order is the wire order. The consent flag held by the form never
/// appears here.
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq, Eq)]
pub struct SignupFormData {
    #[validate(length(min = 1, max = 32, message = "Username must be 1 to 32 characters"))]
    pub username: String,
    #[validate(
        length(min = 1, max = 64, message = "Email must be 1 to 64 characters"),
        email(message = "Please enter a valid email address")
    )]
    pub email: String,
    #[validate(length(min = 1, max = 64, message = "Password must be 1 to 64 characters"))]
    pub password: String,
    pub role: Role,
}

/// A single failed constraint, in declaration order of the form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl SignupFormData {
    pub const FIELDS: [&'static str; 3] = ["username", "email", "password"];

    /// Validates the form and reports the first violated field.
    pub fn check(&self) -> Result<(), FieldViolation> {
        match self.validate() {
            Ok(()) => Ok(()),
            Err(errors) => Err(first_violation(&errors)),
        }
    }
}

fn first_violation(errors: &ValidationErrors) -> FieldViolation {
    let fields = errors.field_errors();

    for name in SignupFormData::FIELDS {
        let Some(errs) = fields.get(name) else {
            continue;
        };

        if let Some(err) = errs.first() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", name));

            return FieldViolation {
                field: name.to_string(),
                message,
            };
        }
    }

    FieldViolation {
        field: String::new(),
        message: errors.to_string(),
    }
}
