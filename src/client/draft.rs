use crate::form::user::{Role, SignupFormData, UnknownRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Username,
    Email,
    Password,
    Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleField {
    EmailOptIn,
}

/// One edit coming from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Text { name: TextField, value: String },
    Toggle { name: ToggleField, value: bool },
}

impl FieldUpdate {
    pub fn text(name: TextField, value: impl Into<String>) -> Self {
        FieldUpdate::Text {
            name,
            value: value.into(),
        }
    }

    pub fn toggle(name: ToggleField, value: bool) -> Self {
        FieldUpdate::Toggle { name, value }
    }
}

/// Unsaved registration form state.
///
/// Values are held exactly as typed, so a draft may be invalid at any point
/// before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub email_opt_in: bool,
}

impl Default for RegistrationDraft {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            role: Role::default().as_str().to_string(),
            email_opt_in: false,
        }
    }
}

impl RegistrationDraft {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Text { name, value } => {
                let slot = match name {
                    TextField::Username => &mut self.username,
                    TextField::Email => &mut self.email,
                    TextField::Password => &mut self.password,
                    TextField::Role => &mut self.role,
                };
                *slot = value;
            }
            FieldUpdate::Toggle {
                name: ToggleField::EmailOptIn,
                value,
            } => self.email_opt_in = value,
        }
    }

    /// Builds the wire payload. Fails only when the role is not one of the
    /// known values; other constraints are checked on the payload.
    pub fn to_form_data(&self) -> Result<SignupFormData, UnknownRole> {
        Ok(SignupFormData {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            role: self.role.parse()?,
        })
    }
}
