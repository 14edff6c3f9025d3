use std::cell::{Cell, RefCell};

use super::draft::{FieldUpdate, RegistrationDraft};
use super::error::{SignupError, SIGNUP_FAILED_MESSAGE};
use super::notify::Notifier;
use super::transport::SignupTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

/// Puts the controller back to idle when dropped.
struct Submitting<'a>(&'a Cell<SubmitState>);

impl<'a> Submitting<'a> {
    fn enter(state: &'a Cell<SubmitState>) -> Option<Self> {
        if state.get() == SubmitState::Submitting {
            return None;
        }

        state.set(SubmitState::Submitting);
        Some(Self(state))
    }
}

impl Drop for Submitting<'_> {
    fn drop(&mut self) {
        self.0.set(SubmitState::Idle);
    }
}

/// Drives the registration form: holds the draft, gates on consent and
/// reports the outcome of a submission.
pub struct SignupController<T, N> {
    transport: T,
    notifier: N,
    draft: RefCell<RegistrationDraft>,
    state: Cell<SubmitState>,
    on_sign_up: Option<Box<dyn Fn()>>,
}

impl<T, N> SignupController<T, N>
where
    T: SignupTransport,
    N: Notifier,
{
    pub fn new(transport: T, notifier: N) -> Self {
        Self {
            transport,
            notifier,
            draft: RefCell::new(RegistrationDraft::default()),
            state: Cell::new(SubmitState::Idle),
            on_sign_up: None,
        }
    }

    /// Called once for every accepted signup.
    pub fn on_sign_up(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_sign_up = Some(Box::new(callback));
        self
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn draft(&self) -> RegistrationDraft {
        self.draft.borrow().clone()
    }

    pub fn state(&self) -> SubmitState {
        self.state.get()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.get() == SubmitState::Submitting
    }

    pub fn update_field(&self, update: FieldUpdate) {
        self.draft.borrow_mut().apply(update);
    }

    /// Submits the current draft.
    pub async fn submit(&self) -> Result<(), SignupError> {
        let draft = self.draft();
        self.submit_draft(draft).await
    }

    pub async fn submit_draft(&self, draft: RegistrationDraft) -> Result<(), SignupError> {
        let result = self.attempt(draft).await;

        match &result {
            Ok(()) => {
                log::info!("signup accepted");
                if let Some(callback) = &self.on_sign_up {
                    callback();
                }
            }
            Err(err) if err.is_reported() => {
                log::debug!("signup failed: {:?}", err);
                self.notifier.error(&err.to_string());
            }
            Err(_) => log::debug!("signup ignored, another one is in flight"),
        }

        result
    }

    async fn attempt(&self, draft: RegistrationDraft) -> Result<(), SignupError> {
        if self.is_submitting() {
            return Err(SignupError::AlreadySubmitting);
        }

        if !draft.email_opt_in {
            return Err(SignupError::ConsentRequired);
        }

        let form = draft
            .to_form_data()
            .map_err(|e| SignupError::InvalidField {
                field: "role".to_string(),
                message: format!("Please choose a valid role ({})", e),
            })?;

        form.check().map_err(|v| SignupError::InvalidField {
            field: v.field,
            message: v.message,
        })?;

        let _guard = Submitting::enter(&self.state).ok_or(SignupError::AlreadySubmitting)?;

        log::debug!("submitting signup for {} as {}", form.username, form.role);

        let response = self
            .transport
            .send(&form)
            .await
            .map_err(SignupError::NetworkError)?;

        if !response.is_success() {
            return Err(SignupError::SignupRejected {
                status: response.status,
                message: response
                    .message()
                    .unwrap_or_else(|| SIGNUP_FAILED_MESSAGE.to_string()),
            });
        }

        Ok(())
    }
}
