//! Registration form controller and its collaborators.

pub mod controller;
pub mod draft;
pub mod error;
pub mod notify;
pub mod transport;

pub use controller::{SignupController, SubmitState};
pub use draft::{FieldUpdate, RegistrationDraft, TextField, ToggleField};
pub use error::SignupError;
pub use notify::{LogNotifier, Notifier, RecordingNotifier, TerminalNotifier};
pub use transport::{HttpTransport, SignupResponse, SignupTransport, TransportError};
