//! Account registration: form, validation, state machine, backend steps.

pub mod backend;
pub mod flow;
pub mod form;
pub mod state;

pub use backend::{AccountBackend, AccountHandle, BackendError, MemoryBackend, ProfileDocument};
pub use flow::{
    Alert, AlertKind, EDIT_TO_RETRY_HINT, PASSWORD_CHANGED_MESSAGE, RegistrationFlow,
    RegistrationStep, SUCCESS_MESSAGE,
};
pub use form::{DateStep, Field, RegistrationForm, ValidRegistration, ValidationError};
pub use state::{RegistrationEvent, RegistrationState, transition};
