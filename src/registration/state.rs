//! Registration screen state machine.

use super::form::ValidationError;

/// Lifecycle of one registration screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegistrationState {
    #[default]
    Editing,
    /// Backend steps are running; input is disabled
    Submitting,
    /// Account created and verification sent; the screen is replaced
    Success,
    /// A backend step failed with this user-readable message
    Failed(String),
}

impl RegistrationState {
    /// Whether form edits are accepted.
    pub fn accepts_input(&self) -> bool {
        matches!(self, Self::Editing | Self::Failed(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Inputs to [`transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationEvent {
    /// A field, the birthdate or a toggle changed
    Edited,
    /// Submit pressed, with the outcome of local validation
    Submit(Result<(), ValidationError>),
    /// All backend steps succeeded
    Completed,
    /// A backend step failed
    BackendFailed(String),
}

/// Next state for `event` in `state`. Events that make no sense in the
/// current state leave it unchanged.
pub fn transition(state: &RegistrationState, event: RegistrationEvent) -> RegistrationState {
    use RegistrationEvent as E;
    use RegistrationState as S;

    match (state, event) {
        (S::Editing, E::Submit(Ok(()))) => S::Submitting,
        (S::Editing, E::Submit(Err(_))) => S::Editing,
        (S::Editing | S::Failed(_), E::Edited) => S::Editing,
        (S::Submitting, E::Completed) => S::Success,
        (S::Submitting, E::BackendFailed(message)) => S::Failed(message),
        (current, _) => current.clone(),
    }
}
