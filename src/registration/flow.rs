//! Drives one registration attempt against the account backend.

use std::fmt;

use chrono::{NaiveDate, Utc};

use super::backend::{AccountBackend, AccountHandle, BackendError};
use super::form::{DateStep, Field, RegistrationForm, ValidRegistration};
use super::state::{RegistrationEvent, RegistrationState, transition};
use crate::navigation::{Navigator, Route};

/// Confirmation shown once every step succeeded.
pub const SUCCESS_MESSAGE: &str = "Registration successful. Please check your email to verify your account before logging in.";

/// Shown when a retry changes the password of an account that already exists.
pub const PASSWORD_CHANGED_MESSAGE: &str = "An account for this email was already created with the password you first entered. Enter that password again to finish registration.";

/// Status hint when Sign Up is pressed after a failure without any edit.
pub const EDIT_TO_RETRY_HINT: &str = "Edit the form to try again";

/// Severity of an [`Alert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Error,
}

/// A modal message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Backend steps of a registration, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStep {
    CreateAccount,
    PersistProfile,
    SendVerification,
    SignOut,
}

impl fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateAccount => "create-account",
            Self::PersistProfile => "persist-profile",
            Self::SendVerification => "send-verification",
            Self::SignOut => "sign-out",
        };
        f.write_str(name)
    }
}

struct StepFailure {
    step: RegistrationStep,
    error: BackendError,
    /// Account created before the failure, if any
    account: Option<AccountHandle>,
}

/// Account created by a failed attempt, with the credentials it was
/// created with.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingAccount {
    account: AccountHandle,
    password: String,
}

/// Sets the in-progress flag and clears it again when dropped.
struct InProgress<'a>(&'a mut bool);

impl<'a> InProgress<'a> {
    fn enter(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Registration screen logic: form, state machine and submission.
#[derive(Debug, Clone, Default)]
pub struct RegistrationFlow {
    form: RegistrationForm,
    state: RegistrationState,
    in_progress: bool,
    pending: Option<PendingAccount>,
    alert: Option<Alert>,
}

impl RegistrationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn state(&self) -> &RegistrationState {
        &self.state
    }

    /// Whether a submission is running. Submit is disabled while set.
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Account left behind by a failed attempt, reused by the next attempt
    /// with the same email and password.
    pub fn pending_account(&self) -> Option<&AccountHandle> {
        self.pending.as_ref().map(|pending| &pending.account)
    }

    /// Why pressing Sign Up would do nothing right now, if it would.
    pub fn submit_hint(&self) -> Option<&'static str> {
        match self.state {
            RegistrationState::Failed(_) if !self.in_progress => Some(EDIT_TO_RETRY_HINT),
            _ => None,
        }
    }

    /// Leave registration for the sign-in screen. Refused while a
    /// submission is running or after registration already navigated away.
    pub fn open_sign_in<N: Navigator + ?Sized>(&self, navigator: &mut N) -> bool {
        if self.in_progress || self.state.is_terminal() {
            return false;
        }
        tracing::info!("Leaving registration for sign-in");
        navigator.push(Route::SignIn);
        true
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) -> Option<Alert> {
        self.alert.take()
    }

    fn apply(&mut self, event: RegistrationEvent) {
        let next = transition(&self.state, event);
        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, "Registration state changed");
        }
        self.state = next;
    }

    /// Apply `edit` to the form if input is currently accepted.
    pub fn edit(&mut self, edit: impl FnOnce(&mut RegistrationForm)) -> bool {
        if self.in_progress || !self.state.accepts_input() {
            return false;
        }
        edit(&mut self.form);
        self.apply(RegistrationEvent::Edited);
        true
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        let value = value.into();
        self.edit(|form| *form.field_mut(field) = value)
    }

    pub fn toggle_visibility(&mut self, field: Field) -> bool {
        self.edit(|form| form.toggle_visibility(field))
    }

    pub fn set_birthdate(&mut self, date: NaiveDate) -> bool {
        self.edit(|form| form.birthdate = Some(date))
    }

    pub fn adjust_birthdate(&mut self, step: DateStep, today: NaiveDate) -> bool {
        self.edit(|form| form.adjust_birthdate(step, today))
    }

    /// Validate and, if valid, run create-account, persist-profile,
    /// send-verification and sign-out in order.
    ///
    /// Ignored unless the flow is in [`RegistrationState::Editing`]. Steps
    /// that already succeeded are not undone when a later one fails.
    pub fn submit<B, N>(&mut self, backend: &mut B, navigator: &mut N) -> &RegistrationState
    where
        B: AccountBackend + ?Sized,
        N: Navigator + ?Sized,
    {
        if self.in_progress || self.state != RegistrationState::Editing {
            tracing::debug!(state = ?self.state, "Submission ignored");
            return &self.state;
        }

        let registration = match self.form.validate() {
            Ok(registration) => registration,
            Err(err) => {
                tracing::info!(%err, "Registration rejected by validation");
                self.alert = Some(Alert::error(err.title(), err.to_string()));
                self.apply(RegistrationEvent::Submit(Err(err)));
                return &self.state;
            }
        };

        self.apply(RegistrationEvent::Submit(Ok(())));

        let resume = match self.pending.take() {
            Some(pending) if !pending.account.email.eq_ignore_ascii_case(&registration.email) => {
                tracing::warn!(
                    account_id = %pending.account.id,
                    "Email changed after a partial registration, leaving account incomplete"
                );
                None
            }
            Some(pending) if pending.password != registration.password => {
                // The existing account keeps the password it was created with
                tracing::warn!(
                    account_id = %pending.account.id,
                    "Password changed after a partial registration"
                );
                self.pending = Some(pending);
                self.alert = Some(Alert::error("Account Exists", PASSWORD_CHANGED_MESSAGE));
                self.apply(RegistrationEvent::BackendFailed(
                    PASSWORD_CHANGED_MESSAGE.to_string(),
                ));
                return &self.state;
            }
            pending => pending.map(|pending| pending.account),
        };

        let outcome = {
            let _busy = InProgress::enter(&mut self.in_progress);
            run_steps(backend, &registration, resume)
        };

        match outcome {
            Ok(()) => {
                tracing::info!("Registration complete");
                self.alert = Some(Alert::info("Email Verification", SUCCESS_MESSAGE));
                self.apply(RegistrationEvent::Completed);
                navigator.replace(Route::SignIn);
            }
            Err(failure) => {
                let message = failure.error.user_message();
                tracing::warn!(
                    step = %failure.step,
                    error = %failure.error,
                    account_created = failure.account.is_some(),
                    "Registration failed"
                );
                self.pending = failure.account.map(|account| PendingAccount {
                    account,
                    password: registration.password.clone(),
                });
                self.alert = Some(Alert::error("Error", message.clone()));
                self.apply(RegistrationEvent::BackendFailed(message));
            }
        }

        &self.state
    }
}

fn run_steps<B>(
    backend: &mut B,
    registration: &ValidRegistration,
    resume: Option<AccountHandle>,
) -> Result<(), StepFailure>
where
    B: AccountBackend + ?Sized,
{
    let account = match resume {
        Some(account) => {
            tracing::info!(account_id = %account.id, "Resuming with existing account");
            account
        }
        None => backend
            .create_account(&registration.email, &registration.password)
            .map_err(|error| StepFailure {
                step: RegistrationStep::CreateAccount,
                error,
                account: None,
            })?,
    };

    let failed = |step: RegistrationStep, error: BackendError| StepFailure {
        step,
        error,
        account: Some(account.clone()),
    };

    tracing::info!(account_id = %account.id, step = %RegistrationStep::PersistProfile);
    backend
        .persist_profile(&account.id, &registration.profile(Utc::now()))
        .map_err(|e| failed(RegistrationStep::PersistProfile, e))?;

    tracing::info!(account_id = %account.id, step = %RegistrationStep::SendVerification);
    backend
        .send_verification_email(&account)
        .map_err(|e| failed(RegistrationStep::SendVerification, e))?;

    tracing::info!(account_id = %account.id, step = %RegistrationStep::SignOut);
    backend
        .sign_out()
        .map_err(|e| failed(RegistrationStep::SignOut, e))?;

    Ok(())
}
