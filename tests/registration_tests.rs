//! Tests for the registration flow against recording and failing backends.

use chrono::NaiveDate;
use pixstyle::navigation::{Navigator, Route};
use pixstyle::registration::{
    AccountBackend, AccountHandle, AlertKind, BackendError, DateStep, EDIT_TO_RETRY_HINT, Field,
    MemoryBackend, PASSWORD_CHANGED_MESSAGE, ProfileDocument, RegistrationFlow, RegistrationState,
    SUCCESS_MESSAGE,
};

/// Navigator that only records what it was asked to do.
#[derive(Debug, Default)]
struct RecordingNavigator {
    pushed: Vec<Route>,
    replaced: Vec<Route>,
    backs: usize,
}

impl Navigator for RecordingNavigator {
    fn push(&mut self, route: Route) {
        self.pushed.push(route);
    }

    fn back(&mut self) -> bool {
        self.backs += 1;
        true
    }

    fn replace(&mut self, route: Route) {
        self.replaced.push(route);
    }
}

/// Wraps a [`MemoryBackend`], records every call and fails chosen steps.
#[derive(Debug, Default)]
struct ScriptedBackend {
    inner: MemoryBackend,
    calls: Vec<&'static str>,
    passwords: Vec<String>,
    fail_persist: usize,
    fail_create: Option<BackendError>,
}

impl AccountBackend for ScriptedBackend {
    fn create_account(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<AccountHandle, BackendError> {
        self.calls.push("create_account");
        self.passwords.push(password.to_string());
        if let Some(err) = self.fail_create.take() {
            return Err(err);
        }
        self.inner.create_account(email, password)
    }

    fn persist_profile(
        &mut self,
        account_id: &str,
        profile: &ProfileDocument,
    ) -> Result<(), BackendError> {
        self.calls.push("persist_profile");
        if self.fail_persist > 0 {
            self.fail_persist -= 1;
            return Err(BackendError::Storage("quota exceeded".into()));
        }
        self.inner.persist_profile(account_id, profile)
    }

    fn send_verification_email(&mut self, account: &AccountHandle) -> Result<(), BackendError> {
        self.calls.push("send_verification_email");
        self.inner.send_verification_email(account)
    }

    fn sign_out(&mut self) -> Result<(), BackendError> {
        self.calls.push("sign_out");
        self.inner.sign_out()
    }
}

fn filled_flow() -> RegistrationFlow {
    let mut flow = RegistrationFlow::new();
    flow.set_field(Field::Name, "Ada");
    flow.set_field(Field::Surname, "Lovelace");
    flow.set_field(Field::Email, "ada@example.com");
    flow.set_field(Field::Password, "analytical");
    flow.set_field(Field::ConfirmPassword, "analytical");
    flow.set_birthdate(NaiveDate::from_ymd_opt(1990, 12, 10).unwrap());
    flow
}

#[test]
fn missing_fields_never_touch_the_backend() {
    let mut flow = RegistrationFlow::new();
    flow.set_field(Field::Name, "Ada");
    let mut backend = ScriptedBackend::default();
    let mut nav = RecordingNavigator::default();

    let state = flow.submit(&mut backend, &mut nav).clone();

    assert_eq!(state, RegistrationState::Editing);
    assert!(backend.calls.is_empty());
    let alert = flow.alert().unwrap();
    assert_eq!(alert.title, "Missing Information");
    assert_eq!(alert.message, "Please fill in all fields.");
}

#[test]
fn mismatched_passwords_never_touch_the_backend() {
    let mut flow = filled_flow();
    flow.set_field(Field::ConfirmPassword, "analytica1");
    let mut backend = ScriptedBackend::default();
    let mut nav = RecordingNavigator::default();

    flow.submit(&mut backend, &mut nav);

    assert!(backend.calls.is_empty());
    assert!(nav.replaced.is_empty());
    let alert = flow.alert().unwrap();
    assert_eq!(alert.kind, AlertKind::Error);
    assert_eq!(alert.title, "Password Error");
    assert_eq!(alert.message, "Passwords do not match.");
}

#[test]
fn successful_registration_runs_steps_in_order_and_navigates_once() {
    let mut flow = filled_flow();
    let mut backend = ScriptedBackend::default();
    let mut nav = RecordingNavigator::default();

    let state = flow.submit(&mut backend, &mut nav).clone();

    assert_eq!(state, RegistrationState::Success);
    assert_eq!(
        backend.calls,
        [
            "create_account",
            "persist_profile",
            "send_verification_email",
            "sign_out"
        ]
    );
    assert_eq!(nav.replaced, vec![Route::SignIn]);
    assert!(nav.pushed.is_empty());
    assert_eq!(nav.backs, 0);

    let alert = flow.alert().unwrap();
    assert_eq!(alert.kind, AlertKind::Info);
    assert_eq!(alert.message, SUCCESS_MESSAGE);
    assert!(!flow.is_in_progress());

    let account = backend.inner.account("ada@example.com").unwrap();
    let profile = backend.inner.profile(&account.id).unwrap();
    assert_eq!(profile.surname, "Lovelace");
    assert_eq!(backend.inner.verification_outbox(), ["ada@example.com"]);
    assert_eq!(backend.inner.session(), None);
}

#[test]
fn persist_failure_stops_before_verification() {
    let mut flow = filled_flow();
    let mut backend = ScriptedBackend {
        fail_persist: 1,
        ..Default::default()
    };
    let mut nav = RecordingNavigator::default();

    let state = flow.submit(&mut backend, &mut nav).clone();

    assert_eq!(
        state,
        RegistrationState::Failed("Your profile could not be saved. Please try again.".into())
    );
    assert_eq!(backend.calls, ["create_account", "persist_profile"]);
    assert!(backend.inner.verification_outbox().is_empty());
    assert!(nav.replaced.is_empty());

    // Not rolled back: the account exists and is still signed in
    let account = backend.inner.account("ada@example.com").unwrap();
    assert_eq!(backend.inner.session(), Some(account.id.as_str()));
    assert_eq!(flow.pending_account(), Some(account));
    assert!(!flow.is_in_progress());
    assert_eq!(flow.alert().unwrap().title, "Error");
}

#[test]
fn retry_after_partial_failure_resumes_without_creating_again() {
    let mut flow = filled_flow();
    let mut backend = ScriptedBackend {
        fail_persist: 1,
        ..Default::default()
    };
    let mut nav = RecordingNavigator::default();

    flow.submit(&mut backend, &mut nav);
    flow.dismiss_alert();

    // Failed only moves on after an edit
    flow.submit(&mut backend, &mut nav);
    assert_eq!(backend.calls.len(), 2);

    flow.toggle_visibility(Field::Password);
    assert_eq!(*flow.state(), RegistrationState::Editing);
    let state = flow.submit(&mut backend, &mut nav).clone();

    assert_eq!(state, RegistrationState::Success);
    assert_eq!(
        backend.calls[2..],
        ["persist_profile", "send_verification_email", "sign_out"]
    );
    assert_eq!(flow.pending_account(), None);
    assert_eq!(nav.replaced, vec![Route::SignIn]);
}

#[test]
fn retry_with_changed_password_does_not_finish_old_account() {
    let mut flow = filled_flow();
    let mut backend = ScriptedBackend {
        fail_persist: 1,
        ..Default::default()
    };
    let mut nav = RecordingNavigator::default();

    flow.submit(&mut backend, &mut nav);
    flow.set_field(Field::Password, "difference");
    flow.set_field(Field::ConfirmPassword, "difference");
    let state = flow.submit(&mut backend, &mut nav).clone();

    assert_eq!(
        state,
        RegistrationState::Failed(PASSWORD_CHANGED_MESSAGE.to_string())
    );
    assert_eq!(backend.calls, ["create_account", "persist_profile"]);
    assert!(nav.replaced.is_empty());
    assert!(flow.pending_account().is_some());
    assert_eq!(flow.alert().unwrap().title, "Account Exists");

    // Going back to the original password resumes the existing account
    flow.set_field(Field::Password, "analytical");
    flow.set_field(Field::ConfirmPassword, "analytical");
    let state = flow.submit(&mut backend, &mut nav).clone();

    assert_eq!(state, RegistrationState::Success);
    assert_eq!(backend.passwords, ["analytical"]);
    assert_eq!(
        backend.calls[2..],
        ["persist_profile", "send_verification_email", "sign_out"]
    );
}

#[test]
fn retry_with_changed_email_creates_a_new_account() {
    let mut flow = filled_flow();
    let mut backend = ScriptedBackend {
        fail_persist: 1,
        ..Default::default()
    };
    let mut nav = RecordingNavigator::default();

    flow.submit(&mut backend, &mut nav);
    flow.set_field(Field::Email, "countess@example.com");
    let state = flow.submit(&mut backend, &mut nav).clone();

    assert_eq!(state, RegistrationState::Success);
    assert_eq!(backend.calls[2], "create_account");
    assert!(backend.inner.account("ada@example.com").is_some());
    assert!(backend.inner.account("countess@example.com").is_some());
}

#[test]
fn create_failure_leaves_nothing_to_resume() {
    let mut flow = filled_flow();
    let mut backend = ScriptedBackend {
        fail_create: Some(BackendError::EmailAlreadyInUse("ada@example.com".into())),
        ..Default::default()
    };
    let mut nav = RecordingNavigator::default();

    let state = flow.submit(&mut backend, &mut nav).clone();

    assert_eq!(
        state,
        RegistrationState::Failed("This email address is already in use.".into())
    );
    assert_eq!(backend.calls, ["create_account"]);
    assert_eq!(flow.pending_account(), None);
}

#[test]
fn weak_password_is_reported_by_memory_backend() {
    let mut flow = filled_flow();
    flow.set_field(Field::Password, "abc");
    flow.set_field(Field::ConfirmPassword, "abc");
    let mut backend = MemoryBackend::new();
    let mut nav = RecordingNavigator::default();

    let state = flow.submit(&mut backend, &mut nav).clone();

    assert_eq!(
        state,
        RegistrationState::Failed(
            "The password is too weak. Use at least 6 characters.".into()
        )
    );
    assert!(backend.account("ada@example.com").is_none());
}

#[test]
fn success_ignores_further_edits_and_submits() {
    let mut flow = filled_flow();
    let mut backend = ScriptedBackend::default();
    let mut nav = RecordingNavigator::default();
    flow.submit(&mut backend, &mut nav);

    assert!(!flow.set_field(Field::Name, "Augusta"));
    assert_eq!(flow.form().name, "Ada");

    flow.submit(&mut backend, &mut nav);
    assert_eq!(backend.calls.len(), 4);
    assert_eq!(nav.replaced.len(), 1);
}

#[test]
fn submit_after_failure_hints_to_edit() {
    let mut flow = filled_flow();
    assert_eq!(flow.submit_hint(), None);

    let mut backend = ScriptedBackend {
        fail_persist: 1,
        ..Default::default()
    };
    let mut nav = RecordingNavigator::default();
    flow.submit(&mut backend, &mut nav);
    assert_eq!(flow.submit_hint(), Some(EDIT_TO_RETRY_HINT));

    flow.set_field(Field::Name, "Augusta");
    assert_eq!(flow.submit_hint(), None);
}

#[test]
fn sign_in_link_pushes_sign_in() {
    let flow = filled_flow();
    let mut nav = RecordingNavigator::default();

    assert!(flow.open_sign_in(&mut nav));
    assert_eq!(nav.pushed, vec![Route::SignIn]);
    assert!(nav.replaced.is_empty());
}

#[test]
fn sign_in_link_is_refused_after_success() {
    let mut flow = filled_flow();
    let mut backend = MemoryBackend::new();
    let mut nav = RecordingNavigator::default();
    flow.submit(&mut backend, &mut nav);

    assert!(!flow.open_sign_in(&mut nav));
    assert!(nav.pushed.is_empty());
}

#[test]
fn birthdate_adjustment_counts_as_an_edit() {
    let mut flow = RegistrationFlow::new();
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    assert!(flow.adjust_birthdate(DateStep::Years(-1), today));
    assert_eq!(
        flow.form().birthdate,
        NaiveDate::from_ymd_opt(1999, 1, 1)
    );
}

#[test]
fn flow_works_through_trait_objects() {
    let mut flow = filled_flow();
    let mut backend = MemoryBackend::new();
    let mut nav = RecordingNavigator::default();
    let backend: &mut dyn AccountBackend = &mut backend;
    let nav_dyn: &mut dyn Navigator = &mut nav;

    assert_eq!(
        *flow.submit(backend, nav_dyn),
        RegistrationState::Success
    );
    assert_eq!(nav.replaced, vec![Route::SignIn]);
}
