//! Registration form fields and pre-submit validation.

use chrono::{DateTime, Days, Months, NaiveDate, Utc};

use super::backend::ProfileDocument;

/// Birthdate the picker starts from when none has been chosen yet.
pub fn default_birthdate() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Earliest birthdate the picker will go to.
pub fn min_birthdate() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Surname,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Surname,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "First Name",
            Self::Surname => "Last Name",
            Self::Email => "Email Address",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm Password",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "First Name",
            Self::Surname => "Last Name",
            Self::Email => "Enter your email",
            Self::Password => "Create password",
            Self::ConfirmPassword => "Confirm password",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }
}

/// One step of the birthdate picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStep {
    Days(i64),
    Months(i32),
    Years(i32),
}

/// Local validation failures. No backend call is made when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("Passwords do not match.")]
    PasswordMismatch,
}

impl ValidationError {
    /// Alert title shown with the message.
    pub fn title(&self) -> &'static str {
        match self {
            Self::MissingFields => "Missing Information",
            Self::PasswordMismatch => "Password Error",
        }
    }
}

/// Form contents as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub birthdate: Option<NaiveDate>,
    pub password_hidden: bool,
    pub confirm_hidden: bool,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            surname: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            birthdate: None,
            password_hidden: true,
            confirm_hidden: true,
        }
    }
}

impl RegistrationForm {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Surname => &self.surname,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Surname => &mut self.surname,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        }
    }

    pub fn is_hidden(&self, field: Field) -> bool {
        match field {
            Field::Password => self.password_hidden,
            Field::ConfirmPassword => self.confirm_hidden,
            _ => false,
        }
    }

    /// Flip visibility of a password field. Other fields are always visible.
    pub fn toggle_visibility(&mut self, field: Field) {
        match field {
            Field::Password => self.password_hidden = !self.password_hidden,
            Field::ConfirmPassword => self.confirm_hidden = !self.confirm_hidden,
            _ => {}
        }
    }

    /// Field text as it should be displayed, masked when hidden.
    pub fn display_value(&self, field: Field) -> String {
        let value = self.field(field);
        if self.is_hidden(field) {
            "•".repeat(value.chars().count())
        } else {
            value.to_string()
        }
    }

    /// Move the birthdate by `step`, starting from [`default_birthdate`] when
    /// none is set. The result stays between [`min_birthdate`] and `today`.
    pub fn adjust_birthdate(&mut self, step: DateStep, today: NaiveDate) {
        let current = self.birthdate.unwrap_or_else(default_birthdate);
        let moved = match step {
            DateStep::Days(n) if n >= 0 => current.checked_add_days(Days::new(n.unsigned_abs())),
            DateStep::Days(n) => current.checked_sub_days(Days::new(n.unsigned_abs())),
            DateStep::Months(n) if n >= 0 => {
                current.checked_add_months(Months::new(n.unsigned_abs()))
            }
            DateStep::Months(n) => current.checked_sub_months(Months::new(n.unsigned_abs())),
            DateStep::Years(n) if n >= 0 => {
                current.checked_add_months(Months::new(n.unsigned_abs().saturating_mul(12)))
            }
            DateStep::Years(n) => {
                current.checked_sub_months(Months::new(n.unsigned_abs().saturating_mul(12)))
            }
        };
        let lower = min_birthdate();
        let upper = today.max(lower);
        self.birthdate = Some(moved.unwrap_or(current).clamp(lower, upper));
    }

    /// Check required fields, then password confirmation.
    pub fn validate(&self) -> Result<ValidRegistration, ValidationError> {
        let any_empty = Field::ALL.iter().any(|f| self.field(*f).is_empty());
        let Some(birthdate) = self.birthdate.filter(|_| !any_empty) else {
            return Err(ValidationError::MissingFields);
        };

        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        Ok(ValidRegistration {
            name: self.name.clone(),
            surname: self.surname.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            birthdate,
        })
    }
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub birthdate: NaiveDate,
}

impl ValidRegistration {
    /// Profile document persisted for the new account.
    pub fn profile(&self, created_at: DateTime<Utc>) -> ProfileDocument {
        ProfileDocument {
            name: self.name.clone(),
            surname: self.surname.clone(),
            birthdate: self.birthdate,
            email: self.email.clone(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_adjustment_starts_from_default() {
        let mut form = RegistrationForm::default();
        form.adjust_birthdate(DateStep::Days(1), date(2026, 10, 18));
        assert_eq!(form.birthdate, Some(date(2000, 1, 2)));
    }

    #[test]
    fn birthdate_never_passes_today() {
        let today = date(2026, 10, 18);
        let mut form = RegistrationForm {
            birthdate: Some(date(2026, 10, 1)),
            ..Default::default()
        };
        form.adjust_birthdate(DateStep::Years(1), today);
        assert_eq!(form.birthdate, Some(today));
    }

    #[test]
    fn month_steps_clamp_day_of_month() {
        let mut form = RegistrationForm {
            birthdate: Some(date(2001, 1, 31)),
            ..Default::default()
        };
        form.adjust_birthdate(DateStep::Months(1), date(2026, 1, 1));
        assert_eq!(form.birthdate, Some(date(2001, 2, 28)));
    }

    #[test]
    fn secret_fields_are_masked_until_toggled() {
        let mut form = RegistrationForm {
            password: "hunter2".into(),
            ..Default::default()
        };
        assert_eq!(form.display_value(Field::Password), "•••••••");
        form.toggle_visibility(Field::Password);
        assert_eq!(form.display_value(Field::Password), "hunter2");
        assert!(form.is_hidden(Field::ConfirmPassword));
    }

    #[test]
    fn missing_birthdate_reports_missing_fields() {
        let form = RegistrationForm {
            name: "Ada".into(),
            surname: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
            confirm_password: "different".into(),
            ..Default::default()
        };
        // Missing fields are reported before a password mismatch
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));
    }
}
