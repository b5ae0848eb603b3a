//! Login / registration form state and validation.
//!
//! Validation rules:
//! - an entirely empty form never shows errors and submitting it does nothing
//! - the email must look like `local@domain.tld`
//! - in register mode the password must be at least eight characters
//!
//! Field errors, once shown, are re-checked on every keystroke in that field
//! and when focus leaves it.

use crate::domain::{LoginData, RegisterData};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex pattern"));

pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const SHORT_PASSWORD: &str = "Password must be at least 8 characters long";
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Login,
    Register,
}

impl FormMode {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }

    #[must_use]
    pub const fn toggle_hint(self) -> &'static str {
        match self {
            Self::Login => "Need an account? Register",
            Self::Register => "Already have an account? Login",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Password,
}

impl FormField {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Password => "Password",
        }
    }
}

/// A validated submission ready to be sent to the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Login(LoginData),
    Register(RegisterData),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFormState {
    pub mode: FormMode,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub focus: FormField,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
    /// Server or generic error from the last submission.
    pub error: Option<String>,
    pub submitting: bool,
}

impl Default for AuthFormState {
    fn default() -> Self {
        Self {
            mode: FormMode::Login,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password: String::new(),
            focus: FormField::Email,
            email_error: None,
            password_error: None,
            error: None,
            submitting: false,
        }
    }
}

impl AuthFormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields shown in the current mode, in tab order.
    #[must_use]
    pub fn fields(&self) -> &'static [FormField] {
        match self.mode {
            FormMode::Login => &[FormField::Email, FormField::Password],
            FormMode::Register => &[
                FormField::FirstName,
                FormField::LastName,
                FormField::Email,
                FormField::Password,
            ],
        }
    }

    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
        }
    }

    /// Switches between login and register, clearing every field and error.
    pub fn toggle_mode(&mut self) {
        let mode = match self.mode {
            FormMode::Login => FormMode::Register,
            FormMode::Register => FormMode::Login,
        };
        *self = Self {
            mode,
            focus: if mode == FormMode::Register { FormField::FirstName } else { FormField::Email },
            ..Self::default()
        };
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        let base = self.email.is_empty() && self.password.is_empty();
        match self.mode {
            FormMode::Login => base,
            FormMode::Register => base && self.first_name.is_empty() && self.last_name.is_empty(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let field = self.focus;
        self.value_mut(field).push(c);
        self.revalidate_on_input(field);
    }

    pub fn backspace(&mut self) {
        let field = self.focus;
        self.value_mut(field).pop();
        self.revalidate_on_input(field);
    }

    fn revalidate_on_input(&mut self, field: FormField) {
        if self.is_empty() {
            return;
        }
        match field {
            FormField::Email if self.email_error.is_some() => {
                self.validate_email();
            }
            FormField::Password if self.password_error.is_some() => {
                self.validate_password();
            }
            _ => {}
        }
    }

    /// Moves focus forward (or backward), validating the field being left.
    pub fn cycle_focus(&mut self, forward: bool) {
        self.blur(self.focus);
        let fields = self.fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (idx + 1) % fields.len()
        } else {
            (idx + fields.len() - 1) % fields.len()
        };
        self.focus = fields[next];
    }

    fn blur(&mut self, field: FormField) {
        if self.is_empty() {
            return;
        }
        match field {
            FormField::Email => {
                self.validate_email();
            }
            FormField::Password => {
                self.validate_password();
            }
            _ => {}
        }
    }

    /// Validates the email, updating `email_error`.
    pub fn validate_email(&mut self) -> bool {
        if self.is_empty() {
            self.email_error = None;
            return true;
        }
        let valid = EMAIL_REGEX.is_match(&self.email);
        self.email_error = (!valid).then(|| INVALID_EMAIL.to_string());
        valid
    }

    /// Validates the password, updating `password_error`. Always passes in login mode.
    pub fn validate_password(&mut self) -> bool {
        if self.mode == FormMode::Login || self.is_empty() {
            self.password_error = None;
            return true;
        }
        let valid = self.password.chars().count() >= MIN_PASSWORD_LEN;
        self.password_error = (!valid).then(|| SHORT_PASSWORD.to_string());
        valid
    }

    /// Validates and, if everything passes, marks the form as submitting.
    ///
    /// Returns `None` for an empty form, an invalid form, or while a previous
    /// submission is still outstanding.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.submitting {
            return None;
        }
        self.error = None;
        if self.is_empty() {
            return None;
        }

        let email_ok = self.validate_email();
        let password_ok = self.validate_password();
        if !email_ok || !password_ok {
            return None;
        }

        self.submitting = true;
        Some(match self.mode {
            FormMode::Login => Submission::Login(LoginData {
                email: self.email.clone(),
                password: self.password.clone(),
            }),
            FormMode::Register => Submission::Register(RegisterData {
                email: self.email.clone(),
                password: self.password.clone(),
                first_name: self.first_name.clone(),
                last_name: self.last_name.clone(),
            }),
        })
    }

    /// Records a failed submission. `None` shows the generic message.
    pub fn fail(&mut self, message: Option<String>) {
        self.submitting = false;
        self.error = Some(message.unwrap_or_else(|| GENERIC_FAILURE.to_string()));
    }

    /// Records a successful submission and resets the form.
    pub fn succeed(&mut self) {
        *self = Self {
            mode: self.mode,
            focus: self.fields()[0],
            ..Self::default()
        };
    }
}
