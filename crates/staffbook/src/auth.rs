//! Sign-in and sign-up.
//!
//! Registered users are kept as a JSON array under one key. Emails are
//! compared exactly as typed. Passwords are stored as Argon2id PHC strings;
//! values that are not PHC strings (left by older plaintext writers) are
//! compared as plain text.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DEFAULT_MIN_PASSWORD_LENGTH;
use crate::error::{Error, Result};
use crate::notice::Notice;
use crate::session::{Session, SessionStore};
use crate::storage::Storage;

/// Storage key holding the registered users.
pub const USERS_KEY: &str = "registeredUsers";

/// Why a sign-in or sign-up was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No email was given.
    #[error("Please enter your email address.")]
    EmailRequired,

    /// The email does not look like `local@domain`.
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    /// No password was given.
    #[error("Please enter your password.")]
    PasswordRequired,

    /// Sign-up password shorter than the configured minimum.
    #[error("Password must be at least {min} characters.")]
    PasswordTooShort {
        /// Minimum length in characters.
        min: usize,
    },

    /// Sign-up confirmation differs from the password.
    #[error("Please ensure both passwords are the same.")]
    PasswordMismatch,

    /// Sign-up email already registered.
    #[error("An account with this email already exists. Please log in.")]
    UserExists,

    /// Sign-in email not registered.
    #[error("No account found with this email. Please sign up first.")]
    UserNotFound,

    /// Sign-in password wrong.
    #[error("The password you entered is incorrect.")]
    IncorrectPassword,
}

impl AuthError {
    /// Headline for the failure notice.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::EmailRequired => "Email required",
            Self::InvalidEmail => "Invalid email",
            Self::PasswordRequired => "Password required",
            Self::PasswordTooShort { .. } => "Password too short",
            Self::PasswordMismatch => "Passwords don't match",
            Self::UserExists => "User already exists",
            Self::UserNotFound => "User not found",
            Self::IncorrectPassword => "Incorrect password",
        }
    }
}

/// Which form the user is filling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Existing account.
    #[default]
    SignIn,
    /// New account.
    SignUp,
}

impl AuthMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }
}

/// Notice shown after a successful sign-up.
pub const SIGNED_UP: Notice = Notice::new(
    "Account created!",
    "You have successfully registered and logged in.",
);

/// Notice shown after a successful sign-in.
pub const SIGNED_IN: Notice = Notice::new("Welcome back!", "You have successfully logged in.");

/// A stored credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    /// Email as typed at sign-up.
    pub email: String,
    /// Argon2id PHC string, or plain text for entries written before hashing.
    pub password: String,
}

/// Credential checks against the registered-user list.
#[derive(Debug, Clone, Copy)]
pub struct AuthService<'a> {
    storage: &'a Storage,
    min_password_length: usize,
}

impl<'a> AuthService<'a> {
    /// Create a service with the default minimum password length.
    #[must_use]
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }

    /// Override the minimum sign-up password length.
    #[must_use]
    pub fn with_min_password_length(mut self, min: usize) -> Self {
        self.min_password_length = min;
        self
    }

    /// All registered users.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage read fails or the stored list is not
    /// valid JSON.
    pub fn users(&self) -> Result<Vec<RegisteredUser>> {
        match self.storage.get_item(USERS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Register a new account and start a session for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] when the request is rejected; nothing is
    /// stored in that case. Storage and hashing failures propagate.
    pub fn sign_up(&self, email: &str, password: &str, confirm: &str) -> Result<Session> {
        check_required(email, password)?;

        if password.chars().count() < self.min_password_length {
            return Err(AuthError::PasswordTooShort {
                min: self.min_password_length,
            }
            .into());
        }
        if password != confirm {
            return Err(AuthError::PasswordMismatch.into());
        }

        let mut users = self.users()?;
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::UserExists.into());
        }

        users.push(RegisteredUser {
            email: email.to_string(),
            password: hash_password(password)?,
        });
        self.storage
            .set_item(USERS_KEY, &serde_json::to_string(&users)?)?;
        info!(email, "Registered new user");

        SessionStore::new(self.storage).begin(email)
    }

    /// Check credentials and start a session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] with [`AuthError::UserNotFound`] or
    /// [`AuthError::IncorrectPassword`] on a failed attempt.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        check_required(email, password)?;

        let users = self.users()?;
        let Some(user) = users.iter().find(|u| u.email == email) else {
            debug!(email, "Sign-in for unknown email");
            return Err(AuthError::UserNotFound.into());
        };

        if !verify_password(password, &user.password) {
            debug!(email, "Sign-in with wrong password");
            return Err(AuthError::IncorrectPassword.into());
        }

        SessionStore::new(self.storage).begin(email)
    }

    /// Run whichever flow `mode` selects. `confirm` is ignored for sign-in.
    ///
    /// # Errors
    ///
    /// See [`AuthService::sign_in`] and [`AuthService::sign_up`].
    pub fn submit(
        &self,
        mode: AuthMode,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<(Session, Notice)> {
        match mode {
            AuthMode::SignIn => Ok((self.sign_in(email, password)?, SIGNED_IN)),
            AuthMode::SignUp => Ok((self.sign_up(email, password, confirm)?, SIGNED_UP)),
        }
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+$").expect("email pattern is valid"))
}

fn check_required(email: &str, password: &str) -> std::result::Result<(), AuthError> {
    if email.is_empty() {
        return Err(AuthError::EmailRequired);
    }
    if !email_pattern().is_match(email) {
        return Err(AuthError::InvalidEmail);
    }
    if password.is_empty() {
        return Err(AuthError::PasswordRequired);
    }
    Ok(())
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| Error::PasswordHash)
}

fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => stored == password,
    }
}
