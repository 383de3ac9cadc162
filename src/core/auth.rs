//! Mock credential check against the single demo account.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "password";
pub const DEMO_USER_NAME: &str = "デモユーザー";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct RegisterCredentials {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email address or password is incorrect")]
    InvalidCredentials,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Not logged in. Run `kakeibo login` first")]
    NotAuthenticated,
}

fn require(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::Required(field));
    }
    Ok(())
}

impl LoginCredentials {
    /// Checks the credentials and returns the demo user on success.
    pub fn authenticate(&self) -> Result<User, AuthError> {
        require(&self.email, "Email")?;
        require(&self.password, "Password")?;

        if self.email == DEMO_EMAIL && self.password == DEMO_PASSWORD {
            Ok(User {
                id: 1,
                email: self.email.clone(),
                name: DEMO_USER_NAME.to_string(),
            })
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

impl RegisterCredentials {
    pub fn validate(&self) -> Result<(), AuthError> {
        require(&self.name, "Name")?;
        require(&self.email, "Email")?;
        require(&self.password, "Password")?;

        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }

    /// The user record a successful registration produces.
    pub fn into_user(self, id: u64) -> User {
        User {
            id,
            email: self.email,
            name: self.name,
        }
    }
}
