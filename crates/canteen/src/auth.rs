//! # Authentication
//!
//! A fixed credential directory. Passwords are compared as given; there is no hashing and no
//! account creation, the directory is what the canteen ships with.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// The logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

impl Credential {
    fn new(email: &str, password: &str, name: &str, role: Role) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            role,
        }
    }

    pub fn session(&self) -> Session {
        Session {
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CredentialDirectory {
    credentials: Vec<Credential>,
}

impl CredentialDirectory {
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self { credentials }
    }

    /// The canteen's built-in accounts.
    pub fn canteen() -> Self {
        Self::new(vec![
            Credential::new("gaiussegun37@gmail.com", "gesundheit.555", "Gaius", Role::User),
            Credential::new("walker123@gmail.com", "test123", "Walker", Role::User),
            Credential::new("marydoe@gmail.com", "pass456", "Mary Doe", Role::User),
            Credential::new("admin@foodcourt.com", "admin123", "Food Court Admin", Role::Admin),
        ])
    }

    /// Email match ignores case and surrounding whitespace; the password must match exactly.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&Credential> {
        let email = email.trim();
        self.credentials
            .iter()
            .find(|c| c.email.eq_ignore_ascii_case(email) && c.password == password)
    }

    pub fn find(&self, email: &str) -> Option<&Credential> {
        self.credentials
            .iter()
            .find(|c| c.email.eq_ignore_ascii_case(email.trim()))
    }
}

impl Default for CredentialDirectory {
    fn default() -> Self {
        Self::canteen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticate_checks_password() {
        let directory = CredentialDirectory::canteen();
        let credential = directory
            .authenticate(" Walker123@gmail.com ", "test123")
            .unwrap();
        assert_eq!(credential.role, Role::User);
        assert_eq!(credential.session().email, "walker123@gmail.com");

        assert!(directory.authenticate("walker123@gmail.com", "TEST123").is_none());
        assert!(directory.authenticate("nobody@gmail.com", "test123").is_none());
    }

    #[test]
    fn role_parses_from_its_stored_form() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("Admin".parse::<Role>().is_err());
        assert_eq!(Role::User.to_string(), "user");
    }
}
