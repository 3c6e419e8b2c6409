use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{require, require_email, Validate, ValidationError};

/// Coarse role classification issued by the backend at login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub enum Role {
    #[serde(alias = "admin", alias = "ROLE_ADMIN")]
    Admin,
    #[serde(alias = "teacher", alias = "ROLE_TEACHER")]
    Teacher,
    #[serde(alias = "student", alias = "ROLE_STUDENT")]
    Student,
    #[serde(alias = "accountant", alias = "ROLE_ACCOUNTANT")]
    Accountant,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Teacher, Role::Student, Role::Accountant];

    /// Wire form stored in the legacy `role` storage key
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
            Role::Accountant => "ACCOUNTANT",
        }
    }

    /// Lower-case form used in route paths
    pub fn slug(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Accountant => "accountant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Teacher => write!(f, "Teacher"),
            Role::Student => write!(f, "Student"),
            Role::Accountant => write!(f, "Accountant"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        let normalized = normalized.strip_prefix("ROLE_").unwrap_or(&normalized);
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == normalized)
            .ok_or_else(|| format!("unknown role '{}'", s))
    }
}

/// The logged-in user as returned by the credential exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub role: Role,
    #[serde(default, alias = "fullName", alias = "displayName")]
    pub name: Option<String>,
}

impl Profile {
    /// Name shown in headers, falling back to the email
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// A platform account as listed by the admin user-management screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: i64,
    pub email: String,
    pub role: Role,
    #[serde(default, alias = "fullName")]
    pub name: Option<String>,
    #[serde(default = "default_active", alias = "enabled")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl UserAccount {
    pub fn status_display(&self) -> &'static str {
        if self.active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// Credential exchange request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), ValidationError> {
        require_email("email", &self.email)?;
        require("password", &self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("TEACHER".parse::<Role>().unwrap(), Role::Teacher);
        assert_eq!("ROLE_STUDENT".parse::<Role>().unwrap(), Role::Student);
        assert_eq!(" Accountant ".parse::<Role>().unwrap(), Role::Accountant);
        assert!("principal".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""ADMIN""#);
        let role: Role = serde_json::from_str(r#""student""#).unwrap();
        assert_eq!(role, Role::Student);
        let role: Role = serde_json::from_str(r#""ROLE_ACCOUNTANT""#).unwrap();
        assert_eq!(role, Role::Accountant);
    }

    #[test]
    fn test_profile_parse_and_display_name() {
        let json = r#"{"id": 7, "email": "jane@school.edu", "role": "TEACHER", "fullName": "Jane Doe"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.role, Role::Teacher);
        assert_eq!(profile.display_name(), "Jane Doe");

        let json = r#"{"id": 8, "email": "sam@school.edu", "role": "STUDENT"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.display_name(), "sam@school.edu");
    }

    #[test]
    fn test_user_account_active_flag() {
        let json = r#"[
            {"id": 1, "email": "a@school.edu", "role": "ADMIN", "active": false},
            {"id": 2, "email": "b@school.edu", "role": "STUDENT", "enabled": true},
            {"id": 3, "email": "c@school.edu", "role": "TEACHER"}
        ]"#;
        let users: Vec<UserAccount> = serde_json::from_str(json).unwrap();
        assert_eq!(users[0].status_display(), "Inactive");
        assert!(users[1].active);
        assert!(users[2].active);
    }

    #[test]
    fn test_login_form_validation() {
        assert!(LoginForm::new(" admin@school.edu ", "pw").validate().is_ok());
        assert_eq!(LoginForm::new("", "pw").validate().unwrap_err().field, "email");
        assert_eq!(LoginForm::new("admin", "pw").validate().unwrap_err().field, "email");
        assert_eq!(LoginForm::new("admin@school.edu", "").validate().unwrap_err().field, "password");
    }
}
