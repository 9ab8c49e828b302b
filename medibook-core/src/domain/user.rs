//! User domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user as stored under `medibook_user` / `medibook_users`
///
/// The password is kept in plaintext to stay compatible with the stored
/// layout. Never print or log it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    /// Birth date as entered (`YYYY-MM-DD`)
    pub dob: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether the given pair equals this user's stored credentials
    pub fn has_credentials(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }

    /// A copy without the secret, safe to print
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            dob: self.dob.clone(),
            created_at: self.created_at,
        }
    }
}

/// User data without the password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub dob: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> User {
        User {
            email: "ann@x.com".to_string(),
            password: "secret1".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            phone: "5551234567".to_string(),
            dob: "1990-01-01".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_stored_layout_is_camel_case() {
        let json = serde_json::to_value(ann()).unwrap();
        assert_eq!(json["firstName"], "Ann");
        assert_eq!(json["lastName"], "Lee");
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn test_reads_record_without_created_at() {
        let raw = r#"{"email":"ann@x.com","password":"secret1","firstName":"Ann",
                      "lastName":"Lee","phone":"5551234567","dob":"1990-01-01"}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user, ann());
    }

    #[test]
    fn test_has_credentials() {
        let user = ann();
        assert!(user.has_credentials("ann@x.com", "secret1"));
        assert!(!user.has_credentials("ann@x.com", "secret2"));
        assert!(!user.has_credentials("bob@x.com", "secret1"));
    }

    #[test]
    fn test_profile_drops_password() {
        let json = serde_json::to_string(&ann().profile()).unwrap();
        assert!(!json.contains("secret1"));
    }

    #[test]
    fn test_profile_full_name() {
        let mut user = ann();
        assert_eq!(user.profile().full_name(), "Ann Lee");

        user.last_name = "Lee-Park".to_string();
        assert_eq!(user.profile().full_name(), "Ann Lee-Park");
    }
}
