/// User domain types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier, increasing with every insert
    pub id: i64,

    pub first_name: String,

    pub last_name: String,

    /// Not validated and not unique
    pub email: String,

    /// Avatar image URL
    pub avatar: Option<String>,

    /// Insertion timestamp
    pub created_at: DateTime<Utc>,
}

/// A user record that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl NewUser {
    /// Create a record without an avatar
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            avatar: None,
        }
    }

    /// Attach an avatar URL
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// Total number of stored users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCount {
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_user_json_shape() {
        let user = User {
            id: 7,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            avatar: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["first_name"], "Ada");
        assert!(json["avatar"].is_null());
        assert_eq!(json["created_at"], "2024-01-02T03:04:05Z");
    }

    #[test]
    fn test_count_json_shape() {
        let json = serde_json::to_string(&UserCount { total: 3 }).unwrap();
        assert_eq!(json, r#"{"total":3}"#);
    }
}
