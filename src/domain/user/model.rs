use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub nick_name: String,
    pub password: String,
    pub avatar: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a fresh, not yet persisted user with a newly assigned id.
    pub fn new(nick_name: impl Into<String>, password: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            nick_name: nick_name.into(),
            password: password.into(),
            avatar: None,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Exact comparison against the stored password.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_gets_unique_id() {
        let a = User::new("alice", "p1");
        let b = User::new("alice", "p1");
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn test_builder_sets_profile_fields() {
        let user = User::new("bob", "pw")
            .with_avatar("https://cdn/bob.png")
            .with_description("hello");
        assert_eq!(user.avatar.as_deref(), Some("https://cdn/bob.png"));
        assert_eq!(user.description.as_deref(), Some("hello"));
    }

    #[test]
    fn test_password_matches_is_exact() {
        let user = User::new("carol", "Secret");
        assert!(user.password_matches("Secret"));
        assert!(!user.password_matches("secret"));
        assert!(!user.password_matches("Secret "));
    }
}
