use serde::Deserialize;

/// Profile fields a caller may change through `update_info`.
///
/// Absent or empty fields are left untouched in the store, never cleared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserInfoDto {
    pub nick_name: Option<String>,
    pub avatar: Option<String>,
    pub description: Option<String>,
}

impl UpdateUserInfoDto {
    /// Build the persistence payload from the supplied, non-empty fields.
    pub fn into_changeset(self) -> UserChangeset {
        UserChangeset {
            nick_name: non_empty(self.nick_name),
            avatar: non_empty(self.avatar),
            description: non_empty(self.description),
            password: None,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Partial update payload handed to the repository.
///
/// `Some` means "write this value", `None` means "leave the column alone".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChangeset {
    pub nick_name: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
    pub description: Option<String>,
}

impl UserChangeset {
    pub fn password(password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nick_name.is_none()
            && self.password.is_none()
            && self.avatar.is_none()
            && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changeset_keeps_only_supplied_fields() {
        let dto = UpdateUserInfoDto {
            avatar: Some("x".into()),
            ..Default::default()
        };
        let changes = dto.into_changeset();
        assert_eq!(changes.avatar.as_deref(), Some("x"));
        assert!(changes.nick_name.is_none());
        assert!(changes.description.is_none());
        assert!(changes.password.is_none());
    }

    #[test]
    fn test_empty_strings_are_omitted() {
        let dto = UpdateUserInfoDto {
            nick_name: Some(String::new()),
            avatar: Some(String::new()),
            description: Some("about me".into()),
        };
        let changes = dto.into_changeset();
        assert!(changes.nick_name.is_none());
        assert!(changes.avatar.is_none());
        assert_eq!(changes.description.as_deref(), Some("about me"));
    }

    #[test]
    fn test_all_empty_gives_empty_changeset() {
        let dto = UpdateUserInfoDto {
            nick_name: Some(String::new()),
            ..Default::default()
        };
        assert!(dto.into_changeset().is_empty());
        assert!(!UserChangeset::password("pw").is_empty());
    }

    #[test]
    fn test_deserialize_partial_payload() {
        let dto: UpdateUserInfoDto = toml::from_str(r#"avatar = "a.png""#).unwrap();
        assert_eq!(dto.avatar.as_deref(), Some("a.png"));
        assert!(dto.nick_name.is_none());
    }
}
