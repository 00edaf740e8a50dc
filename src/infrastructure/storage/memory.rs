//! In-memory user repository

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    PersistenceError, PersistenceResult, UniqueField, User, UserChangeset, UserLookup,
    UserRepositoryInterface,
};

/// In-memory storage for development and testing.
///
/// Mirrors the database adapter's constraints: `id` is the key and
/// `nick_name` is unique across all records.
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
    /// nick_name -> owning user id
    nick_names: DashMap<String, String>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            nick_names: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Reserve `nick_name` for `user_id`, failing if another user holds it.
    fn claim_nick_name(&self, nick_name: &str, user_id: &str) -> PersistenceResult<()> {
        match self.nick_names.entry(nick_name.to_string()) {
            Entry::Occupied(owner) if owner.get() != user_id => {
                Err(PersistenceError::UniqueViolation {
                    field: UniqueField::NickName,
                })
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(user_id.to_string());
                Ok(())
            }
        }
    }

    fn release_nick_name(&self, nick_name: &str, user_id: &str) {
        self.nick_names.remove_if(nick_name, |_, owner| owner == user_id);
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryUserRepository {
    async fn create_or_save(&self, user: User) -> PersistenceResult<User> {
        self.claim_nick_name(&user.nick_name, &user.id)?;

        // Copy out what we need so the read guard is dropped before insert.
        let previous = self
            .users
            .get(&user.id)
            .map(|u| (u.created_at, u.nick_name.clone()));

        let saved = match previous {
            Some((created_at, old_nick_name)) => {
                if old_nick_name != user.nick_name {
                    self.release_nick_name(&old_nick_name, &user.id);
                }
                User {
                    created_at,
                    updated_at: Utc::now(),
                    ..user
                }
            }
            None => user,
        };

        self.users.insert(saved.id.clone(), saved.clone());
        Ok(saved)
    }

    async fn find_one(&self, lookup: UserLookup<'_>) -> PersistenceResult<Option<User>> {
        let id = match lookup {
            UserLookup::Id(id) => id.to_string(),
            UserLookup::NickName(nick_name) => match self.nick_names.get(nick_name) {
                Some(owner) => owner.value().clone(),
                None => return Ok(None),
            },
        };
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn update_fields(&self, id: &str, changes: UserChangeset) -> PersistenceResult<()> {
        let Some(mut user) = self.users.get_mut(id) else {
            return Ok(());
        };

        if let Some(nick_name) = changes.nick_name {
            if nick_name != user.nick_name {
                self.claim_nick_name(&nick_name, id)?;
                self.release_nick_name(&user.nick_name, id);
                user.nick_name = nick_name;
            }
        }
        if let Some(password) = changes.password {
            user.password = password;
        }
        if let Some(avatar) = changes.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(description) = changes.description {
            user.description = Some(description);
        }
        user.updated_at = Utc::now();

        Ok(())
    }
}
