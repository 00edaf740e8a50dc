use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use tracing::debug;

use crate::domain::{
    PersistenceError, PersistenceResult, UniqueField, User, UserChangeset, UserLookup,
    UserRepositoryInterface,
};
use crate::infrastructure::database::entities::user;
use crate::infrastructure::database::migrator::NICK_NAME_INDEX;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        nick_name: model.nick_name,
        password: model.password,
        avatar: model.avatar,
        description: model.description,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// The only unique columns on `users` are the primary key and `nick_name`.
/// SQLite names the column (`users.nick_name`); PostgreSQL and MySQL name
/// the index created by the migration.
fn unique_field(message: &str) -> UniqueField {
    if message.contains(NICK_NAME_INDEX) || message.contains("users.nick_name") {
        UniqueField::NickName
    } else {
        UniqueField::Id
    }
}

fn db_err(e: DbErr) -> PersistenceError {
    if let Some(SqlErr::UniqueConstraintViolation(message)) = e.sql_err() {
        return PersistenceError::UniqueViolation {
            field: unique_field(&message),
        };
    }
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => PersistenceError::Connection(e.to_string()),
        _ => PersistenceError::Query(e.to_string()),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_or_save(&self, user: User) -> PersistenceResult<User> {
        let existing = user::Entity::find_by_id(user.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let model = match existing {
            Some(existing) => {
                debug!(user_id = %user.id, "Overwriting existing user");
                let mut active: user::ActiveModel = existing.into();
                active.nick_name = Set(user.nick_name);
                active.password = Set(user.password);
                active.avatar = Set(user.avatar);
                active.description = Set(user.description);
                active.updated_at = Set(Utc::now());
                active.update(&self.db).await.map_err(db_err)?
            }
            None => {
                debug!(user_id = %user.id, "Inserting new user");
                let new_user = user::ActiveModel {
                    id: Set(user.id),
                    nick_name: Set(user.nick_name),
                    password: Set(user.password),
                    avatar: Set(user.avatar),
                    description: Set(user.description),
                    created_at: Set(user.created_at),
                    updated_at: Set(user.updated_at),
                };
                new_user.insert(&self.db).await.map_err(db_err)?
            }
        };

        Ok(user_model_to_domain(model))
    }

    async fn find_one(&self, lookup: UserLookup<'_>) -> PersistenceResult<Option<User>> {
        let query = match lookup {
            UserLookup::Id(id) => user::Entity::find_by_id(id),
            UserLookup::NickName(nick_name) => {
                user::Entity::find().filter(user::Column::NickName.eq(nick_name))
            }
        };

        let model = query.one(&self.db).await.map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn update_fields(&self, id: &str, changes: UserChangeset) -> PersistenceResult<()> {
        let mut active = user::ActiveModel {
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        if let Some(nick_name) = changes.nick_name {
            active.nick_name = Set(nick_name);
        }
        if let Some(password) = changes.password {
            active.password = Set(password);
        }
        if let Some(avatar) = changes.avatar {
            active.avatar = Set(Some(avatar));
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }

        let result = user::Entity::update_many()
            .set(active)
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        debug!(user_id = id, rows_affected = result.rows_affected, "User fields updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::infrastructure::database::migrator::Migrator;

    async fn setup() -> UserRepository {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        UserRepository::new(db)
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = setup().await;
        let saved = repo
            .create_or_save(User::new("alice", "p1").with_avatar("a.png"))
            .await
            .unwrap();

        let by_id = repo.find_one(UserLookup::Id(&saved.id)).await.unwrap().unwrap();
        assert_eq!(by_id.nick_name, "alice");
        assert_eq!(by_id.avatar.as_deref(), Some("a.png"));
        assert!(by_id.description.is_none());

        let by_nick = repo.find_one(UserLookup::NickName("alice")).await.unwrap().unwrap();
        assert_eq!(by_nick.id, saved.id);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = setup().await;
        assert!(repo.find_one(UserLookup::Id("missing")).await.unwrap().is_none());
        assert!(repo.find_one(UserLookup::NickName("nobody")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_nick_name_is_unique_violation() {
        let repo = setup().await;
        repo.create_or_save(User::new("alice", "p1")).await.unwrap();

        let err = repo
            .create_or_save(User::new("alice", "p2"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PersistenceError::UniqueViolation {
                field: UniqueField::NickName
            }
        );
    }

    #[tokio::test]
    async fn test_resave_updates_in_place() {
        let repo = setup().await;
        let first = repo.create_or_save(User::new("alice", "p1")).await.unwrap();

        let mut edited = first.clone();
        edited.description = Some("hello".to_string());
        let second = repo.create_or_save(edited).await.unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.description.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_update_fields_writes_only_supplied_columns() {
        let repo = setup().await;
        let saved = repo
            .create_or_save(User::new("alice", "p1").with_description("bio"))
            .await
            .unwrap();

        repo.update_fields(&saved.id, UserChangeset::password("p2"))
            .await
            .unwrap();

        let stored = repo.find_one(UserLookup::Id(&saved.id)).await.unwrap().unwrap();
        assert_eq!(stored.password, "p2");
        assert_eq!(stored.nick_name, "alice");
        assert_eq!(stored.description.as_deref(), Some("bio"));
    }

    #[tokio::test]
    async fn test_update_fields_nick_name_conflict() {
        let repo = setup().await;
        repo.create_or_save(User::new("alice", "p1")).await.unwrap();
        let bob = repo.create_or_save(User::new("bob", "p2")).await.unwrap();

        let changes = UserChangeset {
            nick_name: Some("alice".into()),
            ..Default::default()
        };
        let err = repo.update_fields(&bob.id, changes).await.unwrap_err();
        assert!(err.is_unique_violation_on(UniqueField::NickName));
    }

    #[tokio::test]
    async fn test_update_fields_unknown_id_is_noop() {
        let repo = setup().await;
        repo.update_fields("missing", UserChangeset::password("pw"))
            .await
            .unwrap();
    }

    #[test]
    fn test_unique_field_from_driver_message() {
        assert_eq!(
            unique_field("UNIQUE constraint failed: users.nick_name"),
            UniqueField::NickName
        );
        assert_eq!(
            unique_field(
                "duplicate key value violates unique constraint \"idx_users_nick_name\""
            ),
            UniqueField::NickName
        );
        assert_eq!(
            unique_field("Duplicate entry 'alice' for key 'users.idx_users_nick_name'"),
            UniqueField::NickName
        );
        assert_eq!(
            unique_field("UNIQUE constraint failed: users.id"),
            UniqueField::Id
        );
        assert_eq!(
            unique_field("duplicate key value violates unique constraint \"users_pkey\""),
            UniqueField::Id
        );
    }
}
