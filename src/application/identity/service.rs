//! User management service: application-layer orchestration
//!
//! All user-account business logic lives here. Upstream handlers are thin
//! wrappers that build a [`RequestContext`] and delegate to this service.

use std::sync::Arc;

use tracing::{error, info};

use super::error_mapping::{map_persistence_error, UserOperation};
use crate::domain::{
    UpdateUserInfoDto, User, UserChangeset, UserError, UserLookup, UserRepositoryInterface,
    UserResult,
};
use crate::shared::RequestContext;

/// User service, orchestrating all user-account use-cases.
///
/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer.
pub struct UserService<R: UserRepositoryInterface> {
    repo: Arc<R>,
}

impl<R: UserRepositoryInterface> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    // ── Save ────────────────────────────────────────────────────

    /// Insert the user or overwrite the stored record with the same id.
    pub async fn save(&self, ctx: &RequestContext, user: User) -> UserResult<User> {
        match self.repo.create_or_save(user).await {
            Ok(saved) => {
                info!(
                    request_id = %ctx.request_id,
                    user_id = %saved.id,
                    nick_name = %saved.nick_name,
                    "User has been saved"
                );
                Ok(saved)
            }
            Err(e) => {
                error!(request_id = %ctx.request_id, error = %e, "Save user failed");
                Err(map_persistence_error(UserOperation::Save, &e))
            }
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Get a single user by ID. A missing user is `Ok(None)`.
    pub async fn find_by_id(&self, ctx: &RequestContext, id: &str) -> UserResult<Option<User>> {
        self.find_one(ctx, UserLookup::Id(id)).await
    }

    /// Get a single user by nick name. A missing user is `Ok(None)`.
    pub async fn find_by_nick_name(
        &self,
        ctx: &RequestContext,
        nick_name: &str,
    ) -> UserResult<Option<User>> {
        self.find_one(ctx, UserLookup::NickName(nick_name)).await
    }

    async fn find_one(
        &self,
        ctx: &RequestContext,
        lookup: UserLookup<'_>,
    ) -> UserResult<Option<User>> {
        match self.repo.find_one(lookup).await {
            Ok(found) => {
                info!(
                    request_id = %ctx.request_id,
                    ?lookup,
                    found = found.is_some(),
                    "User lookup finished"
                );
                Ok(found)
            }
            Err(e) => {
                error!(request_id = %ctx.request_id, ?lookup, error = %e, "Find user failed");
                Err(map_persistence_error(UserOperation::Find, &e))
            }
        }
    }

    // ── Password verification ───────────────────────────────────

    pub async fn verify_password_by_user_id(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        password: &str,
    ) -> UserResult<()> {
        let user = self.find_by_id(ctx, user_id).await?;
        Self::check_password(ctx, user, password)
    }

    pub async fn verify_password_by_nick_name(
        &self,
        ctx: &RequestContext,
        nick_name: &str,
        password: &str,
    ) -> UserResult<()> {
        let user = self.find_by_nick_name(ctx, nick_name).await?;
        Self::check_password(ctx, user, password)
    }

    fn check_password(ctx: &RequestContext, user: Option<User>, password: &str) -> UserResult<()> {
        let Some(user) = user else {
            return Err(UserError::NoUserFound);
        };

        if !user.password_matches(password) {
            info!(request_id = %ctx.request_id, user_id = %user.id, "Password is not correct");
            return Err(UserError::PasswordMismatch);
        }

        Ok(())
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Unconditionally replace the password of `user_id`.
    pub async fn update_password(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        password: &str,
    ) -> UserResult<()> {
        if let Err(e) = self
            .repo
            .update_fields(user_id, UserChangeset::password(password))
            .await
        {
            error!(request_id = %ctx.request_id, user_id, error = %e, "Update user password failed");
            return Err(map_persistence_error(UserOperation::UpdatePassword, &e));
        }

        info!(request_id = %ctx.request_id, user_id, "User password updated");
        Ok(())
    }

    /// Update the supplied, non-empty profile fields of `user_id`.
    pub async fn update_info(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        dto: UpdateUserInfoDto,
    ) -> UserResult<()> {
        let changes = dto.into_changeset();
        if changes.is_empty() {
            info!(request_id = %ctx.request_id, user_id, "No user info to update");
            return Ok(());
        }

        if let Err(e) = self.repo.update_fields(user_id, changes.clone()).await {
            error!(request_id = %ctx.request_id, user_id, error = %e, "Update user info failed");
            return Err(map_persistence_error(UserOperation::UpdateInfo, &e));
        }

        info!(
            request_id = %ctx.request_id,
            user_id,
            nick_name = ?changes.nick_name,
            avatar = ?changes.avatar,
            description = ?changes.description,
            "User info updated"
        );
        Ok(())
    }
}
