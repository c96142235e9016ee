use crate::auth::OAuthProfile;
use crate::impl_paginatable_for;
use crate::model::repo::ResourceTyped;
use crate::web::AuthenticatedUser;
use crate::web::UserRole;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::model::{
    ModelManager,
    error::{DatabaseError, DatabaseResult},
    repo::CrudRepository,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct UserEntity {
    id: i32,
    github_username: String,
    github_id: i64,
    github_display_name: String,
    github_avatar: String,
    email: Option<String>,
    admin: bool,
    verified: bool,
    active: bool,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserEntityCreateUpdate {
    pub github_username: String,
    pub github_id: i64,
    pub github_display_name: String,
    pub github_avatar: String,
    pub email: Option<String>,
}

impl From<&OAuthProfile> for UserEntityCreateUpdate {
    fn from(profile: &OAuthProfile) -> Self {
        Self {
            github_username: profile.login.clone(),
            github_id: profile.github_id,
            github_display_name: profile.display_name().to_string(),
            github_avatar: profile.avatar_url.clone().unwrap_or_default(),
            email: profile.email.clone(),
        }
    }
}

/// Account switches flipped by administrators.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserFlags {
    pub admin: bool,
    pub verified: bool,
    pub active: bool,
}

impl ResourceTyped for UserEntity {
    fn get_resource_type() -> crate::model::repo::ResourceType {
        crate::model::repo::ResourceType::User
    }
}

impl UserEntity {
    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn github_username(&self) -> &str {
        &self.github_username
    }

    pub fn role(&self) -> UserRole {
        if self.admin {
            UserRole::Admin
        } else {
            UserRole::User
        }
    }

    pub fn flags(&self) -> UserFlags {
        UserFlags {
            admin: self.admin,
            verified: self.verified,
            active: self.active,
        }
    }

    pub fn to_authenticated(&self) -> AuthenticatedUser {
        AuthenticatedUser::new(self.id, self.role(), self.verified, self.active)
    }
}

#[async_trait]
impl CrudRepository<UserEntity, UserEntityCreateUpdate, i32> for UserEntity {
    /// Accounts are keyed by `github_id`: a second login refreshes the profile.
    /// Flags set by administrators are left untouched.
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: UserEntityCreateUpdate,
    ) -> DatabaseResult<Self> {
        let user = sqlx::query_as(
            r#"
            INSERT INTO users (github_username, github_id, github_display_name, github_avatar, email)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (github_id) DO UPDATE
            SET github_username = EXCLUDED.github_username,
                github_display_name = EXCLUDED.github_display_name,
                github_avatar = EXCLUDED.github_avatar,
                email = COALESCE(EXCLUDED.email, users.email)
            RETURNING *
            "#,
        )
        .bind(&data.github_username)
        .bind(data.github_id)
        .bind(&data.github_display_name)
        .bind(&data.github_avatar)
        .bind(&data.email)
        .fetch_one(mm.executor())
        .await?;

        Ok(user)
    }

    async fn update(
        self,
        mm: &ModelManager,
        actor: &AuthenticatedUser,
        data: UserEntityCreateUpdate,
    ) -> DatabaseResult<Self> {
        Self::create(mm, actor, data).await
    }

    /// Accounts are deactivated through [`UserEntity::set_flags`], never removed.
    async fn delete(self, _mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        Err(DatabaseError::Forbidden)
    }

    async fn find_by_id(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: i32,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }

    async fn list(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        limit: i64,
        offset: i64,
    ) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as("SELECT * FROM users ORDER BY id LIMIT $1 OFFSET $2")
            .bind(limit)
            .bind(offset)
            .fetch_all(mm.executor())
            .await?;
        Ok(result)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(mm.executor())
            .await?;

        Ok(result)
    }
}

impl_paginatable_for!(UserEntity, UserEntityCreateUpdate, i32);

impl UserEntity {
    pub async fn find_by_github_username(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        username: &str,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM users WHERE github_username = $1")
            .bind(username)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }

    pub async fn upsert_from_profile(
        mm: &ModelManager,
        actor: &AuthenticatedUser,
        profile: &OAuthProfile,
    ) -> DatabaseResult<Self> {
        Self::create(mm, actor, UserEntityCreateUpdate::from(profile)).await
    }

    pub async fn set_flags(
        mut self,
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        flags: UserFlags,
    ) -> DatabaseResult<Self> {
        sqlx::query("UPDATE users SET admin = $1, verified = $2, active = $3 WHERE id = $4")
            .bind(flags.admin)
            .bind(flags.verified)
            .bind(flags.active)
            .bind(self.id)
            .execute(mm.executor())
            .await?;

        self.admin = flags.admin;
        self.verified = flags.verified;
        self.active = flags.active;
        Ok(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::DbConnection;

    fn user(admin: bool) -> UserEntity {
        UserEntity {
            id: 5,
            github_username: String::from("octocat"),
            github_id: 583231,
            github_display_name: String::from("The Octocat"),
            github_avatar: String::new(),
            email: None,
            admin,
            verified: true,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn accounts_are_never_deleted() {
        let db = DbConnection::connect("postgres://textbook@127.0.0.1:1/textbook").unwrap();
        let mm = ModelManager::new(db);

        let result = user(false).delete(&mm, &AuthenticatedUser::admin()).await;
        assert!(matches!(result, Err(DatabaseError::Forbidden)));
    }

    #[test]
    fn admin_flag_maps_to_role() {
        let admin = user(true).to_authenticated();
        assert!(admin.is_admin());
        assert_eq!(admin.user_id(), 5);
        assert_eq!(user(false).role(), UserRole::User);
    }
}
