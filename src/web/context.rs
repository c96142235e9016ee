//! Request context, e.g. user id, its role, account state.
//!

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::web::{WebResult, error::WebError};

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    user_id: i32,
    user_role: UserRole,
    verified: bool,
    active: bool,
}

impl AuthenticatedUser {
    pub fn new(user_id: i32, user_role: UserRole, verified: bool, active: bool) -> Self {
        Self {
            user_id,
            user_role,
            verified,
            active,
        }
    }

    /// Internal actor for lookups done on behalf of the system (login, CLI).
    pub fn admin() -> Self {
        Self {
            user_role: UserRole::Admin,
            user_id: 0, // system actor, never a row in `users`
            verified: true,
            active: true,
        }
    }

    pub fn user_id(&self) -> i32 {
        self.user_id
    }

    pub fn user_role(&self) -> UserRole {
        self.user_role.clone()
    }

    pub fn is_admin(&self) -> bool {
        self.user_role == UserRole::Admin
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserRole {
    Admin,
    User,
}

#[derive(Debug, Clone)]
pub struct RequestContext {
    maybe_user: Option<AuthenticatedUser>,
}

impl RequestContext {
    pub fn new(maybe_user: Option<AuthenticatedUser>) -> Self {
        Self { maybe_user }
    }

    pub fn user(&self) -> WebResult<&AuthenticatedUser> {
        self.maybe_user.as_ref().ok_or(WebError::auth_required())
    }

    /// Signed in, verified and active: everything a learner needs.
    /// Admins skip the verification check but not the activity one.
    pub fn learner(&self) -> WebResult<&AuthenticatedUser> {
        let user = self.user()?;
        if !user.is_admin() && !user.is_verified() {
            return Err(WebError::account_unverified());
        }
        if !user.is_active() {
            return Err(WebError::account_inactive());
        }
        Ok(user)
    }

    pub fn admin_user(&self) -> WebResult<&AuthenticatedUser> {
        let user = self.user()?;
        if !user.is_active() {
            return Err(WebError::account_inactive());
        }
        if !user.is_admin() {
            return Err(WebError::admin_required());
        }
        Ok(user)
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts.extensions.get::<RequestContext>();
        if let Some(ctx) = ctx {
            Ok(ctx.clone())
        } else {
            Ok(RequestContext::new(None))
        }
    }
}
