use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use crate::{
    auth::{CryptError, OAuthError},
    error::log_error,
    model::{DatabaseError, ResourceType},
};

pub type WebResult<T> = std::result::Result<T, WebError>;

#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("AuthenticationRequired")]
    AuthenticationRequired,

    #[error("AuthenticationAccountUnverified")]
    AuthenticationAccountUnverified,

    #[error("AuthenticationAccountInactive")]
    AuthenticationAccountInactive,

    #[error("AuthenticationAdminRequired")]
    AuthenticationAdminRequired,

    #[error("AuthenticationStateMismatch")]
    AuthenticationStateMismatch,
}

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("ResourceNotFound: {resource_type}")]
    ResourceNotFound { resource_type: ResourceType },

    #[error("ResourceForbidden: {resource_type}")]
    ResourceForbidden { resource_type: ResourceType },

    #[error("ResourceFetchError: {resource_type}. Error: {error}")]
    ResourceFetchError {
        resource_type: ResourceType,
        error: DatabaseError,
    },

    #[error("ResourceBadRequest: {resource_type}. Details: {details}")]
    ResourceBadRequest {
        resource_type: ResourceType,
        details: String,
    },

    #[error("ResourceConflict: {resource_type}. Error: {error}")]
    ResourceConflict {
        resource_type: ResourceType,
        error: DatabaseError,
    },
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("ServerCryptError: {0}")]
    ServerCryptError(#[from] CryptError),
    #[error("ServerOAuthError: {0}")]
    ServerOAuthError(#[from] OAuthError),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ServerCryptError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServerOAuthError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::ServerCryptError(_) => String::from("Internal server error."),
            Self::ServerOAuthError(_) => String::from("Unable to sign in with GitHub."),
        }
    }
}

impl AuthenticationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            Self::AuthenticationAccountUnverified => StatusCode::FORBIDDEN,
            Self::AuthenticationAccountInactive => StatusCode::FORBIDDEN,
            Self::AuthenticationAdminRequired => StatusCode::FORBIDDEN,
            Self::AuthenticationStateMismatch => StatusCode::BAD_REQUEST,
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::AuthenticationRequired => {
                String::from("You need to sign in before continuing.")
            }
            Self::AuthenticationAccountUnverified => String::from("Please verify your account."),
            Self::AuthenticationAccountInactive => String::from("Your account is inactive."),
            Self::AuthenticationAdminRequired => {
                String::from("You do not have permission to view that page.")
            }
            Self::AuthenticationStateMismatch => {
                String::from("Authentication error, login request expired or was tampered with.")
            }
        }
    }
}

impl ResourceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            Self::ResourceForbidden { .. } => StatusCode::FORBIDDEN,
            Self::ResourceFetchError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ResourceBadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::ResourceConflict { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::ResourceNotFound { resource_type } => {
                format!("Resource error, {resource_type} not found.")
            }
            Self::ResourceForbidden { resource_type } => {
                format!("Resource error, {resource_type} belongs to someone else.")
            }
            Self::ResourceFetchError { resource_type, .. } => {
                format!("Resource error, unable to load {resource_type}.")
            }
            Self::ResourceBadRequest { details, .. } => {
                format!("Resource error, bad request: {details}")
            }
            Self::ResourceConflict { resource_type, .. } => {
                format!("Resource error, {resource_type} already exists.")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum WebError {
    #[error("ResourceError - {0}")]
    ResourceError(#[from] ResourceError),
    #[error("AuthenticationError - {0}")]
    AuthenticationError(#[from] AuthenticationError),
    #[error("ServerError - {0}")]
    ServerError(#[from] ServerError),
}

impl WebError {
    pub fn resource_not_found(r#type: ResourceType) -> Self {
        Self::ResourceError(ResourceError::ResourceNotFound {
            resource_type: r#type,
        })
    }

    pub fn resource_forbidden(r#type: ResourceType) -> Self {
        Self::ResourceError(ResourceError::ResourceForbidden {
            resource_type: r#type,
        })
    }

    pub fn resource_fetch_error(r#type: ResourceType, error: DatabaseError) -> Self {
        Self::ResourceError(ResourceError::ResourceFetchError {
            resource_type: r#type,
            error,
        })
    }

    pub fn resource_bad_request<S: Into<String>>(r#type: ResourceType, details: S) -> Self {
        Self::ResourceError(ResourceError::ResourceBadRequest {
            resource_type: r#type,
            details: details.into(),
        })
    }

    /// Sorts write failures into conflicts, dangling references and the rest.
    pub fn resource_write_error(r#type: ResourceType, error: DatabaseError) -> Self {
        if error.is_unique_violation() {
            Self::ResourceError(ResourceError::ResourceConflict {
                resource_type: r#type,
                error,
            })
        } else if error.is_foreign_key_violation() {
            Self::resource_bad_request(r#type, "referenced resource does not exist")
        } else if let DatabaseError::Forbidden = error {
            Self::resource_forbidden(r#type)
        } else {
            Self::resource_fetch_error(r#type, error)
        }
    }

    pub fn auth_required() -> Self {
        Self::AuthenticationError(AuthenticationError::AuthenticationRequired)
    }

    pub fn account_unverified() -> Self {
        Self::AuthenticationError(AuthenticationError::AuthenticationAccountUnverified)
    }

    pub fn account_inactive() -> Self {
        Self::AuthenticationError(AuthenticationError::AuthenticationAccountInactive)
    }

    pub fn admin_required() -> Self {
        Self::AuthenticationError(AuthenticationError::AuthenticationAdminRequired)
    }

    pub fn auth_state_mismatch() -> Self {
        Self::AuthenticationError(AuthenticationError::AuthenticationStateMismatch)
    }

    pub fn server_crypt_error(e: CryptError) -> Self {
        Self::ServerError(ServerError::ServerCryptError(e))
    }

    pub fn server_oauth_error(e: OAuthError) -> Self {
        Self::ServerError(ServerError::ServerOAuthError(e))
    }

    pub fn status_code(&self) -> axum::http::StatusCode {
        match self {
            Self::ResourceError(e) => e.status_code(),
            Self::AuthenticationError(e) => e.status_code(),
            Self::ServerError(e) => e.status_code(),
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::ResourceError(e) => e.client_display(),
            Self::AuthenticationError(e) => e.client_display(),
            Self::ServerError(e) => e.client_display(),
        }
    }
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message for the client
    pub message: String,
    /// HTTP status code (stringified)
    pub status_code: String,
    /// Optional debug details (only in debug mode)
    pub details: Option<String>,
}

impl IntoResponse for WebError {
    fn into_response(self) -> axum::response::Response {
        log_error(&self);

        let status_code = self.status_code();
        let display = self.client_display();

        let body = ErrorResponse {
            message: display,
            status_code: status_code.as_str().to_string(),
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        };

        (status_code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn write_error_classification() {
        let err = WebError::resource_write_error(ResourceType::Chapter, DatabaseError::Forbidden);
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let err = WebError::resource_write_error(
            ResourceType::Chapter,
            DatabaseError::from(sqlx::Error::RowNotFound),
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn messages_name_the_resource() {
        let err = WebError::resource_not_found(ResourceType::Message);
        assert_eq!(err.client_display(), "Resource error, comment not found.");

        let err = WebError::resource_forbidden(ResourceType::Message);
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert!(err.client_display().contains("comment"));
    }

    #[test]
    fn bad_request_mentions_details() {
        let err = WebError::resource_bad_request(ResourceType::Message, "content is empty");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.client_display().contains("content is empty"));
    }
}
