mod jwt;
pub use jwt::{SESSION_TTL_DAYS, UserClaims, generate_token, issue_session_token, process_token};
mod error;
pub use error::{CryptError, OAuthError, OAuthResult};
mod github;
pub use github::{GithubProvider, IdentityProvider, OAuthProfile, authorize_url};
