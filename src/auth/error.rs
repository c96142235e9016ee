use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptError {
    #[error("jwt error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

pub type OAuthResult<T> = std::result::Result<T, OAuthError>;

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("oauth request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("oauth url error: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("oauth provider rejected the request: {0}")]
    ProviderRejected(String),
}
