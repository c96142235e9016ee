use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth::error::{OAuthError, OAuthResult};
use crate::config::Github;

/// Profile returned by the identity provider after a successful login.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OAuthProfile {
    #[serde(rename = "id")]
    pub github_id: i64,
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
}

impl OAuthProfile {
    /// Falls back to the login when the account has no display name.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.login,
        }
    }
}

#[async_trait]
pub trait IdentityProvider: std::fmt::Debug + Send + Sync {
    fn authorize_url(&self, state: &str) -> OAuthResult<Url>;
    async fn exchange_code(&self, code: &str) -> OAuthResult<OAuthProfile>;
}

pub fn authorize_url(config: &Github, state: &str) -> OAuthResult<Url> {
    let url = Url::parse_with_params(
        config.authorize_url(),
        &[
            ("client_id", config.client_id()),
            ("redirect_uri", config.redirect_uri()),
            ("scope", "user:email"),
            ("state", state),
        ],
    )?;
    Ok(url)
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    redirect_uri: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GithubProvider {
    client: reqwest::Client,
    config: Github,
}

impl GithubProvider {
    pub fn new(config: Github) -> OAuthResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(crate::APPLICATION_NAME)
            .build()?;
        Ok(Self { client, config })
    }

    async fn access_token(&self, code: &str) -> OAuthResult<String> {
        let body = TokenRequest {
            client_id: self.config.client_id(),
            client_secret: self.config.client_secret(),
            code,
            redirect_uri: self.config.redirect_uri(),
        };

        let resp: TokenResponse = self
            .client
            .post(self.config.token_url())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match resp.access_token {
            Some(token) => Ok(token),
            None => Err(OAuthError::ProviderRejected(
                resp.error_description
                    .or(resp.error)
                    .unwrap_or_else(|| String::from("no access token returned")),
            )),
        }
    }
}

#[async_trait]
impl IdentityProvider for GithubProvider {
    fn authorize_url(&self, state: &str) -> OAuthResult<Url> {
        authorize_url(&self.config, state)
    }

    #[tracing::instrument(skip(self, code))]
    async fn exchange_code(&self, code: &str) -> OAuthResult<OAuthProfile> {
        let token = self.access_token(code).await?;
        let url = format!("{}/user", self.config.api_url().trim_end_matches('/'));

        let profile: OAuthProfile = self
            .client
            .get(url)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!("github login for {}", profile.login);
        Ok(profile)
    }
}
