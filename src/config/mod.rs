use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::const_new();

mod config_dir;
pub use config_dir::{find_config_file, read_config, read_config_file};

mod error;
pub use error::{ConfigError, ConfigResult};
use tokio::sync::OnceCell;

#[derive(Debug, Deserialize)]
pub struct Config {
    host: Host,
    app: App,
    github: Github,
}

#[derive(Debug, Deserialize)]
pub struct Host {
    bindto: String,
}

#[derive(Debug, Deserialize)]
pub struct App {
    jwt: String,
    database_uri: String,
    #[serde(default)]
    docs: bool,
}

/// OAuth application registered at the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct Github {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    #[serde(default = "default_authorize_url")]
    authorize_url: String,
    #[serde(default = "default_token_url")]
    token_url: String,
    #[serde(default = "default_api_url")]
    api_url: String,
}

fn default_authorize_url() -> String {
    String::from("https://github.com/login/oauth/authorize")
}

fn default_token_url() -> String {
    String::from("https://github.com/login/oauth/access_token")
}

fn default_api_url() -> String {
    String::from("https://api.github.com")
}

impl Config {
    #[tracing::instrument]
    pub async fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG
            .get_or_init(|| async {
                let read_cfg = |use_local| -> ConfigResult<Self> {
                    let bytes = read_config(use_local)?;
                    let config: Self = toml::from_slice(&bytes)?;
                    Ok(config)
                };

                match read_cfg(use_local) {
                    Ok(c) => c,
                    Err(e) => {
                        if matches!(e, error::ConfigError::ConfigNotFound) {
                            tracing::error!("Config not found.");
                        } else {
                            crate::error::log_error(&e);
                        }
                        std::process::exit(1);
                    }
                }
            })
            .await
    }

    #[inline]
    pub fn host(&self) -> &Host {
        &self.host
    }

    #[inline]
    pub fn app(&self) -> &App {
        &self.app
    }

    #[inline]
    pub fn github(&self) -> &Github {
        &self.github
    }
}

impl Host {
    #[inline]
    pub fn bindto(&self) -> &str {
        &self.bindto
    }
}

impl App {
    #[inline]
    pub fn jwt(&self) -> &str {
        &self.jwt
    }

    #[inline]
    pub fn database_uri(&self) -> &str {
        &self.database_uri
    }

    #[inline]
    pub fn docs(&self) -> bool {
        self.docs
    }
}

impl Github {
    pub fn new<S: Into<String>>(client_id: S, client_secret: S, redirect_uri: S) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            authorize_url: default_authorize_url(),
            token_url: default_token_url(),
            api_url: default_api_url(),
        }
    }

    #[inline]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[inline]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    #[inline]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    #[inline]
    pub fn authorize_url(&self) -> &str {
        &self.authorize_url
    }

    #[inline]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    #[inline]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}
