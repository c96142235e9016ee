use std::path::{Path, PathBuf};

use super::error::{ConfigError, ConfigResult};

const CONFIG_FILE: &str = "config.toml";

/// `$HOME/.config/textbook/config.toml` on unix, `%APPDATA%\textbook\config.toml` on windows.
fn user_config_path(base: &Path) -> PathBuf {
    let dir = if cfg!(windows) {
        base.to_path_buf()
    } else {
        base.join(".config")
    };
    dir.join(crate::APPLICATION_NAME).join(CONFIG_FILE)
}

pub fn find_config_file(use_local: bool) -> PathBuf {
    let local = PathBuf::from(".").join(CONFIG_FILE);
    if use_local {
        return local;
    }

    let base = if cfg!(windows) {
        std::env::var_os("APPDATA")
    } else {
        std::env::var_os("HOME")
    };

    base.map(|base| user_config_path(Path::new(&base)))
        .filter(|path| path.exists())
        .unwrap_or(local)
}

pub fn read_config(use_local: bool) -> ConfigResult<Vec<u8>> {
    read_config_file(&find_config_file(use_local))
}

pub fn read_config_file(filename: &Path) -> ConfigResult<Vec<u8>> {
    if !filename.exists() {
        tracing::trace!("no config at {}", filename.display());
        return Err(ConfigError::ConfigNotFound);
    }

    let filename = filename.canonicalize()?;
    tracing::debug!("using {} as configuration file", filename.display());
    Ok(std::fs::read(filename)?)
}
