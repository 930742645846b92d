//! Loads API credentials from an env-style file.
//!
//! The file carries three `KEY=value` entries: `CLIENT_ID`, `API_TOKEN` and
//! `BASE_URL`. It is looked up in the working directory first, then under
//! `~/.config/fish/`, unless an explicit path is given on the command line.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError as Error;

pub const CREDENTIALS_FILE: &str = "credentials.env";

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub api_token: String,
    pub base_url: String,
}

impl Credentials {
    /// Load credentials from `path`, or from the default locations when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_file(&Self::locate()?),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let cfg = config::Config::builder()
            .add_source(config::File::new(
                &path.to_string_lossy(),
                config::FileFormat::Ini,
            ))
            .build()?;

        let credentials = cfg.try_deserialize::<Credentials>()?;

        Ok(credentials)
    }

    fn locate() -> Result<PathBuf, Error> {
        let local = PathBuf::from(CREDENTIALS_FILE);
        if local.exists() {
            return Ok(local);
        }

        if let Some(home) = dirs::home_dir() {
            let fallback = home.join(".config").join("fish").join(CREDENTIALS_FILE);
            if fallback.exists() {
                return Ok(fallback);
            }
        }

        Err(Error::CredentialsNotFound(CREDENTIALS_FILE.to_string()))
    }
}

// -- Tests ----------------------------------------------------------------------------
