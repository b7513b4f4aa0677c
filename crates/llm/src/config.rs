use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use wayfarer_core::ConfigError;

pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_SECRETS_PATH: &str = ".wayfarer/secrets.toml";

const API_KEY_VARS: [&str; 2] = ["WAYFARER_API_KEY", "GOOGLE_API_KEY"];

#[derive(Clone)]
pub struct ModelSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Option<Duration>,
}

impl std::fmt::Debug for ModelSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ModelSettings {
    /// Reads settings from the process environment and the secrets file.
    pub fn load(secrets_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_sources(|name| env::var(name).ok(), secrets_path)
    }

    pub fn from_sources(
        lookup: impl Fn(&str) -> Option<String>,
        secrets_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let secrets_path = secrets_path
            .map(Path::to_path_buf)
            .or_else(|| non_blank(lookup("WAYFARER_SECRETS_FILE")).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRETS_PATH));

        let from_env = API_KEY_VARS
            .iter()
            .find_map(|name| non_blank(lookup(name)));
        let api_key = match from_env {
            Some(key) => key,
            None => read_secrets_api_key(&secrets_path)?.ok_or(ConfigError::MissingApiKey {
                secrets_path: secrets_path.clone(),
            })?,
        };

        let model = non_blank(lookup("WAYFARER_MODEL")).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = non_blank(lookup("WAYFARER_GEMINI_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let request_timeout = match non_blank(lookup("WAYFARER_REQUEST_TIMEOUT_SECONDS")) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(seconds) if seconds > 0 => Some(Duration::from_secs(seconds)),
                _ => {
                    return Err(ConfigError::InvalidSetting {
                        name: "WAYFARER_REQUEST_TIMEOUT_SECONDS",
                        value: raw,
                    })
                }
            },
            None => None,
        };

        Ok(Self {
            api_key,
            model,
            base_url,
            request_timeout,
        })
    }
}

/// `API_KEY` may sit at the top level or under `[general]`. A missing file
/// is not an error; the caller reports the missing key instead.
fn read_secrets_api_key(path: &Path) -> Result<Option<String>, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::SecretsFile {
                path: path.to_path_buf(),
                message: err.to_string(),
            })
        }
    };

    let table = toml::from_str::<toml::Table>(&raw).map_err(|err| ConfigError::SecretsFile {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let key = table
        .get("API_KEY")
        .or_else(|| table.get("general").and_then(|general| general.get("API_KEY")))
        .and_then(|value| value.as_str())
        .map(ToString::to_string);

    Ok(non_blank(key))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
