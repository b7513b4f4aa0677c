use std::path::PathBuf;

use thiserror::Error;

/// Startup configuration problems. `MissingApiKey` is fatal: nothing can be
/// generated without a credential.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "API key not found! Set WAYFARER_API_KEY (or GOOGLE_API_KEY), or add API_KEY under [general] in {}.",
        .secrets_path.display()
    )]
    MissingApiKey { secrets_path: PathBuf },

    #[error("failed to read secrets file {}: {message}", .path.display())]
    SecretsFile { path: PathBuf, message: String },

    #[error("invalid value `{value}` for {name}")]
    InvalidSetting { name: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("request to model endpoint failed: {0}")]
    Transport(String),

    #[error("model endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("could not decode model response: {0}")]
    Decode(String),
}
