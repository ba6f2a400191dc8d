use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoexistError {
    #[error("generated terrain has no land (seed {0})")]
    NoLand(u64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoexistError>;
