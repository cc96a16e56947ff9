use oxo_common::OxoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Game(#[from] OxoError),

    #[error("failed to read config file: {0}")]
    ConfigRead(#[source] std::io::Error),

    #[error("failed to write config file: {0}")]
    ConfigWrite(#[source] std::io::Error),

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[source] serde_yaml_ng::Error),

    #[error("failed to deserialize config: {0}")]
    ConfigDeserialize(#[source] serde_yaml_ng::Error),

    #[error("config validation error: {0}")]
    InvalidConfig(String),

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
