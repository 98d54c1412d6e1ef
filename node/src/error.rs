use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("failed to read config file {path}: {source}")]
    ReadConfig {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseConfig {
        path: std::path::PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid validator address {0:?}: expected 64 hex-encoded bytes")]
    InvalidAddress(String),

    #[error(transparent)]
    Store(#[from] shardnode_store::StoreError),

    #[error(transparent)]
    Validator(#[from] shardnode_validator::ValidatorError),
}
