use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] shardnode_database::DatabaseError),

    #[error("failed to decode a stored record: {0}")]
    Decode(#[from] std::io::Error),

    #[error("genesis record not found")]
    GenesisNotFound,

    #[error("last closed block not found")]
    LastClosedBlockNotFound,
}
