use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error(transparent)]
    Store(#[from] shardnode_store::StoreError),

    #[error("transaction sender has insufficient balance")]
    InsufficientBalance,

    #[error("transaction tx_cnt {got} does not follow account tx_cnt {expected}")]
    InvalidTxCnt { expected: u32, got: u32 },
}

#[derive(Debug, Error)]
pub enum SlashingError {
    #[error("latest block not found")]
    LatestBlockNotFound,

    #[error(transparent)]
    Store(#[from] shardnode_store::StoreError),
}
