//! Wire types shared by every other shardnode crate: transactions, blocks,
//! epoch blocks, accounts, per-shard transaction buckets, slashing proofs,
//! and the genesis record.

pub mod account;
pub mod block;
pub mod epoch_block;
pub mod genesis;
pub mod merkle;
pub mod primitives;
pub mod slashing;
pub mod transaction;
pub mod tx_bucket;

pub use account::{Account, RelativeAccount};
pub use block::{Block, BLOCK_HEADER_OVERHEAD, HASH_LEN};
pub use epoch_block::EpochBlock;
pub use genesis::{Genesis, GENESIS_KEY};
pub use primitives::{Addr64, Sig64};
pub use slashing::SlashingProof;
pub use transaction::{ConfigTx, ContractTx, FundsTx, StakeTx, Transaction};
pub use tx_bucket::TxBucket;
