//! Block preparation, mempool pruning, and slashing detection for one
//! shard validator, plus the [`node::Node`] context tying them together.

pub mod block_preparation;
pub mod error;
pub mod node;
pub mod parameters;
pub mod slashing;

pub use block_preparation::{add_tx, delete_transaction_from_mempool, prepare_block, ChainHead};
pub use error::{SlashingError, ValidatorError};
pub use node::Node;
pub use parameters::ActiveParameters;
pub use slashing::{is_in_same_chain, seek_slashing_proof, SlashingDictionary};
