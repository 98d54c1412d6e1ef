use beserial::{Deserialize, Serialize};
use shardnode_hash::Hash32;

use crate::account::Account;
use crate::primitives::Addr64;

/// The network's bootstrapping record: the fixed validator set, the initial
/// account balances, and the block-size / epoch-length / slashing-window
/// parameters every node must agree on before it can validate anything.
///
/// Stored under the literal key `"genesis"` in the `genesis` bucket (§4.1);
/// there is exactly one of these per network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genesis {
    pub hash: Hash32,
    #[beserial(len_type(u16))]
    pub validators: Vec<Addr64>,
    #[beserial(len_type(u16))]
    pub accounts: Vec<Account>,
    pub block_size: u32,
    pub epoch_length: u32,
    pub slashing_window_size: u64,
    pub number_of_shards: u32,
}

/// The fixed storage key under which the single [`Genesis`] record lives.
pub const GENESIS_KEY: &str = "genesis";
