use beserial::{Deserialize, Serialize};
use shardnode_hash::Hash32;

use crate::primitives::Addr64;

/// Header overhead (in bytes) counted against a block's size budget,
/// independent of how many transaction hashes it carries.
pub const BLOCK_HEADER_OVERHEAD: u32 = 10;

/// The size, in bytes, of one entry in any of a block's per-kind hash lists.
pub const HASH_LEN: u32 = 32;

/// An immutable (once sealed) block belonging to exactly one shard.
///
/// Transactions are not embedded in the block; only their content hashes
/// are, grouped by kind. This mirrors the source protocol, where a block is
/// a commitment to a set of already-known mempool entries rather than a
/// container for their full bodies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub hash: Hash32,
    pub prev_hash: Hash32,
    pub height: u32,
    pub beneficiary: Addr64,
    pub shard_id: u8,
    #[beserial(len_type(u16))]
    pub funds_tx_data: Vec<Hash32>,
    #[beserial(len_type(u16))]
    pub contract_tx_data: Vec<Hash32>,
    #[beserial(len_type(u16))]
    pub config_tx_data: Vec<Hash32>,
    #[beserial(len_type(u16))]
    pub stake_tx_data: Vec<Hash32>,
}

impl Block {
    /// Starts an open (unsealed) block extending `prev_hash` at `height`,
    /// with no transactions admitted yet. The final `hash` is filled in by
    /// the caller (a cryptographic collaborator, out of this crate's scope)
    /// once the block is sealed.
    pub fn open(prev_hash: Hash32, height: u32, beneficiary: Addr64) -> Self {
        Block {
            hash: Hash32::ZERO,
            prev_hash,
            height,
            beneficiary,
            shard_id: 0,
            funds_tx_data: Vec::new(),
            contract_tx_data: Vec::new(),
            config_tx_data: Vec::new(),
            stake_tx_data: Vec::new(),
        }
    }

    /// Current serialized footprint: header overhead plus one `HASH_LEN` per
    /// admitted transaction hash, across all four kinds.
    pub fn get_size(&self) -> u32 {
        let hash_count = self.funds_tx_data.len()
            + self.contract_tx_data.len()
            + self.config_tx_data.len()
            + self.stake_tx_data.len();
        BLOCK_HEADER_OVERHEAD + (hash_count as u32) * HASH_LEN
    }

    pub fn tx_count(&self) -> usize {
        self.funds_tx_data.len()
            + self.contract_tx_data.len()
            + self.config_tx_data.len()
            + self.stake_tx_data.len()
    }
}

impl shardnode_hash::Hash for Block {
    fn hash(&self) -> Hash32 {
        let mut buf = Vec::with_capacity(self.serialized_size());
        Serialize::serialize(self, &mut buf).expect("serializing to a Vec cannot fail");
        shardnode_hash::hash_bytes(&buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_size_grows_by_hash_len_per_entry() {
        let mut block = Block::open(Hash32::ZERO, 1, Addr64::zero());
        assert_eq!(block.get_size(), BLOCK_HEADER_OVERHEAD);
        block.funds_tx_data.push(Hash32::ZERO);
        assert_eq!(block.get_size(), BLOCK_HEADER_OVERHEAD + HASH_LEN);
        block.contract_tx_data.push(Hash32::ZERO);
        assert_eq!(block.get_size(), BLOCK_HEADER_OVERHEAD + HASH_LEN * 2);
    }

    #[test]
    fn tx_count_sums_all_four_lists() {
        let mut block = Block::open(Hash32::ZERO, 1, Addr64::zero());
        block.funds_tx_data.push(Hash32::ZERO);
        block.stake_tx_data.push(Hash32::ZERO);
        assert_eq!(block.tx_count(), 2);
    }
}
