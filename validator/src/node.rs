use shardnode_mempool::Mempool;
use shardnode_protocol::{Addr64, Block};
use shardnode_shard::{NumberOfShards, ShardId, ValidatorShardMap};
use shardnode_store::Store;

use crate::block_preparation::{self, ChainHead};
use crate::error::{SlashingError, ValidatorError};
use crate::parameters::ActiveParameters;
use crate::slashing::{self, SlashingDictionary};

/// Owns every piece of per-validator mutable state the source protocol
/// scatters across package-level globals: the store handle, the mempool,
/// shard parameters, this node's own address, and the slashing
/// dictionary. Every public entry point is a method on `Node`, so callers
/// never reach for ambient state directly.
pub struct Node {
    pub store: Store,
    pub mempool: Mempool,
    pub validator_address: Addr64,
    pub shards: NumberOfShards,
    pub validator_shard_map: ValidatorShardMap,
    pub params: ActiveParameters,
    slashing_dict: SlashingDictionary,
}

impl Node {
    pub fn new(
        store: Store,
        validator_address: Addr64,
        shards: NumberOfShards,
        validator_shard_map: ValidatorShardMap,
        params: ActiveParameters,
    ) -> Self {
        Node {
            store,
            mempool: Mempool::new(),
            validator_address,
            shards,
            validator_shard_map,
            params,
            slashing_dict: SlashingDictionary::new(),
        }
    }

    fn my_shard(&self) -> ShardId {
        self.validator_shard_map
            .shard_of(&self.validator_address)
            .unwrap_or(1)
    }

    /// Builds a candidate block for this node's shard out of the current
    /// mempool snapshot.
    pub fn prepare_block(&self) -> Result<Block, ValidatorError> {
        let last_block = self
            .store
            .read_last_closed_block()?
            .unwrap_or_else(|| Block::open(shardnode_hash::Hash32::ZERO, 0, self.validator_address));
        let last_epoch_block_height = self
            .store
            .read_last_closed_epoch_block()?
            .map(|eb| eb.height)
            .unwrap_or(0);

        let chain_head = ChainHead {
            last_block_height: last_block.height,
            last_block_hash: last_block.hash,
            last_epoch_block_height,
        };

        Ok(block_preparation::prepare_block(
            &self.mempool,
            &chain_head,
            &self.params,
            self.shards,
            self.my_shard(),
            self.validator_address,
        ))
    }

    pub fn seek_slashing_proof(&self, block: &Block) -> Result<(), SlashingError> {
        slashing::seek_slashing_proof(&self.store, &self.slashing_dict, &self.params, block)
    }

    pub fn slashing_proof_for(
        &self,
        beneficiary: &Addr64,
    ) -> Option<shardnode_protocol::SlashingProof> {
        self.slashing_dict.get(beneficiary)
    }
}
