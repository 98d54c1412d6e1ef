use beserial::{Deserialize, Serialize};
use shardnode_hash::Hash32;

/// Evidence that a validator equivocated: two distinct blocks at
/// conflicting heights in the same chain, both attributable to the same
/// beneficiary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlashingProof {
    pub conflicting_block_hash_1: Hash32,
    pub conflicting_block_hash_2: Hash32,
}

impl SlashingProof {
    pub fn new(conflicting_block_hash_1: Hash32, conflicting_block_hash_2: Hash32) -> Self {
        SlashingProof {
            conflicting_block_hash_1,
            conflicting_block_hash_2,
        }
    }
}
