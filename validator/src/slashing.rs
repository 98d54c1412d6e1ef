use std::collections::HashMap;

use parking_lot::Mutex;
use shardnode_protocol::{Addr64, Block, SlashingProof};
use shardnode_store::Store;

use crate::error::SlashingError;
use crate::parameters::ActiveParameters;

/// Per-beneficiary equivocation evidence discovered so far. Sticky:
/// recording a second proof for a beneficiary overwrites the first, since
/// one confirmed equivocation already settles that beneficiary's fate.
#[derive(Default)]
pub struct SlashingDictionary(Mutex<HashMap<Addr64, SlashingProof>>);

impl SlashingDictionary {
    pub fn new() -> Self {
        SlashingDictionary(Mutex::new(HashMap::new()))
    }

    pub fn get(&self, beneficiary: &Addr64) -> Option<SlashingProof> {
        self.0.lock().get(beneficiary).cloned()
    }

    fn record(&self, beneficiary: Addr64, proof: SlashingProof) {
        self.0.lock().insert(beneficiary, proof);
    }
}

/// Looks for evidence that `block`'s beneficiary voted on two diverging
/// chains within the slashing window, recording a [`SlashingProof`] in
/// `dict` if so.
///
/// A block extending our own chain, or that sits on either side of the
/// current epoch boundary, is never equivocation evidence and is skipped
/// via the same-chain fast path before the full closed-block scan runs.
pub fn seek_slashing_proof(
    store: &Store,
    dict: &SlashingDictionary,
    params: &ActiveParameters,
    block: &Block,
) -> Result<(), SlashingError> {
    let last_closed_block = store
        .read_last_closed_block()?
        .ok_or(SlashingError::LatestBlockNotFound)?;
    let last_epoch_block_hash = store
        .read_last_closed_epoch_block()?
        .map(|eb| eb.hash)
        .unwrap_or(shardnode_hash::Hash32::ZERO);

    if last_closed_block.hash == block.hash
        || last_closed_block.hash == block.prev_hash
        || block.hash == last_epoch_block_hash
        || block.prev_hash == last_epoch_block_hash
    {
        return Ok(());
    }

    for prev_block in store.read_all_closed_blocks()? {
        if is_in_same_chain(store, &prev_block, block)? {
            return Ok(());
        }
        let within_window = abs_height_diff(prev_block.height, block.height)
            < params.slashing_window_size as u32;
        if prev_block.beneficiary == block.beneficiary && within_window {
            dict.record(
                block.beneficiary,
                SlashingProof::new(block.hash, prev_block.hash),
            );
        }
    }

    Ok(())
}

fn abs_height_diff(a: u32, b: u32) -> u32 {
    a.abs_diff(b)
}

/// Walks the higher of the two blocks' ancestry down through the closed
/// blocks store, looking for the lower block's hash.
///
/// A missing parent (a hash with no corresponding closed block) ends the
/// walk as a chain break rather than propagating a lookup error, since an
/// incomplete local view of history is not itself evidence either way.
pub fn is_in_same_chain(store: &Store, b1: &Block, b2: &Block) -> Result<bool, SlashingError> {
    if b1.height == b2.height {
        return Ok(false);
    }

    let (mut higher, lower) = if b1.height > b2.height { (b1.clone(), b2) } else { (b2.clone(), b1) };

    while higher.height > 0 {
        higher = match store.read_closed_block(&higher.prev_hash)? {
            Some(parent) => parent,
            None => return Ok(false),
        };
        if higher.hash == lower.hash {
            return Ok(true);
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shardnode_protocol::Addr64;

    fn block_at(height: u32, prev_hash: shardnode_hash::Hash32, beneficiary: Addr64) -> Block {
        let mut b = Block::open(prev_hash, height, beneficiary);
        b.hash = shardnode_hash::hash_bytes(&height.to_be_bytes());
        b
    }

    #[test]
    fn equal_height_blocks_are_never_same_chain() {
        let store = Store::volatile().unwrap();
        let a = block_at(5, shardnode_hash::Hash32::ZERO, Addr64::zero());
        let b = block_at(5, shardnode_hash::Hash32::ZERO, Addr64::zero());
        assert!(!is_in_same_chain(&store, &a, &b).unwrap());
    }

    #[test]
    fn descendant_reaches_ancestor_through_prev_hash() {
        let store = Store::volatile().unwrap();
        let genesis = block_at(0, shardnode_hash::Hash32::ZERO, Addr64::zero());
        store.write_closed_block(&genesis).unwrap();
        let child = block_at(1, genesis.hash, Addr64::zero());
        store.write_closed_block(&child).unwrap();
        assert!(is_in_same_chain(&store, &genesis, &child).unwrap());
    }

    #[test]
    fn missing_parent_breaks_the_walk_without_erroring() {
        let store = Store::volatile().unwrap();
        let orphan = block_at(3, shardnode_hash::hash_bytes(b"nowhere"), Addr64::zero());
        let other = block_at(1, shardnode_hash::Hash32::ZERO, Addr64::zero());
        assert!(!is_in_same_chain(&store, &orphan, &other).unwrap());
    }

    #[test]
    fn diverging_chains_within_window_record_a_proof() {
        let store = Store::volatile().unwrap();
        let validator = Addr64([7u8; 64]);

        let b1 = block_at(100, shardnode_hash::hash_bytes(b"b1-parent"), validator);
        store.write_closed_block(&b1).unwrap();
        store.write_last_closed_block(&b1).unwrap();

        let b2 = block_at(101, shardnode_hash::hash_bytes(b"b2-parent"), validator);

        let dict = SlashingDictionary::new();
        let params = ActiveParameters {
            slashing_window_size: 10,
            ..ActiveParameters::default()
        };
        seek_slashing_proof(&store, &dict, &params, &b2).unwrap();

        let proof = dict.get(&validator).expect("expected a recorded proof");
        assert_eq!(proof.conflicting_block_hash_1, b2.hash);
        assert_eq!(proof.conflicting_block_hash_2, b1.hash);
    }

    #[test]
    fn missing_last_closed_block_is_a_hard_error() {
        let store = Store::volatile().unwrap();
        let dict = SlashingDictionary::new();
        let params = ActiveParameters::default();
        let block = block_at(1, shardnode_hash::Hash32::ZERO, Addr64::zero());
        assert!(matches!(
            seek_slashing_proof(&store, &dict, &params, &block),
            Err(SlashingError::LatestBlockNotFound)
        ));
    }
}
