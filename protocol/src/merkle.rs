use shardnode_hash::{hash_bytes, Hash32};

/// A binary Merkle tree over an ordered list of leaf hashes.
///
/// Grounded in the source protocol's `NewMerkleTree`/`MerkleRoot` pair: an
/// odd level is completed by duplicating its last node before pairing, and
/// an empty leaf set has no tree at all (callers treat that as the zero
/// root, see [`root_of`]).
pub struct MerkleTree {
    levels: Vec<Vec<Hash32>>,
}

impl MerkleTree {
    pub fn new(leaves: &[Hash32]) -> Option<Self> {
        if leaves.is_empty() {
            return None;
        }
        let mut levels = vec![leaves.to_vec()];
        while levels.last().unwrap().len() > 1 {
            let prev = levels.last().unwrap();
            let mut next = Vec::with_capacity(prev.len().div_ceil(2));
            for pair in prev.chunks(2) {
                let combined = if pair.len() == 2 {
                    combine(&pair[0], &pair[1])
                } else {
                    combine(&pair[0], &pair[0])
                };
                next.push(combined);
            }
            levels.push(next);
        }
        Some(MerkleTree { levels })
    }

    pub fn root(&self) -> Hash32 {
        self.levels.last().unwrap()[0]
    }
}

fn combine(left: &Hash32, right: &Hash32) -> Hash32 {
    let mut buf = Vec::with_capacity(64);
    buf.extend_from_slice(left.as_bytes());
    buf.extend_from_slice(right.as_bytes());
    hash_bytes(&buf)
}

/// The Merkle root of `leaves`, or the zero hash when there are none.
pub fn root_of(leaves: &[Hash32]) -> Hash32 {
    MerkleTree::new(leaves)
        .map(|tree| tree.root())
        .unwrap_or(Hash32::ZERO)
}
