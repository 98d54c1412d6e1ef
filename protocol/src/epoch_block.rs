use beserial::{Deserialize, Serialize};
use shardnode_hash::Hash32;

/// A periodic boundary block delimiting epoch ranges.
///
/// Carries a digest of the account state as of the epoch boundary; the
/// digest's computation is a collaborator concern (out of this crate's
/// scope), so it is stored opaquely as a `Hash32`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochBlock {
    pub hash: Hash32,
    pub prev_epoch_hash: Hash32,
    pub height: u32,
    pub state_digest: Hash32,
}

impl EpochBlock {
    pub fn new(prev_epoch_hash: Hash32, height: u32, state_digest: Hash32) -> Self {
        EpochBlock {
            hash: Hash32::ZERO,
            prev_epoch_hash,
            height,
            state_digest,
        }
    }
}

impl shardnode_hash::Hash for EpochBlock {
    fn hash(&self) -> Hash32 {
        let mut buf = Vec::with_capacity(self.serialized_size());
        Serialize::serialize(self, &mut buf).expect("serializing to a Vec cannot fail");
        shardnode_hash::hash_bytes(&buf)
    }
}
