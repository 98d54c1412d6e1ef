use beserial::{Deserialize, Serialize};
use shardnode_hash::{hash_bytes, Hash32};

use crate::merkle::root_of;
use crate::primitives::Addr64;
use crate::transaction::FundsTx;

/// Accumulates one shard's view of an account across an epoch: the running
/// balance delta and the set of funds transactions that touched it.
///
/// Grounded directly in the source protocol's `TxBucket`: `AddFundsTx` only
/// ever adjusts the bucket when its owner is the sender or receiver, and the
/// Merkle root over the admitted hashes is computed lazily and cached, since
/// recomputing it on every lookup would be wasted work once the bucket
/// stops changing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxBucket {
    pub address: Addr64,
    pub relative_balance: i64,
    merkle_root: Hash32,
    #[beserial(len_type(u16))]
    tx_hashes: Vec<Hash32>,
}

impl TxBucket {
    pub fn new(address: Addr64) -> Self {
        TxBucket {
            address,
            relative_balance: 0,
            merkle_root: Hash32::ZERO,
            tx_hashes: Vec::new(),
        }
    }

    /// Folds `tx` into this bucket if its owner is the sender or the
    /// receiver; does nothing otherwise. Invalidates the cached Merkle root.
    pub fn add_funds_tx(&mut self, tx: &FundsTx, tx_hash: Hash32) {
        if tx.from == self.address {
            self.relative_balance -= (tx.amount + tx.fee) as i64;
        } else if tx.to == self.address {
            self.relative_balance += tx.amount as i64;
        } else {
            return;
        }
        self.tx_hashes.push(tx_hash);
        self.merkle_root = Hash32::ZERO;
    }

    /// The Merkle root over admitted transaction hashes, or the zero hash
    /// if none have been admitted. Cached after first computation.
    pub fn calculate_merkle_root(&mut self) -> Hash32 {
        if self.merkle_root.is_zero() && !self.tx_hashes.is_empty() {
            self.merkle_root = root_of(&self.tx_hashes);
        }
        self.merkle_root
    }

    pub fn tx_hashes(&self) -> &[Hash32] {
        &self.tx_hashes
    }

    pub fn hash(&mut self) -> Hash32 {
        let root = self.calculate_merkle_root();
        let mut buf = Vec::with_capacity(64 + 8 + 32);
        buf.extend_from_slice(self.address.0.as_ref());
        buf.extend_from_slice(&self.relative_balance.to_be_bytes());
        buf.extend_from_slice(root.as_bytes());
        hash_bytes(&buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Sig64;

    fn funds_tx(from: Addr64, to: Addr64, amount: u64, fee: u64) -> FundsTx {
        FundsTx {
            from,
            to,
            amount,
            fee,
            tx_cnt: 1,
            sig: Sig64([0u8; 64]),
            data: vec![],
        }
    }

    #[test]
    fn sender_bucket_is_debited_amount_plus_fee() {
        let owner = Addr64([1u8; 64]);
        let other = Addr64([2u8; 64]);
        let mut bucket = TxBucket::new(owner);
        let tx = funds_tx(owner, other, 100, 5);
        bucket.add_funds_tx(&tx, Hash32::ZERO);
        assert_eq!(bucket.relative_balance, -105);
    }

    #[test]
    fn receiver_bucket_is_credited_amount_only() {
        let owner = Addr64([1u8; 64]);
        let other = Addr64([2u8; 64]);
        let mut bucket = TxBucket::new(owner);
        let tx = funds_tx(other, owner, 100, 5);
        bucket.add_funds_tx(&tx, Hash32::ZERO);
        assert_eq!(bucket.relative_balance, 100);
    }

    #[test]
    fn unrelated_tx_is_ignored() {
        let owner = Addr64([1u8; 64]);
        let mut bucket = TxBucket::new(owner);
        let tx = funds_tx(Addr64([2u8; 64]), Addr64([3u8; 64]), 100, 5);
        bucket.add_funds_tx(&tx, Hash32::ZERO);
        assert_eq!(bucket.relative_balance, 0);
        assert!(bucket.tx_hashes().is_empty());
    }

    #[test]
    fn merkle_root_is_zero_until_a_tx_is_admitted() {
        let owner = Addr64([1u8; 64]);
        let mut bucket = TxBucket::new(owner);
        assert!(bucket.calculate_merkle_root().is_zero());
        let tx = funds_tx(owner, Addr64([2u8; 64]), 100, 5);
        bucket.add_funds_tx(&tx, hash_bytes(b"tx"));
        assert!(!bucket.calculate_merkle_root().is_zero());
    }
}
