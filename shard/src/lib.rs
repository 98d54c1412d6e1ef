//! Deterministic shard dispatch.
//!
//! A transaction's shard is derived from one of its own address-shaped
//! fields (sender, issuer, signature, or staking account, depending on
//! kind), never from its hash, so every validator assigns it to the same
//! shard without coordination.

use std::collections::HashMap;

use shardnode_protocol::{Addr64, Transaction};

/// A 1-based shard identifier. Shard 0 is never assigned; it is reserved
/// for "not yet sharded" in-memory defaults.
pub type ShardId = u32;

/// The network-wide shard count, fixed at genesis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberOfShards(pub u32);

/// Maps each validator's address to the shard it is responsible for.
#[derive(Clone, Debug, Default)]
pub struct ValidatorShardMap(HashMap<Addr64, ShardId>);

impl ValidatorShardMap {
    pub fn new() -> Self {
        ValidatorShardMap(HashMap::new())
    }

    pub fn insert(&mut self, validator: Addr64, shard: ShardId) {
        self.0.insert(validator, shard);
    }

    pub fn shard_of(&self, validator: &Addr64) -> Option<ShardId> {
        self.0.get(validator).copied()
    }
}

/// Assigns `tx` to a shard in `[1, shards.0]`.
///
/// Reproduces the source protocol's modulo step exactly, including its
/// truncation to a signed 32-bit value before the modulo and the `+ 1`
/// shift: `(txSenderAddressInt as i32 % NumberOfShards) + 1`. Truncating to
/// `i32` means addresses whose leading 8 bytes exceed `i32::MAX` wrap
/// (possibly negative) before the modulo; `abs()` folds that back into a
/// valid shard index. This is an intentional, preserved quirk of the
/// source algorithm, not a rounding bug to fix: changing it would silently
/// reassign already-sharded historical transactions.
pub fn assign_transaction_to_shard(tx: &Transaction, shards: NumberOfShards) -> ShardId {
    let identifying_address = match tx {
        Transaction::Contract(t) => t.issuer,
        Transaction::Funds(t) => t.from,
        Transaction::Config(t) => return default_shard_for_sig(&t.sig.0, shards),
        Transaction::Stake(t) => t.account,
    };
    shard_for_address(&identifying_address, shards)
}

fn shard_for_address(address: &Addr64, shards: NumberOfShards) -> ShardId {
    let leading = address.leading_u64();
    let truncated = leading as i32;
    let modulo = truncated % (shards.0 as i32);
    (modulo.unsigned_abs()) + 1
}

fn default_shard_for_sig(sig: &[u8; 64], shards: NumberOfShards) -> ShardId {
    let leading = u64::from_be_bytes(sig[0..8].try_into().unwrap());
    let truncated = leading as i32;
    let modulo = truncated % (shards.0 as i32);
    (modulo.unsigned_abs()) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use shardnode_protocol::{FundsTx, Sig64};

    fn funds_tx_with_from_leading(leading: u64) -> Transaction {
        let mut from = [0u8; 64];
        from[0..8].copy_from_slice(&leading.to_be_bytes());
        Transaction::Funds(FundsTx {
            from: Addr64(from),
            to: Addr64::zero(),
            amount: 0,
            fee: 0,
            tx_cnt: 0,
            sig: Sig64([0u8; 64]),
            data: vec![],
        })
    }

    #[test]
    fn shard_is_always_within_range() {
        let shards = NumberOfShards(4);
        for leading in [0u64, 1, 4, 5, 9999999999] {
            let tx = funds_tx_with_from_leading(leading);
            let shard = assign_transaction_to_shard(&tx, shards);
            assert!(shard >= 1 && shard <= 4, "shard {} out of range", shard);
        }
    }

    #[test]
    fn shard_assignment_is_deterministic() {
        let shards = NumberOfShards(3);
        let tx = funds_tx_with_from_leading(42);
        let a = assign_transaction_to_shard(&tx, shards);
        let b = assign_transaction_to_shard(&tx, shards);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_leading_bytes_assign_shard_one() {
        let shards = NumberOfShards(4);
        let tx = funds_tx_with_from_leading(0);
        assert_eq!(assign_transaction_to_shard(&tx, shards), 1);
    }

    #[test]
    fn leading_five_with_four_shards_assigns_shard_two() {
        let shards = NumberOfShards(4);
        let tx = funds_tx_with_from_leading(5);
        assert_eq!(assign_transaction_to_shard(&tx, shards), 2);
    }

    #[test]
    fn validator_shard_map_round_trips() {
        let mut map = ValidatorShardMap::new();
        let validator = Addr64([9u8; 64]);
        map.insert(validator, 2);
        assert_eq!(map.shard_of(&validator), Some(2));
        assert_eq!(map.shard_of(&Addr64::zero()), None);
    }
}
