//! The mempool: concurrently-accessed open/invalid transaction pools, plus
//! the bounded FIFO stashes block preparation and state sync drain from.

mod stash;

use std::collections::HashMap;

use parking_lot::Mutex;
use shardnode_hash::Hash32;
use shardnode_protocol::Transaction;

pub use stash::Stash;

/// Transactions seen but not yet admitted into a closed block, plus the
/// ones that were tried and rejected.
///
/// Both pools are guarded by their own mutex rather than one shared lock,
/// since a write to one never needs to observe the other atomically; this
/// mirrors the teacher's preference for narrow, independently-lockable
/// state over one coarse lock.
pub struct Mempool {
    open: Mutex<HashMap<Hash32, Transaction>>,
    invalid: Mutex<HashMap<Hash32, Transaction>>,
}

impl Default for Mempool {
    fn default() -> Self {
        Mempool::new()
    }
}

impl Mempool {
    pub fn new() -> Self {
        Mempool {
            open: Mutex::new(HashMap::new()),
            invalid: Mutex::new(HashMap::new()),
        }
    }

    pub fn write_open_tx(&self, tx: Transaction) {
        let hash = tx.hash();
        self.open.lock().insert(hash, tx);
    }

    pub fn read_open_tx(&self, hash: &Hash32) -> Option<Transaction> {
        self.open.lock().get(hash).cloned()
    }

    pub fn delete_open_tx(&self, hash: &Hash32) -> Option<Transaction> {
        self.open.lock().remove(hash)
    }

    /// A consistent snapshot of every open transaction, taken under the
    /// pool's lock so concurrent writers can't interleave a partial view
    /// into it.
    pub fn read_all_open_txs(&self) -> Vec<Transaction> {
        self.open.lock().values().cloned().collect()
    }

    pub fn get_mempool_size(&self) -> usize {
        self.open.lock().len()
    }

    /// Moves a rejected transaction into the invalid pool and drops it from
    /// the open one, so it can't be retried by the next `prepare_block`
    /// call and doesn't starve the mempool.
    pub fn write_invalid_open_tx(&self, hash: &Hash32) {
        if let Some(tx) = self.open.lock().remove(hash) {
            log::debug!("Quarantining invalid transaction {:?}", hash);
            self.invalid.lock().insert(*hash, tx);
        }
    }

    pub fn read_invalid_tx(&self, hash: &Hash32) -> Option<Transaction> {
        self.invalid.lock().get(hash).cloned()
    }

    pub fn get_invalid_pool_size(&self) -> usize {
        self.invalid.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shardnode_protocol::{Addr64, FundsTx, Sig64};

    fn sample_tx(tx_cnt: u32) -> Transaction {
        Transaction::Funds(FundsTx {
            from: Addr64::zero(),
            to: Addr64::zero(),
            amount: 1,
            fee: 1,
            tx_cnt,
            sig: Sig64([0u8; 64]),
            data: vec![],
        })
    }

    #[test]
    fn write_then_read_open_tx() {
        let pool = Mempool::new();
        let tx = sample_tx(1);
        pool.write_open_tx(tx.clone());
        assert_eq!(pool.read_open_tx(&tx.hash()), Some(tx));
    }

    #[test]
    fn delete_removes_from_open_pool() {
        let pool = Mempool::new();
        let tx = sample_tx(1);
        pool.write_open_tx(tx.clone());
        assert_eq!(pool.delete_open_tx(&tx.hash()), Some(tx.clone()));
        assert_eq!(pool.read_open_tx(&tx.hash()), None);
    }

    #[test]
    fn invalidating_moves_between_pools() {
        let pool = Mempool::new();
        let tx = sample_tx(1);
        pool.write_open_tx(tx.clone());
        pool.write_invalid_open_tx(&tx.hash());
        assert_eq!(pool.read_open_tx(&tx.hash()), None);
        assert_eq!(pool.read_invalid_tx(&tx.hash()), Some(tx));
    }

    #[test]
    fn mempool_size_tracks_open_pool_only() {
        let pool = Mempool::new();
        pool.write_open_tx(sample_tx(1));
        pool.write_open_tx(sample_tx(2));
        assert_eq!(pool.get_mempool_size(), 2);
        assert_eq!(pool.get_invalid_pool_size(), 0);
    }

    #[test]
    fn read_all_open_txs_snapshots_every_entry() {
        let pool = Mempool::new();
        pool.write_open_tx(sample_tx(1));
        pool.write_open_tx(sample_tx(2));
        assert_eq!(pool.read_all_open_txs().len(), 2);
    }
}
