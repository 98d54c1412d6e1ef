//! Persistent storage for closed chain state.
//!
//! Wraps a [`shardnode_database::Env`] of 11 named buckets and attaches
//! entity semantics to each: which protocol type lives where, how its key
//! is derived, and which bucket a transaction's kind routes to. The bucket
//! layout and the startup "clear if present, else create" routine are
//! carried over from the source protocol's storage package.

pub mod buckets;
mod error;

use std::path::Path;

use beserial::{Deserialize, Serialize};
use shardnode_hash::Hash32;
use shardnode_protocol::{Block, EpochBlock, Genesis, Transaction};

use shardnode_database::{Bucket, Env};

pub use error::StoreError;

/// A handle to one validator's persistent chain state.
pub struct Store {
    env: Env,
}

impl Store {
    /// Opens (or creates) a durable store at `path`, running the same
    /// "clear if present, else create" bucket initialization the source
    /// protocol's `storage.Init` performs on every startup.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let env = Env::open(path, buckets::ALL.len())?;
        let store = Store { env };
        store.init_buckets()?;
        Ok(store)
    }

    /// A store over a volatile, temp-dir-backed environment. Used by test
    /// suites across the workspace so they never touch a fixed on-disk path.
    pub fn volatile() -> Result<Self, StoreError> {
        let env = Env::volatile(buckets::ALL.len())?;
        let store = Store { env };
        store.init_buckets()?;
        Ok(store)
    }

    fn init_buckets(&self) -> Result<(), StoreError> {
        for name in buckets::ALL {
            if Bucket::exists(&self.env, name)? {
                Bucket::open(&self.env, name)?.clear()?;
                log::info!("Bucket cleared: {}", name);
            } else {
                Bucket::create(&self.env, name)?;
                log::info!("Bucket created: {}", name);
            }
        }
        Ok(())
    }

    fn bucket(&self, name: &'static str) -> Result<Bucket<'_>, StoreError> {
        Ok(Bucket::open(&self.env, name)?)
    }

    // -- open blocks ---------------------------------------------------

    pub fn write_open_block(&self, block: &Block) -> Result<(), StoreError> {
        self.bucket(buckets::OPENBLOCKS)?
            .put(block.hash.as_bytes(), &encode(block))?;
        Ok(())
    }

    pub fn read_open_block(&self, hash: &Hash32) -> Result<Option<Block>, StoreError> {
        read_optional(&self.bucket(buckets::OPENBLOCKS)?, hash.as_bytes())
    }

    pub fn delete_open_block(&self, hash: &Hash32) -> Result<(), StoreError> {
        self.bucket(buckets::OPENBLOCKS)?.delete(hash.as_bytes())?;
        Ok(())
    }

    // -- closed blocks --------------------------------------------------

    pub fn write_closed_block(&self, block: &Block) -> Result<(), StoreError> {
        self.bucket(buckets::CLOSEDBLOCKS)?
            .put(block.hash.as_bytes(), &encode(block))?;
        Ok(())
    }

    pub fn read_closed_block(&self, hash: &Hash32) -> Result<Option<Block>, StoreError> {
        read_optional(&self.bucket(buckets::CLOSEDBLOCKS)?, hash.as_bytes())
    }

    /// All closed blocks, in the bucket's native key (i.e. hash) order.
    /// Used by slashing detection's ancestry walk.
    pub fn read_all_closed_blocks(&self) -> Result<Vec<Block>, StoreError> {
        self.bucket(buckets::CLOSEDBLOCKS)?
            .values()?
            .iter()
            .map(|bytes| decode(bytes))
            .collect()
    }

    pub fn write_last_closed_block(&self, block: &Block) -> Result<(), StoreError> {
        self.bucket(buckets::LASTCLOSEDBLOCK)?
            .put(buckets::LATEST_KEY, &encode(block))?;
        Ok(())
    }

    pub fn read_last_closed_block(&self) -> Result<Option<Block>, StoreError> {
        read_optional(&self.bucket(buckets::LASTCLOSEDBLOCK)?, buckets::LATEST_KEY)
    }

    // -- epoch blocks -----------------------------------------------------

    pub fn write_open_epoch_block(&self, epoch_block: &EpochBlock) -> Result<(), StoreError> {
        self.bucket(buckets::OPENEPOCHBLOCK)?
            .put(epoch_block.hash.as_bytes(), &encode(epoch_block))?;
        Ok(())
    }

    pub fn write_closed_epoch_block(&self, epoch_block: &EpochBlock) -> Result<(), StoreError> {
        self.bucket(buckets::CLOSEDEPOCHBLOCKS)?
            .put(epoch_block.hash.as_bytes(), &encode(epoch_block))?;
        Ok(())
    }

    pub fn write_last_closed_epoch_block(
        &self,
        epoch_block: &EpochBlock,
    ) -> Result<(), StoreError> {
        self.bucket(buckets::LASTCLOSEDEPOCHBLOCKS)?
            .put(buckets::LATEST_KEY, &encode(epoch_block))?;
        Ok(())
    }

    pub fn read_last_closed_epoch_block(&self) -> Result<Option<EpochBlock>, StoreError> {
        read_optional(
            &self.bucket(buckets::LASTCLOSEDEPOCHBLOCKS)?,
            buckets::LATEST_KEY,
        )
    }

    // -- transactions -----------------------------------------------------

    /// Routes a closed transaction to its kind's bucket, mirroring the
    /// source protocol's type switch in `WriteClosedTx`.
    pub fn write_closed_tx(&self, tx: &Transaction) -> Result<(), StoreError> {
        let bucket_name = match tx {
            Transaction::Funds(_) => buckets::CLOSEDFUNDS,
            Transaction::Contract(_) => buckets::CLOSEDACCS,
            Transaction::Config(_) => buckets::CLOSEDCONFIGS,
            Transaction::Stake(_) => buckets::CLOSEDSTAKES,
        };
        let hash = tx.hash();
        self.bucket(bucket_name)?.put(hash.as_bytes(), &encode(tx))?;
        Ok(())
    }

    /// Looks up a closed transaction by hash without knowing its kind,
    /// probing each closed-transaction bucket in turn.
    pub fn read_closed_tx(&self, hash: &Hash32) -> Result<Option<Transaction>, StoreError> {
        for bucket_name in buckets::CLOSED_TX_BUCKETS {
            if let Some(tx) = read_optional(&self.bucket(bucket_name)?, hash.as_bytes())? {
                return Ok(Some(tx));
            }
        }
        Ok(None)
    }

    // -- genesis ----------------------------------------------------------

    pub fn write_genesis(&self, genesis: &Genesis) -> Result<(), StoreError> {
        self.bucket(buckets::GENESIS)?
            .put(buckets::GENESIS_KEY, &encode(genesis))?;
        Ok(())
    }

    pub fn read_genesis(&self) -> Result<Genesis, StoreError> {
        read_optional(&self.bucket(buckets::GENESIS)?, buckets::GENESIS_KEY)?
            .ok_or(StoreError::GenesisNotFound)
    }
}

fn encode<T: Serialize>(value: &T) -> Vec<u8> {
    let mut buf = Vec::with_capacity(value.serialized_size());
    value
        .serialize(&mut buf)
        .expect("serializing to a Vec cannot fail");
    buf
}

fn decode<T: Deserialize>(bytes: &[u8]) -> Result<T, StoreError> {
    let mut cursor = bytes;
    Ok(T::deserialize(&mut cursor)?)
}

fn read_optional<T: Deserialize>(
    bucket: &Bucket<'_>,
    key: &[u8],
) -> Result<Option<T>, StoreError> {
    match bucket.get(key)? {
        Some(bytes) => Ok(Some(decode(&bytes)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shardnode_protocol::Addr64;

    fn sample_block(height: u32) -> Block {
        let mut block = Block::open(Hash32::ZERO, height, Addr64::zero());
        block.hash = shardnode_hash::hash_bytes(&height.to_be_bytes());
        block
    }

    #[test]
    fn open_block_roundtrips() {
        let store = Store::volatile().unwrap();
        let block = sample_block(1);
        store.write_open_block(&block).unwrap();
        let read = store.read_open_block(&block.hash).unwrap().unwrap();
        assert_eq!(read, block);
    }

    #[test]
    fn missing_open_block_is_none() {
        let store = Store::volatile().unwrap();
        assert_eq!(store.read_open_block(&Hash32::ZERO).unwrap(), None);
    }

    #[test]
    fn last_closed_block_overwrites_in_place() {
        let store = Store::volatile().unwrap();
        store.write_last_closed_block(&sample_block(1)).unwrap();
        store.write_last_closed_block(&sample_block(2)).unwrap();
        let read = store.read_last_closed_block().unwrap().unwrap();
        assert_eq!(read.height, 2);
    }

    #[test]
    fn closed_tx_routes_to_the_right_bucket_by_kind() {
        use shardnode_protocol::{FundsTx, Sig64};

        let store = Store::volatile().unwrap();
        let tx = Transaction::Funds(FundsTx {
            from: Addr64::zero(),
            to: Addr64::zero(),
            amount: 1,
            fee: 1,
            tx_cnt: 1,
            sig: Sig64([0u8; 64]),
            data: vec![],
        });
        store.write_closed_tx(&tx).unwrap();
        let read = store.read_closed_tx(&tx.hash()).unwrap().unwrap();
        assert_eq!(read, tx);
    }

    #[test]
    fn genesis_is_not_found_until_written() {
        let store = Store::volatile().unwrap();
        assert!(matches!(
            store.read_genesis(),
            Err(StoreError::GenesisNotFound)
        ));
    }

    #[test]
    fn reopening_an_existing_environment_clears_buckets() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = Store::open(dir.path()).unwrap();
            store.write_last_closed_block(&sample_block(5)).unwrap();
        }
        let store = Store::open(dir.path()).unwrap();
        assert_eq!(store.read_last_closed_block().unwrap(), None);
    }
}
