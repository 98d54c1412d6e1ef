use std::borrow::Cow;

use libmdbx::{DatabaseFlags, WriteFlags};

use crate::environment::Env;
use crate::error::DatabaseError;

/// A single named database within an [`Env`] — the generic key-value
/// primitive the store layer names "buckets" and attaches entity semantics
/// to.
///
/// All operations are individually atomic MDBX transactions; there is no
/// multi-bucket atomic commit at this layer.
pub struct Bucket<'env> {
    env: &'env Env,
    name: &'static str,
}

impl<'env> Bucket<'env> {
    /// Returns whether the named database already exists in `env`.
    pub fn exists(env: &'env Env, name: &'static str) -> Result<bool, DatabaseError> {
        let txn = env.inner.begin_ro_txn()?;
        match txn.open_db(Some(name)) {
            Ok(_) => Ok(true),
            Err(libmdbx::Error::NotFound) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Creates the named database. Fails if it already exists; callers
    /// should check [`Bucket::exists`] first (the store's init routine does).
    pub fn create(env: &'env Env, name: &'static str) -> Result<Self, DatabaseError> {
        let txn = env.inner.begin_rw_txn()?;
        txn.create_db(Some(name), DatabaseFlags::empty())?;
        txn.commit()?;
        Ok(Bucket { env, name })
    }

    /// Opens a handle to an already-existing named database.
    pub fn open(env: &'env Env, name: &'static str) -> Result<Self, DatabaseError> {
        let txn = env.inner.begin_ro_txn()?;
        txn.open_db(Some(name))?;
        Ok(Bucket { env, name })
    }

    /// Removes every key from the bucket without dropping the database
    /// itself, matching the "clear if present" half of the store's startup
    /// routine.
    pub fn clear(&self) -> Result<(), DatabaseError> {
        let txn = self.env.inner.begin_rw_txn()?;
        let db = txn.open_db(Some(self.name))?;
        txn.clear_db(&db)?;
        txn.commit()?;
        Ok(())
    }

    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<(), DatabaseError> {
        let txn = self.env.inner.begin_rw_txn()?;
        let db = txn.open_db(Some(self.name))?;
        txn.put(&db, key, value, WriteFlags::empty())?;
        txn.commit()?;
        Ok(())
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, DatabaseError> {
        let txn = self.env.inner.begin_ro_txn()?;
        let db = txn.open_db(Some(self.name))?;
        let value: Option<Cow<[u8]>> = txn.get(&db, key)?;
        Ok(value.map(|v| v.into_owned()))
    }

    pub fn delete(&self, key: &[u8]) -> Result<(), DatabaseError> {
        let txn = self.env.inner.begin_rw_txn()?;
        let db = txn.open_db(Some(self.name))?;
        txn.del(&db, key, None)?;
        txn.commit()?;
        Ok(())
    }

    /// Returns every value currently stored in the bucket, in MDBX's native
    /// key order. Used by `read_all_closed_blocks`.
    pub fn values(&self) -> Result<Vec<Vec<u8>>, DatabaseError> {
        let txn = self.env.inner.begin_ro_txn()?;
        let db = txn.open_db(Some(self.name))?;
        let mut cursor = txn.cursor(&db)?;
        let mut out = Vec::new();
        for item in cursor.iter::<Cow<[u8]>, Cow<[u8]>>() {
            let (_key, value) = item?;
            out.push(value.into_owned());
        }
        Ok(out)
    }
}
