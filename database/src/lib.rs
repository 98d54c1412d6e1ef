//! A minimal embedded key-value environment on top of MDBX.
//!
//! This crate fixes the generic "environment of named buckets" collaborator
//! the store layer is built on: open a durable or volatile [`Env`], then
//! create or open any number of named [`Bucket`]s within it. Bucket-level
//! entity semantics (which bucket holds which kind of data, how keys are
//! derived) live one layer up, in the store crate.

mod bucket;
mod environment;
mod error;

pub use bucket::Bucket;
pub use environment::{Env, OPEN_LOCK_TIMEOUT};
pub use error::DatabaseError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_roundtrips() {
        let env = Env::volatile(4).unwrap();
        let bucket = Bucket::create(&env, "widgets").unwrap();
        bucket.put(b"k", b"v").unwrap();
        assert_eq!(bucket.get(b"k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn missing_key_returns_none() {
        let env = Env::volatile(4).unwrap();
        let bucket = Bucket::create(&env, "widgets").unwrap();
        assert_eq!(bucket.get(b"nope").unwrap(), None);
    }

    #[test]
    fn delete_removes_key() {
        let env = Env::volatile(4).unwrap();
        let bucket = Bucket::create(&env, "widgets").unwrap();
        bucket.put(b"k", b"v").unwrap();
        bucket.delete(b"k").unwrap();
        assert_eq!(bucket.get(b"k").unwrap(), None);
    }

    #[test]
    fn clear_empties_bucket_but_keeps_it() {
        let env = Env::volatile(4).unwrap();
        let bucket = Bucket::create(&env, "widgets").unwrap();
        bucket.put(b"k", b"v").unwrap();
        bucket.clear().unwrap();
        assert_eq!(bucket.get(b"k").unwrap(), None);
        assert!(Bucket::exists(&env, "widgets").unwrap());
    }

    #[test]
    fn exists_is_false_before_create() {
        let env = Env::volatile(4).unwrap();
        assert!(!Bucket::exists(&env, "ghost").unwrap());
    }

    #[test]
    fn values_enumerates_all_entries() {
        let env = Env::volatile(4).unwrap();
        let bucket = Bucket::create(&env, "widgets").unwrap();
        bucket.put(b"a", b"1").unwrap();
        bucket.put(b"b", b"2").unwrap();
        let mut values = bucket.values().unwrap();
        values.sort();
        assert_eq!(values, vec![b"1".to_vec(), b"2".to_vec()]);
    }
}
