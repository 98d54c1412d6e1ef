use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use libmdbx::{Environment, Geometry, NoWriteMap};
use tempfile::TempDir;

use crate::error::DatabaseError;

/// Default bound on how long [`Env::open`] will retry acquiring the
/// environment's file lock before giving up.
pub const OPEN_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// A handle to an embedded key-value environment.
///
/// Wraps an MDBX environment that hosts an arbitrary number of named
/// databases ("buckets" in the store's terminology). Two flavors are
/// constructed the same way the teacher distinguishes a durable environment
/// from a volatile one used by tests: [`Env::open`] persists to `path`,
/// [`Env::volatile`] persists to a process-owned temporary directory that is
/// removed when the handle is dropped.
pub struct Env {
    pub(crate) inner: Environment<NoWriteMap>,
    // Kept alive for the lifetime of a volatile environment; `None` for a
    // durable, caller-owned path.
    _tempdir: Option<TempDir>,
}

impl Env {
    /// Opens (or creates) a durable environment at `path`, retrying for up to
    /// [`OPEN_LOCK_TIMEOUT`] if the environment's lock is currently held by
    /// another process.
    pub fn open(path: impl AsRef<Path>, max_databases: usize) -> Result<Self, DatabaseError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        std::fs::create_dir_all(&path).map_err(DatabaseError::TempDir)?;

        let deadline = Instant::now() + OPEN_LOCK_TIMEOUT;
        loop {
            let result = Environment::new()
                .set_max_dbs(max_databases)
                .set_geometry(Geometry {
                    size: Some(0..(1 << 30)),
                    ..Default::default()
                })
                .open(&path);

            match result {
                Ok(inner) => {
                    log::info!("Opened database environment at {:?}", path);
                    return Ok(Env {
                        inner,
                        _tempdir: None,
                    });
                }
                Err(e) if Instant::now() < deadline => {
                    log::warn!("Database environment busy, retrying: {}", e);
                    std::thread::sleep(Duration::from_millis(100));
                }
                Err(e) => {
                    return Err(DatabaseError::Open { path, source: e });
                }
            }
        }
    }

    /// Creates a volatile environment backed by a fresh temporary directory.
    ///
    /// Used by crate test suites so Store/Mempool tests never touch a fixed
    /// on-disk path and never interfere with one another.
    pub fn volatile(max_databases: usize) -> Result<Self, DatabaseError> {
        let tempdir = TempDir::new().map_err(DatabaseError::TempDir)?;
        let inner = Environment::new()
            .set_max_dbs(max_databases)
            .set_geometry(Geometry {
                size: Some(0..(1 << 30)),
                ..Default::default()
            })
            .open(tempdir.path())
            .map_err(|e| DatabaseError::Open {
                path: tempdir.path().to_path_buf(),
                source: e,
            })?;

        Ok(Env {
            inner,
            _tempdir: Some(tempdir),
        })
    }
}
