use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("could not open database environment at {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: libmdbx::Error,
    },

    #[error("database engine error: {0}")]
    Engine(#[from] libmdbx::Error),

    #[error("could not create temporary directory for volatile environment: {0}")]
    TempDir(#[from] std::io::Error),
}
