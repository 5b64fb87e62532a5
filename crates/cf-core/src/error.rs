use std::path::PathBuf;

/// Alias for `Result<T, CfError>`.
pub type CfResult<T> = Result<T, CfError>;

/// Errors raised while writing a compiled mod to disk.
///
/// Compilation itself never fails: a builder without its primary type simply
/// contributes nothing. Only the write phase can fail.
#[derive(Debug, thiserror::Error)]
pub enum CfError {
    /// A filesystem operation on the output directory failed.
    #[error("cannot write {}: {source}", path.display())]
    Io {
        /// The path being created, removed, or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An imported asset's source file does not exist at write time.
    #[error("import source not found: {}", .0.display())]
    ImportNotFound(PathBuf),
}

impl CfError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
