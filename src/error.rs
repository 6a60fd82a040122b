//! Infrastructure errors.
//!
//! Problems with user code are never errors here; they are reported as
//! [`Diagnostic`](crate::diagnostics::Diagnostic)s and generation carries on.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("generation was cancelled")]
    Cancelled,

    #[error("invalid compilation model `{path}`")]
    Model {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error when accessing `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = GeneratorError> = std::result::Result<T, E>;
