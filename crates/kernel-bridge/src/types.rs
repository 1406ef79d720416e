use std::path::PathBuf;

use thiserror::Error;

/// Errors from kernel operations.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error("boolean {op} failed: the kernel returned no solid")]
    BooleanFailed { op: &'static str },

    #[error("invalid profile: {reason}")]
    InvalidProfile { reason: String },

    #[error("profile is not planar or not closed: {message}")]
    FaceAttachFailed { message: String },

    #[error("shell does not close into a solid: {message}")]
    InvalidShell { message: String },

    #[error("failed to write STEP file {path}")]
    ExportFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
