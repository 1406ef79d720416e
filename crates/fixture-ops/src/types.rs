use thiserror::Error;

/// Errors from fixture part modeling.
#[derive(Debug, Error)]
pub enum OpError {
    #[error("kernel error: {0}")]
    Kernel(#[from] kernel_bridge::KernelError),

    #[error("annotation type `{name}` appears on the board but has no hole table entry")]
    UnknownAnnotationType { name: String },
}
