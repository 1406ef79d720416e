//! STEP (ISO-10303-21, AP203) serialization.

use std::path::Path;

use truck_modeling::topology::Solid;
use truck_stepio::out::{CompleteStepDisplay, StepHeaderDescriptor, StepModel};

use crate::types::KernelError;

/// Serialize a solid to a STEP document string.
pub fn step_string(solid: &Solid, file_name: &str) -> String {
    let compressed = solid.compress();
    CompleteStepDisplay::new(
        StepModel::from(&compressed),
        StepHeaderDescriptor {
            file_name: file_name.to_string(),
            ..Default::default()
        },
    )
    .to_string()
}

/// Serialize a solid and write it to `path`.
pub fn write_step(solid: &Solid, path: &Path) -> Result<(), KernelError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("part.step");
    let data = step_string(solid, file_name);
    std::fs::write(path, data).map_err(|source| KernelError::ExportFailed {
        path: path.to_path_buf(),
        source,
    })
}
