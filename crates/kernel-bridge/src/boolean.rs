//! Boolean operations over truck-shapeops.

use truck_modeling::topology::Solid;

use crate::types::KernelError;

/// Intersection tolerance passed to truck-shapeops.
const SHAPEOPS_TOL: f64 = 0.05;

/// Subtract `tool` from `base`.
///
/// Subtraction is A ∩ ¬B; `not()` flips the tool in place on a clone.
pub fn subtract(base: &Solid, tool: &Solid) -> Result<Solid, KernelError> {
    let mut flipped = tool.clone();
    flipped.not();
    truck_shapeops::and(base, &flipped, SHAPEOPS_TOL)
        .ok_or(KernelError::BooleanFailed { op: "subtract" })
}

/// Union of two solids.
pub fn union(a: &Solid, b: &Solid) -> Result<Solid, KernelError> {
    truck_shapeops::or(a, b, SHAPEOPS_TOL).ok_or(KernelError::BooleanFailed { op: "union" })
}
