//! Fixture part modeling.
//!
//! Composes the kernel primitives into the actual deliverables: three
//! drilled plates, the pressure pins, and the tester-board mount pillar.

pub mod emboss;
pub mod pins;
pub mod plate;
pub mod types;

pub use pins::{mount_pillar, pressure_pin, PressurePinProfile};
pub use plate::{apply_hole_spec, corner_locations, render_plates};
pub use types::OpError;

/// How far hole cutters extend past the faces they pierce, so boolean
/// inputs never share a coincident face.
pub(crate) const OVERCUT_MM: f64 = 0.1;
