//! Shared vocabulary types for the fixture generator.
//!
//! Everything here is plain data: no geometry kernel, no I/O. The other
//! crates agree on millimetre coordinates and on the hole-spec table
//! through these definitions.

pub mod geom;
pub mod holes;
pub mod plate;

pub use geom::Vec2;
pub use holes::{HoleSpec, HoleTriple};
pub use plate::PlateId;
