//! Read-only queries over a KiCad board file.
//!
//! The board is parsed once from its s-expression text into a flat model;
//! every query after that is a pass over small in-memory lists. All
//! coordinates are millimetres, straight from the file.

pub mod error;
pub mod model;
pub mod outline;
pub mod parse;
pub mod query;
pub mod sexpr;

pub use error::BoardError;
pub use model::{Board, EdgeShape, Footprint, Pad, PadKind};
pub use outline::{board_outline, Outline};
pub use parse::parse_board;
pub use query::{
    annotation_footprints, annotation_positions, test_point_smd_pads, tht_pads, unannotated_pads,
    DEFAULT_ANNOTATION_RADIUS_MM,
};
