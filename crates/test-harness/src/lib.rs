//! Shared fixtures and geometry oracles for cross-crate tests.

pub mod helpers;
pub mod oracle;

pub use helpers::{sample_board, sample_config, HarnessError};
pub use oracle::{
    assert_bounding_box, is_watertight, mesh_bounding_box, mesh_volume, tessellate,
};
