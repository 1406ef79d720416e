//! Thin layer over the truck B-rep kernel.
//!
//! truck has no built-in box/cylinder/loft; everything is wires, swept.
//! This crate packages the closed-wire profiles and swept primitives the
//! fixture parts are made of, plus boolean subtract/union and STEP output.

pub mod boolean;
pub mod primitives;
pub mod profiles;
pub mod step;
pub mod types;

pub use types::KernelError;

// The solid type every downstream crate passes around.
pub use truck_modeling::topology::Solid;
