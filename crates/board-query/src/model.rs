//! In-memory board model.
//!
//! A deliberately flat subset of what a board file carries: footprints
//! with their pads, and the graphic shapes on the Edge.Cuts layer. That
//! is everything fixture generation needs.

use fixture_types::Vec2;

/// Parsed board file.
#[derive(Debug, Clone, Default)]
pub struct Board {
    /// Format version atom from the file header, if present.
    pub version: Option<String>,
    /// Board stack thickness from the `general` section, mm.
    pub thickness_mm: Option<f64>,
    pub footprints: Vec<Footprint>,
    /// Graphic shapes on the Edge.Cuts layer only.
    pub edge_shapes: Vec<EdgeShape>,
}

/// A placed footprint.
#[derive(Debug, Clone)]
pub struct Footprint {
    pub uuid: String,
    /// Full library id as written, e.g. `TestFixtures:TestFixture_Probe_1mm`.
    pub lib_id: String,
    pub reference: String,
    /// Layer the footprint sits on, e.g. `F.Cu` or `B.Cu`.
    pub layer: String,
    /// Board position, mm.
    pub position: Vec2,
    /// Rotation in degrees, counterclockwise in board view.
    pub rotation: f64,
    pub pads: Vec<Pad>,
}

impl Footprint {
    /// Footprint name without the library prefix.
    pub fn name(&self) -> &str {
        match self.lib_id.rsplit_once(':') {
            Some((_, name)) => name,
            None => &self.lib_id,
        }
    }
}

/// A single pad, with its absolute board position.
#[derive(Debug, Clone)]
pub struct Pad {
    pub number: String,
    pub kind: PadKind,
    /// Absolute board position, mm (footprint offset and rotation applied).
    pub position: Vec2,
    /// Drill diameter for plated/unplated holes, mm.
    pub drill_mm: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadKind {
    Smd,
    /// Plated through-hole.
    ThruHole,
    /// Non-plated through-hole.
    NpThruHole,
    Connect,
}

/// A graphic shape on the Edge.Cuts layer.
#[derive(Debug, Clone)]
pub enum EdgeShape {
    Line {
        start: Vec2,
        end: Vec2,
    },
    /// Arc through three points (KiCad 7+ start/mid/end form).
    Arc {
        start: Vec2,
        mid: Vec2,
        end: Vec2,
    },
    Rect {
        start: Vec2,
        end: Vec2,
    },
    Circle {
        center: Vec2,
        /// Any point on the circumference.
        end: Vec2,
    },
}
