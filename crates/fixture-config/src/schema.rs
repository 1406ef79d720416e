use std::collections::BTreeMap;

use fixture_types::{HoleSpec, HoleTriple, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub project: ProjectConfig,
    pub plate: PlateConfig,
    pub pcb: PcbConfig,
    pub plate_alignment_pins: AlignmentPinConfig,
    pub tester_board: TesterBoardConfig,
    /// Annotation type name → hole spec per plate (A, B, C).
    pub annotations: BTreeMap<String, HoleTriple>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    /// Annotation type that adopts unannotated bottom-side test points.
    pub test_point_auto_annotation_type: Option<String>,
    /// Annotation type that adopts unannotated through-hole pads.
    pub tht_pad_auto_annotation_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateConfig {
    pub size: PlateSize,
    /// Plate thicknesses in A, B, C order.
    pub thicknesses_mm: [f64; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PcbConfig {
    pub thickness_mm: f64,
    /// Clearance above the board; also the short pressure-pin length.
    pub top_clearance_mm: f64,
    pub bottom_clearance_mm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointMm {
    pub x_mm: f64,
    pub y_mm: f64,
}

impl PointMm {
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x_mm, self.y_mm)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentPinConfig {
    /// Inset of the alignment pin holes from the plate corners.
    pub alignment_pin_corner_offset: PointMm,
    /// Inset of the pressure pin holes from the plate corners.
    pub pressure_pin_corner_offset: PointMm,
    pub plate_alignment_pin_type: String,
    pub pressure_pin_type: String,
    pub pressure_pin_screw_hole_diameter_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TesterBoardConfig {
    /// Stand-off height of the tester board below the fixture, mm.
    pub offset_mm: f64,
    /// Mount pillar outer diameter.
    pub diameter_mm: f64,
    pub screw_hole_diameter_mm: f64,
    pub mount_pillar_type: String,
    /// Pillar positions in plate coordinates (plate centre is the origin).
    pub mount_pillar_locations: Vec<PointMm>,
}

impl Config {
    /// Value-level validation, run after deserialization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |message: String| Err(ConfigError::Validation { message });

        if self.project.name.trim().is_empty() {
            return fail("project.name must not be empty".into());
        }

        let size = &self.plate.size;
        if size.width_mm <= 0.0 || size.height_mm <= 0.0 {
            return fail(format!(
                "plate.size must be positive, got {} x {}",
                size.width_mm, size.height_mm
            ));
        }
        for (i, t) in self.plate.thicknesses_mm.iter().enumerate() {
            if *t <= 0.0 {
                return fail(format!(
                    "plate.thicknesses_mm[{i}] must be positive, got {t}"
                ));
            }
        }

        if self.pcb.thickness_mm <= 0.0 {
            return fail(format!(
                "pcb.thickness_mm must be positive, got {}",
                self.pcb.thickness_mm
            ));
        }
        if self.pcb.top_clearance_mm <= 0.0 {
            return fail(format!(
                "pcb.top_clearance_mm must be positive, got {}",
                self.pcb.top_clearance_mm
            ));
        }
        if self.pcb.bottom_clearance_mm < 0.0 {
            return fail(format!(
                "pcb.bottom_clearance_mm must not be negative, got {}",
                self.pcb.bottom_clearance_mm
            ));
        }

        let pins = &self.plate_alignment_pins;
        for (label, offset) in [
            ("alignment_pin_corner_offset", &pins.alignment_pin_corner_offset),
            ("pressure_pin_corner_offset", &pins.pressure_pin_corner_offset),
        ] {
            if offset.x_mm <= 0.0
                || offset.y_mm <= 0.0
                || 2.0 * offset.x_mm >= size.width_mm
                || 2.0 * offset.y_mm >= size.height_mm
            {
                return fail(format!(
                    "plate_alignment_pins.{label} must lie inside the plate, got ({}, {})",
                    offset.x_mm, offset.y_mm
                ));
            }
        }
        if pins.pressure_pin_screw_hole_diameter_mm <= 0.0 {
            return fail(format!(
                "plate_alignment_pins.pressure_pin_screw_hole_diameter_mm must be positive, got {}",
                pins.pressure_pin_screw_hole_diameter_mm
            ));
        }

        let tester = &self.tester_board;
        if tester.offset_mm <= 0.0 || tester.diameter_mm <= 0.0 {
            return fail(format!(
                "tester_board offset/diameter must be positive, got {} / {}",
                tester.offset_mm, tester.diameter_mm
            ));
        }
        if tester.screw_hole_diameter_mm <= 0.0
            || tester.screw_hole_diameter_mm >= tester.diameter_mm
        {
            return fail(format!(
                "tester_board.screw_hole_diameter_mm must fit inside the pillar, got {} (pillar {})",
                tester.screw_hole_diameter_mm, tester.diameter_mm
            ));
        }

        // Every referenced annotation type must have a hole table entry.
        let referenced = [
            Some(&pins.plate_alignment_pin_type),
            Some(&pins.pressure_pin_type),
            Some(&tester.mount_pillar_type),
            self.project.test_point_auto_annotation_type.as_ref(),
            self.project.tht_pad_auto_annotation_type.as_ref(),
        ];
        for name in referenced.into_iter().flatten() {
            if !self.annotations.contains_key(name) {
                return fail(format!("annotation type `{name}` is referenced but not defined"));
            }
        }

        for (name, triple) in &self.annotations {
            for (plate, spec) in triple.iter() {
                match spec {
                    HoleSpec::None => {}
                    HoleSpec::SimpleHole { diameter_mm } => {
                        if *diameter_mm <= 0.0 {
                            return fail(format!(
                                "annotations.{name} plate {plate}: diameter_mm must be positive, got {diameter_mm}"
                            ));
                        }
                    }
                    HoleSpec::CounterboreHole {
                        diameter_mm,
                        counterbore_diameter_mm,
                        counterbore_depth_mm,
                    } => {
                        if *diameter_mm <= 0.0 || *counterbore_depth_mm <= 0.0 {
                            return fail(format!(
                                "annotations.{name} plate {plate}: hole dimensions must be positive"
                            ));
                        }
                        if counterbore_diameter_mm <= diameter_mm {
                            return fail(format!(
                                "annotations.{name} plate {plate}: counterbore diameter {counterbore_diameter_mm} must exceed hole diameter {diameter_mm}"
                            ));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
