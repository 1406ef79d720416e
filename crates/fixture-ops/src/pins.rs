//! The separately machined parts: pressure pins and mount pillars.

use fixture_config::TesterBoardConfig;
use kernel_bridge::{boolean, primitives, profiles, Solid};
use tracing::debug;

use crate::types::OpError;
use crate::OVERCUT_MM;

/// Cross-section proportions of a pressure pin.
///
/// The pin body lofts from a wide square base to a narrow square tip;
/// the lateral corners are chamfered, so both cross-sections are
/// octagons. An axial screw hole enters from the base.
#[derive(Debug, Clone, Copy)]
pub struct PressurePinProfile {
    pub base_width_mm: f64,
    pub tip_width_mm: f64,
    pub chamfer_mm: f64,
    /// Screw hole depth into the pin from the base.
    pub screw_hole_depth_mm: f64,
}

impl Default for PressurePinProfile {
    fn default() -> Self {
        Self {
            base_width_mm: 6.0,
            tip_width_mm: 3.0,
            chamfer_mm: 1.0,
            screw_hole_depth_mm: 5.0,
        }
    }
}

/// Model a pressure pin of the given length.
pub fn pressure_pin(
    length_mm: f64,
    screw_hole_diameter_mm: f64,
    profile: &PressurePinProfile,
) -> Result<Solid, OpError> {
    debug!(length_mm, screw_hole_diameter_mm, "modeling pressure pin");

    let base = profiles::chamfered_square(profile.base_width_mm, profile.chamfer_mm);
    let tip = profiles::chamfered_square(profile.tip_width_mm, profile.chamfer_mm);
    let body = primitives::prismoid(&base, &tip, 0.0, length_mm)?;

    let depth = profile.screw_hole_depth_mm.min(length_mm + OVERCUT_MM);
    let screw_hole = primitives::cylinder(
        0.0,
        0.0,
        -OVERCUT_MM,
        screw_hole_diameter_mm / 2.0,
        depth + OVERCUT_MM,
    )?;
    Ok(boolean::subtract(&body, &screw_hole)?)
}

/// Model the tester-board mount pillar: an annular stand-off with a
/// through screw hole.
pub fn mount_pillar(tester: &TesterBoardConfig) -> Result<Solid, OpError> {
    debug!(
        offset_mm = tester.offset_mm,
        diameter_mm = tester.diameter_mm,
        "modeling mount pillar"
    );
    Ok(primitives::tube(
        0.0,
        0.0,
        0.0,
        tester.diameter_mm / 2.0,
        tester.screw_hole_diameter_mm / 2.0,
        tester.offset_mm,
    )?)
}
