//! Board-outline groove embossed into the upper plates.
//!
//! The assembled board outline, grown by a clearance margin, is sunk a
//! fraction of a millimetre into the plate top face. The groove marks
//! where the board sits when the fixture is loaded.

use board_query::Outline;
use kernel_bridge::{boolean, primitives, Solid};

use crate::types::OpError;
use crate::OVERCUT_MM;

/// Clearance added around the board outline.
pub const OUTLINE_MARGIN_MM: f64 = 0.5;

/// Groove depth below the plate top face.
pub const GROOVE_DEPTH_MM: f64 = 0.6;

/// Sink the outline groove into a plate's top face.
///
/// The outline must already be in plate coordinates (centroid at the
/// plate centre).
pub fn outline_groove(
    plate: &Solid,
    outline: &Outline,
    plate_thickness: f64,
) -> Result<Solid, OpError> {
    let grown = outline.offset(OUTLINE_MARGIN_MM);
    let cutter = primitives::polygon_prism(
        grown.points(),
        plate_thickness - GROOVE_DEPTH_MM,
        GROOVE_DEPTH_MM + OVERCUT_MM,
    )?;
    Ok(boolean::subtract(plate, &cutter)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixture_types::Vec2;

    #[test]
    fn groove_adds_faces_to_the_plate() {
        let plate = primitives::plate_blank(60.0, 40.0, 5.0, 0.0).unwrap();
        let outline = Outline::new(vec![
            Vec2::new(-15.0, -10.0),
            Vec2::new(15.0, -10.0),
            Vec2::new(15.0, 10.0),
            Vec2::new(-15.0, 10.0),
        ]);
        let grooved = outline_groove(&plate, &outline, 5.0).unwrap();
        assert!(
            grooved.boundaries()[0].face_iter().count()
                > plate.boundaries()[0].face_iter().count()
        );
    }
}
