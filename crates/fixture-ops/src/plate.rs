//! Plate composition: blanks, hole-table fold, built-in pin groups.

use std::collections::BTreeMap;

use board_query::Outline;
use fixture_config::{Config, PlateSize, PointMm};
use fixture_types::{HoleSpec, HoleTriple, PlateId, Vec2};
use kernel_bridge::{boolean, primitives, Solid};
use tracing::debug;

use crate::emboss;
use crate::types::OpError;
use crate::OVERCUT_MM;

/// Corner round radius of every plate.
pub const PLATE_CORNER_RADIUS_MM: f64 = 3.0;

/// The four rectangle-corner locations inset from the plate corners by
/// the given offset, in plate coordinates.
pub fn corner_locations(size: &PlateSize, offset: &PointMm) -> [Vec2; 4] {
    let hx = size.width_mm / 2.0 - offset.x_mm;
    let hy = size.height_mm / 2.0 - offset.y_mm;
    [
        Vec2::new(-hx, -hy),
        Vec2::new(hx, -hy),
        Vec2::new(hx, hy),
        Vec2::new(-hx, hy),
    ]
}

/// Cut one hole spec into a plate at every given centre.
pub fn apply_hole_spec(
    plate: &Solid,
    spec: &HoleSpec,
    centers: &[Vec2],
    plate_thickness: f64,
) -> Result<Solid, OpError> {
    match spec {
        HoleSpec::None => Ok(plate.clone()),
        HoleSpec::SimpleHole { diameter_mm } => {
            let mut result = plate.clone();
            for c in centers {
                let drill = primitives::cylinder(
                    c.x,
                    c.y,
                    -OVERCUT_MM,
                    diameter_mm / 2.0,
                    plate_thickness + 2.0 * OVERCUT_MM,
                )?;
                result = boolean::subtract(&result, &drill)?;
            }
            Ok(result)
        }
        HoleSpec::CounterboreHole {
            diameter_mm,
            counterbore_diameter_mm,
            counterbore_depth_mm,
        } => {
            debug!(
                diameter_mm = *diameter_mm,
                counterbore_diameter_mm = *counterbore_diameter_mm,
                counterbore_depth_mm = *counterbore_depth_mm,
                plate_thickness,
                holes = centers.len(),
                "cutting counterbore holes"
            );
            let mut result = plate.clone();
            for c in centers {
                let drill = primitives::cylinder(
                    c.x,
                    c.y,
                    -OVERCUT_MM,
                    diameter_mm / 2.0,
                    plate_thickness + 2.0 * OVERCUT_MM,
                )?;
                result = boolean::subtract(&result, &drill)?;
                // Counterbore sinks from the top face.
                let bore = primitives::cylinder(
                    c.x,
                    c.y,
                    plate_thickness - counterbore_depth_mm,
                    counterbore_diameter_mm / 2.0,
                    counterbore_depth_mm + OVERCUT_MM,
                )?;
                result = boolean::subtract(&result, &bore)?;
            }
            Ok(result)
        }
    }
}

fn hole_table<'a>(config: &'a Config, name: &str) -> Result<&'a HoleTriple, OpError> {
    config
        .annotations
        .get(name)
        .ok_or_else(|| OpError::UnknownAnnotationType {
            name: name.to_string(),
        })
}

fn apply_group(
    plates: &mut [Solid; 3],
    config: &Config,
    triple: &HoleTriple,
    centers: &[Vec2],
) -> Result<(), OpError> {
    for plate_id in PlateId::ALL {
        let i = plate_id.index();
        let spec = triple.for_plate(plate_id);
        if spec.is_none() {
            continue;
        }
        plates[i] = apply_hole_spec(&plates[i], spec, centers, config.plate.thicknesses_mm[i])?;
    }
    Ok(())
}

/// Model the three plates.
///
/// The operation table folds over the blanks in a fixed order: alignment
/// pins, pressure pins, mount pillars, then every annotation group. The
/// annotation positions come in board coordinates; the board-outline
/// centroid maps to the plate centre. Plates A and B additionally get the
/// board-outline groove.
pub fn render_plates(
    config: &Config,
    annotation_positions: &BTreeMap<String, Vec<Vec2>>,
    outline: &Outline,
) -> Result<[Solid; 3], OpError> {
    let size = &config.plate.size;
    let [ta, tb, tc] = config.plate.thicknesses_mm;

    let mut plates = [
        primitives::plate_blank(size.width_mm, size.height_mm, ta, PLATE_CORNER_RADIUS_MM)?,
        primitives::plate_blank(size.width_mm, size.height_mm, tb, PLATE_CORNER_RADIUS_MM)?,
        primitives::plate_blank(size.width_mm, size.height_mm, tc, PLATE_CORNER_RADIUS_MM)?,
    ];

    let pins = &config.plate_alignment_pins;

    let alignment = hole_table(config, &pins.plate_alignment_pin_type)?;
    apply_group(
        &mut plates,
        config,
        alignment,
        &corner_locations(size, &pins.alignment_pin_corner_offset),
    )?;

    let pressure = hole_table(config, &pins.pressure_pin_type)?;
    apply_group(
        &mut plates,
        config,
        pressure,
        &corner_locations(size, &pins.pressure_pin_corner_offset),
    )?;

    let pillar = hole_table(config, &config.tester_board.mount_pillar_type)?;
    let pillar_centers: Vec<Vec2> = config
        .tester_board
        .mount_pillar_locations
        .iter()
        .map(PointMm::as_vec2)
        .collect();
    apply_group(&mut plates, config, pillar, &pillar_centers)?;

    let centroid = outline.centroid();
    for (name, positions) in annotation_positions {
        let triple = hole_table(config, name)?;
        let centers: Vec<Vec2> = positions.iter().map(|p| *p - centroid).collect();
        debug!(annotation = %name, holes = centers.len(), "applying annotation group");
        apply_group(&mut plates, config, triple, &centers)?;
    }

    // Board-outline groove on the two upper plates.
    let centred_outline = outline.translated(-centroid);
    for (i, thickness) in [(0usize, ta), (1usize, tb)] {
        plates[i] = emboss::outline_groove(&plates[i], &centred_outline, thickness)?;
    }

    Ok(plates)
}
