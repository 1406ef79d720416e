//! Board queries that feed fixture generation.
//!
//! Annotation footprints are placeholder components whose library name
//! starts with `TestFixture_`; their positions dictate where holes get
//! cut. The remaining queries find pads the designer did not annotate,
//! so they can be folded into configurable auto-annotation groups.

use std::collections::BTreeMap;

use fixture_types::Vec2;

use crate::model::{Board, Footprint, Pad, PadKind};

const ANNOTATION_PREFIX: &str = "TestFixture_";
const TEST_POINT_PREFIX: &str = "TestPoint_";
const MOUNTING_HOLE_PREFIX: &str = "MountingHole_";
const BOTTOM_COPPER: &str = "B.Cu";

/// A pad with no annotation footprint within this radius counts as
/// unannotated.
pub const DEFAULT_ANNOTATION_RADIUS_MM: f64 = 1.0;

/// All annotation footprints on the board.
pub fn annotation_footprints(board: &Board) -> Vec<&Footprint> {
    board
        .footprints
        .iter()
        .filter(|fp| fp.name().starts_with(ANNOTATION_PREFIX))
        .collect()
}

/// SMD pads of test-point footprints on the bottom side of the board.
pub fn test_point_smd_pads(board: &Board) -> Vec<&Pad> {
    board
        .footprints
        .iter()
        .filter(|fp| fp.name().starts_with(TEST_POINT_PREFIX) && fp.layer == BOTTOM_COPPER)
        .flat_map(|fp| fp.pads.iter())
        .filter(|pad| pad.kind == PadKind::Smd)
        .collect()
}

/// All plated through-hole pads, mounting holes excluded.
pub fn tht_pads(board: &Board) -> Vec<&Pad> {
    board
        .footprints
        .iter()
        .filter(|fp| !fp.name().starts_with(MOUNTING_HOLE_PREFIX))
        .flat_map(|fp| fp.pads.iter())
        .filter(|pad| pad.kind == PadKind::ThruHole)
        .collect()
}

/// Pads strictly farther than `radius_mm` from every annotation footprint.
///
/// A pad with any annotation at distance < radius is considered covered by
/// that annotation and dropped.
pub fn unannotated_pads<'a>(
    pads: &[&'a Pad],
    annotations: &[&Footprint],
    radius_mm: f64,
) -> Vec<&'a Pad> {
    pads.iter()
        .filter(|pad| {
            annotations
                .iter()
                .all(|fp| fp.position.distance(pad.position) >= radius_mm)
        })
        .copied()
        .collect()
}

/// Annotation positions grouped by annotation type name.
///
/// Every distinct footprint name seen in the input appears as a key;
/// iteration order is deterministic.
pub fn annotation_positions(annotations: &[&Footprint]) -> BTreeMap<String, Vec<Vec2>> {
    let mut groups: BTreeMap<String, Vec<Vec2>> = BTreeMap::new();
    for fp in annotations {
        groups
            .entry(fp.name().to_string())
            .or_default()
            .push(fp.position);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn footprint(lib_id: &str, layer: &str, x: f64, y: f64) -> Footprint {
        Footprint {
            uuid: String::new(),
            lib_id: lib_id.to_string(),
            reference: String::new(),
            layer: layer.to_string(),
            position: Vec2::new(x, y),
            rotation: 0.0,
            pads: Vec::new(),
        }
    }

    fn pad(kind: PadKind, x: f64, y: f64) -> Pad {
        Pad {
            number: "1".to_string(),
            kind,
            position: Vec2::new(x, y),
            drill_mm: None,
        }
    }

    #[test]
    fn annotation_filter_matches_prefix_only() {
        let board = Board {
            footprints: vec![
                footprint("Lib:TestFixture_Probe", "B.Cu", 0.0, 0.0),
                footprint("Lib:TestFixture_Pin", "F.Cu", 1.0, 0.0),
                footprint("Lib:TestPoint_Pad", "B.Cu", 2.0, 0.0),
                footprint("Lib:R_0402", "F.Cu", 3.0, 0.0),
            ],
            ..Board::default()
        };
        let names: Vec<&str> = annotation_footprints(&board)
            .iter()
            .map(|fp| fp.name())
            .collect();
        assert_eq!(names, vec!["TestFixture_Probe", "TestFixture_Pin"]);
    }

    #[test]
    fn test_point_pads_require_bottom_layer_and_smd() {
        let mut bottom = footprint("Lib:TestPoint_Pad", "B.Cu", 0.0, 0.0);
        bottom.pads = vec![pad(PadKind::Smd, 0.0, 0.0), pad(PadKind::ThruHole, 1.0, 0.0)];
        let mut top = footprint("Lib:TestPoint_Pad", "F.Cu", 5.0, 0.0);
        top.pads = vec![pad(PadKind::Smd, 5.0, 0.0)];

        let board = Board {
            footprints: vec![bottom, top],
            ..Board::default()
        };
        let pads = test_point_smd_pads(&board);
        assert_eq!(pads.len(), 1);
        assert_eq!(pads[0].position, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn tht_pads_skip_mounting_holes() {
        let mut r1 = footprint("Lib:R_Axial", "F.Cu", 0.0, 0.0);
        r1.pads = vec![pad(PadKind::ThruHole, 0.0, 0.0), pad(PadKind::Smd, 1.0, 0.0)];
        let mut mh = footprint("Lib:MountingHole_3.2mm", "F.Cu", 9.0, 9.0);
        mh.pads = vec![pad(PadKind::ThruHole, 9.0, 9.0)];

        let board = Board {
            footprints: vec![r1, mh],
            ..Board::default()
        };
        let pads = tht_pads(&board);
        assert_eq!(pads.len(), 1);
        assert_eq!(pads[0].position, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn unannotated_excludes_pads_within_radius() {
        let annotations_owned = vec![footprint("Lib:TestFixture_Probe", "B.Cu", 0.0, 0.0)];
        let annotations: Vec<&Footprint> = annotations_owned.iter().collect();

        let near = pad(PadKind::Smd, 0.5, 0.0);
        let far = pad(PadKind::Smd, 3.0, 0.0);
        let pads = vec![&near, &far];

        let result = unannotated_pads(&pads, &annotations, DEFAULT_ANNOTATION_RADIUS_MM);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].position, Vec2::new(3.0, 0.0));

        // Every returned pad is strictly farther than the radius from
        // every annotation.
        for pad in &result {
            for fp in &annotations {
                assert!(fp.position.distance(pad.position) >= DEFAULT_ANNOTATION_RADIUS_MM);
            }
        }
    }

    #[test]
    fn unannotated_with_no_annotations_returns_everything() {
        let near = pad(PadKind::Smd, 0.1, 0.0);
        let pads = vec![&near];
        let result = unannotated_pads(&pads, &[], DEFAULT_ANNOTATION_RADIUS_MM);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn grouping_preserves_all_distinct_keys() {
        let owned = vec![
            footprint("Lib:TestFixture_Probe", "B.Cu", 0.0, 0.0),
            footprint("Lib:TestFixture_Probe", "B.Cu", 1.0, 0.0),
            footprint("Lib:TestFixture_Pin", "F.Cu", 2.0, 0.0),
        ];
        let annotations: Vec<&Footprint> = owned.iter().collect();
        let groups = annotation_positions(&annotations);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups["TestFixture_Probe"].len(), 2);
        assert_eq!(groups["TestFixture_Pin"].len(), 1);

        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, annotations.len());
    }
}
