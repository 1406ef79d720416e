//! `.kicad_pcb` file parser.
//!
//! Walks the top-level list once and dispatches on tags, ignoring
//! everything the fixture generator has no use for (nets, traces, zones).
//! Pad positions are converted to absolute board coordinates here, so
//! downstream code never sees footprint-relative offsets.

use fixture_types::Vec2;
use uuid::Uuid;

use crate::error::BoardError;
use crate::model::{Board, EdgeShape, Footprint, Pad, PadKind};
use crate::sexpr::{self, SExpr};

const EDGE_CUTS: &str = "Edge.Cuts";

/// Parse board text into the in-memory model.
pub fn parse_board(input: &str) -> Result<Board, BoardError> {
    let root = sexpr::parse_document(input)?;

    match root.tag() {
        Some("kicad_pcb") => {}
        other => {
            return Err(BoardError::NotABoard {
                found: other.unwrap_or("<none>").to_string(),
            })
        }
    }

    let mut board = Board {
        version: root.get_str("version").map(str::to_string),
        thickness_mm: root.get("general").and_then(|g| g.get_f64("thickness")),
        ..Board::default()
    };

    for item in root.as_list().unwrap_or(&[]).iter().skip(1) {
        match item.tag() {
            Some("footprint") | Some("module") => {
                board.footprints.push(parse_footprint(item)?);
            }
            Some("gr_line") | Some("gr_arc") | Some("gr_rect") | Some("gr_circle") => {
                if item.get_str("layer") == Some(EDGE_CUTS) {
                    if let Some(shape) = parse_edge_shape(item) {
                        board.edge_shapes.push(shape);
                    }
                }
            }
            _ => {}
        }
    }

    Ok(board)
}

fn parse_footprint(sexpr: &SExpr) -> Result<Footprint, BoardError> {
    let lib_id = sexpr
        .atom_at(1)
        .ok_or(BoardError::MissingField { field: "footprint library id" })?
        .to_string();

    let (position, rotation) = parse_at(sexpr).ok_or(BoardError::MissingField {
        field: "footprint position",
    })?;

    let layer = sexpr.get_str("layer").unwrap_or("F.Cu").to_string();
    let uuid = sexpr
        .get_str("uuid")
        .or_else(|| sexpr.get_str("tstamp"))
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut reference = String::new();
    for prop in sexpr.get_all("property") {
        if prop.atom_at(1) == Some("Reference") {
            if let Some(val) = prop.atom_at(2) {
                reference = val.to_string();
            }
        }
    }
    // Older files carry the reference as (fp_text reference "R1" ...).
    if reference.is_empty() {
        for text in sexpr.get_all("fp_text") {
            if text.atom_at(1) == Some("reference") {
                if let Some(val) = text.atom_at(2) {
                    reference = val.to_string();
                }
            }
        }
    }

    // A pad that fails to parse contributes nothing; the footprint itself
    // survives. This is the single swallow point of the parser.
    let mut pads = Vec::new();
    for pad_expr in sexpr.get_all("pad") {
        if let Ok(pad) = parse_pad(pad_expr, position, rotation) {
            pads.push(pad);
        }
    }

    Ok(Footprint {
        uuid,
        lib_id,
        reference,
        layer,
        position,
        rotation,
        pads,
    })
}

fn parse_pad(sexpr: &SExpr, fp_pos: Vec2, fp_rot: f64) -> Result<Pad, BoardError> {
    let number = sexpr
        .atom_at(1)
        .ok_or(BoardError::MissingField { field: "pad number" })?
        .to_string();

    let kind = match sexpr.atom_at(2) {
        Some("smd") => PadKind::Smd,
        Some("thru_hole") => PadKind::ThruHole,
        Some("np_thru_hole") => PadKind::NpThruHole,
        Some("connect") => PadKind::Connect,
        _ => return Err(BoardError::MissingField { field: "pad type" }),
    };

    let (offset, _pad_rot) =
        parse_at(sexpr).ok_or(BoardError::MissingField { field: "pad position" })?;

    let drill_mm = sexpr.get("drill").and_then(|d| {
        // (drill 1.0) or (drill oval 1.0 1.6); take the first numeric.
        d.as_list()?
            .iter()
            .skip(1)
            .find_map(|a| a.as_atom()?.parse::<f64>().ok())
    });

    Ok(Pad {
        number,
        kind,
        position: fp_pos + offset.rotated_deg(fp_rot),
        drill_mm,
    })
}

/// Parse an `(at x y [rot])` node into position and rotation.
fn parse_at(sexpr: &SExpr) -> Option<(Vec2, f64)> {
    let at = sexpr.get("at")?;
    let x = at.f64_at(1)?;
    let y = at.f64_at(2)?;
    let rot = at.f64_at(3).unwrap_or(0.0);
    Some((Vec2::new(x, y), rot))
}

fn parse_edge_shape(sexpr: &SExpr) -> Option<EdgeShape> {
    let point = |key: &str| -> Option<Vec2> {
        let node = sexpr.get(key)?;
        Some(Vec2::new(node.f64_at(1)?, node.f64_at(2)?))
    };

    match sexpr.tag()? {
        "gr_line" => Some(EdgeShape::Line {
            start: point("start")?,
            end: point("end")?,
        }),
        "gr_arc" => Some(EdgeShape::Arc {
            start: point("start")?,
            mid: point("mid")?,
            end: point("end")?,
        }),
        "gr_rect" => Some(EdgeShape::Rect {
            start: point("start")?,
            end: point("end")?,
        }),
        "gr_circle" => Some(EdgeShape::Circle {
            center: point("center")?,
            end: point("end")?,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_BOARD: &str = r#"
        (kicad_pcb (version 20240108) (generator "pcbnew")
          (general (thickness 1.6))
          (footprint "TestFixtures:TestFixture_Probe_1mm"
            (layer "B.Cu")
            (uuid "c0ffee00-0000-0000-0000-000000000001")
            (at 110.0 60.0)
            (property "Reference" "FID1" (at 0 0) (layer "B.SilkS"))
          )
          (footprint "TestPoint:TestPoint_Pad_D1.0mm"
            (layer "B.Cu")
            (at 120.0 70.0 90)
            (property "Reference" "TP1" (at 0 0) (layer "B.SilkS"))
            (pad "1" smd circle (at 2.0 0.0) (size 1.0 1.0) (layers "B.Cu"))
          )
          (footprint "Resistor_THT:R_Axial"
            (layer "F.Cu")
            (at 130.0 80.0)
            (property "Reference" "R1" (at 0 0) (layer "F.SilkS"))
            (pad "1" thru_hole circle (at 0 0) (size 1.7 1.7) (drill 1.0) (layers "*.Cu"))
            (pad "2" thru_hole circle (at 7.62 0) (size 1.7 1.7) (drill 1.0) (layers "*.Cu"))
          )
          (gr_line (start 100 50) (end 150 50) (layer "Edge.Cuts") (width 0.1))
          (gr_line (start 150 50) (end 150 90) (layer "Edge.Cuts") (width 0.1))
          (gr_line (start 150 90) (end 100 90) (layer "Edge.Cuts") (width 0.1))
          (gr_line (start 100 90) (end 100 50) (layer "Edge.Cuts") (width 0.1))
          (gr_line (start 0 0) (end 1 1) (layer "F.SilkS") (width 0.1))
        )
    "#;

    #[test]
    fn parses_footprints_and_edge_shapes() {
        let board = parse_board(MINIMAL_BOARD).unwrap();
        assert_eq!(board.footprints.len(), 3);
        // The silkscreen line must not land in edge_shapes.
        assert_eq!(board.edge_shapes.len(), 4);
        assert_eq!(board.version.as_deref(), Some("20240108"));
        assert_eq!(board.thickness_mm, Some(1.6));
    }

    #[test]
    fn pad_positions_are_absolute_and_rotated() {
        let board = parse_board(MINIMAL_BOARD).unwrap();
        let tp = &board.footprints[1];
        assert_eq!(tp.name(), "TestPoint_Pad_D1.0mm");
        // Offset (2, 0) under a 90 degree footprint rotation lands at
        // (0, -2) relative, so (120, 68) absolute.
        let pad = &tp.pads[0];
        assert!((pad.position.x - 120.0).abs() < 1e-9);
        assert!((pad.position.y - 68.0).abs() < 1e-9);
        assert_eq!(pad.kind, PadKind::Smd);
    }

    #[test]
    fn thru_hole_pads_carry_drill() {
        let board = parse_board(MINIMAL_BOARD).unwrap();
        let r1 = &board.footprints[2];
        assert_eq!(r1.pads.len(), 2);
        assert_eq!(r1.pads[0].kind, PadKind::ThruHole);
        assert_eq!(r1.pads[0].drill_mm, Some(1.0));
        assert!((r1.pads[1].position.x - 137.62).abs() < 1e-9);
    }

    #[test]
    fn non_board_document_is_rejected() {
        let err = parse_board("(kicad_sch (version 1))").unwrap_err();
        assert!(matches!(err, BoardError::NotABoard { .. }));
    }

    #[test]
    fn footprint_without_pads_is_kept() {
        let board = parse_board(MINIMAL_BOARD).unwrap();
        assert!(board.footprints[0].pads.is_empty());
    }
}
