//! Test fixtures: a small board file and a matching configuration.

use thiserror::Error;

/// Unified error type for harness assertions.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("tessellation produced an empty mesh")]
    EmptyMesh,
}

/// A small but complete board: rectangular outline, two probe
/// annotations, a covered and an uncovered test point, a through-hole
/// resistor, and a mounting hole.
///
/// Outline spans (100, 50) to (160, 100); its centroid is (130, 75).
pub fn sample_board() -> &'static str {
    r#"
    (kicad_pcb (version 20240108) (generator "pcbnew")
      (general (thickness 1.6))
      (footprint "TestFixtures:TestFixture_Probe_1mm"
        (layer "B.Cu")
        (uuid "c0ffee00-0000-0000-0000-000000000001")
        (at 110.0 60.0)
        (property "Reference" "FID1" (at 0 0) (layer "B.SilkS"))
      )
      (footprint "TestFixtures:TestFixture_Probe_1mm"
        (layer "B.Cu")
        (uuid "c0ffee00-0000-0000-0000-000000000002")
        (at 140.0 85.0)
        (property "Reference" "FID2" (at 0 0) (layer "B.SilkS"))
      )
      (footprint "TestPoint:TestPoint_Pad_D1.0mm"
        (layer "B.Cu")
        (uuid "c0ffee00-0000-0000-0000-000000000003")
        (at 110.0 60.0)
        (property "Reference" "TP1" (at 0 0) (layer "B.SilkS"))
        (pad "1" smd circle (at 0 0) (size 1.0 1.0) (layers "B.Cu"))
      )
      (footprint "TestPoint:TestPoint_Pad_D1.0mm"
        (layer "B.Cu")
        (uuid "c0ffee00-0000-0000-0000-000000000004")
        (at 150.0 90.0)
        (property "Reference" "TP2" (at 0 0) (layer "B.SilkS"))
        (pad "1" smd circle (at 0 0) (size 1.0 1.0) (layers "B.Cu"))
      )
      (footprint "Resistor_THT:R_Axial_DIN0207"
        (layer "F.Cu")
        (uuid "c0ffee00-0000-0000-0000-000000000005")
        (at 120.0 90.0)
        (property "Reference" "R1" (at 0 0) (layer "F.SilkS"))
        (pad "1" thru_hole circle (at 0 0) (size 1.7 1.7) (drill 1.0) (layers "*.Cu"))
        (pad "2" thru_hole circle (at 7.62 0) (size 1.7 1.7) (drill 1.0) (layers "*.Cu"))
      )
      (footprint "MountingHole:MountingHole_3.2mm_M3"
        (layer "F.Cu")
        (uuid "c0ffee00-0000-0000-0000-000000000006")
        (at 105.0 55.0)
        (property "Reference" "H1" (at 0 0) (layer "F.SilkS"))
        (pad "1" thru_hole circle (at 0 0) (size 6.0 6.0) (drill 3.2) (layers "*.Cu"))
      )
      (gr_line (start 100 50) (end 160 50) (layer "Edge.Cuts") (width 0.1))
      (gr_line (start 160 50) (end 160 100) (layer "Edge.Cuts") (width 0.1))
      (gr_line (start 160 100) (end 100 100) (layer "Edge.Cuts") (width 0.1))
      (gr_line (start 100 100) (end 100 50) (layer "Edge.Cuts") (width 0.1))
    )
    "#
}

/// Configuration matching [`sample_board`]: both auto-annotation types
/// feed the probe hole table.
pub fn sample_config() -> &'static str {
    r#"
[project]
name = "demoboard"
test_point_auto_annotation_type = "TestFixture_Probe_1mm"
tht_pad_auto_annotation_type = "TestFixture_Probe_1mm"

[plate]
thicknesses_mm = [5.0, 8.0, 5.0]

[plate.size]
width_mm = 160.0
height_mm = 120.0

[pcb]
thickness_mm = 1.6
top_clearance_mm = 3.5
bottom_clearance_mm = 6.0

[plate_alignment_pins]
plate_alignment_pin_type = "TestFixture_AlignmentPin_3mm"
pressure_pin_type = "TestFixture_PressurePin_M3"
pressure_pin_screw_hole_diameter_mm = 2.5

[plate_alignment_pins.alignment_pin_corner_offset]
x_mm = 8.0
y_mm = 8.0

[plate_alignment_pins.pressure_pin_corner_offset]
x_mm = 16.0
y_mm = 16.0

[tester_board]
offset_mm = 20.0
diameter_mm = 8.0
screw_hole_diameter_mm = 3.2
mount_pillar_type = "TestFixture_MountPillar_M3"
mount_pillar_locations = [
  { x_mm = -60.0, y_mm = -40.0 },
  { x_mm = 60.0, y_mm = -40.0 },
  { x_mm = 60.0, y_mm = 40.0 },
  { x_mm = -60.0, y_mm = 40.0 },
]

[annotations]
TestFixture_Probe_1mm = [
  { type = "CounterboreHole", diameter_mm = 1.7, counterbore_diameter_mm = 3.0, counterbore_depth_mm = 2.5 },
  { type = "SimpleHole", diameter_mm = 1.4 },
  { type = "None" },
]
TestFixture_AlignmentPin_3mm = [
  { type = "SimpleHole", diameter_mm = 3.0 },
  { type = "SimpleHole", diameter_mm = 3.0 },
  { type = "SimpleHole", diameter_mm = 3.0 },
]
TestFixture_PressurePin_M3 = [
  { type = "CounterboreHole", diameter_mm = 3.2, counterbore_diameter_mm = 6.0, counterbore_depth_mm = 3.0 },
  { type = "None" },
  { type = "None" },
]
TestFixture_MountPillar_M3 = [
  { type = "None" },
  { type = "SimpleHole", diameter_mm = 3.2 },
  { type = "CounterboreHole", diameter_mm = 3.2, counterbore_diameter_mm = 6.0, counterbore_depth_mm = 3.5 },
]
"#
}

/// Parse and validate the sample config.
pub fn load_sample_config() -> fixture_config::Config {
    let config: fixture_config::Config =
        toml::from_str(sample_config()).expect("sample config must parse");
    config.validate().expect("sample config must validate");
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_is_valid() {
        let config = load_sample_config();
        assert_eq!(config.project.name, "demoboard");
    }

    #[test]
    fn sample_board_parses() {
        let board = board_query::parse_board(sample_board()).unwrap();
        assert_eq!(board.footprints.len(), 6);
        assert_eq!(board.edge_shapes.len(), 4);
    }
}
