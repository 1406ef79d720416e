//! Tessellation-based geometry oracles.
//!
//! Exact B-rep assertions are brittle across kernel versions; meshing a
//! solid and checking bounding box, volume, and watertightness is robust
//! and catches the failures that matter for manufactured parts.

use std::collections::HashMap;

use kernel_bridge::Solid;
use truck_meshalgo::prelude::*;
use truck_meshalgo::tessellation::{MeshableShape, MeshedShape};

use crate::helpers::HarnessError;

/// Mesh a solid at the given tolerance.
pub fn tessellate(solid: &Solid, tolerance: f64) -> PolygonMesh {
    solid.triangulation(tolerance).to_polygon()
}

/// Axis-aligned bounding box of a mesh. Returns (min, max).
pub fn mesh_bounding_box(mesh: &PolygonMesh) -> ([f64; 3], [f64; 3]) {
    let mut min = [f64::MAX; 3];
    let mut max = [f64::MIN; 3];
    for p in mesh.positions() {
        for i in 0..3 {
            min[i] = min[i].min(p[i]);
            max[i] = max[i].max(p[i]);
        }
    }
    (min, max)
}

/// Signed volume of a triangle mesh by the divergence theorem.
///
/// Meaningful for closed meshes only.
pub fn mesh_volume(mesh: &PolygonMesh) -> f64 {
    let positions = mesh.positions();
    let mut volume = 0.0;
    for tri in mesh.tri_faces() {
        let p0 = positions[tri[0].pos];
        let p1 = positions[tri[1].pos];
        let p2 = positions[tri[2].pos];
        volume += p0[0] * (p1[1] * p2[2] - p2[1] * p1[2])
            + p1[0] * (p2[1] * p0[2] - p0[1] * p2[2])
            + p2[0] * (p0[1] * p1[2] - p1[1] * p0[2]);
    }
    (volume / 6.0).abs()
}

/// True if every undirected edge is shared by exactly two triangles.
///
/// Edges are keyed by quantized endpoint positions, not vertex indices:
/// per-face tessellation duplicates vertices along face boundaries, but
/// the boundary sample points themselves coincide.
pub fn is_watertight(mesh: &PolygonMesh) -> bool {
    let positions = mesh.positions();

    let mut edge_counts: HashMap<_, usize> = HashMap::new();
    for tri in mesh.tri_faces() {
        let mut keys = [(0i64, 0i64, 0i64); 3];
        for (k, v) in tri.iter().enumerate() {
            let p = positions[v.pos];
            keys[k] = (
                (p[0] / 1e-6).round() as i64,
                (p[1] / 1e-6).round() as i64,
                (p[2] / 1e-6).round() as i64,
            );
        }
        for k in 0..3 {
            let (a, b) = (keys[k], keys[(k + 1) % 3]);
            if a == b {
                // Degenerate sliver; skip rather than poison the count.
                continue;
            }
            let key = (a.min(b), a.max(b));
            *edge_counts.entry(key).or_insert(0) += 1;
        }
    }
    !edge_counts.is_empty() && edge_counts.values().all(|&c| c == 2)
}

/// Assert the mesh bounding box matches expectations within tolerance.
pub fn assert_bounding_box(
    mesh: &PolygonMesh,
    expected_min: [f64; 3],
    expected_max: [f64; 3],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    if mesh.positions().is_empty() {
        return Err(HarnessError::EmptyMesh);
    }
    let (actual_min, actual_max) = mesh_bounding_box(mesh);
    for i in 0..3 {
        if (actual_min[i] - expected_min[i]).abs() > tol {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] bounding box min[{}]: expected {:.3}, got {:.3} (tol={})",
                    ctx, i, expected_min[i], actual_min[i], tol,
                ),
            });
        }
        if (actual_max[i] - expected_max[i]).abs() > tol {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] bounding box max[{}]: expected {:.3}, got {:.3} (tol={})",
                    ctx, i, expected_max[i], actual_max[i], tol,
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_bridge::primitives;

    #[test]
    fn box_mesh_volume_matches_dimensions() {
        let solid = primitives::plate_blank(10.0, 8.0, 2.0, 0.0).unwrap();
        let mesh = tessellate(&solid, 0.01);
        let volume = mesh_volume(&mesh);
        assert!(
            (volume - 160.0).abs() < 0.5,
            "10 x 8 x 2 box should have volume 160, got {volume}"
        );
    }

    #[test]
    fn box_mesh_is_watertight() {
        let solid = primitives::plate_blank(10.0, 8.0, 2.0, 0.0).unwrap();
        let mesh = tessellate(&solid, 0.01);
        assert!(is_watertight(&mesh));
    }

    #[test]
    fn rounded_plate_volume_is_below_the_sharp_box() {
        let sharp = tessellate(&primitives::plate_blank(20.0, 20.0, 2.0, 0.0).unwrap(), 0.01);
        let rounded = tessellate(&primitives::plate_blank(20.0, 20.0, 2.0, 3.0).unwrap(), 0.01);
        assert!(mesh_volume(&rounded) < mesh_volume(&sharp));
        // Four rounded corners remove (4 - pi) r^2 per unit thickness.
        let expected = 800.0 - (4.0 - std::f64::consts::PI) * 9.0 * 2.0;
        assert!((mesh_volume(&rounded) - expected).abs() < 2.0);
    }

    #[test]
    fn bounding_box_assertion_reports_context() {
        let solid = primitives::plate_blank(10.0, 8.0, 2.0, 0.0).unwrap();
        let mesh = tessellate(&solid, 0.01);
        let err = assert_bounding_box(
            &mesh,
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0],
            1e-6,
            "deliberate mismatch",
        )
        .unwrap_err();
        assert!(err.to_string().contains("deliberate mismatch"));
    }
}
