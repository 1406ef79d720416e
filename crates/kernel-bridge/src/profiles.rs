//! Closed profile wires in a horizontal plane.
//!
//! Corner rounds and chamfers are expressed here, in the profile, and the
//! profile is swept; the kernel has no edge fillet/chamfer operation.
//! All wires are wound counterclockwise (positive signed area) so that an
//! attached plane face has its normal along +Z.

use std::f64::consts::{FRAC_PI_4, PI};

use fixture_types::Vec2;
use truck_modeling::builder;
use truck_modeling::topology::Wire;
use truck_modeling::{Point3, Rad, Vector3};

use crate::types::KernelError;

/// Closed polyline wire through `points` at height `z`.
pub fn polygon_wire(points: &[Vec2], z: f64) -> Result<Wire, KernelError> {
    if points.len() < 3 {
        return Err(KernelError::InvalidProfile {
            reason: format!("polygon needs at least 3 points, got {}", points.len()),
        });
    }

    let vertices: Vec<_> = points
        .iter()
        .map(|p| builder::vertex(Point3::new(p.x, p.y, z)))
        .collect();

    let n = vertices.len();
    let edges = (0..n).map(|i| builder::line(&vertices[i], &vertices[(i + 1) % n]));
    Ok(Wire::from_iter(edges))
}

/// Rectangle centred on the origin with rounded corners, at height `z`.
///
/// With a zero radius this degenerates to a plain rectangle.
pub fn rounded_rect_wire(
    width: f64,
    height: f64,
    corner_radius: f64,
    z: f64,
) -> Result<Wire, KernelError> {
    if width <= 0.0 || height <= 0.0 {
        return Err(KernelError::InvalidProfile {
            reason: format!("rectangle sides must be positive, got {width} x {height}"),
        });
    }
    if corner_radius < 0.0 || 2.0 * corner_radius >= width.min(height) {
        return Err(KernelError::InvalidProfile {
            reason: format!(
                "corner radius {corner_radius} does not fit a {width} x {height} rectangle"
            ),
        });
    }

    let (hw, hh, r) = (width / 2.0, height / 2.0, corner_radius);

    if r < 1e-9 {
        return polygon_wire(
            &[
                Vec2::new(-hw, -hh),
                Vec2::new(hw, -hh),
                Vec2::new(hw, hh),
                Vec2::new(-hw, hh),
            ],
            z,
        );
    }

    // Tangent points of the four corner arcs, counterclockwise from the
    // lower edge. Arc centres sit r inside each corner.
    let pts = [
        Vec2::new(-hw + r, -hh),
        Vec2::new(hw - r, -hh),
        Vec2::new(hw, -hh + r),
        Vec2::new(hw, hh - r),
        Vec2::new(hw - r, hh),
        Vec2::new(-hw + r, hh),
        Vec2::new(-hw, hh - r),
        Vec2::new(-hw, -hh + r),
    ];
    let vertices: Vec<_> = pts
        .iter()
        .map(|p| builder::vertex(Point3::new(p.x, p.y, z)))
        .collect();

    // Mid-arc transit points at the 45 degree direction of each corner.
    let diag = r * FRAC_PI_4.cos();
    let transit = |cx: f64, cy: f64, dir_x: f64, dir_y: f64| {
        Point3::new(cx + dir_x * diag, cy + dir_y * diag, z)
    };

    let mut edges = Vec::with_capacity(8);
    edges.push(builder::line(&vertices[0], &vertices[1]));
    edges.push(builder::circle_arc(
        &vertices[1],
        &vertices[2],
        transit(hw - r, -hh + r, 1.0, -1.0),
    ));
    edges.push(builder::line(&vertices[2], &vertices[3]));
    edges.push(builder::circle_arc(
        &vertices[3],
        &vertices[4],
        transit(hw - r, hh - r, 1.0, 1.0),
    ));
    edges.push(builder::line(&vertices[4], &vertices[5]));
    edges.push(builder::circle_arc(
        &vertices[5],
        &vertices[6],
        transit(-hw + r, hh - r, -1.0, 1.0),
    ));
    edges.push(builder::line(&vertices[6], &vertices[7]));
    edges.push(builder::circle_arc(
        &vertices[7],
        &vertices[0],
        transit(-hw + r, -hh + r, -1.0, -1.0),
    ));

    Ok(Wire::from_iter(edges))
}

/// Full circle wire of the given radius around `(cx, cy)` at height `z`.
///
/// `reversed` winds the circle clockwise, which turns it into a hole
/// boundary when added to a face.
pub fn circle_wire(cx: f64, cy: f64, z: f64, radius: f64, reversed: bool) -> Wire {
    let seed = builder::vertex(Point3::new(cx + radius, cy, z));
    let axis = if reversed {
        -Vector3::unit_z()
    } else {
        Vector3::unit_z()
    };
    builder::rsweep(&seed, Point3::new(cx, cy, z), axis, Rad(2.0 * PI))
}

/// Corner points of a square of side `width` centred on the origin, with
/// each corner cut back by `chamfer` along both edges. Counterclockwise.
///
/// A zero chamfer yields the plain square.
pub fn chamfered_square(width: f64, chamfer: f64) -> Vec<Vec2> {
    let h = width / 2.0;
    let c = chamfer.min(h);
    if c < 1e-9 {
        return vec![
            Vec2::new(-h, -h),
            Vec2::new(h, -h),
            Vec2::new(h, h),
            Vec2::new(-h, h),
        ];
    }
    vec![
        Vec2::new(-h + c, -h),
        Vec2::new(h - c, -h),
        Vec2::new(h, -h + c),
        Vec2::new(h, h - c),
        Vec2::new(h - c, h),
        Vec2::new(-h + c, h),
        Vec2::new(-h, h - c),
        Vec2::new(-h, -h + c),
    ]
}
