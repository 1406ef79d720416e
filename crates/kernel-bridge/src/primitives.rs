//! Swept solid primitives for fixture parts.

use fixture_types::Vec2;
use truck_modeling::builder;
use truck_modeling::topology::{Face, Shell, Solid, Wire};
use truck_modeling::{Point3, Vector3};

use crate::profiles;
use crate::types::KernelError;

fn attach_plane(wires: Vec<Wire>) -> Result<Face, KernelError> {
    builder::try_attach_plane(&wires).map_err(|e| KernelError::FaceAttachFailed {
        message: e.to_string(),
    })
}

/// Rounded-corner rectangular plate, centred on the origin, bottom face
/// at z = 0, top face at z = `thickness`.
pub fn plate_blank(
    width: f64,
    height: f64,
    thickness: f64,
    corner_radius: f64,
) -> Result<Solid, KernelError> {
    if thickness <= 0.0 {
        return Err(KernelError::InvalidProfile {
            reason: format!("plate thickness must be positive, got {thickness}"),
        });
    }
    let wire = profiles::rounded_rect_wire(width, height, corner_radius, 0.0)?;
    let face = attach_plane(vec![wire])?;
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, thickness)))
}

/// Cylinder around the vertical axis through `(cx, cy)`, base at `z0`.
pub fn cylinder(cx: f64, cy: f64, z0: f64, radius: f64, height: f64) -> Result<Solid, KernelError> {
    if radius <= 0.0 || height <= 0.0 {
        return Err(KernelError::InvalidProfile {
            reason: format!("cylinder needs positive radius and height, got r={radius} h={height}"),
        });
    }
    let wire = profiles::circle_wire(cx, cy, z0, radius, false);
    let face = attach_plane(vec![wire])?;
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, height)))
}

/// Annular cylinder (pipe section) around the vertical axis through
/// `(cx, cy)`, base at `z0`.
///
/// Built by sweeping a single face with a hole boundary; no boolean
/// operation is involved.
pub fn tube(
    cx: f64,
    cy: f64,
    z0: f64,
    outer_radius: f64,
    inner_radius: f64,
    height: f64,
) -> Result<Solid, KernelError> {
    if inner_radius <= 0.0 || inner_radius >= outer_radius {
        return Err(KernelError::InvalidProfile {
            reason: format!(
                "tube needs 0 < inner < outer, got inner={inner_radius} outer={outer_radius}"
            ),
        });
    }
    let outer = profiles::circle_wire(cx, cy, z0, outer_radius, false);
    let mut face = attach_plane(vec![outer])?;
    face.add_boundary(profiles::circle_wire(cx, cy, z0, inner_radius, true));
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, height)))
}

/// Straight prism over a polygon: the ring at height `z0`, swept up by
/// `height`. The ring must be counterclockwise (positive signed area).
pub fn polygon_prism(points: &[Vec2], z0: f64, height: f64) -> Result<Solid, KernelError> {
    if height <= 0.0 {
        return Err(KernelError::InvalidProfile {
            reason: format!("prism height must be positive, got {height}"),
        });
    }
    let wire = profiles::polygon_wire(points, z0)?;
    let face = attach_plane(vec![wire])?;
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, height)))
}

/// Loft between two parallel horizontal polygons with the same vertex
/// count: `bottom` at `z0`, `top` at `z1`.
///
/// Corresponding edges must be parallel (e.g. a polygon and a scaled copy
/// of it), so every side face is a planar trapezoid. Both rings must be
/// counterclockwise.
pub fn prismoid(
    bottom: &[Vec2],
    top: &[Vec2],
    z0: f64,
    z1: f64,
) -> Result<Solid, KernelError> {
    let n = bottom.len();
    if n < 3 || top.len() != n {
        return Err(KernelError::InvalidProfile {
            reason: format!(
                "prismoid needs matching rings of >= 3 points, got {} and {}",
                n,
                top.len()
            ),
        });
    }
    if z1 <= z0 {
        return Err(KernelError::InvalidProfile {
            reason: format!("prismoid needs z1 > z0, got z0={z0} z1={z1}"),
        });
    }

    let vb: Vec<_> = bottom
        .iter()
        .map(|p| builder::vertex(Point3::new(p.x, p.y, z0)))
        .collect();
    let vt: Vec<_> = top
        .iter()
        .map(|p| builder::vertex(Point3::new(p.x, p.y, z1)))
        .collect();

    // Shared edges: bottom ring, top ring, and the lateral connectors.
    let eb: Vec<_> = (0..n).map(|i| builder::line(&vb[i], &vb[(i + 1) % n])).collect();
    let et: Vec<_> = (0..n).map(|i| builder::line(&vt[i], &vt[(i + 1) % n])).collect();
    let es: Vec<_> = (0..n).map(|i| builder::line(&vb[i], &vt[i])).collect();

    let mut faces = Vec::with_capacity(n + 2);

    // Bottom cap wound clockwise seen from above, so its normal points down.
    let bottom_wire = Wire::from_iter((0..n).rev().map(|i| eb[i].inverse()));
    faces.push(attach_plane(vec![bottom_wire])?);

    let top_wire = Wire::from_iter(et.iter().cloned());
    faces.push(attach_plane(vec![top_wire])?);

    for i in 0..n {
        let j = (i + 1) % n;
        let side = Wire::from_iter([
            eb[i].clone(),
            es[j].clone(),
            et[i].inverse(),
            es[i].inverse(),
        ]);
        faces.push(attach_plane(vec![side])?);
    }

    Solid::try_new(vec![Shell::from(faces)]).map_err(|e| KernelError::InvalidShell {
        message: e.to_string(),
    })
}
