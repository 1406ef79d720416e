//! Board edge outline assembly.
//!
//! The Edge.Cuts layer holds an unordered bag of graphic shapes. This
//! module flattens them into polylines, chains the polylines into closed
//! rings by endpoint matching, and requires exactly one ring: the board
//! outline. The ring supports the polygon operations the plate modeling
//! needs: simplification, area centroid, and outward offset.

use fixture_types::Vec2;

use crate::error::BoardError;
use crate::model::{Board, EdgeShape};

/// Endpoint coincidence tolerance for chaining, mm.
const CHAIN_TOL_MM: f64 = 1e-3;

/// Chord deviation tolerance when flattening arcs and circles, mm.
const ARC_TOL_MM: f64 = 0.01;

/// A closed polygon ring, stored without a repeated end point and
/// normalized to positive signed area.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    points: Vec<Vec2>,
}

/// Assemble the board outline from the Edge.Cuts shapes.
pub fn board_outline(board: &Board) -> Result<Outline, BoardError> {
    if board.edge_shapes.is_empty() {
        return Err(BoardError::EmptyOutline);
    }

    let mut closed: Vec<Vec<Vec2>> = Vec::new();
    let mut open: Vec<Vec<Vec2>> = Vec::new();

    for shape in &board.edge_shapes {
        let pts = flatten_shape(shape)?;
        if pts.len() > 2 && pts[0].distance(pts[pts.len() - 1]) < CHAIN_TOL_MM {
            let mut ring = pts;
            ring.pop();
            closed.push(ring);
        } else {
            open.push(pts);
        }
    }

    while let Some(mut chain) = open.pop() {
        'grow: loop {
            let last = chain[chain.len() - 1];
            if chain.len() > 2 && chain[0].distance(last) < CHAIN_TOL_MM {
                chain.pop();
                closed.push(chain);
                break 'grow;
            }

            let mut matched = None;
            for (j, cand) in open.iter().enumerate() {
                if cand[0].distance(last) < CHAIN_TOL_MM {
                    matched = Some((j, false));
                    break;
                }
                if cand[cand.len() - 1].distance(last) < CHAIN_TOL_MM {
                    matched = Some((j, true));
                    break;
                }
            }

            match matched {
                Some((j, reverse)) => {
                    let mut cand = open.remove(j);
                    if reverse {
                        cand.reverse();
                    }
                    chain.extend(cand.into_iter().skip(1));
                }
                None => {
                    return Err(BoardError::OpenOutline {
                        open_chains: open.len() + 1,
                    })
                }
            }
        }
    }

    match closed.len() {
        0 => Err(BoardError::EmptyOutline),
        1 => Ok(Outline::new(closed.pop().unwrap())),
        count => Err(BoardError::MultipleOutlines { count }),
    }
}

/// Flatten one edge shape into an ordered polyline.
fn flatten_shape(shape: &EdgeShape) -> Result<Vec<Vec2>, BoardError> {
    match *shape {
        EdgeShape::Line { start, end } => Ok(vec![start, end]),
        EdgeShape::Arc { start, mid, end } => flatten_arc(start, mid, end),
        EdgeShape::Rect { start, end } => Ok(vec![
            start,
            Vec2::new(end.x, start.y),
            end,
            Vec2::new(start.x, end.y),
            start,
        ]),
        EdgeShape::Circle { center, end } => {
            let radius = center.distance(end);
            let start_angle = (end.y - center.y).atan2(end.x - center.x);
            let n = arc_segments(radius, std::f64::consts::TAU);
            let mut pts = Vec::with_capacity(n + 1);
            for i in 0..=n {
                let a = start_angle + std::f64::consts::TAU * (i as f64) / (n as f64);
                pts.push(center + Vec2::new(a.cos(), a.sin()) * radius);
            }
            Ok(pts)
        }
    }
}

/// Flatten a three-point arc by sampling the circumscribed circle from
/// the start angle to the end angle through the mid angle.
fn flatten_arc(start: Vec2, mid: Vec2, end: Vec2) -> Result<Vec<Vec2>, BoardError> {
    let center = circumcenter(start, mid, end).ok_or(BoardError::DegenerateArc)?;
    let radius = center.distance(start);

    let angle_of = |p: Vec2| (p.y - center.y).atan2(p.x - center.x);
    let a_start = angle_of(start);

    // Measure mid and end counterclockwise from the start; if mid lies
    // beyond end the arc actually runs the other way.
    let ccw_from_start = |a: f64| {
        let mut d = a - a_start;
        while d <= 0.0 {
            d += std::f64::consts::TAU;
        }
        d
    };
    let to_mid = ccw_from_start(angle_of(mid));
    let to_end = ccw_from_start(angle_of(end));

    let sweep = if to_mid <= to_end {
        to_end
    } else {
        to_end - std::f64::consts::TAU
    };

    let n = arc_segments(radius, sweep.abs());
    let mut pts = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let a = a_start + sweep * (i as f64) / (n as f64);
        pts.push(center + Vec2::new(a.cos(), a.sin()) * radius);
    }
    // Snap the sampled endpoints to the exact inputs so chaining works.
    pts[0] = start;
    let last = pts.len() - 1;
    pts[last] = end;
    Ok(pts)
}

fn arc_segments(radius: f64, sweep: f64) -> usize {
    if radius <= ARC_TOL_MM {
        return 1;
    }
    let max_step = 2.0 * (1.0 - ARC_TOL_MM / radius).max(-1.0).acos();
    ((sweep / max_step).ceil() as usize).clamp(1, 512)
}

/// Center of the circle through three points, if they are not collinear.
fn circumcenter(a: Vec2, b: Vec2, c: Vec2) -> Option<Vec2> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1e-12 {
        return None;
    }
    let a2 = a.dot(a);
    let b2 = b.dot(b);
    let c2 = c.dot(c);
    Some(Vec2::new(
        (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
        (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
    ))
}

impl Outline {
    /// Build from ring points, normalizing to positive signed area.
    pub fn new(mut points: Vec<Vec2>) -> Self {
        if signed_area(&points) < 0.0 {
            points.reverse();
        }
        Outline { points }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Area centroid of the ring.
    pub fn centroid(&self) -> Vec2 {
        let pts = &self.points;
        let n = pts.len();
        let mut area2 = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let p = pts[i];
            let q = pts[(i + 1) % n];
            let w = p.cross(q);
            area2 += w;
            cx += (p.x + q.x) * w;
            cy += (p.y + q.y) * w;
        }
        if area2.abs() < 1e-12 {
            // Degenerate ring: fall back to the vertex average.
            let inv = 1.0 / n as f64;
            return pts
                .iter()
                .fold(Vec2::ZERO, |acc, p| acc + *p * inv);
        }
        Vec2::new(cx / (3.0 * area2), cy / (3.0 * area2))
    }

    /// Douglas-Peucker simplification with the given deviation tolerance.
    pub fn simplified(&self, tolerance_mm: f64) -> Outline {
        if self.points.len() <= 4 {
            return self.clone();
        }
        // Treat the ring as an open polyline that returns to its start.
        let mut path = self.points.clone();
        path.push(self.points[0]);
        let mut keep = vec![false; path.len()];
        keep[0] = true;
        *keep.last_mut().unwrap() = true;
        douglas_peucker(&path, 0, path.len() - 1, tolerance_mm, &mut keep);

        let mut points: Vec<Vec2> = path
            .iter()
            .zip(keep.iter())
            .filter_map(|(p, &k)| k.then_some(*p))
            .collect();
        points.pop(); // drop the repeated start
        Outline { points }
    }

    /// Offset every edge outward by `distance_mm`, joining at miters.
    pub fn offset(&self, distance_mm: f64) -> Outline {
        let pts = &self.points;
        let n = pts.len();
        let mut result = Vec::with_capacity(n);

        for i in 0..n {
            let prev = pts[(i + n - 1) % n];
            let curr = pts[i];
            let next = pts[(i + 1) % n];

            let d_in = (curr - prev).normalized().unwrap_or(Vec2::new(1.0, 0.0));
            let d_out = (next - curr).normalized().unwrap_or(Vec2::new(1.0, 0.0));
            // Outward normal of an edge of a positive-area ring.
            let n_in = Vec2::new(d_in.y, -d_in.x);
            let n_out = Vec2::new(d_out.y, -d_out.x);

            let a1 = prev + n_in * distance_mm;
            let a2 = curr + n_out * distance_mm;
            match line_intersection(a1, d_in, a2, d_out) {
                Some(p) => result.push(p),
                None => {
                    // Parallel edges: shift straight out.
                    result.push(curr + n_in * distance_mm);
                }
            }
        }

        Outline { points: result }
    }

    /// Translate every point by `delta`.
    pub fn translated(&self, delta: Vec2) -> Outline {
        Outline {
            points: self.points.iter().map(|p| *p + delta).collect(),
        }
    }
}

fn signed_area(points: &[Vec2]) -> f64 {
    let n = points.len();
    let mut area2 = 0.0;
    for i in 0..n {
        area2 += points[i].cross(points[(i + 1) % n]);
    }
    area2 / 2.0
}

fn douglas_peucker(path: &[Vec2], first: usize, last: usize, tol: f64, keep: &mut [bool]) {
    if last <= first + 1 {
        return;
    }
    let a = path[first];
    let b = path[last];
    let mut max_dist = 0.0;
    let mut max_idx = first;
    for i in (first + 1)..last {
        let d = point_segment_distance(path[i], a, b);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }
    if max_dist > tol {
        keep[max_idx] = true;
        douglas_peucker(path, first, max_idx, tol, keep);
        douglas_peucker(path, max_idx, last, tol, keep);
    }
}

fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f64 {
    let ab = b - a;
    let len2 = ab.dot(ab);
    if len2 < 1e-24 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Intersection of two lines given by point + direction.
fn line_intersection(p1: Vec2, d1: Vec2, p2: Vec2, d2: Vec2) -> Option<Vec2> {
    let denom = d1.cross(d2);
    if denom.abs() < 1e-9 {
        return None;
    }
    let t = (p2 - p1).cross(d2) / denom;
    Some(p1 + d1 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Board;

    fn rect_board(shuffled: bool) -> Board {
        // 50 x 40 rectangle from four lines.
        let mut shapes = vec![
            EdgeShape::Line {
                start: Vec2::new(100.0, 50.0),
                end: Vec2::new(150.0, 50.0),
            },
            EdgeShape::Line {
                start: Vec2::new(150.0, 50.0),
                end: Vec2::new(150.0, 90.0),
            },
            // Deliberately reversed direction.
            EdgeShape::Line {
                start: Vec2::new(100.0, 90.0),
                end: Vec2::new(150.0, 90.0),
            },
            EdgeShape::Line {
                start: Vec2::new(100.0, 90.0),
                end: Vec2::new(100.0, 50.0),
            },
        ];
        if shuffled {
            shapes.swap(0, 2);
            shapes.swap(1, 3);
        }
        Board {
            edge_shapes: shapes,
            ..Board::default()
        }
    }

    #[test]
    fn rectangle_chains_into_one_ring() {
        for shuffled in [false, true] {
            let outline = board_outline(&rect_board(shuffled)).unwrap();
            assert_eq!(outline.len(), 4, "shuffled={}", shuffled);
        }
    }

    #[test]
    fn rectangle_centroid_is_center() {
        let outline = board_outline(&rect_board(false)).unwrap();
        let c = outline.centroid();
        assert!((c.x - 125.0).abs() < 1e-9);
        assert!((c.y - 70.0).abs() < 1e-9);
    }

    #[test]
    fn missing_segment_is_open_outline_error() {
        let mut board = rect_board(false);
        board.edge_shapes.pop();
        let err = board_outline(&board).unwrap_err();
        assert!(matches!(err, BoardError::OpenOutline { .. }));
    }

    #[test]
    fn two_rectangles_are_rejected() {
        let mut board = rect_board(false);
        board.edge_shapes.push(EdgeShape::Rect {
            start: Vec2::new(0.0, 0.0),
            end: Vec2::new(10.0, 10.0),
        });
        let err = board_outline(&board).unwrap_err();
        assert!(matches!(err, BoardError::MultipleOutlines { count: 2 }));
    }

    #[test]
    fn no_edge_shapes_is_empty_outline_error() {
        let board = Board::default();
        assert!(matches!(
            board_outline(&board).unwrap_err(),
            BoardError::EmptyOutline
        ));
    }

    #[test]
    fn gr_rect_is_already_closed() {
        let board = Board {
            edge_shapes: vec![EdgeShape::Rect {
                start: Vec2::new(0.0, 0.0),
                end: Vec2::new(20.0, 10.0),
            }],
            ..Board::default()
        };
        let outline = board_outline(&board).unwrap();
        assert_eq!(outline.len(), 4);
        let c = outline.centroid();
        assert!((c.x - 10.0).abs() < 1e-9);
        assert!((c.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn circle_outline_closes_and_centers() {
        let board = Board {
            edge_shapes: vec![EdgeShape::Circle {
                center: Vec2::new(30.0, 30.0),
                end: Vec2::new(40.0, 30.0),
            }],
            ..Board::default()
        };
        let outline = board_outline(&board).unwrap();
        assert!(outline.len() >= 16);
        let c = outline.centroid();
        assert!((c.x - 30.0).abs() < 1e-6);
        assert!((c.y - 30.0).abs() < 1e-6);
    }

    #[test]
    fn arc_corner_chains_with_lines() {
        // A quarter-circle arc joining a horizontal and a vertical line.
        let board = Board {
            edge_shapes: vec![
                EdgeShape::Line {
                    start: Vec2::new(0.0, 0.0),
                    end: Vec2::new(10.0, 0.0),
                },
                EdgeShape::Arc {
                    // Quarter circle around (10, 5); mid at the -45 degree point.
                    start: Vec2::new(10.0, 0.0),
                    mid: Vec2::new(10.0 + 5.0 * (0.5f64).sqrt(), 5.0 - 5.0 * (0.5f64).sqrt()),
                    end: Vec2::new(15.0, 5.0),
                },
                EdgeShape::Line {
                    start: Vec2::new(15.0, 5.0),
                    end: Vec2::new(15.0, 15.0),
                },
                EdgeShape::Line {
                    start: Vec2::new(15.0, 15.0),
                    end: Vec2::new(0.0, 15.0),
                },
                EdgeShape::Line {
                    start: Vec2::new(0.0, 15.0),
                    end: Vec2::new(0.0, 0.0),
                },
            ],
            ..Board::default()
        };
        let outline = board_outline(&board).unwrap();
        assert!(outline.len() > 5, "arc should contribute sampled points");
    }

    #[test]
    fn simplify_collapses_collinear_points() {
        let outline = Outline::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(5.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]);
        let simple = outline.simplified(0.01);
        assert_eq!(simple.len(), 4);
    }

    #[test]
    fn offset_grows_rectangle_by_distance() {
        let outline = Outline::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]);
        let grown = outline.offset(0.5);
        let min_x = grown.points().iter().map(|p| p.x).fold(f64::MAX, f64::min);
        let max_x = grown.points().iter().map(|p| p.x).fold(f64::MIN, f64::max);
        let min_y = grown.points().iter().map(|p| p.y).fold(f64::MAX, f64::min);
        let max_y = grown.points().iter().map(|p| p.y).fold(f64::MIN, f64::max);
        assert!((min_x + 0.5).abs() < 1e-9);
        assert!((max_x - 10.5).abs() < 1e-9);
        assert!((min_y + 0.5).abs() < 1e-9);
        assert!((max_y - 10.5).abs() < 1e-9);
    }

    #[test]
    fn translated_moves_centroid() {
        let outline = Outline::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]);
        let moved = outline.translated(Vec2::new(-5.0, -5.0));
        let c = moved.centroid();
        assert!(c.x.abs() < 1e-9);
        assert!(c.y.abs() < 1e-9);
    }
}
