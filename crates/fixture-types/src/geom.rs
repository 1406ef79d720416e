use serde::{Deserialize, Serialize};

/// A 2-D point or displacement in millimetres, in board coordinates
/// (x to the right, y downward, as in the KiCad board editor).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: Vec2) -> f64 {
        (*self - other).length()
    }

    pub fn dot(&self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2-D cross product (z component of the 3-D cross product).
    pub fn cross(&self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Rotate counterclockwise as seen in the board view (y-down axis).
    ///
    /// This is the rotation KiCad applies to pad offsets for a rotated
    /// footprint.
    pub fn rotated_deg(&self, degrees: f64) -> Vec2 {
        let (s, c) = degrees.to_radians().sin_cos();
        Vec2 {
            x: c * self.x + s * self.y,
            y: -s * self.x + c * self.y,
        }
    }

    pub fn normalized(&self) -> Option<Vec2> {
        let len = self.length();
        if len < 1e-12 {
            None
        } else {
            Some(Vec2::new(self.x / len, self.y / len))
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn rotation_quarter_turn_is_up_in_board_view() {
        // With y pointing down, a counterclockwise quarter turn maps
        // (1, 0) to (0, -1).
        let p = Vec2::new(1.0, 0.0).rotated_deg(90.0);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn rotation_zero_is_identity() {
        let p = Vec2::new(1.5, -2.5).rotated_deg(0.0);
        assert!((p.x - 1.5).abs() < 1e-12);
        assert!((p.y + 2.5).abs() < 1e-12);
    }
}
