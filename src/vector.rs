//! A small 2D vector used by the drawing routines.  Vectors are plain
//! values: rotating or scaling one hands back a new vector and leaves
//! the original alone, so a direction can be shared between drawing
//! calls without surprises.

use std::ops::{Add, Mul, Sub};

/// A point or direction on the real plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Vector2D {
    /// Horizontal component
    pub x: f64,
    /// Vertical component
    pub y: f64,
}

impl Vector2D {
    /// Constructor.
    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// This vector turned counter-clockwise (in a y-up frame) by
    /// `angle` radians.
    pub fn rotated(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vector2D {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// This vector multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Vector2D {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// A vector of length one pointing the same way, or `None` for the
    /// zero vector.
    pub fn unit(&self) -> Option<Self> {
        let length = self.length();
        if length == 0.0 || !length.is_finite() {
            None
        } else {
            Some(Vector2D::new(self.x / length, self.y / length))
        }
    }
}

impl Add for Vector2D {
    type Output = Vector2D;
    fn add(self, other: Vector2D) -> Vector2D {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;
    fn sub(self, other: Vector2D) -> Vector2D {
        Vector2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;
    fn mul(self, factor: f64) -> Vector2D {
        self.scaled(factor)
    }
}
