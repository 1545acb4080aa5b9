//! Planar map coordinates.
//!
//! Node positions are only used for animation and display; routing never
//! looks at them.  Coordinates are in map units (pixels of the reference
//! campus map), so plain Euclidean geometry is correct here.

/// A position on the campus map plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in map units.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Position after `step` of `steps` equal increments from `self` to `to`.
    ///
    /// Computed from the endpoints on every call, never by accumulating
    /// deltas.  `step >= steps` returns `to` exactly.
    pub fn lerp_step(self, to: Point, step: u32, steps: u32) -> Point {
        if steps == 0 || step >= steps {
            return to;
        }
        let s = step as f32;
        let n = steps as f32;
        Point {
            x: self.x + s * (to.x - self.x) / n,
            y: self.y + s * (to.y - self.y) / n,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
