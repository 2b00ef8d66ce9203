// THEORY:
// A `Blob` is the tracker's answer about one object: the truncated centroid and the
// enclosed area of a top-level contour. It is derived from moments and never from a
// region with zero area, so building one cannot divide by zero.

use crate::core_modules::moment::Moments;
use serde::Serialize;

/// A tracked region: where it is and how big it is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Blob {
    pub centroid_x: i32,
    pub centroid_y: i32,
    pub area: f64,
}

impl Blob {
    /// Only regions with a positive area produce a blob.
    pub fn from_moments(moments: &Moments) -> Option<Self> {
        let (centroid_x, centroid_y) = moments.centroid()?;
        Some(Self {
            centroid_x,
            centroid_y,
            area: moments.area(),
        })
    }

    pub fn position(&self) -> (i32, i32) {
        (self.centroid_x, self.centroid_y)
    }
}
