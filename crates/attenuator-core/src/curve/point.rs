use serde::{Deserialize, Serialize};

use super::CurveShape;

/// A vertex of the curve in the normalized x domain.
///
/// The point's index is its position inside a [`PointSet`](super::PointSet)
/// and is never stored on the point itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub shape: CurveShape,
}

impl ControlPoint {
    pub fn new(x: f64, y: f64, shape: CurveShape) -> Self {
        Self { x, y, shape }
    }

    pub fn linear(x: f64, y: f64) -> Self {
        Self::new(x, y, CurveShape::Linear)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
