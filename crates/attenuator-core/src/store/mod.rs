//! Boundary to the external system that owns the curves.

mod json;
mod memory;

pub use json::JsonCurveStore;
pub use memory::MemoryCurveStore;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::curve::{ControlPoint, CurveShape, PointSet};
use crate::curve_type::CurveType;
use crate::error::StructuralError;
use crate::units::{curve_extent, to_absolute_x, to_normalized_x};

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("curve store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("curve store data is malformed: {0}")]
    Format(#[from] serde_json::Error),
    #[error("external system unavailable: {0}")]
    Unavailable(String),
    #[error("external system rejected the request: {0}")]
    Rejected(String),
}

/// Identifier of an object in the external system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedObject {
    pub id: ObjectId,
    pub name: String,
}

impl SelectedObject {
    pub fn new(id: impl Into<ObjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// How the external object uses the curve slot. Curves written by the
/// editor are always `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CurveUse {
    None,
    #[default]
    Custom,
    UseProject,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbsolutePoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub shape: CurveShape,
}

/// A curve in the units of the external system: x runs from 0 to the
/// object's own extent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AbsoluteCurve {
    pub points: Vec<AbsolutePoint>,
}

impl AbsoluteCurve {
    pub fn new(points: Vec<AbsolutePoint>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest stored x, or the default extent for an empty curve.
    pub fn max_x(&self) -> f64 {
        curve_extent(self.points.iter().map(|point| point.x))
    }

    /// Rescales the curve into the normalized domain.
    pub fn normalize(&self) -> Result<PointSet, StructuralError> {
        let max_x = self.max_x();
        PointSet::from_points(self.points.iter().map(|point| {
            ControlPoint::new(to_normalized_x(point.x, max_x), point.y, point.shape)
        }))
    }

    /// Rescales normalized points onto `[0, max_x]`.
    pub fn from_normalized(points: &PointSet, max_x: f64) -> Self {
        Self {
            points: points
                .points()
                .iter()
                .map(|point| AbsolutePoint {
                    x: to_absolute_x(point.x, max_x),
                    y: point.y,
                    shape: point.shape,
                })
                .collect(),
        }
    }
}

/// One persisted curve slot, laid out like the external system's own
/// set-curve request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveRecord {
    pub object: ObjectId,
    pub curve_type: CurveType,
    #[serde(rename = "use", default)]
    pub usage: CurveUse,
    pub points: Vec<AbsolutePoint>,
}

impl CurveRecord {
    pub fn custom(object: ObjectId, curve_type: CurveType, curve: &AbsoluteCurve) -> Self {
        Self {
            object,
            curve_type,
            usage: CurveUse::Custom,
            points: curve.points.clone(),
        }
    }
}

/// Load/save access to curves of external objects. Calls block; retries
/// and reconnection are the implementation's business.
pub trait CurveStore {
    /// `None` when the object has no points for this curve type.
    fn load(
        &self,
        object: &ObjectId,
        curve_type: CurveType,
    ) -> Result<Option<AbsoluteCurve>, AdapterError>;

    fn save(
        &self,
        object: &ObjectId,
        curve_type: CurveType,
        curve: &AbsoluteCurve,
    ) -> Result<(), AdapterError>;
}

impl<S: CurveStore + ?Sized> CurveStore for &S {
    fn load(
        &self,
        object: &ObjectId,
        curve_type: CurveType,
    ) -> Result<Option<AbsoluteCurve>, AdapterError> {
        (**self).load(object, curve_type)
    }

    fn save(
        &self,
        object: &ObjectId,
        curve_type: CurveType,
        curve: &AbsoluteCurve,
    ) -> Result<(), AdapterError> {
        (**self).save(object, curve_type, curve)
    }
}

/// Objects currently selected in the external system.
pub trait SelectionProvider {
    fn selected(&self) -> Result<Vec<SelectedObject>, AdapterError>;
}

/// A selection that never changes unless replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedSelection {
    objects: Vec<SelectedObject>,
}

impl FixedSelection {
    pub fn new(objects: Vec<SelectedObject>) -> Self {
        Self { objects }
    }

    pub fn set(&mut self, objects: Vec<SelectedObject>) {
        self.objects = objects;
    }
}

impl SelectionProvider for FixedSelection {
    fn selected(&self) -> Result<Vec<SelectedObject>, AdapterError> {
        Ok(self.objects.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(xs: &[f64]) -> AbsoluteCurve {
        AbsoluteCurve::new(
            xs.iter()
                .map(|&x| AbsolutePoint {
                    x,
                    y: -3.0,
                    shape: CurveShape::Log1,
                })
                .collect(),
        )
    }

    #[test]
    fn normalizes_by_own_extent() {
        let points = curve(&[0.0, 25.0, 50.0]).normalize().unwrap();
        let xs: Vec<_> = points.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 50.0, 100.0]);
        assert!(points.points().iter().all(|p| p.shape == CurveShape::Log1));
    }

    #[test]
    fn rescales_into_other_extent() {
        let points = curve(&[0.0, 25.0, 50.0]).normalize().unwrap();
        let absolute = AbsoluteCurve::from_normalized(&points, 4_000.0);
        let xs: Vec<_> = absolute.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 2_000.0, 4_000.0]);
    }

    #[test]
    fn record_uses_wire_field_names() {
        let record = CurveRecord::custom("{a}".into(), CurveType::Spread, &curve(&[0.0, 10.0]));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["curveType"], "SpreadUsage");
        assert_eq!(json["use"], "Custom");
        assert_eq!(json["points"][1]["shape"], "Log1");
    }
}
