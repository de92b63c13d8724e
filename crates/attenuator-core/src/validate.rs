use serde::{Deserialize, Serialize};

use crate::curve::{PointSet, X_MAX, X_MIN};
use crate::curve_type::{CurveType, YDomain};
use crate::error::{EditError, StructuralError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Parses a field as typed by the user. `NaN` counts as non-numeric;
/// infinities are accepted and end up clamped.
pub fn parse_value(raw: &str) -> Result<f64, EditError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(EditError::Parse {
            input: raw.to_owned(),
        }),
    }
}

/// Field rules applied to every edit attempt.
///
/// The two axes are deliberately asymmetric: x is clamped to the normalized
/// domain and must stay strictly between its neighbours, y is only clamped
/// into the domain of the active curve type and never collides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    domain: YDomain,
}

impl Validator {
    pub fn new(curve_type: CurveType) -> Self {
        Self {
            domain: curve_type.domain(),
        }
    }

    pub fn domain(&self) -> YDomain {
        self.domain
    }

    /// Returns the x the point at `index` may take for `raw`.
    pub fn check_x(&self, points: &PointSet, index: usize, raw: &str) -> Result<f64, EditError> {
        let value = parse_value(raw)?;
        self.check_x_value(points, index, value)
    }

    pub fn check_x_value(
        &self,
        points: &PointSet,
        index: usize,
        value: f64,
    ) -> Result<f64, EditError> {
        if points.get(index).is_none() {
            return Err(StructuralError::IndexOutOfRange {
                index,
                len: points.len(),
            }
            .into());
        }
        let clamped = value.clamp(X_MIN, X_MAX);
        if points.is_endpoint(index) {
            return Err(StructuralError::EndpointLocked { index }.into());
        }
        let (prev, next) = points.neighbours(index);
        let lower = prev.unwrap_or(X_MIN);
        let upper = next.unwrap_or(X_MAX);
        if clamped >= upper || clamped <= lower {
            return Err(StructuralError::Collision {
                x: clamped,
                lower,
                upper,
            }
            .into());
        }
        Ok(clamped)
    }

    /// Returns the y the point at `index` takes for `raw`; always the clamped
    /// value once the input parses.
    pub fn check_y(&self, points: &PointSet, index: usize, raw: &str) -> Result<f64, EditError> {
        let value = parse_value(raw)?;
        self.check_y_value(points, index, value)
    }

    pub fn check_y_value(
        &self,
        points: &PointSet,
        index: usize,
        value: f64,
    ) -> Result<f64, EditError> {
        if points.get(index).is_none() {
            return Err(StructuralError::IndexOutOfRange {
                index,
                len: points.len(),
            }
            .into());
        }
        Ok(self.domain.clamp(value))
    }
}
