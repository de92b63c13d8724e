use std::cmp::Ordering;

use super::{ControlPoint, CurveShape};
use crate::error::StructuralError;

/// Lower bound of the normalized x domain; the first point always sits here.
pub const X_MIN: f64 = 0.0;
/// Upper bound of the normalized x domain; the last point always sits here.
pub const X_MAX: f64 = 100.0;

const ENDPOINT_TOLERANCE: f64 = 1e-9;

/// Ordered control points of one curve.
///
/// Invariants, upheld by every mutation:
/// - at least two points;
/// - `x` strictly increasing;
/// - the first point sits at [`X_MIN`] and the last at [`X_MAX`].
///
/// Endpoint status is derived from position, so it follows the points as
/// they are inserted and deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    points: Vec<ControlPoint>,
}

impl PointSet {
    /// A two-point curve spanning the whole domain.
    pub fn with_endpoints(y_start: f64, y_end: f64) -> Self {
        Self {
            points: vec![
                ControlPoint::linear(X_MIN, y_start),
                ControlPoint::linear(X_MAX, y_end),
            ],
        }
    }

    /// Builds a set from already normalized points in any order.
    ///
    /// Endpoints within a rounding error of the domain bounds are snapped onto
    /// them, which absorbs the error introduced by rescaling absolute x values.
    pub fn from_points<I>(points: I) -> Result<Self, StructuralError>
    where
        I: IntoIterator<Item = ControlPoint>,
    {
        let mut points: Vec<ControlPoint> = points.into_iter().collect();
        if points.iter().any(|point| !point.is_finite()) {
            return Err(StructuralError::NonFinite);
        }
        if points.len() < 2 {
            return Err(StructuralError::TooFewPoints {
                count: points.len(),
            });
        }
        points.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));

        let last = points.len() - 1;
        let (first_x, last_x) = (points[0].x, points[last].x);
        if (first_x - X_MIN).abs() > ENDPOINT_TOLERANCE
            || (last_x - X_MAX).abs() > ENDPOINT_TOLERANCE
        {
            return Err(StructuralError::MissingEndpoint {
                first: first_x,
                last: last_x,
            });
        }
        points[0].x = X_MIN;
        points[last].x = X_MAX;

        if let Some(pair) = points.windows(2).find(|pair| pair[0].x >= pair[1].x) {
            return Err(StructuralError::DuplicateX { x: pair[1].x });
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with other collections.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&ControlPoint> {
        self.points.get(index)
    }

    pub fn is_endpoint(&self, index: usize) -> bool {
        index == 0 || index + 1 == self.points.len()
    }

    /// X of the previous and next point around `index`.
    pub fn neighbours(&self, index: usize) -> (Option<f64>, Option<f64>) {
        let prev = index
            .checked_sub(1)
            .and_then(|prev| self.points.get(prev))
            .map(|point| point.x);
        let next = self.points.get(index + 1).map(|point| point.x);
        (prev, next)
    }

    /// Adjacent point pairs, each describing one segment.
    pub fn segments(&self) -> impl Iterator<Item = (&ControlPoint, &ControlPoint)> + '_ {
        self.points.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Inserts a point and returns the index it ended up at.
    ///
    /// The point lands at its sorted position, so indices of every following
    /// point shift by one.
    pub fn insert(&mut self, x: f64, y: f64, shape: CurveShape) -> Result<usize, StructuralError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(StructuralError::NonFinite);
        }
        if !(X_MIN..=X_MAX).contains(&x) {
            return Err(StructuralError::OutOfDomain { x });
        }
        let index = self.points.partition_point(|point| point.x < x);
        if self.points.get(index).is_some_and(|point| point.x == x) {
            return Err(StructuralError::DuplicateX { x });
        }
        self.points.insert(index, ControlPoint::new(x, y, shape));
        Ok(index)
    }

    /// Removes an interior point. Endpoints are protected.
    pub fn delete(&mut self, index: usize) -> Result<ControlPoint, StructuralError> {
        self.check_index(index)?;
        if self.is_endpoint(index) {
            return Err(StructuralError::EndpointProtected { index });
        }
        Ok(self.points.remove(index))
    }

    /// Moves an interior point strictly between its neighbours.
    pub fn move_x(&mut self, index: usize, x: f64) -> Result<(), StructuralError> {
        self.check_index(index)?;
        if !x.is_finite() {
            return Err(StructuralError::NonFinite);
        }
        if self.is_endpoint(index) {
            return Err(StructuralError::EndpointLocked { index });
        }
        let (prev, next) = self.neighbours(index);
        let lower = prev.unwrap_or(X_MIN);
        let upper = next.unwrap_or(X_MAX);
        if x <= lower || x >= upper {
            return Err(StructuralError::Collision { x, lower, upper });
        }
        self.points[index].x = x;
        Ok(())
    }

    /// Sets y without any domain check; callers clamp first.
    pub fn set_y(&mut self, index: usize, y: f64) -> Result<(), StructuralError> {
        self.check_index(index)?;
        if !y.is_finite() {
            return Err(StructuralError::NonFinite);
        }
        self.points[index].y = y;
        Ok(())
    }

    pub fn set_shape(&mut self, index: usize, shape: CurveShape) -> Result<(), StructuralError> {
        self.check_index(index)?;
        self.points[index].shape = shape;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), StructuralError> {
        if index < self.points.len() {
            Ok(())
        } else {
            Err(StructuralError::IndexOutOfRange {
                index,
                len: self.points.len(),
            })
        }
    }
}
