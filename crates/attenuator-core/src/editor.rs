use tracing::debug;

use crate::config::EditorConfig;
use crate::curve::{ControlPoint, CurveShape, PointSet};
use crate::curve_type::CurveType;
use crate::error::{EditError, StructuralError};
use crate::notify::{ChangeNotifier, CurveEvent, SubscriptionId};
use crate::store::SelectedObject;
use crate::validate::{Axis, Validator};

/// The four increment buttons next to each field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    FineUp,
    FineDown,
    CoarseUp,
    CoarseDown,
}

impl Step {
    pub fn delta(self, config: &EditorConfig) -> f64 {
        match self {
            Step::FineUp => config.fine_step,
            Step::FineDown => -config.fine_step,
            Step::CoarseUp => config.coarse_step,
            Step::CoarseDown => -config.coarse_step,
        }
    }
}

/// A curve pulled from the store, in the normalized domain.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCurve {
    source: SelectedObject,
    max_x: f64,
    points: PointSet,
}

impl LoadedCurve {
    pub fn new(source: SelectedObject, max_x: f64, points: PointSet) -> Self {
        Self {
            source,
            max_x,
            points,
        }
    }

    /// Object the curve was loaded from.
    pub fn source(&self) -> &SelectedObject {
        &self.source
    }

    /// Absolute extent of the source curve, used to draw the x axis.
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }
}

/// Editing context: the active curve type and settings, the loaded curve and
/// the listeners that re-render it.
///
/// Every edit, accepted or rejected, notifies subscribers, except input that
/// does not parse, which only reverts the field.
#[derive(Debug)]
pub struct CurveEditor {
    config: EditorConfig,
    curve_type: CurveType,
    validator: Validator,
    curve: Option<LoadedCurve>,
    notifier: ChangeNotifier,
}

impl CurveEditor {
    pub fn new(config: EditorConfig) -> Self {
        let curve_type = config.curve_type;
        Self {
            config,
            curve_type,
            validator: Validator::new(curve_type),
            curve: None,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn curve_type(&self) -> CurveType {
        self.curve_type
    }

    /// Switches the y domain used by later edits. Points already loaded keep
    /// their values until the next load.
    pub fn set_curve_type(&mut self, curve_type: CurveType) {
        self.curve_type = curve_type;
        self.validator = Validator::new(curve_type);
        self.notifier.notify(CurveEvent::CurveTypeChanged(curve_type));
    }

    pub fn curve(&self) -> Option<&LoadedCurve> {
        self.curve.as_ref()
    }

    pub fn points(&self) -> Option<&PointSet> {
        self.curve.as_ref().map(LoadedCurve::points)
    }

    pub fn is_loaded(&self) -> bool {
        self.curve.is_some()
    }

    /// Replaces whatever was loaded; nothing of the previous curve survives.
    pub fn replace(&mut self, curve: LoadedCurve) {
        debug!(
            object = %curve.source.id,
            points = curve.points.len(),
            "replacing edited curve"
        );
        self.curve = Some(curve);
        self.notifier.notify(CurveEvent::Reloaded);
    }

    pub fn clear(&mut self) {
        self.curve = None;
        self.notifier.notify(CurveEvent::Cleared);
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CurveEvent) + 'static,
    {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Commits a typed x value. Returns the accepted value; on rejection the
    /// point keeps its last accepted x.
    pub fn set_x(&mut self, index: usize, raw: &str) -> Result<f64, EditError> {
        let points = self.points().ok_or(EditError::NothingLoaded)?;
        let checked = self.validator.check_x(points, index, raw);
        self.commit(index, Axis::X, checked)
    }

    /// Commits a typed y value, clamped into the active domain.
    pub fn set_y(&mut self, index: usize, raw: &str) -> Result<f64, EditError> {
        let points = self.points().ok_or(EditError::NothingLoaded)?;
        let checked = self.validator.check_y(points, index, raw);
        self.commit(index, Axis::Y, checked)
    }

    /// Adds `delta` to the accepted value and runs it through the same rules
    /// as typed input.
    pub fn change_value(&mut self, index: usize, axis: Axis, delta: f64) -> Result<f64, EditError> {
        let points = self.points().ok_or(EditError::NothingLoaded)?;
        let point = points
            .get(index)
            .ok_or(StructuralError::IndexOutOfRange {
                index,
                len: points.len(),
            });
        let checked = match (point, axis) {
            (Err(err), _) => Err(err.into()),
            (Ok(point), Axis::X) => self.validator.check_x_value(points, index, point.x + delta),
            (Ok(point), Axis::Y) => self.validator.check_y_value(points, index, point.y + delta),
        };
        self.commit(index, axis, checked)
    }

    pub fn nudge(&mut self, index: usize, axis: Axis, step: Step) -> Result<f64, EditError> {
        let delta = step.delta(&self.config);
        self.change_value(index, axis, delta)
    }

    pub fn set_shape(&mut self, index: usize, shape: CurveShape) -> Result<(), EditError> {
        let curve = self.curve.as_mut().ok_or(EditError::NothingLoaded)?;
        curve.points.set_shape(index, shape)?;
        debug!(index, shape = shape.wire_name(), "shape changed");
        self.notifier.notify(CurveEvent::ShapeChanged { index });
        Ok(())
    }

    /// Inserts a point; y is clamped into the active domain first.
    pub fn insert(&mut self, x: f64, y: f64, shape: CurveShape) -> Result<usize, EditError> {
        let y = self.validator.domain().clamp(y);
        let curve = self.curve.as_mut().ok_or(EditError::NothingLoaded)?;
        match curve.points.insert(x, y, shape) {
            Ok(index) => {
                debug!(index, x, y, "point inserted");
                self.notifier.notify(CurveEvent::PointInserted { index });
                Ok(index)
            }
            Err(err) => {
                debug!(x, %err, "insert rejected");
                self.notifier.notify(CurveEvent::InsertRejected);
                Err(err.into())
            }
        }
    }

    pub fn delete(&mut self, index: usize) -> Result<ControlPoint, EditError> {
        let curve = self.curve.as_mut().ok_or(EditError::NothingLoaded)?;
        let result = curve.points.delete(index);
        self.notifier.notify(CurveEvent::PointDeleted {
            index,
            accepted: result.is_ok(),
        });
        match result {
            Ok(point) => {
                debug!(index, x = point.x, "point deleted");
                Ok(point)
            }
            Err(err) => {
                debug!(index, %err, "delete rejected");
                Err(err.into())
            }
        }
    }

    fn commit(
        &mut self,
        index: usize,
        axis: Axis,
        checked: Result<f64, EditError>,
    ) -> Result<f64, EditError> {
        let applied = checked.and_then(|value| {
            let curve = self.curve.as_mut().ok_or(EditError::NothingLoaded)?;
            match axis {
                Axis::X => curve.points.move_x(index, value)?,
                Axis::Y => curve.points.set_y(index, value)?,
            }
            Ok(value)
        });

        match &applied {
            Ok(value) => {
                debug!(index, ?axis, value, "edit accepted");
                self.notifier.notify(CurveEvent::ValueEdited {
                    index,
                    axis,
                    accepted: true,
                });
            }
            Err(err) if err.notifies() => {
                debug!(index, ?axis, %err, "edit rejected");
                self.notifier.notify(CurveEvent::ValueEdited {
                    index,
                    axis,
                    accepted: false,
                });
            }
            Err(err) => {
                debug!(index, ?axis, %err, "edit reverted");
            }
        }
        applied
    }
}
