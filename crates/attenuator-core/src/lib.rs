//! Attenuator Core
//! ===============
//! Data model and editing engine for attenuation curves. Curves are edited in
//! a normalized `[0, 100]` x domain, sampled for display with one of ten
//! easing shapes per segment, and converted back to the absolute units of the
//! external system that stores them.

pub mod config;
pub mod curve;
pub mod curve_type;
pub mod editor;
pub mod error;
pub mod notify;
pub mod plot;
pub mod session;
pub mod store;
pub mod units;
pub mod validate;

pub use config::EditorConfig;
pub use curve::{
    sample_segment, ControlPoint, CurveShape, PointSet, Sample, SegmentSamples, X_MAX, X_MIN,
};
pub use curve_type::{CurveType, YDomain};
pub use editor::{CurveEditor, LoadedCurve, Step};
pub use error::{ConfigError, EditError, SessionError, StructuralError};
pub use notify::{ChangeNotifier, CurveEvent, SubscriptionId};
pub use plot::{CurvePlot, PlotModel, PlotSegment};
pub use session::{CurveSession, LoadOutcome, SavedCurve};
pub use store::{
    AbsoluteCurve, AbsolutePoint, AdapterError, CurveStore, FixedSelection, JsonCurveStore,
    MemoryCurveStore, ObjectId, SelectedObject, SelectionProvider,
};
pub use validate::{Axis, Validator};
