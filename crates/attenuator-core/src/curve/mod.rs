pub mod point;
pub mod point_set;
pub mod sampler;
pub mod shape;

pub use point::ControlPoint;
pub use point_set::{PointSet, X_MAX, X_MIN};
pub use sampler::{sample_segment, Sample, SegmentSamples};
pub use shape::CurveShape;
