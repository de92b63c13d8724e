use thiserror::Error;

use crate::store::{AdapterError, ObjectId};

/// Violations of the ordering and endpoint rules of a [`PointSet`](crate::PointSet).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StructuralError {
    #[error("x = {x} must lie strictly between {lower} and {upper}")]
    Collision { x: f64, lower: f64, upper: f64 },
    #[error("endpoint {index} cannot be moved along x")]
    EndpointLocked { index: usize },
    #[error("endpoint {index} cannot be deleted")]
    EndpointProtected { index: usize },
    #[error("a point already exists at x = {x}")]
    DuplicateX { x: f64 },
    #[error("x = {x} is outside the normalized domain")]
    OutOfDomain { x: f64 },
    #[error("point coordinates must be finite")]
    NonFinite,
    #[error("point {index} does not exist (curve has {len} points)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("a curve needs at least two points, got {count}")]
    TooFewPoints { count: usize },
    #[error("curve must span x = 0 to x = 100, found {first} to {last}")]
    MissingEndpoint { first: f64, last: f64 },
}

/// Outcome of a rejected field edit.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditError {
    #[error("'{input}' is not a number")]
    Parse { input: String },
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error("no curve is loaded")]
    NothingLoaded,
}

impl EditError {
    /// Parse failures revert silently; everything else still re-renders the view.
    pub fn notifies(&self) -> bool {
        matches!(self, EditError::Structural(_))
    }
}

/// Failures crossing the session boundary: these are the only errors that
/// reach the user.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("curve store failed for '{object}': {source}")]
    Adapter {
        object: ObjectId,
        #[source]
        source: AdapterError,
    },
    #[error("selection query failed: {0}")]
    Selection(#[source] AdapterError),
    #[error("stored curve of '{object}' is malformed: {source}")]
    InvalidCurve {
        object: ObjectId,
        #[source]
        source: StructuralError,
    },
    #[error("no curve is loaded")]
    NothingLoaded,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no config directory available on this platform")]
    NoConfigDir,
}
