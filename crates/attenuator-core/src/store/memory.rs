use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

use super::{AbsoluteCurve, AdapterError, CurveStore, ObjectId};
use crate::curve_type::CurveType;

/// Curve store kept entirely in memory. Useful for embedding and tests;
/// individual objects can be made to refuse reads or writes.
#[derive(Debug, Default)]
pub struct MemoryCurveStore {
    curves: Mutex<HashMap<(ObjectId, CurveType), AbsoluteCurve>>,
    read_only: Mutex<HashSet<ObjectId>>,
    unreachable: Mutex<HashSet<ObjectId>>,
}

impl MemoryCurveStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, object: impl Into<ObjectId>, curve_type: CurveType, curve: AbsoluteCurve) {
        self.curves.lock().insert((object.into(), curve_type), curve);
    }

    /// Makes every later save to `object` fail.
    pub fn reject_saves(&self, object: impl Into<ObjectId>) {
        self.read_only.lock().insert(object.into());
    }

    /// Makes every later load of `object` fail, as if the external system
    /// had gone away.
    pub fn fail_loads(&self, object: impl Into<ObjectId>) {
        self.unreachable.lock().insert(object.into());
    }

    pub fn get(&self, object: &ObjectId, curve_type: CurveType) -> Option<AbsoluteCurve> {
        self.curves.lock().get(&(object.clone(), curve_type)).cloned()
    }
}

impl CurveStore for MemoryCurveStore {
    fn load(
        &self,
        object: &ObjectId,
        curve_type: CurveType,
    ) -> Result<Option<AbsoluteCurve>, AdapterError> {
        if self.unreachable.lock().contains(object) {
            return Err(AdapterError::Unavailable(format!("{object} cannot be read")));
        }
        Ok(self.get(object, curve_type).filter(|curve| !curve.is_empty()))
    }

    fn save(
        &self,
        object: &ObjectId,
        curve_type: CurveType,
        curve: &AbsoluteCurve,
    ) -> Result<(), AdapterError> {
        if self.read_only.lock().contains(object) {
            return Err(AdapterError::Rejected(format!("{object} is read-only")));
        }
        self.insert(object.clone(), curve_type, curve.clone());
        Ok(())
    }
}
