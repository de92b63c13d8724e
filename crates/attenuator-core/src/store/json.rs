use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AbsoluteCurve, AdapterError, CurveRecord, CurveStore, CurveUse, ObjectId};
use crate::curve_type::CurveType;

#[derive(Debug, Default, Serialize, Deserialize)]
struct JsonStoreData {
    curves: Vec<CurveRecord>,
}

/// Curve store backed by a JSON file of set-curve records.
///
/// The whole file is read on open and rewritten after every save.
#[derive(Debug)]
pub struct JsonCurveStore {
    path: PathBuf,
    data: Mutex<JsonStoreData>,
}

impl JsonCurveStore {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AdapterError> {
        let path = path.into();
        let data = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            JsonStoreData::default()
        };
        debug!(path = %path.display(), curves = data.curves.len(), "opened curve store");
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> Vec<CurveRecord> {
        self.data.lock().curves.clone()
    }

    fn persist_locked(&self, data: &JsonStoreData) -> Result<(), AdapterError> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl CurveStore for JsonCurveStore {
    fn load(
        &self,
        object: &ObjectId,
        curve_type: CurveType,
    ) -> Result<Option<AbsoluteCurve>, AdapterError> {
        let data = self.data.lock();
        let curve = data
            .curves
            .iter()
            .find(|record| &record.object == object && record.curve_type == curve_type)
            .filter(|record| !record.points.is_empty())
            .map(|record| AbsoluteCurve::new(record.points.clone()));
        Ok(curve)
    }

    fn save(
        &self,
        object: &ObjectId,
        curve_type: CurveType,
        curve: &AbsoluteCurve,
    ) -> Result<(), AdapterError> {
        let mut data = self.data.lock();
        let mut curves = data.curves.clone();
        let position = curves
            .iter()
            .position(|record| &record.object == object && record.curve_type == curve_type);
        match position {
            Some(index) => {
                let existing = &mut curves[index];
                existing.usage = CurveUse::Custom;
                existing.points = curve.points.clone();
            }
            None => curves.push(CurveRecord::custom(object.clone(), curve_type, curve)),
        }
        // memory only follows a successful write
        let updated = JsonStoreData { curves };
        self.persist_locked(&updated)?;
        *data = updated;
        debug!(%object, curve_type = curve_type.external_id(), "curve written");
        Ok(())
    }
}
