use serde::Serialize;
use tracing::{info, warn};

use crate::config::EditorConfig;
use crate::curve_type::CurveType;
use crate::editor::{CurveEditor, LoadedCurve};
use crate::error::SessionError;
use crate::plot::PlotModel;
use crate::store::{
    AbsoluteCurve, AdapterError, CurveStore, FixedSelection, ObjectId, SelectedObject,
    SelectionProvider,
};
use crate::units::DEFAULT_MAX_X;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Nothing is selected; the editor was cleared.
    NoSelection,
    /// The selected object has no points for the active curve type; the
    /// editor was cleared.
    Empty { object: SelectedObject },
    Loaded {
        object: SelectedObject,
        points: usize,
        max_x: f64,
    },
}

/// Result of writing the edited curve to one object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedCurve {
    pub object: ObjectId,
    pub max_x: f64,
    pub points: usize,
}

/// Connects the editor to the external system: the store that owns curves
/// and the provider of the current selection.
#[derive(Debug)]
pub struct CurveSession<S, P> {
    store: S,
    selection: P,
    editor: CurveEditor,
}

impl<S, P> CurveSession<S, P>
where
    S: CurveStore,
    P: SelectionProvider,
{
    pub fn new(store: S, selection: P, config: EditorConfig) -> Self {
        Self {
            store,
            selection,
            editor: CurveEditor::new(config),
        }
    }

    pub fn editor(&self) -> &CurveEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut CurveEditor {
        &mut self.editor
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn selection(&self) -> &P {
        &self.selection
    }

    pub fn set_curve_type(&mut self, curve_type: CurveType) {
        self.editor.set_curve_type(curve_type);
    }

    /// Reloads the editor from the first selected object.
    ///
    /// A failing store or a malformed stored curve leaves the current curve
    /// untouched.
    pub fn load(&mut self) -> Result<LoadOutcome, SessionError> {
        let selected = self.selection.selected().map_err(SessionError::Selection)?;
        let Some(object) = selected.into_iter().next() else {
            info!("nothing selected, clearing curve");
            self.editor.clear();
            return Ok(LoadOutcome::NoSelection);
        };

        let curve_type = self.editor.curve_type();
        let stored = self
            .store
            .load(&object.id, curve_type)
            .map_err(|source| {
                warn!(object = %object.id, %source, "failed to load curve");
                SessionError::Adapter {
                    object: object.id.clone(),
                    source,
                }
            })?;

        let Some(stored) = stored else {
            info!(object = %object.id, curve_type = curve_type.external_id(), "no curve points");
            self.editor.clear();
            return Ok(LoadOutcome::Empty { object });
        };

        let max_x = stored.max_x();
        let points = stored
            .normalize()
            .map_err(|source| SessionError::InvalidCurve {
                object: object.id.clone(),
                source,
            })?;
        let count = points.len();
        info!(
            object = %object.id,
            curve_type = curve_type.external_id(),
            points = count,
            max_x,
            "curve loaded"
        );
        self.editor
            .replace(LoadedCurve::new(object.clone(), max_x, points));
        Ok(LoadOutcome::Loaded {
            object,
            points: count,
            max_x,
        })
    }

    /// Writes the edited curve to every selected object, each scaled to that
    /// object's own extent.
    ///
    /// Stops at the first failing object; objects before it keep the new
    /// curve. The edited curve itself is never modified.
    pub fn save(&self) -> Result<Vec<SavedCurve>, SessionError> {
        self.editor.points().ok_or(SessionError::NothingLoaded)?;
        let selected = self.selection.selected().map_err(SessionError::Selection)?;
        self.save_to(&selected)
    }

    /// Same as [`save`](Self::save) for an explicit list of objects. The
    /// selection and the loaded curve stay as they are.
    pub fn save_to(&self, targets: &[SelectedObject]) -> Result<Vec<SavedCurve>, SessionError> {
        let points = self.editor.points().ok_or(SessionError::NothingLoaded)?;
        let curve_type = self.editor.curve_type();

        let mut saved = Vec::with_capacity(targets.len());
        for object in targets {
            let adapter_error = |source: AdapterError| {
                warn!(object = %object.id, %source, "failed to save curve");
                SessionError::Adapter {
                    object: object.id.clone(),
                    source,
                }
            };
            let max_x = self
                .store
                .load(&object.id, curve_type)
                .map_err(adapter_error)?
                .map_or(DEFAULT_MAX_X, |current| current.max_x());
            let curve = AbsoluteCurve::from_normalized(points, max_x);
            self.store
                .save(&object.id, curve_type, &curve)
                .map_err(adapter_error)?;
            info!(
                object = %object.id,
                curve_type = curve_type.external_id(),
                max_x,
                "curve saved"
            );
            saved.push(SavedCurve {
                object: object.id.clone(),
                max_x,
                points: curve.points.len(),
            });
        }
        Ok(saved)
    }

    pub fn plot(&self) -> PlotModel {
        PlotModel::build(&self.editor)
    }
}

impl<S: CurveStore> CurveSession<S, FixedSelection> {
    /// Replaces the selection and reloads from it. Whatever was edited
    /// before is discarded, even when the new selection is the same.
    pub fn select(&mut self, objects: Vec<SelectedObject>) -> Result<LoadOutcome, SessionError> {
        self.selection.set(objects);
        self.load()
    }
}
