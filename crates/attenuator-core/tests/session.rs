use std::cell::RefCell;
use std::rc::Rc;

use attenuator_core::{
    AbsoluteCurve, AbsolutePoint, CurveEvent, CurveSession, CurveShape, CurveStore, CurveType,
    EditorConfig, FixedSelection, JsonCurveStore, LoadOutcome, MemoryCurveStore, ObjectId,
    PlotModel, SelectedObject, SessionError,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn curve(points: &[(f64, f64)]) -> AbsoluteCurve {
    AbsoluteCurve::new(
        points
            .iter()
            .map(|&(x, y)| AbsolutePoint {
                x,
                y,
                shape: CurveShape::Linear,
            })
            .collect(),
    )
}

fn xs(curve: &AbsoluteCurve) -> Vec<f64> {
    curve.points.iter().map(|point| point.x).collect()
}

fn selection(ids: &[&str]) -> FixedSelection {
    FixedSelection::new(
        ids.iter()
            .map(|id| SelectedObject::new(*id, format!("Sound {id}")))
            .collect(),
    )
}

#[test]
fn load_then_save_reproduces_stored_curve() {
    let store = MemoryCurveStore::new();
    store.insert("a", CurveType::Volume, curve(&[(0.0, 0.0), (25.0, -6.0), (50.0, -200.0)]));

    let mut session = CurveSession::new(&store, selection(&["a"]), EditorConfig::default());
    let outcome = session.load().unwrap();
    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            object: SelectedObject::new("a", "Sound a"),
            points: 3,
            max_x: 50.0,
        }
    );
    let normalized: Vec<_> = session
        .editor()
        .points()
        .unwrap()
        .points()
        .iter()
        .map(|p| p.x)
        .collect();
    assert_eq!(normalized, vec![0.0, 50.0, 100.0]);

    session.save().unwrap();
    let saved = store.get(&ObjectId::from("a"), CurveType::Volume).unwrap();
    assert_eq!(xs(&saved), vec![0.0, 25.0, 50.0]);
}

#[test]
fn batch_save_scales_to_each_object() {
    let store = MemoryCurveStore::new();
    store.insert("src", CurveType::Volume, curve(&[(0.0, 0.0), (100.0, -200.0)]));
    store.insert("wide", CurveType::Volume, curve(&[(0.0, 0.0), (4_000.0, -20.0)]));

    let mut session = CurveSession::new(&store, selection(&["src"]), EditorConfig::default());
    session.load().unwrap();
    session
        .editor_mut()
        .insert(25.0, -12.0, CurveShape::Log2)
        .unwrap();

    let report = session
        .save_to(&[
            SelectedObject::new("src", "Source"),
            SelectedObject::new("wide", "Wide"),
            SelectedObject::new("fresh", "Fresh"),
        ])
        .unwrap();
    let extents: Vec<_> = report.iter().map(|saved| saved.max_x).collect();
    assert_eq!(extents, vec![100.0, 4_000.0, 100.0]);
    // the edited curve still belongs to the source object
    assert_eq!(session.editor().points().unwrap().len(), 3);
    assert_eq!(session.editor().curve().unwrap().source().id.as_str(), "src");

    let wide = store.get(&ObjectId::from("wide"), CurveType::Volume).unwrap();
    assert_eq!(xs(&wide), vec![0.0, 1_000.0, 4_000.0]);
    assert_eq!(wide.points[1].shape, CurveShape::Log2);
    let fresh = store.get(&ObjectId::from("fresh"), CurveType::Volume).unwrap();
    assert_eq!(xs(&fresh), vec![0.0, 25.0, 100.0]);
}

#[test]
fn save_failure_leaves_edited_curve_intact() {
    let store = MemoryCurveStore::new();
    store.insert("a", CurveType::Spread, curve(&[(0.0, 100.0), (60.0, 0.0)]));
    store.reject_saves("b");

    let config = EditorConfig {
        curve_type: CurveType::Spread,
        ..EditorConfig::default()
    };
    let mut session = CurveSession::new(&store, selection(&["a", "b"]), config);
    session.load().unwrap();
    session.editor_mut().set_y(1, "30").unwrap();
    let before = session.editor().points().cloned();

    let err = session.save().unwrap_err();
    assert!(matches!(err, SessionError::Adapter { ref object, .. } if object.as_str() == "b"));
    assert_eq!(session.editor().points().cloned(), before);
    // objects ahead of the failing one were written
    let a = store.get(&ObjectId::from("a"), CurveType::Spread).unwrap();
    assert_eq!(a.points[1].y, 30.0);
}

#[test]
fn reload_discards_edits_and_notifies() {
    let store = MemoryCurveStore::new();
    store.insert("a", CurveType::Volume, curve(&[(0.0, 0.0), (10.0, -3.0)]));

    let mut session = CurveSession::new(&store, selection(&["a"]), EditorConfig::default());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    session
        .editor_mut()
        .subscribe(move |event| sink.borrow_mut().push(*event));

    session.load().unwrap();
    session
        .editor_mut()
        .insert(50.0, -1.0, CurveShape::Linear)
        .unwrap();
    session.load().unwrap();
    assert_eq!(session.editor().points().unwrap().len(), 2);

    assert_eq!(session.select(Vec::new()).unwrap(), LoadOutcome::NoSelection);
    assert!(!session.editor().is_loaded());
    assert!(matches!(session.plot(), PlotModel::Empty { .. }));

    assert_eq!(
        *events.borrow(),
        vec![
            CurveEvent::Reloaded,
            CurveEvent::PointInserted { index: 1 },
            CurveEvent::Reloaded,
            CurveEvent::Cleared,
        ]
    );
}

#[test]
fn empty_and_malformed_curves() {
    let store = MemoryCurveStore::new();
    store.insert("single", CurveType::Focus, curve(&[(0.0, 50.0)]));

    let config = EditorConfig {
        curve_type: CurveType::Focus,
        ..EditorConfig::default()
    };
    let mut session = CurveSession::new(&store, selection(&["none"]), config);
    assert!(matches!(session.load().unwrap(), LoadOutcome::Empty { .. }));
    assert!(matches!(session.save(), Err(SessionError::NothingLoaded)));

    let single = vec![SelectedObject::new("single", "Single")];
    assert!(matches!(
        session.select(single),
        Err(SessionError::InvalidCurve { .. })
    ));
}

#[test]
fn failed_load_keeps_edited_curve() {
    let store = MemoryCurveStore::new();
    store.insert("a", CurveType::Volume, curve(&[(0.0, 0.0), (40.0, -20.0)]));
    store.insert("b", CurveType::Volume, curve(&[(0.0, 100.0)]));

    let mut session = CurveSession::new(&store, selection(&["a"]), EditorConfig::default());
    session.load().unwrap();
    session
        .editor_mut()
        .insert(50.0, -6.0, CurveShape::SCurve)
        .unwrap();
    let before = session.editor().points().cloned();

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    session
        .editor_mut()
        .subscribe(move |event| sink.borrow_mut().push(*event));

    store.fail_loads("a");
    assert!(matches!(
        session.load(),
        Err(SessionError::Adapter { ref object, .. }) if object.as_str() == "a"
    ));
    assert_eq!(session.editor().points().cloned(), before);

    // a malformed curve on the next selection is rejected the same way
    let malformed = vec![SelectedObject::new("b", "Broken")];
    assert!(matches!(
        session.select(malformed),
        Err(SessionError::InvalidCurve { .. })
    ));
    assert_eq!(session.editor().points().cloned(), before);
    assert_eq!(session.editor().curve().unwrap().source().id.as_str(), "a");
    assert!(events.borrow().is_empty());
}

#[test]
fn selecting_reloads_and_discards_edits() {
    let store = MemoryCurveStore::new();
    store.insert("a", CurveType::Volume, curve(&[(0.0, 0.0), (40.0, -20.0)]));
    store.insert("b", CurveType::Volume, curve(&[(0.0, -3.0), (20.0, -9.0)]));

    let mut session = CurveSession::new(&store, selection(&["a"]), EditorConfig::default());
    session.load().unwrap();
    session
        .editor_mut()
        .insert(25.0, -1.0, CurveShape::Linear)
        .unwrap();

    let outcome = session.select(vec![SelectedObject::new("a", "A")]).unwrap();
    assert!(matches!(outcome, LoadOutcome::Loaded { points: 2, .. }));

    let outcome = session.select(vec![SelectedObject::new("b", "B")]).unwrap();
    assert!(matches!(outcome, LoadOutcome::Loaded { max_x, .. } if max_x == 20.0));
    assert_eq!(session.editor().points().unwrap().points()[0].y, -3.0);
}

#[test]
fn curve_type_selects_slot() {
    let store = MemoryCurveStore::new();
    store.insert("a", CurveType::Volume, curve(&[(0.0, 0.0), (30.0, -10.0)]));
    store.insert("a", CurveType::LowPassFilter, curve(&[(0.0, 0.0), (90.0, 70.0)]));

    let mut session = CurveSession::new(&store, selection(&["a"]), EditorConfig::default());
    session.set_curve_type(CurveType::LowPassFilter);
    let LoadOutcome::Loaded { max_x, .. } = session.load().unwrap() else {
        panic!("expected a loaded curve");
    };
    assert_eq!(max_x, 90.0);
    let last = session.editor().points().unwrap().points()[1];
    assert_eq!(last.y, 70.0);
}

#[test]
fn json_store_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("curves.json");
    {
        let store = JsonCurveStore::open(&path).unwrap();
        store
            .save(
                &ObjectId::from("{E1}"),
                CurveType::HighPassFilter,
                &curve(&[(0.0, 0.0), (12.5, 40.0), (250.0, 90.0)]),
            )
            .unwrap();
    }

    let store = JsonCurveStore::open(&path).unwrap();
    let config = EditorConfig {
        curve_type: CurveType::HighPassFilter,
        ..EditorConfig::default()
    };
    let mut session = CurveSession::new(store, selection(&["{E1}"]), config);
    session.load().unwrap();
    session.editor_mut().set_x(1, "10").unwrap();
    session.save().unwrap();

    let reopened = JsonCurveStore::open(&path).unwrap();
    let saved = reopened
        .load(&ObjectId::from("{E1}"), CurveType::HighPassFilter)
        .unwrap()
        .unwrap();
    assert_eq!(xs(&saved), vec![0.0, 25.0, 250.0]);
}
