use std::time::Duration;

use attenuator_core::{
    AbsoluteCurve, ControlPoint, CurveEditor, CurveShape, CurveType, EditorConfig, LoadedCurve,
    PlotModel, PointSet, SelectedObject,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn dense_curve() -> PointSet {
    let points = (0..=32).map(|step| {
        let x = step as f64 * 100.0 / 32.0;
        let shape = CurveShape::ALL[step % CurveShape::ALL.len()];
        ControlPoint::new(x, -(step as f64) * 6.0, shape)
    });
    PointSet::from_points(points).expect("valid curve")
}

fn plot_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("plot_33_points", |b| {
        let mut editor = CurveEditor::new(EditorConfig {
            curve_type: CurveType::Volume,
            ..EditorConfig::default()
        });
        editor.replace(LoadedCurve::new(
            SelectedObject::new("{bench}", "Bench"),
            5_000.0,
            dense_curve(),
        ));
        b.iter(|| black_box(PlotModel::build(&editor)));
    });

    group.bench_function("rescale_33_points", |b| {
        let points = dense_curve();
        b.iter(|| {
            let absolute = AbsoluteCurve::from_normalized(black_box(&points), 5_000.0);
            absolute.normalize().expect("normalize")
        });
    });

    group.finish();
}

criterion_group!(benches, plot_rebuild);
criterion_main!(benches);
