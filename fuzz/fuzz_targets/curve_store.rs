#![no_main]

use attenuator_core::{AbsoluteCurve, PointSet};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(curve) = serde_json::from_slice::<AbsoluteCurve>(data) else {
        return;
    };
    if let Ok(points) = curve.normalize() {
        check(&points);
        let restored = AbsoluteCurve::from_normalized(&points, curve.max_x());
        assert_eq!(restored.points.len(), points.len());
    }
});

fn check(points: &PointSet) {
    let points = points.points();
    assert!(points.len() >= 2);
    assert_eq!(points[0].x, 0.0);
    assert_eq!(points[points.len() - 1].x, 100.0);
    assert!(points.windows(2).all(|pair| pair[0].x < pair[1].x));
}
