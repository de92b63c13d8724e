use std::iter::FusedIterator;

use serde::Serialize;

use super::CurveShape;

/// One plotted position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Samples one segment `(x0, y0) -> (x1, y1)` with the shape of its left point.
///
/// The returned iterator is cheap to clone, so a caller that needs the
/// sequence twice can restart it from a copy. Identical inputs always yield
/// identical samples.
pub fn sample_segment(start: Sample, end: Sample, shape: CurveShape) -> SegmentSamples {
    SegmentSamples {
        start,
        end,
        shape,
        count: shape.sample_count(),
        next: 0,
    }
}

#[derive(Debug, Clone)]
pub struct SegmentSamples {
    start: Sample,
    end: Sample,
    shape: CurveShape,
    count: usize,
    next: usize,
}

impl SegmentSamples {
    pub fn shape(&self) -> CurveShape {
        self.shape
    }

    fn sample_at(&self, index: usize) -> Sample {
        let Sample { x: x0, y: y0 } = self.start;
        let Sample { x: x1, y: y1 } = self.end;
        let last = self.count - 1;

        if let CurveShape::Constant = self.shape {
            let x = if index == last { x1 } else { x0 };
            return Sample::new(x, y0);
        }

        let t = index as f64 / last as f64;
        let x = if index == last { x1 } else { x0 + (x1 - x0) * t };
        Sample::new(x, y0 + (y1 - y0) * self.shape.ease(t))
    }
}

impl Iterator for SegmentSamples {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.next >= self.count {
            return None;
        }
        let sample = self.sample_at(self.next);
        self.next += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SegmentSamples {}

impl FusedIterator for SegmentSamples {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(shape: CurveShape, y0: f64, y1: f64) -> Vec<Sample> {
        sample_segment(Sample::new(0.0, y0), Sample::new(10.0, y1), shape).collect()
    }

    #[test]
    fn constant_holds_left_value() {
        let samples = collect(CurveShape::Constant, 0.0, 5.0);
        assert_eq!(samples, vec![Sample::new(0.0, 0.0), Sample::new(10.0, 0.0)]);
    }

    #[test]
    fn sample_counts_per_shape() {
        assert_eq!(collect(CurveShape::Linear, 0.0, 1.0).len(), 50);
        assert_eq!(collect(CurveShape::Log2, 0.0, 1.0).len(), 50);
        assert_eq!(collect(CurveShape::InvertedSCurve, 0.0, 1.0).len(), 100);
        assert_eq!(collect(CurveShape::Constant, 0.0, 1.0).len(), 2);
    }

    #[test]
    fn segments_hit_both_ends() {
        for shape in CurveShape::ALL {
            let samples = collect(shape, -12.0, -3.0);
            let first = samples.first().copied().unwrap();
            let last = samples.last().copied().unwrap();
            assert_eq!(first, Sample::new(0.0, -12.0), "{shape:?}");
            assert_eq!(last.x, 10.0, "{shape:?}");
            if shape != CurveShape::Constant {
                assert!((last.y + 3.0).abs() < 1e-9, "{shape:?}");
            }
        }
    }

    #[test]
    fn linear_is_evenly_spaced() {
        let samples = collect(CurveShape::Linear, 0.0, 49.0);
        for (index, sample) in samples.iter().enumerate() {
            assert!((sample.y - index as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn log_matches_closed_form() {
        let samples = collect(CurveShape::Log2, 0.0, 1.0);
        let t: f64 = 10.0 / 49.0;
        let expected = (1.0 + 9.0 * t).ln() / 10f64.ln();
        assert!((samples[10].y - expected).abs() < 1e-12);
    }

    #[test]
    fn exp_matches_closed_form() {
        let samples = collect(CurveShape::Exp3, 0.0, 2.0);
        let t: f64 = 25.0 / 49.0;
        assert!((samples[25].y - 2.0 * t.powi(4)).abs() < 1e-12);
    }

    #[test]
    fn restarting_yields_identical_samples() {
        let samples = sample_segment(
            Sample::new(0.0, -200.0),
            Sample::new(50.0, 0.0),
            CurveShape::InvertedSCurve,
        );
        let first: Vec<_> = samples.clone().collect();
        let second: Vec<_> = samples.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn reports_exact_length() {
        let mut samples = sample_segment(
            Sample::new(0.0, 0.0),
            Sample::new(1.0, 1.0),
            CurveShape::Exp1,
        );
        assert_eq!(samples.len(), 50);
        samples.next();
        assert_eq!(samples.len(), 49);
    }
}
