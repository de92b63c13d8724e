use std::fmt;

use serde::{Deserialize, Serialize};

const INVERTED_S_STEEPNESS: f64 = 2.5;

/// Interpolation applied to the segment that starts at a control point.
///
/// Wire names match the external curve representation. Names the tool does
/// not know decode to [`CurveShape::Linear`], so the sampler never sees an
/// unknown shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum CurveShape {
    Constant,
    #[default]
    Linear,
    Log1,
    Log2,
    Log3,
    SCurve,
    InvertedSCurve,
    Exp1,
    Exp2,
    Exp3,
}

impl CurveShape {
    pub const ALL: [CurveShape; 10] = [
        CurveShape::Constant,
        CurveShape::Linear,
        CurveShape::Log3,
        CurveShape::Log2,
        CurveShape::Log1,
        CurveShape::InvertedSCurve,
        CurveShape::SCurve,
        CurveShape::Exp1,
        CurveShape::Exp2,
        CurveShape::Exp3,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            CurveShape::Constant => "Constant",
            CurveShape::Linear => "Linear",
            CurveShape::Log1 => "Log1",
            CurveShape::Log2 => "Log2",
            CurveShape::Log3 => "Log3",
            CurveShape::SCurve => "SCurve",
            CurveShape::InvertedSCurve => "InvertedSCurve",
            CurveShape::Exp1 => "Exp1",
            CurveShape::Exp2 => "Exp2",
            CurveShape::Exp3 => "Exp3",
        }
    }

    /// Label shown in the shape picker of the authoring tool.
    pub fn label(self) -> &'static str {
        match self {
            CurveShape::Constant => "Constant",
            CurveShape::Linear => "Linear",
            CurveShape::Log3 => "Logarithmic Base 3",
            CurveShape::Log2 => "Sine (Constant Power Fade In)",
            CurveShape::Log1 => "Logarithmic (Base 1.41)",
            CurveShape::InvertedSCurve => "Inverted S-Curve",
            CurveShape::SCurve => "S-Curve",
            CurveShape::Exp1 => "Exponential (Base 1.41)",
            CurveShape::Exp2 => "Sine (Constant Power Fade Out)",
            CurveShape::Exp3 => "Exponential Base 3",
        }
    }

    /// Decodes a wire name, falling back to `Linear` for anything unknown.
    pub fn from_wire(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|shape| shape.wire_name() == name)
            .unwrap_or_default()
    }

    /// Accepts either a wire name or a picker label (case-insensitive).
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|shape| {
            shape.wire_name().eq_ignore_ascii_case(name) || shape.label().eq_ignore_ascii_case(name)
        })
    }

    /// Number of samples the sampler emits for one segment of this shape.
    pub fn sample_count(self) -> usize {
        match self {
            CurveShape::Constant => 2,
            CurveShape::InvertedSCurve => 100,
            _ => 50,
        }
    }

    /// Eased progress for `t` in `[0, 1]`. `Constant` holds at zero.
    pub fn ease(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            CurveShape::Constant => 0.0,
            CurveShape::Linear => t,
            CurveShape::Log1 => log_ease(t, 3.5),
            CurveShape::Log2 => log_ease(t, 10.0),
            CurveShape::Log3 => log_ease(t, 30.0),
            CurveShape::Exp1 => t.powf(1.3),
            CurveShape::Exp2 => t.powi(2),
            CurveShape::Exp3 => t.powi(4),
            CurveShape::SCurve => t * t * (3.0 - 2.0 * t),
            CurveShape::InvertedSCurve => {
                let p1 = 1.0 - INVERTED_S_STEEPNESS / 10.0;
                let p2 = INVERTED_S_STEEPNESS / 10.0;
                let u = 1.0 - t;
                3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
            }
        }
    }
}

fn log_ease(t: f64, base: f64) -> f64 {
    ((base - 1.0) * t).ln_1p() / base.ln()
}

impl From<String> for CurveShape {
    fn from(name: String) -> Self {
        CurveShape::from_wire(&name)
    }
}

impl From<CurveShape> for &'static str {
    fn from(shape: CurveShape) -> Self {
        shape.wire_name()
    }
}

impl fmt::Display for CurveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
