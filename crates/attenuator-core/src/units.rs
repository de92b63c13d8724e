//! Conversions between the normalized editing domain and the units of the
//! external curve, plus the display mapping of the y axis.

use serde::Serialize;

use crate::curve::X_MAX;
use crate::curve_type::YDomain;

/// Extent assumed for curves that carry no points.
pub const DEFAULT_MAX_X: f64 = 100.0;

/// dB values pinned to evenly spaced display positions on attenuation plots.
pub const DB_BREAKPOINTS: [f64; 9] = [-200.0, -18.1, -12.0, -8.5, -6.0, -4.1, -2.5, -1.2, 0.0];

const X_TICKS: usize = 6;
const X_PADDING: f64 = 0.05;

pub fn to_normalized_x(absolute_x: f64, max_x: f64) -> f64 {
    absolute_x * X_MAX / max_x
}

pub fn to_absolute_x(normalized_x: f64, max_x: f64) -> f64 {
    normalized_x * max_x / X_MAX
}

/// Largest x of a stored curve, or [`DEFAULT_MAX_X`] when there is none.
///
/// A non-positive extent cannot scale anything and is treated as missing.
pub fn curve_extent<I>(xs: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    xs.into_iter()
        .filter(|x| x.is_finite())
        .fold(None, |max: Option<f64>, x| Some(max.map_or(x, |max| max.max(x))))
        .filter(|max| *max > 0.0)
        .unwrap_or(DEFAULT_MAX_X)
}

/// Display position of the i-th dB breakpoint.
pub fn breakpoint_position(index: usize) -> f64 {
    index as f64 / (DB_BREAKPOINTS.len() - 1) as f64
}

/// Maps an attenuation level onto `[0, 1]` for plotting.
///
/// The mapping is piecewise linear between [`DB_BREAKPOINTS`], which spreads
/// the musically relevant range near 0 dB over most of the axis. It only
/// affects drawing and is never persisted.
pub fn y_to_position(y: f64) -> f64 {
    let y = YDomain::Attenuation.clamp(y);
    for (index, pair) in DB_BREAKPOINTS.windows(2).enumerate() {
        let (low, high) = (pair[0], pair[1]);
        if y <= high {
            let fraction = (y - low) / (high - low);
            let start = breakpoint_position(index);
            let end = breakpoint_position(index + 1);
            return start + (end - start) * fraction;
        }
    }
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Visible range and tick marks of one plot axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLayout {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<Tick>,
}

/// Six evenly spaced ticks over `[0, max_x]` with 5 % padding on both sides.
pub fn x_axis(max_x: f64) -> AxisLayout {
    let pad = max_x * X_PADDING;
    let ticks = (0..X_TICKS)
        .map(|index| {
            let position = max_x * index as f64 / (X_TICKS - 1) as f64;
            Tick {
                position,
                label: format!("{}", position.trunc() as i64),
            }
        })
        .collect();
    AxisLayout {
        min: -pad,
        max: max_x + pad,
        ticks,
    }
}

pub fn y_axis(domain: YDomain) -> AxisLayout {
    match domain {
        YDomain::Attenuation => AxisLayout {
            min: -0.05,
            max: 1.05,
            ticks: DB_BREAKPOINTS
                .iter()
                .enumerate()
                .map(|(index, db)| Tick {
                    position: breakpoint_position(index),
                    label: format!("{db:?}"),
                })
                .collect(),
        },
        YDomain::Percent => AxisLayout {
            min: -5.0,
            max: 105.0,
            ticks: (0..=10)
                .map(|step| Tick {
                    position: f64::from(step * 10),
                    label: (step * 10).to_string(),
                })
                .collect(),
        },
    }
}
