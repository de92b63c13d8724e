use serde::Serialize;

use crate::curve::{sample_segment, CurveShape, Sample};
use crate::curve_type::{CurveType, YDomain};
use crate::editor::CurveEditor;
use crate::units::{to_absolute_x, x_axis, y_axis, y_to_position, AxisLayout};

pub const EMPTY_MESSAGE: &str = "No Attenuation Loaded";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSegment {
    pub shape: CurveShape,
    pub samples: Vec<Sample>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvePlot {
    pub title: String,
    pub curve_type: CurveType,
    pub color: &'static str,
    pub max_x: f64,
    pub markers: Vec<Sample>,
    pub segments: Vec<PlotSegment>,
    pub x_axis: AxisLayout,
    pub y_axis: AxisLayout,
}

/// Everything a view needs to draw the editor, recomputed from scratch.
///
/// x is expressed in the absolute units of the loaded curve; on attenuation
/// curves y is the display position from [`y_to_position`], elsewhere the raw
/// percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlotModel {
    Empty { message: &'static str },
    Curve(CurvePlot),
}

impl PlotModel {
    pub fn build(editor: &CurveEditor) -> Self {
        let Some(curve) = editor.curve() else {
            return PlotModel::Empty {
                message: EMPTY_MESSAGE,
            };
        };
        let curve_type = editor.curve_type();
        let domain = curve_type.domain();
        let max_x = curve.max_x();

        let points = curve.points().points();
        let markers: Vec<Sample> = points
            .iter()
            .map(|point| Sample::new(to_absolute_x(point.x, max_x), display_y(domain, point.y)))
            .collect();
        let segments = markers
            .windows(2)
            .zip(points)
            .map(|(pair, point)| PlotSegment {
                shape: point.shape,
                samples: sample_segment(pair[0], pair[1], point.shape).collect(),
            })
            .collect();

        PlotModel::Curve(CurvePlot {
            title: curve.source().name.clone(),
            curve_type,
            color: curve_type.color(),
            max_x,
            markers,
            segments,
            x_axis: x_axis(max_x),
            y_axis: y_axis(domain),
        })
    }

    pub fn curve(&self) -> Option<&CurvePlot> {
        match self {
            PlotModel::Curve(plot) => Some(plot),
            PlotModel::Empty { .. } => None,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.curve().map_or(0, |plot| {
            plot.segments
                .iter()
                .map(|segment| segment.samples.len())
                .sum()
        })
    }
}

fn display_y(domain: YDomain, y: f64) -> f64 {
    match domain {
        YDomain::Attenuation => y_to_position(y),
        YDomain::Percent => y,
    }
}
