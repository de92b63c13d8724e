use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use attenuator_core::{Axis, CurveEditor, CurveShape, EditError, Step};

/// One edit given on the command line, applied in order to the loaded curve.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    /// `x:I=V`, the raw value goes through the same parser as typed input.
    SetX { index: usize, raw: String },
    /// `y:I=V`
    SetY { index: usize, raw: String },
    /// `insert:X,Y[,SHAPE]`
    Insert { x: f64, y: f64, shape: CurveShape },
    /// `delete:I`
    Delete { index: usize },
    /// `shape:I=SHAPE`
    Shape { index: usize, shape: CurveShape },
    /// `nudge:AXIS:I:STEP` with STEP one of `+`, `++`, `-`, `--`
    Nudge { axis: Axis, index: usize, step: Step },
}

impl EditOp {
    pub fn apply(&self, editor: &mut CurveEditor) -> Result<(), EditError> {
        match self {
            EditOp::SetX { index, raw } => editor.set_x(*index, raw).map(drop),
            EditOp::SetY { index, raw } => editor.set_y(*index, raw).map(drop),
            EditOp::Insert { x, y, shape } => editor.insert(*x, *y, *shape).map(drop),
            EditOp::Delete { index } => editor.delete(*index).map(drop),
            EditOp::Shape { index, shape } => editor.set_shape(*index, *shape),
            EditOp::Nudge { axis, index, step } => editor.nudge(*index, *axis, *step).map(drop),
        }
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOp::SetX { index, raw } => write!(f, "x:{index}={raw}"),
            EditOp::SetY { index, raw } => write!(f, "y:{index}={raw}"),
            EditOp::Insert { x, y, shape } => write!(f, "insert:{x},{y},{}", shape.wire_name()),
            EditOp::Delete { index } => write!(f, "delete:{index}"),
            EditOp::Shape { index, shape } => write!(f, "shape:{index}={}", shape.wire_name()),
            EditOp::Nudge { axis, index, step } => {
                let axis = match axis {
                    Axis::X => "x",
                    Axis::Y => "y",
                };
                let step = match step {
                    Step::FineUp => "+",
                    Step::CoarseUp => "++",
                    Step::FineDown => "-",
                    Step::CoarseDown => "--",
                };
                write!(f, "nudge:{axis}:{index}:{step}")
            }
        }
    }
}

impl FromStr for EditOp {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let (verb, rest) = input
            .split_once(':')
            .ok_or_else(|| anyhow!("edit `{input}` has no operation prefix"))?;
        match verb {
            "x" | "y" => {
                let (index, raw) = rest
                    .split_once('=')
                    .ok_or_else(|| anyhow!("expected `{verb}:INDEX=VALUE`, got `{input}`"))?;
                let index = parse_index(index)?;
                let raw = raw.to_owned();
                Ok(if verb == "x" {
                    EditOp::SetX { index, raw }
                } else {
                    EditOp::SetY { index, raw }
                })
            }
            "insert" => {
                let mut fields = rest.split(',');
                let x = parse_number(fields.next(), "x")?;
                let y = parse_number(fields.next(), "y")?;
                let shape = fields.next().map(parse_shape).transpose()?.unwrap_or_default();
                if fields.next().is_some() {
                    bail!("expected `insert:X,Y[,SHAPE]`, got `{input}`");
                }
                Ok(EditOp::Insert { x, y, shape })
            }
            "delete" => Ok(EditOp::Delete {
                index: parse_index(rest)?,
            }),
            "shape" => {
                let (index, shape) = rest
                    .split_once('=')
                    .ok_or_else(|| anyhow!("expected `shape:INDEX=SHAPE`, got `{input}`"))?;
                Ok(EditOp::Shape {
                    index: parse_index(index)?,
                    shape: parse_shape(shape)?,
                })
            }
            "nudge" => {
                let mut fields = rest.splitn(3, ':');
                let axis = match fields.next() {
                    Some("x") => Axis::X,
                    Some("y") => Axis::Y,
                    _ => bail!("expected `nudge:x|y:INDEX:STEP`, got `{input}`"),
                };
                let index = parse_index(fields.next().unwrap_or_default())?;
                let step = match fields.next() {
                    Some("+") => Step::FineUp,
                    Some("++") => Step::CoarseUp,
                    Some("-") => Step::FineDown,
                    Some("--") => Step::CoarseDown,
                    _ => bail!("nudge step must be one of +, ++, -, -- in `{input}`"),
                };
                Ok(EditOp::Nudge { axis, index, step })
            }
            other => bail!("unknown edit operation `{other}`"),
        }
    }
}

fn parse_index(raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .with_context(|| format!("`{raw}` is not a point index"))
}

fn parse_number(raw: Option<&str>, field: &str) -> Result<f64> {
    let raw = raw.ok_or_else(|| anyhow!("missing {field} value"))?;
    raw.trim()
        .parse()
        .with_context(|| format!("`{raw}` is not a valid {field} value"))
}

fn parse_shape(raw: &str) -> Result<CurveShape> {
    CurveShape::lookup(raw.trim()).ok_or_else(|| anyhow!("unknown curve shape `{raw}`"))
}
