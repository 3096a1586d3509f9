use crate::lyon::{hash_lyon_path, lyon_paths_eq};
use crate::value::ScalarOrArray;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A solid color, or the explicit "none" paint that an empty property array
/// degrades to. "None" is not the same as a fully transparent color: it marks
/// the property as absent rather than invisible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Paint {
    Color([f32; 4]),
    None,
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Color([0.0, 0.0, 0.0, 1.0])
    }
}

impl Hash for Paint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Paint::Color(c) => [
                OrderedFloat::from(c[0]),
                OrderedFloat::from(c[1]),
                OrderedFloat::from(c[2]),
                OrderedFloat::from(c[3]),
            ]
            .hash(state),
            Paint::None => state.write_u8(0xff),
        }
    }
}

impl Paint {
    pub fn transparent() -> Self {
        Paint::Color([0.0, 0.0, 0.0, 0.0])
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Paint::None)
    }

    pub fn color_or_transparent(&self) -> [f32; 4] {
        match self {
            Paint::Color(c) => *c,
            Paint::None => [0.0, 0.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Marker glyph drawn at each sampled point of a marker set.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerShape {
    #[default]
    Circle,
    Square,
    /// Vertical tick, used for x-error whisker caps.
    TickVertical,
    /// Horizontal tick, used for y-error whisker caps.
    TickHorizontal,
    /// Path with origin at the marker center.
    Path(lyon_path::Path),
}

impl PartialEq for MarkerShape {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Circle, Self::Circle) => true,
            (Self::Square, Self::Square) => true,
            (Self::TickVertical, Self::TickVertical) => true,
            (Self::TickHorizontal, Self::TickHorizontal) => true,
            (Self::Path(a), Self::Path(b)) => lyon_paths_eq(a, b),
            _ => false,
        }
    }
}

impl Hash for MarkerShape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            MarkerShape::Circle => state.write_u8(0),
            MarkerShape::Square => state.write_u8(1),
            MarkerShape::TickVertical => state.write_u8(2),
            MarkerShape::TickHorizontal => state.write_u8(3),
            MarkerShape::Path(path) => hash_lyon_path(path, state),
        }
    }
}

/// Head/tail style of a fancy arrow patch.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrowStyle {
    Curve,
    CurveA,
    CurveB,
    CurveAB,
    #[default]
    Simple,
    Fancy,
    Wedge,
}

/// Visual properties of a line series: stroke styling plus the optional
/// marker drawn at sampled points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LineStyle {
    pub stroke: Paint,
    pub stroke_width: f32,
    pub stroke_dash: Option<Vec<f32>>,
    pub stroke_cap: StrokeCap,
    pub alpha: Option<f32>,
    pub marker: Option<MarkerShape>,
    pub marker_size: f32,
    pub marker_fill: Paint,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            stroke: Paint::default(),
            stroke_width: 1.0,
            stroke_dash: None,
            stroke_cap: Default::default(),
            alpha: None,
            marker: None,
            marker_size: 6.0,
            marker_fill: Paint::default(),
        }
    }
}

/// Visual properties of a filled patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PatchStyle {
    pub fill: Paint,
    pub edge: Paint,
    pub stroke_width: f32,
    pub stroke_dash: Option<Vec<f32>>,
    pub hatch: Option<String>,
    pub filled: bool,
    pub alpha: Option<f32>,
}

impl Default for PatchStyle {
    fn default() -> Self {
        Self {
            fill: Paint::default(),
            edge: Paint::default(),
            stroke_width: 1.0,
            stroke_dash: None,
            hatch: None,
            filled: true,
            alpha: None,
        }
    }
}

impl PatchStyle {
    /// Fully transparent placeholder style, used when a legend entry has to
    /// occupy a slot without drawing anything.
    pub fn transparent() -> Self {
        Self {
            fill: Paint::Color([1.0, 1.0, 1.0, 1.0]),
            edge: Paint::None,
            alpha: Some(0.0),
            ..Default::default()
        }
    }
}

/// Visual properties of a collection mark. Each property may be array-valued
/// with one entry per collection element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CollectionStyle {
    pub face: ScalarOrArray<Paint>,
    pub edge: ScalarOrArray<Paint>,
    pub stroke_widths: ScalarOrArray<f32>,
    pub stroke_dashes: ScalarOrArray<Option<Vec<f32>>>,
    pub hatch: Option<String>,
    pub filled: bool,
    pub alpha: Option<f32>,
}

impl Default for CollectionStyle {
    fn default() -> Self {
        Self {
            face: ScalarOrArray::new_scalar(Paint::default()),
            edge: ScalarOrArray::new_scalar(Paint::None),
            stroke_widths: ScalarOrArray::new_scalar(1.0),
            stroke_dashes: ScalarOrArray::new_scalar(None),
            hatch: None,
            filled: true,
            alpha: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TextStyle {
    pub color: Paint,
    pub font: String,
    pub font_size: f32,
    pub alpha: Option<f32>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Paint::default(),
            font: "sans-serif".to_string(),
            font_size: 10.0,
            alpha: None,
        }
    }
}
