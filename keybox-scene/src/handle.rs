use crate::lyon::lyon_paths_eq;
use crate::types::{ArrowStyle, CollectionStyle, LineStyle, PatchStyle, Paint, TextStyle};
use crate::value::ScalarOrArray;
use serde::{Deserialize, Serialize};

/// The original rendered series a legend entry represents.
///
/// Handles are read-only inputs: the legend copies visual properties off them
/// and never mutates them. The variant set is closed; dispatch to a handler
/// goes through [`HandleKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Handle {
    Line(LineHandle),
    Patch(PatchHandle),
    LineCollection(LineCollectionHandle),
    PolyCollection(PolyCollectionHandle),
    RegularPolyCollection(RegularPolyCollectionHandle),
    PathCollection(PathCollectionHandle),
    CircleCollection(CircleCollectionHandle),
    Arrow(ArrowHandle),
    Errorbar(ErrorbarHandle),
    Stem(StemHandle),
    Text(TextHandle),
    Annotation(AnnotationHandle),
    Tuple(Vec<Handle>),
}

/// Field-less mirror of the [`Handle`] variants, used as the dispatch-map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandleKind {
    Line,
    Patch,
    LineCollection,
    PolyCollection,
    RegularPolyCollection,
    PathCollection,
    CircleCollection,
    Arrow,
    Errorbar,
    Stem,
    Text,
    Annotation,
    Tuple,
}

impl Handle {
    pub fn kind(&self) -> HandleKind {
        match self {
            Handle::Line(_) => HandleKind::Line,
            Handle::Patch(_) => HandleKind::Patch,
            Handle::LineCollection(_) => HandleKind::LineCollection,
            Handle::PolyCollection(_) => HandleKind::PolyCollection,
            Handle::RegularPolyCollection(_) => HandleKind::RegularPolyCollection,
            Handle::PathCollection(_) => HandleKind::PathCollection,
            Handle::CircleCollection(_) => HandleKind::CircleCollection,
            Handle::Arrow(_) => HandleKind::Arrow,
            Handle::Errorbar(_) => HandleKind::Errorbar,
            Handle::Stem(_) => HandleKind::Stem,
            Handle::Text(_) => HandleKind::Text,
            Handle::Annotation(_) => HandleKind::Annotation,
            Handle::Tuple(_) => HandleKind::Tuple,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LineHandle {
    pub style: LineStyle,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PatchHandle {
    pub style: PatchStyle,
}

/// A collection of line segments (e.g. produced by a multi-line plot call).
/// Properties are array-valued with one entry per member line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LineCollectionHandle {
    pub colors: ScalarOrArray<Paint>,
    pub stroke_widths: ScalarOrArray<f32>,
    pub stroke_dashes: ScalarOrArray<Option<Vec<f32>>>,
}

impl Default for LineCollectionHandle {
    fn default() -> Self {
        Self {
            colors: ScalarOrArray::new_scalar(Paint::default()),
            stroke_widths: ScalarOrArray::new_scalar(1.0),
            stroke_dashes: ScalarOrArray::new_scalar(None),
        }
    }
}

/// Filled polygon collection, as produced by area fills and stacked plots.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PolyCollectionHandle {
    pub style: CollectionStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegularPolyCollectionHandle {
    pub num_sides: u32,
    pub rotation: f32,
    pub sizes: Vec<f32>,
    pub style: CollectionStyle,
}

impl Default for RegularPolyCollectionHandle {
    fn default() -> Self {
        Self {
            num_sides: 4,
            rotation: 0.0,
            sizes: vec![],
            style: Default::default(),
        }
    }
}

/// Scatter-style collection of arbitrary marker paths.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PathCollectionHandle {
    pub paths: Vec<lyon_path::Path>,
    pub sizes: Vec<f32>,
    pub style: CollectionStyle,
}

impl PartialEq for PathCollectionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.sizes == other.sizes
            && self.style == other.style
            && self.paths.len() == other.paths.len()
            && self
                .paths
                .iter()
                .zip(other.paths.iter())
                .all(|(a, b)| lyon_paths_eq(a, b))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CircleCollectionHandle {
    pub sizes: Vec<f32>,
    pub style: CollectionStyle,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArrowHandle {
    pub arrow_style: ArrowStyle,
    pub style: PatchStyle,
}

/// The triple of artists an errorbar plot produces. Any component may be
/// absent; `plot_line: None` means the series draws whiskers only.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ErrorbarHandle {
    pub plot_line: Option<LineHandle>,
    pub cap_lines: Vec<LineHandle>,
    pub bar_line_cols: Vec<LineCollectionHandle>,
    pub has_xerr: bool,
    pub has_yerr: bool,
}

/// The triple of artists a stem plot produces.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StemHandle {
    pub marker_line: LineHandle,
    pub stem_lines: Vec<LineHandle>,
    pub baseline: LineHandle,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TextHandle {
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AnnotationHandle {
    pub text: String,
    pub style: TextStyle,
    pub arrow: Option<ArrowHandle>,
}

impl From<LineHandle> for Handle {
    fn from(handle: LineHandle) -> Self {
        Handle::Line(handle)
    }
}

impl From<PatchHandle> for Handle {
    fn from(handle: PatchHandle) -> Self {
        Handle::Patch(handle)
    }
}

impl From<LineCollectionHandle> for Handle {
    fn from(handle: LineCollectionHandle) -> Self {
        Handle::LineCollection(handle)
    }
}

impl From<PolyCollectionHandle> for Handle {
    fn from(handle: PolyCollectionHandle) -> Self {
        Handle::PolyCollection(handle)
    }
}

impl From<ArrowHandle> for Handle {
    fn from(handle: ArrowHandle) -> Self {
        Handle::Arrow(handle)
    }
}

impl From<ErrorbarHandle> for Handle {
    fn from(handle: ErrorbarHandle) -> Self {
        Handle::Errorbar(handle)
    }
}

impl From<StemHandle> for Handle {
    fn from(handle: StemHandle) -> Self {
        Handle::Stem(handle)
    }
}

impl From<TextHandle> for Handle {
    fn from(handle: TextHandle) -> Self {
        Handle::Text(handle)
    }
}

impl From<AnnotationHandle> for Handle {
    fn from(handle: AnnotationHandle) -> Self {
        Handle::Annotation(handle)
    }
}
