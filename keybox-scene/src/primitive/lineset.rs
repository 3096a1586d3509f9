use crate::transform::KeyTransform;
use crate::types::LineStyle;
use lyon_path::{geom::point, Path};
use serde::{Deserialize, Serialize};

use super::KeyPrimitive;

/// A list of disjoint line segments sharing one style, used for error-bar
/// whiskers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeyLineSet {
    pub segments: Vec<[[f32; 2]; 2]>,
    pub style: LineStyle,
    pub visible: bool,
    pub clip: bool,
    pub transform: KeyTransform,
}

impl KeyLineSet {
    pub fn new(segments: Vec<[[f32; 2]; 2]>) -> Self {
        Self {
            segments,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// One move/line pair per segment, with the destination transform
    /// applied.
    pub fn transformed_path(&self) -> Path {
        let mut path_builder = Path::builder().with_svg();
        for [p0, p1] in &self.segments {
            let [x0, y0] = self.transform.transform_point(*p0);
            let [x1, y1] = self.transform.transform_point(*p1);
            path_builder.move_to(point(x0, y0));
            path_builder.line_to(point(x1, y1));
        }
        path_builder.build()
    }
}

impl Default for KeyLineSet {
    fn default() -> Self {
        Self {
            segments: vec![],
            style: Default::default(),
            visible: true,
            clip: true,
            transform: Default::default(),
        }
    }
}

impl From<KeyLineSet> for KeyPrimitive {
    fn from(prim: KeyLineSet) -> Self {
        KeyPrimitive::LineSet(prim)
    }
}
