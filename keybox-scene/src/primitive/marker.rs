use crate::transform::KeyTransform;
use crate::types::LineStyle;
use itertools::izip;
use serde::{Deserialize, Serialize};

use super::KeyPrimitive;

/// A sparse point set drawn with the style's marker glyph only; the stroke
/// part of the style is not rendered between points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeyMarkerSet {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub style: LineStyle,
    pub visible: bool,
    pub clip: bool,
    pub transform: KeyTransform,
}

impl KeyMarkerSet {
    pub fn new(x: Vec<f32>, y: Vec<f32>) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points_iter(&self) -> impl Iterator<Item = [f32; 2]> + '_ {
        izip!(self.x.iter(), self.y.iter()).map(|(x, y)| [*x, *y])
    }

    pub fn transformed_points(&self) -> Vec<[f32; 2]> {
        self.points_iter()
            .map(|p| self.transform.transform_point(p))
            .collect()
    }
}

impl Default for KeyMarkerSet {
    fn default() -> Self {
        Self {
            x: vec![],
            y: vec![],
            style: Default::default(),
            visible: true,
            clip: true,
            transform: Default::default(),
        }
    }
}

impl From<KeyMarkerSet> for KeyPrimitive {
    fn from(prim: KeyMarkerSet) -> Self {
        KeyPrimitive::MarkerSet(prim)
    }
}
