use crate::transform::KeyTransform;
use crate::types::LineStyle;
use itertools::izip;
use lyon_path::{geom::point, Path};
use serde::{Deserialize, Serialize};

use super::KeyPrimitive;

/// An ordered vertex sequence drawn as one connected stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeyPolyline {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub style: LineStyle,
    pub visible: bool,
    pub clip: bool,
    pub transform: KeyTransform,
}

impl KeyPolyline {
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

    /// Flatten to a lyon path with the destination transform applied.
    pub fn transformed_path(&self) -> Path {
        let mut path_builder = Path::builder().with_svg();
        for (i, p) in self.points_iter().enumerate() {
            let [x, y] = self.transform.transform_point(p);
            if i == 0 {
                path_builder.move_to(point(x, y));
            } else {
                path_builder.line_to(point(x, y));
            }
        }
        path_builder.build()
    }
}

impl Default for KeyPolyline {
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

impl From<KeyPolyline> for KeyPrimitive {
    fn from(prim: KeyPolyline) -> Self {
        KeyPrimitive::Polyline(prim)
    }
}
