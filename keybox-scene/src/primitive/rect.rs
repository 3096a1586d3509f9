use crate::transform::KeyTransform;
use crate::types::PatchStyle;
use lyon_path::{geom::point, Path};
use serde::{Deserialize, Serialize};

use super::KeyPrimitive;

/// An axis-aligned rectangle patch anchored at its lower-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeyRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub style: PatchStyle,
    pub visible: bool,
    pub clip: bool,
    pub transform: KeyTransform,
}

impl KeyRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Default::default()
        }
    }

    pub fn corners(&self) -> [[f32; 2]; 4] {
        [
            [self.x, self.y],
            [self.x + self.width, self.y],
            [self.x + self.width, self.y + self.height],
            [self.x, self.y + self.height],
        ]
    }

    /// Closed rectangle outline with the destination transform applied.
    pub fn transformed_path(&self) -> Path {
        let mut path_builder = Path::builder().with_svg();
        for (i, corner) in self.corners().into_iter().enumerate() {
            let [x, y] = self.transform.transform_point(corner);
            if i == 0 {
                path_builder.move_to(point(x, y));
            } else {
                path_builder.line_to(point(x, y));
            }
        }
        path_builder.close();
        path_builder.build()
    }
}

impl Default for KeyRect {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            style: Default::default(),
            visible: true,
            clip: true,
            transform: Default::default(),
        }
    }
}

impl From<KeyRect> for KeyPrimitive {
    fn from(prim: KeyRect) -> Self {
        KeyPrimitive::Rect(prim)
    }
}
