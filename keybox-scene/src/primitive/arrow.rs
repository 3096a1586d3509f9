use crate::transform::KeyTransform;
use crate::types::{ArrowStyle, PatchStyle};
use serde::{Deserialize, Serialize};

use super::KeyPrimitive;

/// An arrow patch between two endpoints. `mutation_scale` controls the size
/// of the head/tail decorations the arrow style adds around the shaft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeyArrow {
    pub start: [f32; 2],
    pub end: [f32; 2],
    pub mutation_scale: f32,
    pub arrow_style: ArrowStyle,
    pub style: PatchStyle,
    pub visible: bool,
    pub clip: bool,
    pub transform: KeyTransform,
}

impl KeyArrow {
    pub fn new(start: [f32; 2], end: [f32; 2], mutation_scale: f32) -> Self {
        Self {
            start,
            end,
            mutation_scale,
            ..Default::default()
        }
    }

    pub fn transformed_endpoints(&self) -> ([f32; 2], [f32; 2]) {
        (
            self.transform.transform_point(self.start),
            self.transform.transform_point(self.end),
        )
    }
}

impl Default for KeyArrow {
    fn default() -> Self {
        Self {
            start: [0.0, 0.0],
            end: [0.0, 0.0],
            mutation_scale: 1.0,
            arrow_style: Default::default(),
            style: Default::default(),
            visible: true,
            clip: true,
            transform: Default::default(),
        }
    }
}

impl From<KeyArrow> for KeyPrimitive {
    fn from(prim: KeyArrow) -> Self {
        KeyPrimitive::Arrow(prim)
    }
}
