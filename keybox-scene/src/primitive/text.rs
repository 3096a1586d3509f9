use crate::transform::KeyTransform;
use crate::types::TextStyle;
use serde::{Deserialize, Serialize};

use super::KeyPrimitive;

/// A text string anchored at a key-box position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeyText {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
    pub visible: bool,
    pub clip: bool,
    pub transform: KeyTransform,
}

impl KeyText {
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            ..Default::default()
        }
    }

    pub fn transformed_anchor(&self) -> [f32; 2] {
        self.transform.transform_point([self.x, self.y])
    }
}

impl Default for KeyText {
    fn default() -> Self {
        Self {
            text: String::new(),
            x: 0.0,
            y: 0.0,
            style: Default::default(),
            visible: true,
            clip: true,
            transform: Default::default(),
        }
    }
}

impl From<KeyText> for KeyPrimitive {
    fn from(prim: KeyText) -> Self {
        KeyPrimitive::Text(prim)
    }
}
