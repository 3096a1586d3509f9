use crate::lyon::lyon_paths_eq;
use crate::transform::KeyTransform;
use crate::types::CollectionStyle;
use serde::{Deserialize, Serialize};

use super::KeyPrimitive;

/// Which family of collection mark a [`KeyCollection`] reproduces. The legend
/// key for a collection series is a fresh collection of the same family as
/// the original, not a generic marker set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionFamily {
    RegularPoly { num_sides: u32, rotation: f32 },
    Path { path: lyon_path::Path },
    Circle,
}

impl Default for CollectionFamily {
    fn default() -> Self {
        CollectionFamily::Circle
    }
}

impl PartialEq for CollectionFamily {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::RegularPoly {
                    num_sides: a,
                    rotation: ra,
                },
                Self::RegularPoly {
                    num_sides: b,
                    rotation: rb,
                },
            ) => a == b && ra == rb,
            (Self::Path { path: a }, Self::Path { path: b }) => lyon_paths_eq(a, b),
            (Self::Circle, Self::Circle) => true,
            _ => false,
        }
    }
}

/// A miniature collection: representative sizes placed at per-point pixel
/// offsets inside the key box.
///
/// `transform` is the collection's own geometric transform and stays identity
/// for legend keys; the destination transform is installed as
/// `offset_transform` so it applies to the offsets, not the glyph geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeyCollection {
    pub family: CollectionFamily,
    pub sizes: Vec<f32>,
    pub offsets: Vec<[f32; 2]>,
    pub style: CollectionStyle,
    pub visible: bool,
    pub clip: bool,
    pub transform: KeyTransform,
    pub offset_transform: KeyTransform,
}

impl KeyCollection {
    pub fn new(family: CollectionFamily, sizes: Vec<f32>, offsets: Vec<[f32; 2]>) -> Self {
        Self {
            family,
            sizes,
            offsets,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn transformed_offsets(&self) -> Vec<[f32; 2]> {
        self.offsets
            .iter()
            .map(|p| self.offset_transform.transform_point(*p))
            .collect()
    }
}

impl Default for KeyCollection {
    fn default() -> Self {
        Self {
            family: Default::default(),
            sizes: vec![],
            offsets: vec![],
            style: Default::default(),
            visible: true,
            clip: true,
            transform: Default::default(),
            offset_transform: Default::default(),
        }
    }
}

impl From<KeyCollection> for KeyPrimitive {
    fn from(prim: KeyCollection) -> Self {
        KeyPrimitive::Collection(prim)
    }
}
