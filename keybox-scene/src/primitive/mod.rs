pub mod arrow;
pub mod collection;
pub mod lineset;
pub mod marker;
pub mod polyline;
pub mod rect;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::transform::KeyTransform;
pub use arrow::KeyArrow;
pub use collection::{CollectionFamily, KeyCollection};
pub use lineset::KeyLineSet;
pub use marker::KeyMarkerSet;
pub use polyline::KeyPolyline;
pub use rect::KeyRect;
pub use text::KeyText;

/// A renderable shape produced for one legend key box.
///
/// The first primitive a handler returns is the entry's primary primitive;
/// siblings are drawn but not separately tracked by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyPrimitive {
    Polyline(KeyPolyline),
    MarkerSet(KeyMarkerSet),
    Rect(KeyRect),
    LineSet(KeyLineSet),
    Collection(KeyCollection),
    Text(KeyText),
    Arrow(KeyArrow),
}

impl KeyPrimitive {
    /// Install the destination transform. For collections this is the offset
    /// transform: per-point pixel offsetting stays distinct from the
    /// collection's own geometric transform.
    pub fn set_transform(&mut self, transform: KeyTransform) {
        match self {
            Self::Polyline(prim) => prim.transform = transform,
            Self::MarkerSet(prim) => prim.transform = transform,
            Self::Rect(prim) => prim.transform = transform,
            Self::LineSet(prim) => prim.transform = transform,
            Self::Collection(prim) => prim.offset_transform = transform,
            Self::Text(prim) => prim.transform = transform,
            Self::Arrow(prim) => prim.transform = transform,
        }
    }

    pub fn transform(&self) -> &KeyTransform {
        match self {
            Self::Polyline(prim) => &prim.transform,
            Self::MarkerSet(prim) => &prim.transform,
            Self::Rect(prim) => &prim.transform,
            Self::LineSet(prim) => &prim.transform,
            Self::Collection(prim) => &prim.offset_transform,
            Self::Text(prim) => &prim.transform,
            Self::Arrow(prim) => &prim.transform,
        }
    }

    pub fn set_clip(&mut self, clip: bool) {
        match self {
            Self::Polyline(prim) => prim.clip = clip,
            Self::MarkerSet(prim) => prim.clip = clip,
            Self::Rect(prim) => prim.clip = clip,
            Self::LineSet(prim) => prim.clip = clip,
            Self::Collection(prim) => prim.clip = clip,
            Self::Text(prim) => prim.clip = clip,
            Self::Arrow(prim) => prim.clip = clip,
        }
    }

    pub fn is_clipped(&self) -> bool {
        match self {
            Self::Polyline(prim) => prim.clip,
            Self::MarkerSet(prim) => prim.clip,
            Self::Rect(prim) => prim.clip,
            Self::LineSet(prim) => prim.clip,
            Self::Collection(prim) => prim.clip,
            Self::Text(prim) => prim.clip,
            Self::Arrow(prim) => prim.clip,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        match self {
            Self::Polyline(prim) => prim.visible = visible,
            Self::MarkerSet(prim) => prim.visible = visible,
            Self::Rect(prim) => prim.visible = visible,
            Self::LineSet(prim) => prim.visible = visible,
            Self::Collection(prim) => prim.visible = visible,
            Self::Text(prim) => prim.visible = visible,
            Self::Arrow(prim) => prim.visible = visible,
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Self::Polyline(prim) => prim.visible,
            Self::MarkerSet(prim) => prim.visible,
            Self::Rect(prim) => prim.visible,
            Self::LineSet(prim) => prim.visible,
            Self::Collection(prim) => prim.visible,
            Self::Text(prim) => prim.visible,
            Self::Arrow(prim) => prim.visible,
        }
    }
}
