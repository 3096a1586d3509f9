use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// 2D affine transform mapping key-box coordinates onto the canvas.
///
/// Row-vector convention: a point `[x, y]` maps to
/// `[x*m11 + y*m21 + m31, x*m12 + y*m22 + m32]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeyTransform {
    pub m11: f32,
    pub m12: f32,
    pub m21: f32,
    pub m22: f32,
    pub m31: f32,
    pub m32: f32,
}

impl Default for KeyTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Hash for KeyTransform {
    fn hash<H: Hasher>(&self, state: &mut H) {
        [
            self.m11, self.m12, self.m21, self.m22, self.m31, self.m32,
        ]
        .iter()
        .for_each(|v| OrderedFloat::from(*v).hash(state));
    }
}

impl KeyTransform {
    pub fn identity() -> Self {
        Self {
            m11: 1.0,
            m12: 0.0,
            m21: 0.0,
            m22: 1.0,
            m31: 0.0,
            m32: 0.0,
        }
    }

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self {
            m31: tx,
            m32: ty,
            ..Self::identity()
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            m11: sx,
            m22: sy,
            ..Self::identity()
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn transform_point(&self, point: [f32; 2]) -> [f32; 2] {
        let [x, y] = point;
        [
            x * self.m11 + y * self.m21 + self.m31,
            x * self.m12 + y * self.m22 + self.m32,
        ]
    }

    /// Composition: apply `self` first, then `other`.
    pub fn then(&self, other: &KeyTransform) -> KeyTransform {
        KeyTransform {
            m11: self.m11 * other.m11 + self.m12 * other.m21,
            m12: self.m11 * other.m12 + self.m12 * other.m22,
            m21: self.m21 * other.m11 + self.m22 * other.m21,
            m22: self.m21 * other.m12 + self.m22 * other.m22,
            m31: self.m31 * other.m11 + self.m32 * other.m21 + other.m31,
            m32: self.m31 * other.m12 + self.m32 * other.m22 + other.m32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_then_scale() {
        let t = KeyTransform::translation(1.0, 2.0).then(&KeyTransform::scale(2.0, 3.0));
        assert_eq!(t.transform_point([0.0, 0.0]), [2.0, 6.0]);
        assert_eq!(t.transform_point([1.0, 1.0]), [4.0, 9.0]);
    }

    #[test]
    fn test_identity_roundtrip() {
        let t = KeyTransform::identity();
        assert!(t.is_identity());
        assert_eq!(t.transform_point([3.5, -1.25]), [3.5, -1.25]);
    }
}
