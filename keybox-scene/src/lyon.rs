use lyon_path::geom::euclid::{Point2D, UnknownUnit};
use lyon_path::{Path, PathEvent};
use ordered_float::OrderedFloat;
use std::hash::{Hash, Hasher};

pub fn hash_point<H: Hasher>(point: &Point2D<f32, UnknownUnit>, hasher: &mut H) {
    OrderedFloat::from(point.x).hash(hasher);
    OrderedFloat::from(point.y).hash(hasher);
}

pub fn hash_lyon_path<H: Hasher>(path: &Path, hasher: &mut H) {
    for evt in path.iter() {
        // hash enum variant
        let variant = std::mem::discriminant(&evt);
        variant.hash(hasher);

        // hash enum value
        match evt {
            PathEvent::Begin { at } => hash_point(&at, hasher),
            PathEvent::Line { from, to, .. } => {
                hash_point(&from, hasher);
                hash_point(&to, hasher);
            }
            PathEvent::End { last, first, close } => {
                hash_point(&last, hasher);
                hash_point(&first, hasher);
                close.hash(hasher);
            }
            PathEvent::Quadratic { from, ctrl, to, .. } => {
                hash_point(&from, hasher);
                hash_point(&ctrl, hasher);
                hash_point(&to, hasher);
            }
            PathEvent::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            } => {
                hash_point(&from, hasher);
                hash_point(&ctrl1, hasher);
                hash_point(&ctrl2, hasher);
                hash_point(&to, hasher);
            }
        }
    }
}

/// Equality for types that carry lyon paths goes through hashing since `Path`
/// does not implement `PartialEq` directly.
pub fn lyon_paths_eq(a: &Path, b: &Path) -> bool {
    let mut hash_a = std::hash::DefaultHasher::new();
    let mut hash_b = std::hash::DefaultHasher::new();
    hash_lyon_path(a, &mut hash_a);
    hash_lyon_path(b, &mut hash_b);
    hash_a.finish() == hash_b.finish()
}
