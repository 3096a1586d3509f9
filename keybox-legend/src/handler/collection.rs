use itertools::izip;
use keybox_scene::handle::Handle;
use keybox_scene::primitive::{CollectionFamily, KeyCollection, KeyPolyline, KeyPrimitive};
use keybox_scene::transform::KeyTransform;

use crate::context::{KeyBoxGeometry, LegendContext};
use crate::error::KeyboxLegendError;
use crate::handler::{line_style_from_collection, HandlerOpts, LegendHandler};
use crate::sampler::{PointSampler, SizeInterpolator, YOffsets};

/// Handler for line collections: a single stroke through the sampled points,
/// styled from the first element of the collection's property arrays.
#[derive(Debug, Clone)]
pub struct HandlerLineCollection {
    pub opts: HandlerOpts,
    pub sampler: PointSampler,
}

impl Default for HandlerLineCollection {
    fn default() -> Self {
        Self {
            opts: Default::default(),
            sampler: PointSampler::for_scatter(),
        }
    }
}

impl LegendHandler for HandlerLineCollection {
    fn opts(&self) -> &HandlerOpts {
        &self.opts
    }

    fn default_update_prop(&self, prim: &mut KeyPrimitive, handle: &Handle) {
        if let (KeyPrimitive::Polyline(line), Handle::LineCollection(h)) = (prim, handle) {
            line.style = line_style_from_collection(h);
        }
    }

    fn create_primitives(
        &self,
        ctx: &LegendContext,
        handle: &Handle,
        area: &KeyBoxGeometry,
        fontsize: f32,
        trans: &KeyTransform,
    ) -> Result<Vec<KeyPrimitive>, KeyboxLegendError> {
        if !matches!(handle, Handle::LineCollection(_)) {
            return Err(KeyboxLegendError::MismatchedHandle {
                expected: "line collection",
                got: handle.kind(),
            });
        }

        let (xdata, _xdata_marker) = self.sampler.sample_x(ctx, area, fontsize);
        let y = (area.height - area.ydescent) / 2.0;
        let mut legline: KeyPrimitive = KeyPolyline::new(xdata.clone(), vec![y; xdata.len()]).into();
        self.update_prop(&mut legline, handle);
        legline.set_transform(*trans);
        Ok(vec![legline])
    }
}

/// Handler for the scatter-like collection families (regular polygon, path,
/// circle). Produces a fresh collection of the same family as the original,
/// showing a few representative sizes; the destination transform is installed
/// as the offset transform.
#[derive(Debug, Clone)]
pub struct HandlerSizedCollection {
    pub opts: HandlerOpts,
    pub sampler: PointSampler,
    pub yoffsets: YOffsets,
    pub sizes: SizeInterpolator,
}

impl Default for HandlerSizedCollection {
    fn default() -> Self {
        Self {
            opts: Default::default(),
            sampler: PointSampler::for_scatter(),
            yoffsets: Default::default(),
            sizes: Default::default(),
        }
    }
}

impl HandlerSizedCollection {
    pub fn with_yoffsets(yoffsets: Vec<f32>) -> Self {
        Self {
            yoffsets: YOffsets {
                offsets: Some(yoffsets),
                compress_upper: false,
            },
            ..Default::default()
        }
    }
}

impl LegendHandler for HandlerSizedCollection {
    fn opts(&self) -> &HandlerOpts {
        &self.opts
    }

    fn create_primitives(
        &self,
        ctx: &LegendContext,
        handle: &Handle,
        area: &KeyBoxGeometry,
        fontsize: f32,
        trans: &KeyTransform,
    ) -> Result<Vec<KeyPrimitive>, KeyboxLegendError> {
        let (handle_sizes, family) = match handle {
            Handle::RegularPolyCollection(h) => (
                h.sizes.as_slice(),
                CollectionFamily::RegularPoly {
                    num_sides: h.num_sides,
                    rotation: h.rotation,
                },
            ),
            Handle::PathCollection(h) => (
                h.sizes.as_slice(),
                // The key shows the collection's first path; an empty
                // collection degrades to the circle family rather than an
                // invisible empty path.
                match h.paths.first() {
                    Some(path) => CollectionFamily::Path { path: path.clone() },
                    None => CollectionFamily::Circle,
                },
            ),
            Handle::CircleCollection(h) => (h.sizes.as_slice(), CollectionFamily::Circle),
            _ => {
                return Err(KeyboxLegendError::MismatchedHandle {
                    expected: "sized collection",
                    got: handle.kind(),
                })
            }
        };

        let (_xdata, xdata_marker) = self.sampler.sample_x(ctx, area, fontsize);
        let count = xdata_marker.len();
        let ydata = self.yoffsets.sample_y(ctx, area, count);
        let sizes = self.sizes.representative_sizes(ctx, handle_sizes, count);

        let offsets: Vec<[f32; 2]> = izip!(xdata_marker.iter(), ydata.iter())
            .map(|(x, y)| [*x, *y])
            .collect();

        let mut collection: KeyPrimitive = KeyCollection::new(family, sizes, offsets).into();
        self.update_prop(&mut collection, handle);
        // Installs trans as the offset transform for collections.
        collection.set_transform(*trans);
        Ok(vec![collection])
    }
}
