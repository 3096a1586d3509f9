use keybox_scene::handle::Handle;
use keybox_scene::primitive::{KeyMarkerSet, KeyPolyline, KeyPrimitive};
use keybox_scene::transform::KeyTransform;

use crate::context::{KeyBoxGeometry, LegendContext};
use crate::error::KeyboxLegendError;
use crate::handler::{HandlerOpts, LegendHandler};
use crate::sampler::PointSampler;

/// Handler for line series: the connecting stroke drawn through every sampled
/// point, plus the marker glyphs drawn as a separate primitive so each can be
/// styled independently.
#[derive(Debug, Default, Clone)]
pub struct HandlerLine {
    pub opts: HandlerOpts,
    pub sampler: PointSampler,
}

impl HandlerLine {
    pub fn new(marker_pad: f32, numpoints: Option<usize>) -> Self {
        Self {
            opts: Default::default(),
            sampler: PointSampler {
                marker_pad,
                numpoints,
                ..Default::default()
            },
        }
    }
}

impl LegendHandler for HandlerLine {
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
        if !matches!(handle, Handle::Line(_)) {
            return Err(KeyboxLegendError::MismatchedHandle {
                expected: "line",
                got: handle.kind(),
            });
        }

        let (xdata, xdata_marker) = self.sampler.sample_x(ctx, area, fontsize);
        let y = (area.height - area.ydescent) / 2.0;

        let mut legline: KeyPrimitive = KeyPolyline::new(xdata.clone(), vec![y; xdata.len()]).into();
        self.update_prop(&mut legline, handle);
        if let KeyPrimitive::Polyline(line) = &mut legline {
            // The stroke and the markers are separate primitives.
            line.style.marker = None;
        }

        let mut legline_marker: KeyPrimitive =
            KeyMarkerSet::new(xdata_marker.clone(), vec![y; xdata_marker.len()]).into();
        self.update_prop(&mut legline_marker, handle);
        if let KeyPrimitive::MarkerSet(marker) = &mut legline_marker {
            if ctx.markerscale != 1.0 {
                marker.style.marker_size *= ctx.markerscale;
            }
        }

        legline.set_transform(*trans);
        legline_marker.set_transform(*trans);

        Ok(vec![legline, legline_marker])
    }
}
