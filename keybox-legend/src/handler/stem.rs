use itertools::izip;
use keybox_scene::handle::Handle;
use keybox_scene::primitive::{KeyMarkerSet, KeyPolyline, KeyPrimitive};
use keybox_scene::transform::KeyTransform;

use crate::context::{KeyBoxGeometry, LegendContext};
use crate::error::KeyboxLegendError;
use crate::handler::{HandlerOpts, LegendHandler};
use crate::sampler::{PointSampler, YOffsets};

/// Handler for stem series: head markers compressed into the upper half of
/// the box, one vertical stem per marker down to the baseline value, and a
/// baseline spanning the sampled x-range.
#[derive(Debug, Clone)]
pub struct HandlerStem {
    pub opts: HandlerOpts,
    pub sampler: PointSampler,
    pub yoffsets: YOffsets,
    /// Baseline y value; 0 when unset.
    pub bottom: Option<f32>,
}

impl Default for HandlerStem {
    fn default() -> Self {
        Self {
            opts: Default::default(),
            sampler: Default::default(),
            yoffsets: YOffsets::upper_half(),
            bottom: None,
        }
    }
}

impl LegendHandler for HandlerStem {
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
        let Handle::Stem(h) = handle else {
            return Err(KeyboxLegendError::MismatchedHandle {
                expected: "stem",
                got: handle.kind(),
            });
        };

        let (xdata, xdata_marker) = self.sampler.sample_x(ctx, area, fontsize);
        let ydata = self.yoffsets.sample_y(ctx, area, xdata_marker.len());
        let bottom = self.bottom.unwrap_or(0.0);

        let marker_y: Vec<f32> = ydata.iter().take(xdata_marker.len()).copied().collect();
        let mut leg_markerline: KeyPrimitive =
            KeyMarkerSet::new(xdata_marker.clone(), marker_y).into();
        self.update_prop(&mut leg_markerline, &Handle::Line(h.marker_line.clone()));

        let mut leg_stemlines: Vec<KeyPrimitive> = vec![];
        for (i, (x, y)) in izip!(xdata_marker.iter(), ydata.iter()).enumerate() {
            let mut stem: KeyPrimitive = KeyPolyline::new(vec![*x, *x], vec![bottom, *y]).into();
            // Each stem inherits from the original stem line at its position,
            // cycling when the original has fewer stems than sampled points.
            let src = if h.stem_lines.is_empty() {
                Default::default()
            } else {
                h.stem_lines[i % h.stem_lines.len()].clone()
            };
            self.update_prop(&mut stem, &Handle::Line(src));
            leg_stemlines.push(stem);
        }

        let x_min = xdata.iter().copied().fold(f32::MAX, f32::min);
        let x_max = xdata.iter().copied().fold(f32::MIN, f32::max);
        let mut leg_baseline: KeyPrimitive =
            KeyPolyline::new(vec![x_min, x_max], vec![bottom, bottom]).into();
        self.update_prop(&mut leg_baseline, &Handle::Line(h.baseline.clone()));

        let mut primitives = vec![leg_markerline];
        primitives.extend(leg_stemlines);
        primitives.push(leg_baseline);

        for primitive in &mut primitives {
            primitive.set_transform(*trans);
        }

        Ok(primitives)
    }
}
