use keybox_scene::handle::Handle;
use keybox_scene::primitive::{KeyLineSet, KeyMarkerSet, KeyPolyline, KeyPrimitive};
use keybox_scene::transform::KeyTransform;
use keybox_scene::types::MarkerShape;

use crate::context::{KeyBoxGeometry, LegendContext};
use crate::error::KeyboxLegendError;
use crate::handler::{HandlerOpts, LegendHandler};
use crate::sampler::PointSampler;

/// Handler for errorbar series: the plot line and markers (hidden when the
/// original draws whiskers only), one whisker segment per marker for each
/// axis that has errors, and cap ticks at the whisker ends when the original
/// has cap decorations.
#[derive(Debug, Clone)]
pub struct HandlerErrorbar {
    pub opts: HandlerOpts,
    pub sampler: PointSampler,
    /// Whisker half-length for x errors, fraction of font size.
    pub xerr_size: f32,
    /// Whisker half-length for y errors; defaults to `xerr_size` when unset.
    pub yerr_size: Option<f32>,
}

impl Default for HandlerErrorbar {
    fn default() -> Self {
        Self {
            opts: Default::default(),
            sampler: Default::default(),
            xerr_size: 0.5,
            yerr_size: None,
        }
    }
}

impl HandlerErrorbar {
    pub fn err_size(&self, fontsize: f32) -> (f32, f32) {
        let xerr_size = self.xerr_size * fontsize;
        let yerr_size = match self.yerr_size {
            Some(yerr) => yerr * fontsize,
            None => xerr_size,
        };
        (xerr_size, yerr_size)
    }
}

impl LegendHandler for HandlerErrorbar {
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
        let Handle::Errorbar(h) = handle else {
            return Err(KeyboxLegendError::MismatchedHandle {
                expected: "errorbar",
                got: handle.kind(),
            });
        };

        let (xdata, xdata_marker) = self.sampler.sample_x(ctx, area, fontsize);
        let y = (area.height - area.ydescent) / 2.0;
        let ydata_marker = vec![y; xdata_marker.len()];
        let (xerr_size, yerr_size) = self.err_size(fontsize);

        let mut legline: KeyPrimitive = KeyPolyline::new(xdata.clone(), vec![y; xdata.len()]).into();
        let mut legline_marker: KeyPrimitive =
            KeyMarkerSet::new(xdata_marker.clone(), ydata_marker.clone()).into();

        match &h.plot_line {
            // Whiskers only: the pair still occupies its slots, invisibly.
            // The clip flag is cleared like every other produced primitive.
            None => {
                legline.set_visible(false);
                legline.set_clip(false);
                legline_marker.set_visible(false);
                legline_marker.set_clip(false);
            }
            Some(plot_line) => {
                let plot_src = Handle::Line(plot_line.clone());
                self.update_prop(&mut legline, &plot_src);
                if let KeyPrimitive::Polyline(line) = &mut legline {
                    line.style.marker = None;
                }
                self.update_prop(&mut legline_marker, &plot_src);
                if let KeyPrimitive::MarkerSet(marker) = &mut legline_marker {
                    if ctx.markerscale != 1.0 {
                        marker.style.marker_size *= ctx.markerscale;
                    }
                }
            }
        }

        // Both axes inherit whisker style from the first bar line collection.
        let bar_src = Handle::LineCollection(h.bar_line_cols.first().cloned().unwrap_or_default());
        let cap_src = h
            .cap_lines
            .first()
            .map(|cap| Handle::Line(cap.clone()));

        let mut handle_barlinecols: Vec<KeyPrimitive> = vec![];
        let mut handle_caplines: Vec<KeyPrimitive> = vec![];

        if h.has_xerr {
            let verts: Vec<[[f32; 2]; 2]> = xdata_marker
                .iter()
                .zip(ydata_marker.iter())
                .map(|(x, y)| [[x - xerr_size, *y], [x + xerr_size, *y]])
                .collect();
            let mut coll: KeyPrimitive = KeyLineSet::new(verts).into();
            self.update_prop(&mut coll, &bar_src);
            handle_barlinecols.push(coll);

            if let Some(cap_src) = &cap_src {
                let left_x: Vec<f32> = xdata_marker.iter().map(|x| x - xerr_size).collect();
                let right_x: Vec<f32> = xdata_marker.iter().map(|x| x + xerr_size).collect();
                for caps_x in [left_x, right_x] {
                    let mut capline: KeyPrimitive =
                        KeyMarkerSet::new(caps_x, ydata_marker.clone()).into();
                    self.update_prop(&mut capline, cap_src);
                    if let KeyPrimitive::MarkerSet(marker) = &mut capline {
                        marker.style.marker = Some(MarkerShape::TickVertical);
                    }
                    handle_caplines.push(capline);
                }
            }
        }

        if h.has_yerr {
            let verts: Vec<[[f32; 2]; 2]> = xdata_marker
                .iter()
                .zip(ydata_marker.iter())
                .map(|(x, y)| [[*x, y - yerr_size], [*x, y + yerr_size]])
                .collect();
            let mut coll: KeyPrimitive = KeyLineSet::new(verts).into();
            self.update_prop(&mut coll, &bar_src);
            handle_barlinecols.push(coll);

            if let Some(cap_src) = &cap_src {
                let low_y: Vec<f32> = ydata_marker.iter().map(|y| y - yerr_size).collect();
                let high_y: Vec<f32> = ydata_marker.iter().map(|y| y + yerr_size).collect();
                for caps_y in [low_y, high_y] {
                    let mut capline: KeyPrimitive =
                        KeyMarkerSet::new(xdata_marker.clone(), caps_y).into();
                    self.update_prop(&mut capline, cap_src);
                    if let KeyPrimitive::MarkerSet(marker) = &mut capline {
                        marker.style.marker = Some(MarkerShape::TickHorizontal);
                    }
                    handle_caplines.push(capline);
                }
            }
        }

        let mut primitives = vec![];
        primitives.extend(handle_barlinecols);
        primitives.extend(handle_caplines);
        primitives.push(legline);
        primitives.push(legline_marker);

        for primitive in &mut primitives {
            primitive.set_transform(*trans);
        }

        Ok(primitives)
    }
}
