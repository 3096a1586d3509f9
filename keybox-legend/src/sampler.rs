//! Sampling strategies shared by the concrete handlers: representative point
//! placement, y-offset tables, and representative marker sizes.

use crate::context::{KeyBoxGeometry, LegendContext};

pub fn linspace(start: f32, stop: f32, n: usize) -> Vec<f32> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f32;
            (0..n).map(|i| start + step * i as f32).collect()
        }
    }
}

/// Which context default supplies the point count when a handler carries no
/// explicit override.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CountSource {
    #[default]
    Numpoints,
    Scatterpoints,
}

/// Generates the x-coordinates of a handler's representative points.
#[derive(Debug, Clone)]
pub struct PointSampler {
    /// Padding between points, fraction of font size, applied at both ends
    /// to compensate for marker extent.
    pub marker_pad: f32,
    /// Explicit point count; falls back to the context default when unset.
    pub numpoints: Option<usize>,
    pub count_source: CountSource,
}

impl Default for PointSampler {
    fn default() -> Self {
        Self {
            marker_pad: 0.3,
            numpoints: None,
            count_source: CountSource::Numpoints,
        }
    }
}

impl PointSampler {
    pub fn for_scatter() -> Self {
        Self {
            count_source: CountSource::Scatterpoints,
            ..Default::default()
        }
    }

    pub fn count(&self, ctx: &LegendContext) -> usize {
        self.numpoints.unwrap_or(match self.count_source {
            CountSource::Numpoints => ctx.numpoints,
            CountSource::Scatterpoints => ctx.scatterpoints,
        })
    }

    /// Returns `(line_x, marker_x)`. With more than one point the two lists
    /// coincide; with a single point the connecting line still spans the box
    /// while the lone marker sits at the horizontal midpoint.
    pub fn sample_x(
        &self,
        ctx: &LegendContext,
        area: &KeyBoxGeometry,
        fontsize: f32,
    ) -> (Vec<f32>, Vec<f32>) {
        let numpoints = self.count(ctx);
        if numpoints > 1 {
            let pad = self.marker_pad * fontsize;
            let xdata = linspace(
                -area.xdescent + pad,
                -area.xdescent + area.width - pad,
                numpoints,
            );
            (xdata.clone(), xdata)
        } else {
            let xdata = linspace(-area.xdescent, -area.xdescent + area.width, 2);
            let xdata_marker = vec![-area.xdescent + 0.5 * area.width];
            (xdata, xdata_marker)
        }
    }
}

/// Resolves per-point fractional y-offsets to pixel y-coordinates.
#[derive(Debug, Clone, Default)]
pub struct YOffsets {
    /// Explicit offsets, used verbatim (scaled by box height). Length
    /// reconciliation against the point count is the caller's business.
    pub offsets: Option<Vec<f32>>,
    /// Shift and compress the context's default table into the upper half of
    /// the box (`0.5*offset + 0.5`), as stem keys do.
    pub compress_upper: bool,
}

impl YOffsets {
    pub fn upper_half() -> Self {
        Self {
            offsets: None,
            compress_upper: true,
        }
    }

    pub fn sample_y(&self, ctx: &LegendContext, area: &KeyBoxGeometry, count: usize) -> Vec<f32> {
        match &self.offsets {
            Some(offsets) => offsets.iter().map(|o| o * area.height).collect(),
            None => ctx
                .scatter_yoffsets(count)
                .into_iter()
                .map(|o| {
                    if self.compress_upper {
                        area.height * (0.5 * o + 0.5)
                    } else {
                        area.height * o
                    }
                })
                .collect(),
        }
    }
}

/// Chooses the representative sizes a collection key shows.
#[derive(Debug, Clone, Default)]
pub struct SizeInterpolator {
    /// Explicit sizes, used as-is when set.
    pub sizes: Option<Vec<f32>>,
}

impl SizeInterpolator {
    /// With fewer than 4 points the output is the ordered subset
    /// `{mid, max, min}` truncated to the count; otherwise `count` values
    /// linearly interpolated from min to max inclusive. Min/max are scaled by
    /// `markerscale` squared since sizes are area-like.
    pub fn representative_sizes(
        &self,
        ctx: &LegendContext,
        handle_sizes: &[f32],
        count: usize,
    ) -> Vec<f32> {
        if let Some(sizes) = &self.sizes {
            return sizes.clone();
        }

        let handle_sizes: &[f32] = if handle_sizes.is_empty() {
            &[1.0]
        } else {
            handle_sizes
        };
        let scale = ctx.markerscale * ctx.markerscale;
        let size_max = handle_sizes.iter().copied().fold(f32::MIN, f32::max) * scale;
        let size_min = handle_sizes.iter().copied().fold(f32::MAX, f32::min) * scale;

        if count < 4 {
            let subset = [0.5 * (size_max + size_min), size_max, size_min];
            subset[..count].to_vec()
        } else {
            let rng = size_max - size_min;
            linspace(0.0, 1.0, count)
                .into_iter()
                .map(|t| rng * t + size_min)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(2.0, 10.0, 5);
        assert_eq!(xs.len(), 5);
        assert_approx_eq!(f32, xs[0], 2.0);
        assert_approx_eq!(f32, xs[4], 10.0);
        assert_approx_eq!(f32, xs[2], 6.0);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn test_yoffsets_cycle_table() {
        let ctx = LegendContext::default();
        let area = KeyBoxGeometry::new(0.0, 0.0, 40.0, 10.0);
        let ys = YOffsets::default().sample_y(&ctx, &area, 5);
        // Table [0.375, 0.5, 0.3125] cycles past its own length.
        assert_eq!(ys.len(), 5);
        assert_approx_eq!(f32, ys[0], 3.75);
        assert_approx_eq!(f32, ys[3], 3.75);
        assert_approx_eq!(f32, ys[4], 5.0);
    }

    #[test]
    fn test_yoffsets_explicit_verbatim() {
        let ctx = LegendContext::default();
        let area = KeyBoxGeometry::new(0.0, 0.0, 40.0, 10.0);
        let yoffsets = YOffsets {
            offsets: Some(vec![0.1, 0.9]),
            compress_upper: false,
        };
        // Explicit offsets ignore the requested count.
        assert_eq!(yoffsets.sample_y(&ctx, &area, 4), vec![1.0, 9.0]);
    }
}
