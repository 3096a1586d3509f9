use std::sync::Arc;

use keybox_scene::handle::Handle;
use keybox_scene::primitive::{KeyArrow, KeyPrimitive, KeyRect};
use keybox_scene::transform::KeyTransform;
use keybox_scene::types::Paint;

use crate::context::{KeyBoxGeometry, LegendContext};
use crate::error::KeyboxLegendError;
use crate::handler::{HandlerOpts, LegendHandler};

/// Optional geometry factory for [`HandlerPatch`]; the handler remains
/// responsible for property copy and transform on whatever it returns.
pub type PatchFn =
    Arc<dyn Fn(&LegendContext, &Handle, &KeyBoxGeometry, f32) -> KeyPrimitive + Send + Sync>;

/// Handler for patch series. The default geometry is a rectangle spanning the
/// padded box.
#[derive(Default, Clone)]
pub struct HandlerPatch {
    pub opts: HandlerOpts,
    pub patch_fn: Option<PatchFn>,
}

impl std::fmt::Debug for HandlerPatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerPatch")
            .field("opts", &self.opts)
            .field("patch_fn", &self.patch_fn.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl HandlerPatch {
    pub fn with_patch_fn(patch_fn: PatchFn) -> Self {
        Self {
            opts: Default::default(),
            patch_fn: Some(patch_fn),
        }
    }

    fn create_patch(
        &self,
        ctx: &LegendContext,
        handle: &Handle,
        area: &KeyBoxGeometry,
        fontsize: f32,
    ) -> KeyPrimitive {
        match &self.patch_fn {
            Some(patch_fn) => patch_fn(ctx, handle, area, fontsize),
            None => KeyRect::new(-area.xdescent, -area.ydescent, area.width, area.height).into(),
        }
    }
}

impl LegendHandler for HandlerPatch {
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
        if !matches!(handle, Handle::Patch(_)) {
            return Err(KeyboxLegendError::MismatchedHandle {
                expected: "patch",
                got: handle.kind(),
            });
        }

        let mut patch = self.create_patch(ctx, handle, area, fontsize);
        self.update_prop(&mut patch, handle);
        patch.set_transform(*trans);
        Ok(vec![patch])
    }
}

/// Handler for filled polygon collections (area fills, stacked plots): a
/// rectangle spanning the box, styled from the first element of each of the
/// collection's property arrays.
#[derive(Debug, Default, Clone)]
pub struct HandlerPolyCollection {
    pub opts: HandlerOpts,
}

impl LegendHandler for HandlerPolyCollection {
    fn opts(&self) -> &HandlerOpts {
        &self.opts
    }

    fn default_update_prop(&self, prim: &mut KeyPrimitive, handle: &Handle) {
        if let (KeyPrimitive::Rect(rect), Handle::PolyCollection(h)) = (prim, handle) {
            // Empty property arrays degrade to the explicit "none" paint.
            rect.style.edge = h.style.edge.first().copied().unwrap_or(Paint::None);
            rect.style.fill = h.style.face.first().copied().unwrap_or(Paint::None);
            rect.style.filled = h.style.filled;
            rect.style.hatch = h.style.hatch.clone();
            rect.style.stroke_width = h.style.stroke_widths.first().copied().unwrap_or(1.0);
            rect.style.stroke_dash = h.style.stroke_dashes.first().cloned().flatten();
            rect.style.alpha = h.style.alpha;
        }
    }

    fn create_primitives(
        &self,
        _ctx: &LegendContext,
        handle: &Handle,
        area: &KeyBoxGeometry,
        _fontsize: f32,
        trans: &KeyTransform,
    ) -> Result<Vec<KeyPrimitive>, KeyboxLegendError> {
        if !matches!(handle, Handle::PolyCollection(_)) {
            return Err(KeyboxLegendError::MismatchedHandle {
                expected: "poly collection",
                got: handle.kind(),
            });
        }

        let mut patch: KeyPrimitive =
            KeyRect::new(-area.xdescent, -area.ydescent, area.width, area.height).into();
        self.update_prop(&mut patch, handle);
        patch.set_transform(*trans);
        Ok(vec![patch])
    }
}

/// Handler for fancy arrow patches: one horizontal arrow spanning the padded
/// box at its vertical midpoint.
#[derive(Debug, Default, Clone)]
pub struct HandlerFancyArrow {
    pub opts: HandlerOpts,
}

impl LegendHandler for HandlerFancyArrow {
    fn opts(&self) -> &HandlerOpts {
        &self.opts
    }

    fn create_primitives(
        &self,
        _ctx: &LegendContext,
        handle: &Handle,
        area: &KeyBoxGeometry,
        _fontsize: f32,
        trans: &KeyTransform,
    ) -> Result<Vec<KeyPrimitive>, KeyboxLegendError> {
        if !matches!(handle, Handle::Arrow(_)) {
            return Err(KeyboxLegendError::MismatchedHandle {
                expected: "arrow",
                got: handle.kind(),
            });
        }

        let y_mid = -area.ydescent + area.height / 2.0;
        let mut arrow: KeyPrimitive = KeyArrow::new(
            [-area.xdescent, y_mid],
            [-area.xdescent + area.width, y_mid],
            area.width / 3.0,
        )
        .into();
        self.update_prop(&mut arrow, handle);
        arrow.set_transform(*trans);
        Ok(vec![arrow])
    }
}
