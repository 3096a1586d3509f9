pub mod collection;
pub mod errorbar;
pub mod line;
pub mod patch;
pub mod stem;
pub mod text;
pub mod tuple;

use std::sync::Arc;

use keybox_scene::handle::{Handle, LineCollectionHandle};
use keybox_scene::primitive::KeyPrimitive;
use keybox_scene::transform::KeyTransform;
use keybox_scene::types::{LineStyle, Paint};

use crate::context::{HandleBox, KeyBoxGeometry, LegendContext, PrimitiveSink};
use crate::error::KeyboxLegendError;

/// Optional override for the property-copy step, supplied at handler
/// construction.
pub type UpdatePropFn = Arc<dyn Fn(&mut KeyPrimitive, &Handle) + Send + Sync>;

/// Options shared by every handler: padding (fraction of font size) and the
/// optional property-copy override.
#[derive(Clone, Default)]
pub struct HandlerOpts {
    pub xpad: f32,
    pub ypad: f32,
    pub update_fn: Option<UpdatePropFn>,
}

impl std::fmt::Debug for HandlerOpts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerOpts")
            .field("xpad", &self.xpad)
            .field("ypad", &self.ypad)
            .field("update_fn", &self.update_fn.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// The handler contract: shrink the drawing area by the handler's own
/// padding, produce geometry-specific primitives, copy inherited visual
/// properties onto each, clear their clip flags, and install the destination
/// transform. Concrete handlers override [`LegendHandler::create_primitives`];
/// the rest is provided.
pub trait LegendHandler: Send + Sync {
    fn opts(&self) -> &HandlerOpts;

    fn create_primitives(
        &self,
        ctx: &LegendContext,
        handle: &Handle,
        area: &KeyBoxGeometry,
        fontsize: f32,
        trans: &KeyTransform,
    ) -> Result<Vec<KeyPrimitive>, KeyboxLegendError> {
        let _ = (ctx, handle, area, fontsize, trans);
        Err(KeyboxLegendError::CreateNotImplemented)
    }

    /// Copy every visual property of the handle onto the primitive, leaving
    /// geometry untouched. Collection handlers override this to degrade
    /// array-valued properties.
    fn default_update_prop(&self, prim: &mut KeyPrimitive, handle: &Handle) {
        copy_visual_props(prim, handle);
    }

    /// Run the custom property-copy override if one was supplied, else the
    /// default, then clear the clip flag: key-box primitives render fully
    /// inside the box, unclipped by the original series' clip path.
    fn update_prop(&self, prim: &mut KeyPrimitive, handle: &Handle) {
        match &self.opts().update_fn {
            Some(update_fn) => update_fn(prim, handle),
            None => self.default_update_prop(prim, handle),
        }
        prim.set_clip(false);
    }

    fn adjust_drawing_area(&self, geometry: &KeyBoxGeometry, fontsize: f32) -> KeyBoxGeometry {
        geometry.shrunk_by(self.opts().xpad * fontsize, self.opts().ypad * fontsize)
    }

    /// Generate this entry's key primitives and append them to the handle
    /// box. Returns the index of the primary primitive (the first appended).
    fn legend_key(
        &self,
        ctx: &LegendContext,
        handle: &Handle,
        fontsize: f32,
        handlebox: &mut HandleBox,
    ) -> Result<usize, KeyboxLegendError> {
        let area = self.adjust_drawing_area(&handlebox.geometry, fontsize);
        let transform = handlebox.transform;
        let primitives = self.create_primitives(ctx, handle, &area, fontsize, &transform)?;
        if primitives.is_empty() {
            return Err(KeyboxLegendError::EmptyHandlerOutput);
        }
        let primary = handlebox.len();
        for primitive in primitives {
            handlebox.append(primitive);
        }
        Ok(primary)
    }
}

/// Default property-copy: move the handle's style bundle onto the primitive
/// wherever the pair is compatible. Pairs with no shared property set are
/// left alone.
pub fn copy_visual_props(prim: &mut KeyPrimitive, handle: &Handle) {
    match (prim, handle) {
        (KeyPrimitive::Polyline(p), Handle::Line(h)) => p.style = h.style.clone(),
        (KeyPrimitive::MarkerSet(p), Handle::Line(h)) => p.style = h.style.clone(),
        (KeyPrimitive::LineSet(p), Handle::Line(h)) => p.style = h.style.clone(),
        (KeyPrimitive::Polyline(p), Handle::LineCollection(h)) => {
            p.style = line_style_from_collection(h)
        }
        (KeyPrimitive::LineSet(p), Handle::LineCollection(h)) => {
            p.style = line_style_from_collection(h)
        }
        (KeyPrimitive::MarkerSet(p), Handle::LineCollection(h)) => {
            p.style = line_style_from_collection(h)
        }
        (KeyPrimitive::Rect(p), Handle::Patch(h)) => p.style = h.style.clone(),
        (KeyPrimitive::Arrow(p), Handle::Arrow(h)) => {
            p.style = h.style.clone();
            p.arrow_style = h.arrow_style;
        }
        (KeyPrimitive::Collection(p), Handle::RegularPolyCollection(h)) => {
            p.style = h.style.clone()
        }
        (KeyPrimitive::Collection(p), Handle::PathCollection(h)) => p.style = h.style.clone(),
        (KeyPrimitive::Collection(p), Handle::CircleCollection(h)) => p.style = h.style.clone(),
        (KeyPrimitive::Collection(p), Handle::PolyCollection(h)) => p.style = h.style.clone(),
        (KeyPrimitive::Text(p), Handle::Text(h)) => p.style = h.style.clone(),
        (KeyPrimitive::Text(p), Handle::Annotation(h)) => p.style = h.style.clone(),
        _ => {}
    }
}

/// Degrade a line collection's array-valued properties to a single line
/// style: first element of each array, with the explicit "none" paint when
/// the color array is empty.
pub fn line_style_from_collection(handle: &LineCollectionHandle) -> LineStyle {
    LineStyle {
        stroke: handle.colors.first().copied().unwrap_or(Paint::None),
        stroke_width: handle
            .stroke_widths
            .first()
            .copied()
            .unwrap_or(LineStyle::default().stroke_width),
        stroke_dash: handle.stroke_dashes.first().cloned().flatten(),
        ..Default::default()
    }
}
