use std::sync::Arc;

use keybox_scene::handle::{Handle, PatchHandle, TextHandle};
use keybox_scene::primitive::{KeyPrimitive, KeyRect, KeyText};
use keybox_scene::transform::KeyTransform;
use keybox_scene::types::PatchStyle;

use crate::context::{KeyBoxGeometry, LegendContext};
use crate::error::KeyboxLegendError;
use crate::handler::patch::{HandlerFancyArrow, HandlerPatch};
use crate::handler::tuple::HandlerTuple;
use crate::handler::{HandlerOpts, LegendHandler};

/// Handler for text series. Long strings are swapped for a short replacement
/// string: an economy of key-box space, not a truncation of the label.
#[derive(Debug, Clone)]
pub struct HandlerText {
    pub opts: HandlerOpts,
    /// Replacement used when the source string is longer than `rep_maxlen`.
    pub rep_str: String,
    pub rep_maxlen: usize,
}

impl Default for HandlerText {
    fn default() -> Self {
        Self {
            opts: Default::default(),
            rep_str: "Aa".to_string(),
            rep_maxlen: 2,
        }
    }
}

impl LegendHandler for HandlerText {
    fn opts(&self) -> &HandlerOpts {
        &self.opts
    }

    fn create_primitives(
        &self,
        _ctx: &LegendContext,
        handle: &Handle,
        area: &KeyBoxGeometry,
        fontsize: f32,
        trans: &KeyTransform,
    ) -> Result<Vec<KeyPrimitive>, KeyboxLegendError> {
        let Handle::Text(h) = handle else {
            return Err(KeyboxLegendError::MismatchedHandle {
                expected: "text",
                got: handle.kind(),
            });
        };

        // Use the original text if it is short.
        let text = if h.text.chars().count() > self.rep_maxlen {
            self.rep_str.clone()
        } else {
            h.text.clone()
        };

        // Smaller fontsize for the text repr.
        let text_fontsize = 2.0 * fontsize / 3.0;

        let x = -area.xdescent + area.width / 2.0
            - text.chars().count() as f32 * text_fontsize / 4.0;
        let y = -area.ydescent + area.height / 4.0;

        let mut prim: KeyPrimitive = KeyText::new(text, x, y).into();
        // Copy text attributes, then override the fontsize.
        self.update_prop(&mut prim, handle);
        if let KeyPrimitive::Text(t) = &mut prim {
            t.style.font_size = text_fontsize;
        }
        prim.set_transform(*trans);

        Ok(vec![prim])
    }
}

/// Handler for annotations, dispatching on which parts exist: text and arrow
/// side by side, either one alone, or a transparent placeholder so the entry
/// still occupies its slot.
#[derive(Debug, Clone)]
pub struct HandlerAnnotation {
    pub opts: HandlerOpts,
    /// Inter-region pad for the text/arrow pair; context border padding when
    /// unset.
    pub pad: Option<f32>,
    /// Relative widths of the text/arrow pair.
    pub width_ratios: [f32; 2],
    pub rep_str: String,
    pub rep_maxlen: usize,
}

impl Default for HandlerAnnotation {
    fn default() -> Self {
        Self {
            opts: Default::default(),
            pad: None,
            width_ratios: [1.0, 4.0],
            rep_str: "Aa".to_string(),
            rep_maxlen: 2,
        }
    }
}

impl HandlerAnnotation {
    fn text_handler(&self) -> HandlerText {
        HandlerText {
            opts: Default::default(),
            rep_str: self.rep_str.clone(),
            rep_maxlen: self.rep_maxlen,
        }
    }
}

impl LegendHandler for HandlerAnnotation {
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
        let Handle::Annotation(h) = handle else {
            return Err(KeyboxLegendError::MismatchedHandle {
                expected: "annotation",
                got: handle.kind(),
            });
        };

        let text_handle = Handle::Text(TextHandle {
            text: h.text.clone(),
            style: h.style.clone(),
        });

        match (&h.arrow, h.text.is_empty()) {
            (Some(arrow), false) => {
                // Text and arrow side by side.
                let handler = HandlerTuple::new(
                    Some(2),
                    self.pad,
                    Some(self.width_ratios.to_vec()),
                    Some(vec![
                        Arc::new(self.text_handler()),
                        Arc::new(HandlerFancyArrow::default()),
                    ]),
                );
                let pair = Handle::Tuple(vec![text_handle, Handle::Arrow(arrow.clone())]);
                handler.create_primitives(ctx, &pair, area, fontsize, trans)
            }
            (Some(arrow), true) => {
                // Arrow without text.
                HandlerFancyArrow::default().create_primitives(
                    ctx,
                    &Handle::Arrow(arrow.clone()),
                    area,
                    fontsize,
                    trans,
                )
            }
            (None, false) => {
                // Text without arrow.
                self.text_handler()
                    .create_primitives(ctx, &text_handle, area, fontsize, trans)
            }
            (None, true) => {
                // No text, no arrow: a zero-size transparent rectangle keeps
                // the entry's single-primitive slot occupied.
                let handler = HandlerPatch::with_patch_fn(Arc::new(|_, _, _, _| {
                    KeyRect {
                        style: PatchStyle::transparent(),
                        ..Default::default()
                    }
                    .into()
                }));
                let placeholder = Handle::Patch(PatchHandle {
                    style: PatchStyle::transparent(),
                });
                handler.create_primitives(ctx, &placeholder, area, fontsize, trans)
            }
        }
    }
}
