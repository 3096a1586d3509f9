use std::collections::HashMap;
use std::sync::Arc;

use keybox_scene::handle::{Handle, HandleKind};
use keybox_scene::primitive::KeyPrimitive;
use keybox_scene::transform::KeyTransform;

use crate::error::KeyboxLegendError;
use crate::handler::collection::{HandlerLineCollection, HandlerSizedCollection};
use crate::handler::errorbar::HandlerErrorbar;
use crate::handler::line::HandlerLine;
use crate::handler::patch::{HandlerFancyArrow, HandlerPatch, HandlerPolyCollection};
use crate::handler::stem::HandlerStem;
use crate::handler::text::{HandlerAnnotation, HandlerText};
use crate::handler::tuple::HandlerTuple;
use crate::handler::LegendHandler;

/// The key box's geometry in pixels, relative to the implicit text baseline.
///
/// `xdescent`/`ydescent` are the distances from the box's nominal origin to
/// its left/bottom edge; all handler coordinate math is expressed relative to
/// this box, never in absolute canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyBoxGeometry {
    pub xdescent: f32,
    pub ydescent: f32,
    pub width: f32,
    pub height: f32,
}

impl KeyBoxGeometry {
    pub fn new(xdescent: f32, ydescent: f32, width: f32, height: f32) -> Self {
        Self {
            xdescent,
            ydescent,
            width,
            height,
        }
    }

    /// Padding is subtracted symmetrically from all four scalars; handlers
    /// never compute from the unpadded box.
    pub fn shrunk_by(&self, xpad: f32, ypad: f32) -> Self {
        Self {
            xdescent: self.xdescent - xpad,
            ydescent: self.ydescent - ypad,
            width: self.width - xpad,
            height: self.height - ypad,
        }
    }
}

/// Receives generated primitives; the first appended per top-level handler
/// invocation is the entry's primary primitive.
pub trait PrimitiveSink {
    fn append(&mut self, primitive: KeyPrimitive);
}

/// The box one legend entry's key is drawn into: geometry, the destination
/// transform from key-box coordinates to the canvas, and the sink storage.
#[derive(Debug, Clone)]
pub struct HandleBox {
    pub geometry: KeyBoxGeometry,
    pub transform: KeyTransform,
    primitives: Vec<KeyPrimitive>,
}

impl HandleBox {
    pub fn new(geometry: KeyBoxGeometry, transform: KeyTransform) -> Self {
        Self {
            geometry,
            transform,
            primitives: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn primitives(&self) -> &[KeyPrimitive] {
        &self.primitives
    }

    pub fn primary(&self) -> Option<&KeyPrimitive> {
        self.primitives.first()
    }

    pub fn into_primitives(self) -> Vec<KeyPrimitive> {
        self.primitives
    }
}

impl PrimitiveSink for HandleBox {
    fn append(&mut self, primitive: KeyPrimitive) {
        self.primitives.push(primitive);
    }
}

/// Dispatch map from handle kind to handler.
#[derive(Clone)]
pub struct HandlerMap {
    entries: HashMap<HandleKind, Arc<dyn LegendHandler>>,
}

impl std::fmt::Debug for HandlerMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds = self.entries.keys().collect::<Vec<_>>();
        kinds.sort_by_key(|k| format!("{k:?}"));
        f.debug_struct("HandlerMap").field("kinds", &kinds).finish()
    }
}

impl HandlerMap {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, kind: HandleKind, handler: Arc<dyn LegendHandler>) {
        self.entries.insert(kind, handler);
    }

    pub fn get(&self, kind: HandleKind) -> Option<&Arc<dyn LegendHandler>> {
        self.entries.get(&kind)
    }
}

impl Default for HandlerMap {
    fn default() -> Self {
        let sized_collection: Arc<dyn LegendHandler> = Arc::new(HandlerSizedCollection::default());
        let mut map = Self::empty();
        map.insert(HandleKind::Line, Arc::new(HandlerLine::default()));
        map.insert(HandleKind::Patch, Arc::new(HandlerPatch::default()));
        map.insert(
            HandleKind::LineCollection,
            Arc::new(HandlerLineCollection::default()),
        );
        map.insert(
            HandleKind::PolyCollection,
            Arc::new(HandlerPolyCollection::default()),
        );
        map.insert(HandleKind::RegularPolyCollection, sized_collection.clone());
        map.insert(HandleKind::PathCollection, sized_collection.clone());
        map.insert(HandleKind::CircleCollection, sized_collection);
        map.insert(HandleKind::Arrow, Arc::new(HandlerFancyArrow::default()));
        map.insert(HandleKind::Errorbar, Arc::new(HandlerErrorbar::default()));
        map.insert(HandleKind::Stem, Arc::new(HandlerStem::default()));
        map.insert(HandleKind::Text, Arc::new(HandlerText::default()));
        map.insert(
            HandleKind::Annotation,
            Arc::new(HandlerAnnotation::default()),
        );
        map.insert(HandleKind::Tuple, Arc::new(HandlerTuple::default()));
        map
    }
}

/// Read-only configuration for one legend render pass.
#[derive(Debug, Clone)]
pub struct LegendContext {
    /// Default point count for line-like handlers.
    pub numpoints: usize,
    /// Default point count for collection handlers.
    pub scatterpoints: usize,
    /// Scalar applied to marker visual size; squared for area-like sizes.
    pub markerscale: f32,
    /// Fractional y-positions cycled out to the point count.
    pub scatteryoffsets: Vec<f32>,
    /// Default padding for composite subdivision, fraction of font size.
    pub borderpad: f32,
    pub handler_map: HandlerMap,
}

impl Default for LegendContext {
    fn default() -> Self {
        Self {
            numpoints: 1,
            scatterpoints: 1,
            markerscale: 1.0,
            scatteryoffsets: vec![0.375, 0.5, 0.3125],
            borderpad: 0.4,
            handler_map: Default::default(),
        }
    }
}

impl LegendContext {
    /// The configured offset table cycled out to length `n`, so the table is
    /// always at least as long as the point count.
    pub fn scatter_yoffsets(&self, n: usize) -> Vec<f32> {
        if self.scatteryoffsets.is_empty() {
            return vec![0.5; n];
        }
        self.scatteryoffsets.iter().cycle().take(n).copied().collect()
    }

    pub fn resolve_handler(
        &self,
        handle: &Handle,
    ) -> Result<Arc<dyn LegendHandler>, KeyboxLegendError> {
        self.handler_map
            .get(handle.kind())
            .cloned()
            .ok_or(KeyboxLegendError::UnresolvedHandler(handle.kind()))
    }

    /// Render one legend entry's key: resolve the handler and invoke it on
    /// the handle box. Returns the index of the entry's primary primitive in
    /// the box's primitive list.
    pub fn legend_key(
        &self,
        handle: &Handle,
        fontsize: f32,
        handlebox: &mut HandleBox,
    ) -> Result<usize, KeyboxLegendError> {
        let handler = self.resolve_handler(handle)?;
        handler.legend_key(self, handle, fontsize, handlebox)
    }
}
