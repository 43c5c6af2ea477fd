use image::RgbaImage;

use crate::{
    overlay::{FloatingRegion, VisualTree},
    pointer::PointerState,
    settings::SettingsProvider,
};

mod freeform_selection;
mod registry;
mod selection;
mod toolbar;

pub use freeform_selection::*;
pub use registry::*;
pub use selection::*;
pub use toolbar::*;

/// A canvas tool driven by one pointer gesture at a time.
///
/// The host guarantees `start`, `move_to` and `end` of a gesture arrive in that order.
pub trait Tool {
    fn start(&mut self, ctx: &mut ToolContext, pointer: PointerState);
    fn move_to(&mut self, ctx: &mut ToolContext, pointer: PointerState);
    fn end(&mut self, ctx: &mut ToolContext, pointer: PointerState);

    fn activate(&mut self, _ctx: &mut ToolContext) {}
    fn deactivate(&mut self, _ctx: &mut ToolContext) {}

    /// Finalize pending work onto the canvas.
    fn commit(&mut self, _ctx: &mut ToolContext) {}

    /// Drop pending work, restoring the canvas where possible.
    fn cancel(&mut self, _ctx: &mut ToolContext) {}

    fn overlay(&self) -> Option<&FloatingRegion> {
        None
    }
}

#[non_exhaustive]
pub struct ToolContext<'a> {
    /// Permanent bitmap
    pub canvas: &'a mut RgbaImage,
    /// Cleared and redrawn by the active tool on every pointer move
    pub preview: &'a mut RgbaImage,
    pub tree: &'a mut VisualTree,
    pub settings: &'a dyn SettingsProvider,
    pub toolbar: &'a mut dyn SelectionToolbar,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        canvas: &'a mut RgbaImage,
        preview: &'a mut RgbaImage,
        tree: &'a mut VisualTree,
        settings: &'a dyn SettingsProvider,
        toolbar: &'a mut dyn SelectionToolbar,
    ) -> Self {
        Self {
            canvas,
            preview,
            tree,
            settings,
            toolbar,
        }
    }
}
