use crate::{
    canvas::{clear_surface, draw_outline, stamp},
    geometry::{clamp, BoundingBox, PixelOffset, PixelPoint},
    overlay::{FloatingRegion, GRABBABLE_MARGIN},
    pointer::{PointerButton, PointerDownHandler, PointerState},
};

use super::{Selection, SelectionState, Tool, ToolContext, ToolFactory};

/// Lasso tool: traces a polygon, lifts the enclosed pixels and lets them be dragged,
/// duplicated (ctrl) and committed back onto the canvas.
pub struct FreeformSelectionTool {
    state: SelectionState,
    overlay: FloatingRegion,
}

impl FreeformSelectionTool {
    pub fn new(on_pointer_down: PointerDownHandler) -> Self {
        Self {
            state: SelectionState::Idle,
            overlay: FloatingRegion::new(on_pointer_down),
        }
    }

    pub fn create_factory() -> ToolFactory {
        Box::new(|on_pointer_down: PointerDownHandler| {
            Box::new(FreeformSelectionTool::new(on_pointer_down)) as Box<dyn Tool>
        })
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.state.selection()
    }

    fn place_overlay(&mut self, bounds: BoundingBox) {
        let area = bounds.grow(GRABBABLE_MARGIN);
        self.overlay.set_x(area.min_x as f32);
        self.overlay.set_y(area.min_y as f32);
        self.overlay.set_width(area.width() as f32);
        self.overlay.set_height(area.height() as f32);
    }

    /// Commits `selection` onto the canvas.
    fn save_selection(&self, ctx: &mut ToolContext, selection: &Selection) {
        if selection.save(ctx.canvas) {
            log::debug!("Saved selection at {:?}", selection.origin());
        }
    }

    /// Closes an open trace or drag. Traces too small to select anything are dropped.
    fn finish_gesture(&mut self, ctx: &mut ToolContext) {
        self.state = match self.state.take() {
            SelectionState::Accumulating(mut selection) => {
                if selection.is_degenerate() || !selection.capture(ctx.canvas) {
                    log::debug!(
                        "Dropping degenerate selection with {} points",
                        selection.points().len()
                    );
                    clear_surface(ctx.preview);
                    SelectionState::Idle
                } else {
                    clear_surface(ctx.preview);
                    draw_outline(
                        ctx.preview,
                        selection.points(),
                        PixelOffset::default(),
                        ctx.settings.outline_colors(),
                    );
                    SelectionState::Placed(selection)
                }
            }
            SelectionState::Moving { selection, .. } => SelectionState::Placed(selection),
            other => {
                self.state = other;
                return;
            }
        };

        if let SelectionState::Placed(selection) = &self.state {
            let bounds = selection.placed_bounds();
            self.place_overlay(bounds);
            self.overlay.add_to_tree(ctx.tree);
            ctx.toolbar.show(bounds);
        }
    }

    /// Limits a traced point to the canvas, one past the last pixel included.
    fn clamp_to_canvas(ctx: &ToolContext, point: PixelPoint) -> PixelPoint {
        PixelPoint::new(
            clamp(point.x, 0, ctx.canvas.width() as i32),
            clamp(point.y, 0, ctx.canvas.height() as i32),
        )
    }

    fn discard_preview(&self, ctx: &mut ToolContext) {
        clear_surface(ctx.preview);
        self.overlay.remove_from_tree(ctx.tree);
        ctx.toolbar.hide();
    }
}

impl Tool for FreeformSelectionTool {
    fn start(&mut self, ctx: &mut ToolContext, pointer: PointerState) {
        if pointer.button != PointerButton::Primary {
            log::debug!("Ignoring {:?} button press", pointer.button);
            return;
        }
        let Some(point) = pointer.position() else {
            log::debug!("Ignoring pointer down at non-finite position {pointer:?}");
            return;
        };
        self.finish_gesture(ctx);
        ctx.toolbar.hide();

        self.state = match self.state.take() {
            SelectionState::Placed(mut selection) if selection.contains(point) => {
                let pointer_offset = point - selection.placed_bounds().min();
                if pointer.ctrl_key {
                    // Leave a copy behind and drag an independent one
                    self.save_selection(ctx, &selection);
                    selection.mark_duplicated();
                }
                SelectionState::Moving {
                    selection,
                    pointer_offset,
                }
            }
            previous => {
                if let Some(selection) = previous.into_selection() {
                    self.save_selection(ctx, &selection);
                }
                self.overlay.remove_from_tree(ctx.tree);
                let seed = Self::clamp_to_canvas(ctx, point);
                SelectionState::Accumulating(Selection::new(seed, ctx.settings.fill_color()))
            }
        };
    }

    fn move_to(&mut self, ctx: &mut ToolContext, pointer: PointerState) {
        if !self.state.is_gesture_active() {
            return;
        }
        let Some(point) = pointer.position() else {
            return;
        };

        clear_surface(ctx.preview);
        let outline_colors = ctx.settings.outline_colors();

        let moved_to = match &mut self.state {
            SelectionState::Moving {
                selection,
                pointer_offset,
            } => {
                selection.set_origin(point - *pointer_offset);
                selection.lift(ctx.canvas);
                if let Some(content) = selection.content() {
                    stamp(ctx.preview, content, selection.origin());
                }
                draw_outline(
                    ctx.preview,
                    selection.points(),
                    selection.outline_offset(),
                    outline_colors,
                );
                Some(selection.placed_bounds())
            }
            SelectionState::Accumulating(selection) => {
                selection.push_point(Self::clamp_to_canvas(ctx, point));
                draw_outline(
                    ctx.preview,
                    selection.points(),
                    PixelOffset::default(),
                    outline_colors,
                );
                None
            }
            SelectionState::Idle | SelectionState::Placed(_) => None,
        };

        if let Some(bounds) = moved_to {
            self.place_overlay(bounds);
        }
    }

    fn end(&mut self, ctx: &mut ToolContext, _pointer: PointerState) {
        self.finish_gesture(ctx);
    }

    fn deactivate(&mut self, ctx: &mut ToolContext) {
        self.commit(ctx);
    }

    fn commit(&mut self, ctx: &mut ToolContext) {
        if let Some(selection) = self.state.take().into_selection() {
            self.save_selection(ctx, &selection);
        }
        self.discard_preview(ctx);
    }

    fn cancel(&mut self, ctx: &mut ToolContext) {
        if let Some(selection) = self.state.take().into_selection() {
            selection.restore(ctx.canvas);
            log::debug!("Cancelled selection with {} points", selection.points().len());
        }
        self.discard_preview(ctx);
    }

    fn overlay(&self) -> Option<&FloatingRegion> {
        Some(&self.overlay)
    }
}
