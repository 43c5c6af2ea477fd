use eframe::egui::{
    self, Color32, ColorImage, Pos2, Rect, Sense, Stroke, StrokeKind, TextureHandle,
    TextureOptions, Vec2,
};
use image::RgbaImage;

use crate::{
    overlay::VisualTree,
    pointer::{PointerButton, PointerState},
    settings::Settings,
    tool::{FreeformSelectionTool, ToolContext, ToolRegistry, ToolbarState},
};

mod native;

pub use native::run_native;

pub(crate) struct LassoApp {
    canvas: RgbaImage,
    preview: RgbaImage,
    tree: VisualTree,
    settings: Settings,
    toolbar: ToolbarState,
    tools: ToolRegistry,
    textures: Option<(TextureHandle, TextureHandle)>,
}

impl LassoApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, canvas: RgbaImage, settings: Settings) -> Self {
        let preview = RgbaImage::new(canvas.width(), canvas.height());
        Self {
            canvas,
            preview,
            tree: VisualTree::default(),
            settings,
            toolbar: ToolbarState::default(),
            tools: ToolRegistry::new(vec![(
                "Lasso".into(),
                FreeformSelectionTool::create_factory(),
            )]),
            textures: None,
        }
    }

    fn with_tool_ctx<R>(
        &mut self,
        f: impl FnOnce(&mut ToolRegistry, &mut ToolContext<'_>) -> R,
    ) -> R {
        let mut ctx = ToolContext::new(
            &mut self.canvas,
            &mut self.preview,
            &mut self.tree,
            &self.settings,
            &mut self.toolbar,
        );
        f(&mut self.tools, &mut ctx)
    }

    fn upload_textures(&mut self, ctx: &egui::Context) {
        let canvas = to_color_image(&self.canvas);
        let preview = to_color_image(&self.preview);
        match &mut self.textures {
            Some((canvas_handle, preview_handle)) => {
                canvas_handle.set(canvas, TextureOptions::NEAREST);
                preview_handle.set(preview, TextureOptions::NEAREST);
            }
            None => {
                self.textures = Some((
                    ctx.load_texture("canvas", canvas, TextureOptions::NEAREST),
                    ctx.load_texture("preview", preview, TextureOptions::NEAREST),
                ));
            }
        }
    }

    /// Rect of the attached overlay in canvas pixels.
    fn overlay_rect(&self) -> Option<Rect> {
        let overlay = self.tools.active_tool().overlay()?;
        overlay.is_attached(&self.tree).then(|| {
            overlay
                .transform()
                .mul_rect(Rect::from_min_size(Pos2::ZERO, overlay.box_size()))
        })
    }

    fn handle_pointer(
        &mut self,
        response: &egui::Response,
        ui: &egui::Ui,
        to_canvas: impl Fn(Pos2) -> Pos2,
    ) {
        let ctrl = ui.input(|i| i.modifiers.ctrl || i.modifiers.command);
        let button = if response.dragged_by(egui::PointerButton::Secondary) {
            PointerButton::Secondary
        } else if response.dragged_by(egui::PointerButton::Middle) {
            PointerButton::Middle
        } else {
            PointerButton::Primary
        };
        let pointer_at = |pos: Pos2| {
            let p = to_canvas(pos);
            PointerState::new(p.x, p.y)
                .with_ctrl(ctrl)
                .with_button(button)
        };

        if response.drag_started() {
            if let Some(origin) = ui.input(|i| i.pointer.press_origin()) {
                let pointer = pointer_at(origin);
                // The overlay box includes the grab margin, the tool itself only
                // grabs inside the bare bounds and treats margin presses as new traces
                let on_overlay = self
                    .overlay_rect()
                    .is_some_and(|r| r.contains(Pos2::new(pointer.x, pointer.y)));
                let routed = match self.tools.active_tool().overlay() {
                    Some(overlay) if on_overlay => {
                        overlay.pointer_down(pointer);
                        true
                    }
                    _ => false,
                };
                if routed {
                    self.with_tool_ctx(|tools, ctx| tools.dispatch_pending(ctx));
                } else {
                    self.with_tool_ctx(|tools, ctx| tools.start(ctx, pointer));
                }
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                let pointer = pointer_at(pos);
                self.with_tool_ctx(|tools, ctx| tools.move_to(ctx, pointer));
            }
        }

        if response.drag_stopped() {
            let pointer = ui
                .input(|i| i.pointer.latest_pos())
                .map(pointer_at)
                .unwrap_or_default();
            self.with_tool_ctx(|tools, ctx| tools.end(ctx, pointer));
        }
    }

    fn status_text(&self) -> String {
        let selection = match self.toolbar.anchor() {
            Some(b) => format!(
                "Selection {}x{} at ({}, {})",
                b.width(),
                b.height(),
                b.min_x,
                b.min_y
            ),
            None => "No selection".to_string(),
        };
        format!("{selection} | Enter: commit, Escape: cancel, Ctrl-drag: duplicate")
    }
}

fn to_color_image(image: &RgbaImage) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [image.width() as usize, image.height() as usize],
        image.as_raw(),
    )
}

impl eframe::App for LassoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.with_tool_ctx(|tools, ctx| tools.commit(ctx));
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.with_tool_ctx(|tools, ctx| tools.cancel(ctx));
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status_text());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let canvas_size = Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32);
            let available = ui.available_size();
            let scale = (available.x / canvas_size.x).min(available.y / canvas_size.y);
            let (response, painter) = ui.allocate_painter(available, Sense::drag());
            let image_rect = Rect::from_min_size(response.rect.min, canvas_size * scale);
            let to_canvas = |pos: Pos2| ((pos - image_rect.min) / scale).to_pos2();
            let to_screen = |pos: Pos2| image_rect.min + pos.to_vec2() * scale;

            self.handle_pointer(&response, ui, to_canvas);
            self.upload_textures(ui.ctx());

            let uv = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));
            if let Some((canvas, preview)) = &self.textures {
                painter.image(canvas.id(), image_rect, uv, Color32::WHITE);
                painter.image(preview.id(), image_rect, uv, Color32::WHITE);
            }
            if let Some(rect) = self.overlay_rect() {
                painter.rect_stroke(
                    Rect::from_min_max(to_screen(rect.min), to_screen(rect.max)),
                    0.0,
                    Stroke::new(1.0, Color32::LIGHT_BLUE),
                    StrokeKind::Inside,
                );
            }
        });
    }
}

