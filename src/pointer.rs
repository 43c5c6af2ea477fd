use std::sync::mpsc::Sender;

use crate::geometry::PixelPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Pointer sample in canvas pixel space, as delivered by the host for down/move/up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    /// Duplicate modifier
    pub ctrl_key: bool,
    pub button: PointerButton,
}

impl PointerState {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn with_ctrl(mut self, ctrl_key: bool) -> Self {
        self.ctrl_key = ctrl_key;
        self
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn position(&self) -> Option<PixelPoint> {
        PixelPoint::from_pointer(self.x, self.y)
    }
}

/// Cloneable entry point for pointer-down events raised outside the canvas, for
/// example on a floating overlay. Events are queued for the tool registry that
/// created the handler.
#[derive(Debug, Clone)]
pub struct PointerDownHandler {
    sender: Sender<PointerState>,
}

impl PointerDownHandler {
    pub(crate) fn new(sender: Sender<PointerState>) -> Self {
        Self { sender }
    }

    pub fn handle(&self, state: PointerState) {
        if self.sender.send(state).is_err() {
            log::debug!("Pointer down dropped, tool registry is gone");
        }
    }
}
