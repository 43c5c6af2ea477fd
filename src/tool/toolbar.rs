use crate::geometry::BoundingBox;

/// Toolbar offering actions on the live selection.
pub trait SelectionToolbar {
    /// Called at the start of every gesture, must be harmless when already hidden.
    fn hide(&mut self);
    fn show(&mut self, anchor: BoundingBox);
}

/// Visibility state of the toolbar, rendered by the viewer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ToolbarState {
    anchor: Option<BoundingBox>,
}

impl ToolbarState {
    pub fn is_visible(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<BoundingBox> {
        self.anchor
    }
}

impl SelectionToolbar for ToolbarState {
    fn hide(&mut self) {
        self.anchor = None;
    }

    fn show(&mut self, anchor: BoundingBox) {
        self.anchor = Some(anchor);
    }
}
