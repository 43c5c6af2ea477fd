//! Floating region: a positionable, uniformly scalable proxy for selected content.
//!
//! Every change of `x`, `y` or `scale` recomputes the combined translate + scale
//! transform from scratch. `width` and `height` only change the node box and are
//! independent of the transform.

use emath::{TSTransform, Vec2};

use crate::pointer::{PointerDownHandler, PointerState};

mod visual_tree;

pub use visual_tree::*;

/// Padding in pixels between the placed selection bounds and the overlay box.
/// Presses inside the box are forwarded to the tool, which grabs only inside the
/// bare bounds.
pub const GRABBABLE_MARGIN: i32 = 24;

pub struct FloatingRegion {
    node: NodeId,
    x: f32,
    y: f32,
    scale: f32,
    width: f32,
    height: f32,
    transform: TSTransform,
    box_size: Vec2,
    on_pointer_down: PointerDownHandler,
}

impl FloatingRegion {
    /// `on_pointer_down` comes from the tool registry, which therefore has to exist first.
    pub fn new(on_pointer_down: PointerDownHandler) -> Self {
        Self {
            node: NodeId::unique(),
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            width: 0.0,
            height: 0.0,
            transform: TSTransform::IDENTITY,
            box_size: Vec2::ZERO,
            on_pointer_down,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn set_x(&mut self, value: f32) {
        self.x = value;
        self.update_transform();
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_y(&mut self, value: f32) {
        self.y = value;
        self.update_transform();
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, value: f32) {
        self.scale = value;
        self.update_transform();
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_width(&mut self, value: f32) {
        self.width = value;
        self.box_size.x = value;
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_height(&mut self, value: f32) {
        self.height = value;
        self.box_size.y = value;
    }

    pub fn transform(&self) -> TSTransform {
        self.transform
    }

    /// Transform in css notation, e.g. `translate(10px, 20px) scale(2)`.
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.transform.translation.x, self.transform.translation.y, self.transform.scaling
        )
    }

    /// Size of the node box, unaffected by the transform.
    pub fn box_size(&self) -> Vec2 {
        self.box_size
    }

    fn update_transform(&mut self) {
        self.transform = TSTransform::new(Vec2::new(self.x, self.y), self.scale);
    }

    pub fn is_attached(&self, tree: &VisualTree) -> bool {
        tree.contains(self.node)
    }

    pub fn add_to_tree(&self, tree: &mut VisualTree) {
        if !tree.contains(self.node) {
            tree.append(self.node);
        }
    }

    pub fn remove_from_tree(&self, tree: &mut VisualTree) -> RemoveOutcome {
        let outcome = tree.remove(self.node);
        if outcome == RemoveOutcome::AlreadyAbsent {
            log::debug!("Floating region {:?} was already detached", self.node);
        }
        outcome
    }

    /// Forwards a pointer-down on the region to the tool registry.
    pub fn pointer_down(&self, state: PointerState) {
        self.on_pointer_down.handle(state);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    fn region() -> (FloatingRegion, mpsc::Receiver<PointerState>) {
        let (sender, receiver) = mpsc::channel();
        (FloatingRegion::new(PointerDownHandler::new(sender)), receiver)
    }

    #[test]
    fn translate_and_scale_combine() {
        let (mut region, _rx) = region();
        region.set_x(10.0);
        region.set_y(20.0);
        region.set_scale(2.0);
        assert_eq!(region.css_transform(), "translate(10px, 20px) scale(2)");
        assert_eq!(
            region.transform(),
            TSTransform::new(Vec2::new(10.0, 20.0), 2.0)
        );
    }

    #[test]
    fn scale_alone_keeps_translation() {
        let (mut region, _rx) = region();
        assert_eq!(region.css_transform(), "translate(0px, 0px) scale(1)");
        region.set_scale(3.0);
        assert_eq!(region.css_transform(), "translate(0px, 0px) scale(3)");
        region.set_x(4.0);
        region.set_scale(0.5);
        assert_eq!(region.css_transform(), "translate(4px, 0px) scale(0.5)");
    }

    #[test]
    fn size_does_not_touch_transform() {
        let (mut region, _rx) = region();
        region.set_x(7.0);
        region.set_width(30.0);
        region.set_height(12.0);
        assert_eq!(region.box_size(), Vec2::new(30.0, 12.0));
        assert_eq!(region.transform().translation, Vec2::new(7.0, 0.0));
        assert_eq!((region.width(), region.height()), (30.0, 12.0));
    }

    #[test]
    fn attach_and_detach_are_idempotent() {
        let (region, _rx) = region();
        let mut tree = VisualTree::default();
        region.add_to_tree(&mut tree);
        region.add_to_tree(&mut tree);
        assert_eq!(tree.len(), 1);
        assert!(region.is_attached(&tree));

        assert_eq!(region.remove_from_tree(&mut tree), RemoveOutcome::Removed);
        assert_eq!(
            region.remove_from_tree(&mut tree),
            RemoveOutcome::AlreadyAbsent
        );
        assert!(!region.is_attached(&tree));
    }

    #[test]
    fn detach_tolerates_out_of_band_removal() {
        let (region, _rx) = region();
        let mut tree = VisualTree::default();
        region.add_to_tree(&mut tree);
        tree.remove(region.node());
        assert_eq!(
            region.remove_from_tree(&mut tree),
            RemoveOutcome::AlreadyAbsent
        );
    }

    #[test]
    fn pointer_down_reaches_registry_queue() {
        let (region, rx) = region();
        region.pointer_down(PointerState::new(3.0, 4.0));
        assert_eq!(rx.try_recv().unwrap(), PointerState::new(3.0, 4.0));
    }
}
