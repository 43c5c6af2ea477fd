use std::sync::mpsc::{self, Receiver, Sender};

use crate::pointer::{PointerDownHandler, PointerState};

use super::{Tool, ToolContext};

/// Creates a tool for one activation. The handler routes pointer-downs raised on the
/// tool's own overlays back into this registry.
pub type ToolFactory = Box<dyn Fn(PointerDownHandler) -> Box<dyn Tool>>;

/// Owns the available tools and forwards pointer events to the active one.
pub struct ToolRegistry {
    active_idx: usize,
    tool_factories: Vec<(String, ToolFactory)>,
    active_tool: Box<dyn Tool>,
    pointer_down_tx: Sender<PointerState>,
    pointer_down_rx: Receiver<PointerState>,
}

impl ToolRegistry {
    /// The first factory becomes the active tool.
    pub fn new(tool_factories: Vec<(String, ToolFactory)>) -> Self {
        let (pointer_down_tx, pointer_down_rx) = mpsc::channel();
        let active_tool = match tool_factories.first() {
            Some((name, factory)) => {
                log::debug!("Loading tool: {name}");
                factory(PointerDownHandler::new(pointer_down_tx.clone()))
            }
            None => Box::new(NopTool),
        };
        Self {
            active_idx: 0,
            tool_factories,
            active_tool,
            pointer_down_tx,
            pointer_down_rx,
        }
    }

    pub fn pointer_down_handler(&self) -> PointerDownHandler {
        PointerDownHandler::new(self.pointer_down_tx.clone())
    }

    pub fn tool_names(&self) -> impl Iterator<Item = &str> {
        self.tool_factories.iter().map(|(name, _)| name.as_str())
    }

    pub fn active_idx(&self) -> usize {
        self.active_idx
    }

    pub fn active_name(&self) -> Option<&str> {
        self.tool_factories
            .get(self.active_idx)
            .map(|(name, _)| name.as_str())
    }

    pub fn active_tool(&self) -> &dyn Tool {
        self.active_tool.as_ref()
    }

    /// Deactivates the current tool and loads a fresh instance of the tool at `idx`.
    pub fn set_active_idx(&mut self, idx: usize, ctx: &mut ToolContext) {
        if idx >= self.tool_factories.len() || idx == self.active_idx {
            return;
        }
        self.active_tool.deactivate(ctx);
        self.active_idx = idx;
        let (name, factory) = &self.tool_factories[idx];
        log::debug!("Loading tool: {name}");
        self.active_tool = factory(self.pointer_down_handler());
        self.active_tool.activate(ctx);
    }

    pub fn start(&mut self, ctx: &mut ToolContext, pointer: PointerState) {
        self.active_tool.start(ctx, pointer);
    }

    pub fn move_to(&mut self, ctx: &mut ToolContext, pointer: PointerState) {
        self.active_tool.move_to(ctx, pointer);
    }

    pub fn end(&mut self, ctx: &mut ToolContext, pointer: PointerState) {
        self.active_tool.end(ctx, pointer);
    }

    pub fn commit(&mut self, ctx: &mut ToolContext) {
        self.active_tool.commit(ctx);
    }

    pub fn cancel(&mut self, ctx: &mut ToolContext) {
        self.active_tool.cancel(ctx);
    }

    /// Starts a gesture for every pointer-down queued through a [`PointerDownHandler`].
    /// Returns how many were dispatched.
    pub fn dispatch_pending(&mut self, ctx: &mut ToolContext) -> usize {
        let mut dispatched = 0;
        while let Ok(pointer) = self.pointer_down_rx.try_recv() {
            self.active_tool.start(ctx, pointer);
            dispatched += 1;
        }
        dispatched
    }
}

/// A no-operation tool used as placeholder
struct NopTool;

impl Tool for NopTool {
    fn start(&mut self, _ctx: &mut ToolContext, _pointer: PointerState) {
        log::debug!("NopTool was called");
    }

    fn move_to(&mut self, _ctx: &mut ToolContext, _pointer: PointerState) {}

    fn end(&mut self, _ctx: &mut ToolContext, _pointer: PointerState) {}
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use image::RgbaImage;

    use super::*;
    use crate::{overlay::VisualTree, settings::Settings, tool::ToolbarState};

    #[derive(Default)]
    struct Calls {
        starts: Vec<PointerState>,
        activations: usize,
        deactivations: usize,
    }

    struct Recorder(Rc<RefCell<Calls>>);

    impl Tool for Recorder {
        fn start(&mut self, _ctx: &mut ToolContext, pointer: PointerState) {
            self.0.borrow_mut().starts.push(pointer);
        }
        fn move_to(&mut self, _ctx: &mut ToolContext, _pointer: PointerState) {}
        fn end(&mut self, _ctx: &mut ToolContext, _pointer: PointerState) {}
        fn activate(&mut self, _ctx: &mut ToolContext) {
            self.0.borrow_mut().activations += 1;
        }
        fn deactivate(&mut self, _ctx: &mut ToolContext) {
            self.0.borrow_mut().deactivations += 1;
        }
    }

    fn recorder_factory(calls: &Rc<RefCell<Calls>>) -> ToolFactory {
        let calls = calls.clone();
        Box::new(move |_: PointerDownHandler| {
            Box::new(Recorder(calls.clone())) as Box<dyn Tool>
        })
    }

    #[test]
    fn queued_pointer_down_reaches_active_tool() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let mut registry = ToolRegistry::new(vec![("Rec".into(), recorder_factory(&calls))]);
        let (mut canvas, mut preview) = (RgbaImage::new(4, 4), RgbaImage::new(4, 4));
        let mut tree = VisualTree::default();
        let settings = Settings::default();
        let mut toolbar = ToolbarState::default();
        let mut ctx =
            ToolContext::new(&mut canvas, &mut preview, &mut tree, &settings, &mut toolbar);

        let handler = registry.pointer_down_handler();
        handler.handle(PointerState::new(1.0, 2.0));
        handler.handle(PointerState::new(3.0, 4.0));
        assert_eq!(registry.dispatch_pending(&mut ctx), 2);
        assert_eq!(registry.dispatch_pending(&mut ctx), 0);
        assert_eq!(calls.borrow().starts.len(), 2);
    }

    #[test]
    fn switching_tools_deactivates_previous() {
        let first = Rc::new(RefCell::new(Calls::default()));
        let second = Rc::new(RefCell::new(Calls::default()));
        let mut registry = ToolRegistry::new(vec![
            ("First".into(), recorder_factory(&first)),
            ("Second".into(), recorder_factory(&second)),
        ]);
        let (mut canvas, mut preview) = (RgbaImage::new(4, 4), RgbaImage::new(4, 4));
        let mut tree = VisualTree::default();
        let settings = Settings::default();
        let mut toolbar = ToolbarState::default();
        let mut ctx =
            ToolContext::new(&mut canvas, &mut preview, &mut tree, &settings, &mut toolbar);

        registry.set_active_idx(1, &mut ctx);
        registry.set_active_idx(1, &mut ctx);
        registry.set_active_idx(7, &mut ctx);
        assert_eq!(registry.active_name(), Some("Second"));
        assert_eq!(first.borrow().deactivations, 1);
        assert_eq!(second.borrow().activations, 1);
        assert_eq!(registry.tool_names().collect::<Vec<_>>(), vec!["First", "Second"]);
    }

    #[test]
    fn empty_registry_uses_nop_tool() {
        let mut registry = ToolRegistry::new(Vec::new());
        let (mut canvas, mut preview) = (RgbaImage::new(4, 4), RgbaImage::new(4, 4));
        let mut tree = VisualTree::default();
        let settings = Settings::default();
        let mut toolbar = ToolbarState::default();
        let mut ctx =
            ToolContext::new(&mut canvas, &mut preview, &mut tree, &settings, &mut toolbar);
        registry.start(&mut ctx, PointerState::new(0.0, 0.0));
        assert_eq!(registry.active_name(), None);
        assert!(registry.active_tool().overlay().is_none());
    }
}
