use image::{Rgba, RgbaImage};

use crate::{
    canvas,
    geometry::{BoundingBox, PixelOffset, PixelPoint},
};

/// A traced lasso region and its captured pixels.
#[derive(Debug, Clone)]
pub struct Selection {
    points: Vec<PixelPoint>,
    bounds: BoundingBox,
    origin: PixelPoint,
    // Frozen at creation, later settings changes don't apply to this selection
    fill_color: Rgba<u8>,
    first_move: bool,
    transformed: bool,
    // Source pixels were erased from the canvas
    lifted: bool,
    content: Option<RgbaImage>,
}

impl Selection {
    pub fn new(start: PixelPoint, fill_color: Rgba<u8>) -> Self {
        Self {
            points: vec![start],
            bounds: BoundingBox::from_point(start),
            origin: start,
            fill_color,
            first_move: true,
            transformed: false,
            lifted: false,
            content: None,
        }
    }

    pub fn points(&self) -> &[PixelPoint] {
        &self.points
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn origin(&self) -> PixelPoint {
        self.origin
    }

    pub fn fill_color(&self) -> Rgba<u8> {
        self.fill_color
    }

    pub fn first_move(&self) -> bool {
        self.first_move
    }

    pub fn transformed(&self) -> bool {
        self.transformed
    }

    pub fn content(&self) -> Option<&RgbaImage> {
        self.content.as_ref()
    }

    /// Bounding box at the current placement.
    pub fn placed_bounds(&self) -> BoundingBox {
        self.bounds.placed_at(self.origin)
    }

    /// Grab test. Uses the placed bounding box, not the polygon.
    pub fn contains(&self, point: PixelPoint) -> bool {
        self.placed_bounds().contains(point)
    }

    /// Fewer than three points or zero area: nothing can be selected.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3 || self.bounds.is_degenerate()
    }

    /// Translation from traced coordinates to the current placement.
    pub fn outline_offset(&self) -> PixelOffset {
        self.origin - self.bounds.min()
    }

    pub(crate) fn push_point(&mut self, point: PixelPoint) {
        self.points.push(point);
        self.bounds.widen(point);
        self.origin = self.bounds.min();
    }

    pub(crate) fn set_origin(&mut self, origin: PixelPoint) {
        self.origin = origin;
    }

    /// Copies the enclosed pixels off the canvas. Returns `false` if nothing was captured.
    pub(crate) fn capture(&mut self, source: &RgbaImage) -> bool {
        self.origin = self.bounds.min();
        self.content = canvas::capture_polygon(source, &self.points, &self.bounds);
        self.content.is_some()
    }

    /// Marks the selection as moved. The first time, the source area is erased
    /// with the frozen fill colour unless a duplicate already preserved it.
    pub(crate) fn lift(&mut self, target: &mut RgbaImage) {
        if self.first_move {
            canvas::fill_polygon(target, &self.points, &self.bounds, self.fill_color);
            self.first_move = false;
            self.lifted = true;
        }
        self.transformed = true;
    }

    /// The original stays in place, the next move drags an independent copy.
    pub(crate) fn mark_duplicated(&mut self) {
        self.first_move = false;
    }

    /// Writes the content to the canvas at its placement. Untransformed content is
    /// still on the canvas, so this is a no-op then.
    pub(crate) fn save(&self, target: &mut RgbaImage) -> bool {
        match &self.content {
            Some(content) if self.transformed => {
                canvas::stamp(target, content, self.origin);
                true
            }
            _ => false,
        }
    }

    /// Puts lifted pixels back where they were traced.
    pub(crate) fn restore(&self, target: &mut RgbaImage) {
        if let (true, Some(content)) = (self.lifted, &self.content) {
            canvas::stamp(target, content, self.bounds.min());
        }
    }
}

/// What the freeform tool is doing. The pointer offset only exists while moving.
#[derive(Debug, Default)]
pub enum SelectionState {
    /// No live selection
    #[default]
    Idle,
    Accumulating(Selection),
    /// Live selection between gestures
    Placed(Selection),
    Moving {
        selection: Selection,
        pointer_offset: PixelOffset,
    },
}

impl SelectionState {
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Accumulating(s) | SelectionState::Placed(s) => Some(s),
            SelectionState::Moving { selection, .. } => Some(selection),
        }
    }

    pub fn pointer_offset(&self) -> Option<PixelOffset> {
        match self {
            SelectionState::Moving { pointer_offset, .. } => Some(*pointer_offset),
            _ => None,
        }
    }

    pub fn is_gesture_active(&self) -> bool {
        matches!(
            self,
            SelectionState::Accumulating(_) | SelectionState::Moving { .. }
        )
    }

    pub(crate) fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    pub(crate) fn into_selection(self) -> Option<Selection> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Accumulating(s) | SelectionState::Placed(s) => Some(s),
            SelectionState::Moving { selection, .. } => Some(selection),
        }
    }
}
