use super::{CanvasState, CursorGlyph, DragState, DrawContext, PointerButton, Tool, ToolKind};
use crate::geometry::CanvasPoint;
use crate::surface::PixelSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAxis {
    Both,
    Horizontal,
    Vertical,
}

impl ScaleAxis {
    const fn kind(self) -> ToolKind {
        match self {
            Self::Both => ToolKind::CanvasBothScale,
            Self::Horizontal => ToolKind::CanvasHorScale,
            Self::Vertical => ToolKind::CanvasVerScale,
        }
    }

    const fn cursor(self) -> CursorGlyph {
        match self {
            Self::Both => CursorGlyph::ResizeDiagonal,
            Self::Horizontal => CursorGlyph::ResizeHorizontal,
            Self::Vertical => CursorGlyph::ResizeVertical,
        }
    }
}

/// Drags a resize handle; the logical canvas size follows the pointer and the
/// surface is reprinted at that size on release.
#[derive(Debug)]
pub struct ScalingTool {
    axis: ScaleAxis,
    drag: DragState,
    start_size: (u32, u32),
}

impl ScalingTool {
    pub fn new(axis: ScaleAxis) -> Self {
        Self {
            axis,
            drag: DragState::new(),
            start_size: (1, 1),
        }
    }

    pub fn axis(&self) -> ScaleAxis {
        self.axis
    }

    fn resize_to(&self, state: &mut CanvasState, point: CanvasPoint) {
        let initial = self.drag.initial();
        let (width, height) = self.start_size;
        let width = match self.axis {
            ScaleAxis::Vertical => width,
            _ => offset_length(width, point.x - initial.x),
        };
        let height = match self.axis {
            ScaleAxis::Horizontal => height,
            _ => offset_length(height, point.y - initial.y),
        };
        state.set_canvas_size(width, height);
    }
}

fn offset_length(length: u32, delta: f64) -> u32 {
    let resized = (f64::from(length) + delta).floor();
    if resized.is_nan() || resized < 1.0 {
        1
    } else {
        resized.min(f64::from(u32::MAX)) as u32
    }
}

impl Tool for ScalingTool {
    fn kind(&self) -> ToolKind {
        self.axis.kind()
    }

    fn drag_state(&self) -> &DragState {
        &self.drag
    }

    fn drag_state_mut(&mut self) -> &mut DragState {
        &mut self.drag
    }

    fn begin(&mut self, state: &mut CanvasState, point: CanvasPoint, button: PointerButton) {
        if self.drag.begin(point, button) {
            self.start_size = state.canvas_size();
        }
    }

    fn drag(&mut self, state: &mut CanvasState, point: CanvasPoint) {
        if self.drag.drag(point) {
            self.resize_to(state, point);
        }
    }

    fn end(&mut self, state: &mut CanvasState, point: CanvasPoint) {
        if self.drag.end(point) {
            self.resize_to(state, point);
        }
    }

    fn draw(&self, _context: &DrawContext, _target: &mut PixelSurface) {}

    fn select(&self, state: &mut CanvasState) {
        state.set_cursor(self.axis.cursor());
    }
}
