use super::{CanvasState, CursorGlyph, DragState, DrawContext, PointerButton, Tool, ToolCommit, ToolKind};
use crate::geometry::CanvasPoint;
use crate::surface::PixelSurface;

/// Stand-in activated for presses off the canvas that miss every handle.
#[derive(Debug, Default)]
pub struct InertTool {
    drag: DragState,
}

impl InertTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for InertTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Inert
    }

    fn drag_state(&self) -> &DragState {
        &self.drag
    }

    fn drag_state_mut(&mut self) -> &mut DragState {
        &mut self.drag
    }

    fn begin(&mut self, _state: &mut CanvasState, _point: CanvasPoint, _button: PointerButton) {}

    fn commit(&mut self, _state: &mut CanvasState) -> ToolCommit {
        ToolCommit::Nothing
    }

    fn draw(&self, _context: &DrawContext, _target: &mut PixelSurface) {}

    fn select(&self, state: &mut CanvasState) {
        state.set_cursor(CursorGlyph::Default);
    }
}
