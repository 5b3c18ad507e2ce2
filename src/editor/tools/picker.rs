use super::{CanvasState, CursorGlyph, DragState, DrawContext, PointerButton, Tool, ToolCommit, ToolKind};
use crate::geometry::{CanvasPoint, Color};
use crate::surface::PixelSurface;

/// Samples the surface under the pointer while the button is held.
#[derive(Debug, Default)]
pub struct ColorPickerTool {
    drag: DragState,
    picked: Option<Color>,
}

impl ColorPickerTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn sample(&mut self, state: &CanvasState, point: CanvasPoint) {
        let (x, y) = point.pixel();
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if let Some(color) = state.surface().color_at(x, y) {
            self.picked = Some(color);
        }
    }
}

impl Tool for ColorPickerTool {
    fn kind(&self) -> ToolKind {
        ToolKind::ColorPicker
    }

    fn drag_state(&self) -> &DragState {
        &self.drag
    }

    fn drag_state_mut(&mut self) -> &mut DragState {
        &mut self.drag
    }

    fn begin(&mut self, state: &mut CanvasState, point: CanvasPoint, button: PointerButton) {
        if self.drag.begin(point, button) {
            self.sample(state, point);
        }
    }

    fn drag(&mut self, state: &mut CanvasState, point: CanvasPoint) {
        if self.drag.drag(point) {
            self.sample(state, point);
        }
    }

    fn end(&mut self, state: &mut CanvasState, point: CanvasPoint) {
        if self.drag.end(point) {
            self.sample(state, point);
        }
    }

    fn commit(&mut self, _state: &mut CanvasState) -> ToolCommit {
        ToolCommit::Nothing
    }

    fn draw(&self, _context: &DrawContext, _target: &mut PixelSurface) {}

    fn select(&self, state: &mut CanvasState) {
        state.set_cursor(CursorGlyph::Picker);
    }

    fn picked_color(&self) -> Option<Color> {
        self.picked
    }
}
