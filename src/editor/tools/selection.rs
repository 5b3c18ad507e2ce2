use super::{CanvasState, DragState, DrawContext, PointerButton, Tool, ToolCommit, ToolKind};
use crate::geometry::{CanvasPoint, Color};
use crate::selection::Selection;
use crate::surface::PixelSurface;

/// Pixels per dash of the selection marquee.
pub const MARQUEE_DASH: u32 = 5;

const MARQUEE_DARK: Color = Color::rgb(0, 0, 255);
const MARQUEE_LIGHT: Color = Color::rgb(255, 255, 0);

/// Drags out a rectangular selection, previewed as a dashed marquee on the overlay.
#[derive(Debug, Default)]
pub struct RectangleSelectTool {
    drag: DragState,
}

impl RectangleSelectTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for RectangleSelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::RectSelect
    }

    fn drag_state(&self) -> &DragState {
        &self.drag
    }

    fn drag_state_mut(&mut self) -> &mut DragState {
        &mut self.drag
    }

    fn draws_to_overlay(&self) -> bool {
        true
    }

    fn begin(&mut self, state: &mut CanvasState, point: CanvasPoint, button: PointerButton) {
        if self.drag.begin(point, button) {
            state.clear_overlay();
        }
    }

    fn commit(&mut self, state: &mut CanvasState) -> ToolCommit {
        if self.drag.is_drawing() {
            state.set_selection(Selection::new(self.drag.initial(), self.drag.current()));
        }
        ToolCommit::Nothing
    }

    fn draw(&self, context: &DrawContext, target: &mut PixelSurface) {
        if !self.drag.is_drawing() {
            return;
        }
        target.clear();
        let selection = Selection::new(self.drag.initial(), self.drag.current());
        if let Some(rect) = selection.normalized(context.width, context.height) {
            let (x, y) = (rect.x as u32, rect.y as u32);
            draw_marquee(target, x, y, x + rect.width - 1, y + rect.height - 1);
        }
    }
}

/// Walks the rectangle outline clockwise, alternating dash colours.
fn draw_marquee(target: &mut PixelSurface, left: u32, top: u32, right: u32, bottom: u32) {
    let mut perimeter = Vec::new();
    perimeter.extend((left..=right).map(|x| (x, top)));
    perimeter.extend((top + 1..=bottom).map(|y| (right, y)));
    if bottom > top {
        perimeter.extend((left..right).rev().map(|x| (x, bottom)));
    }
    if right > left {
        perimeter.extend((top + 1..bottom).rev().map(|y| (left, y)));
    }

    let dark = MARQUEE_DARK.to_premultiplied_bgra();
    let light = MARQUEE_LIGHT.to_premultiplied_bgra();
    for (step, (x, y)) in perimeter.into_iter().enumerate() {
        let pixel = if (step as u32 / MARQUEE_DASH) % 2 == 0 {
            dark
        } else {
            light
        };
        target.set_pixel(x, y, pixel);
    }
}
