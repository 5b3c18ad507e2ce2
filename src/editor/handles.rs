//! Resize handles drawn just outside the surface's right and bottom edges.

use super::tools::ToolKind;
use crate::geometry::{CanvasPoint, Color, PixelRect};
use crate::surface::{BlendMode, PixelSurface};

const HANDLE_DARK: Color = Color::rgb(40, 103, 139);
const HANDLE_LIGHT: Color = Color::rgb(142, 205, 241);
const HANDLE_POINT: Color = Color::rgb(66, 171, 232);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    Right,
    Bottom,
    Corner,
}

impl ResizeHandle {
    /// Scaling tool a press on this handle activates.
    pub const fn tool_kind(self) -> ToolKind {
        match self {
            Self::Right => ToolKind::CanvasHorScale,
            Self::Bottom => ToolKind::CanvasVerScale,
            Self::Corner => ToolKind::CanvasBothScale,
        }
    }

    /// Square occupied by the handle on a `width` x `height` canvas.
    pub fn rect(self, width: u32, height: u32, size: u32) -> PixelRect {
        let (x, y) = match self {
            Self::Right => (width, height.saturating_sub(size) / 2),
            Self::Bottom => (width.saturating_sub(size) / 2, height),
            Self::Corner => (width, height),
        };
        PixelRect::new(
            i32::try_from(x).unwrap_or(i32::MAX),
            i32::try_from(y).unwrap_or(i32::MAX),
            size,
            size,
        )
    }
}

/// Hit-tests `point` against the squares the handles are drawn in. Squares are
/// half-open, so `width + size` on the x axis is already outside.
pub fn handle_at(point: CanvasPoint, width: u32, height: u32, size: u32) -> Option<ResizeHandle> {
    [ResizeHandle::Corner, ResizeHandle::Right, ResizeHandle::Bottom]
        .into_iter()
        .find(|handle| contains(handle.rect(width, height, size), point))
}

fn contains(rect: PixelRect, point: CanvasPoint) -> bool {
    let left = f64::from(rect.x);
    let top = f64::from(rect.y);
    point.x >= left
        && point.x < left + f64::from(rect.width)
        && point.y >= top
        && point.y < top + f64::from(rect.height)
}

/// Handles worth drawing; edge handles are hidden on a canvas too short to hold them.
pub fn visible_handles(width: u32, height: u32, size: u32) -> Vec<ResizeHandle> {
    let mut handles = Vec::with_capacity(3);
    if height > size.saturating_mul(4) {
        handles.push(ResizeHandle::Right);
    }
    if width > size.saturating_mul(4) {
        handles.push(ResizeHandle::Bottom);
    }
    handles.push(ResizeHandle::Corner);
    handles
}

pub fn draw_handles(frame: &mut PixelSurface, width: u32, height: u32, size: u32) {
    for handle in visible_handles(width, height, size) {
        draw_handle(frame, handle.rect(width, height, size));
    }
}

fn draw_handle(frame: &mut PixelSurface, rect: PixelRect) {
    let inner = rect.width.saturating_sub(1);
    frame.fill_rect(
        PixelRect::new(rect.x + 1, rect.y + 1, inner, inner),
        HANDLE_DARK,
        BlendMode::Replace,
    );
    frame.fill_rect(
        PixelRect::new(rect.x, rect.y, inner, inner),
        HANDLE_LIGHT,
        BlendMode::Replace,
    );
    let point = rect.width.saturating_sub(2);
    frame.fill_rect(
        PixelRect::new(rect.x + 1, rect.y + 1, point, point),
        HANDLE_POINT,
        BlendMode::Replace,
    );
}
