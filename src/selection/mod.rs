//! Rectangular selection that scopes region operations.

use crate::geometry::{CanvasPoint, PixelRect};

/// Two opposite corners as the user dragged them; normalization happens at use time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub anchor: CanvasPoint,
    pub extent: CanvasPoint,
}

impl Selection {
    pub const fn new(anchor: CanvasPoint, extent: CanvasPoint) -> Self {
        Self { anchor, extent }
    }

    /// Selection covering a whole `width` x `height` surface.
    pub fn covering(width: u32, height: u32) -> Self {
        Self::new(
            CanvasPoint::new(0.0, 0.0),
            CanvasPoint::new(f64::from(width), f64::from(height)),
        )
    }

    /// Clamps both corners into `[0, width] x [0, height]` and orders them.
    /// `None` when the clamped rectangle has no area.
    pub fn normalized(&self, width: u32, height: u32) -> Option<PixelRect> {
        let (left, right) = clamped_span(self.anchor.x, self.extent.x, width);
        let (top, bottom) = clamped_span(self.anchor.y, self.extent.y, height);
        let rect_width = right.saturating_sub(left);
        let rect_height = bottom.saturating_sub(top);
        if rect_width == 0 || rect_height == 0 {
            return None;
        }
        Some(PixelRect::new(
            i32::try_from(left).ok()?,
            i32::try_from(top).ok()?,
            rect_width,
            rect_height,
        ))
    }
}

fn clamp_coordinate(value: f64, limit: u32) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, f64::from(limit)).floor() as u32
}

fn clamped_span(a: f64, b: f64, limit: u32) -> (u32, u32) {
    let a = clamp_coordinate(a, limit);
    let b = clamp_coordinate(b, limit);
    (a.min(b), a.max(b))
}

/// Selection slot owned by the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelectionState {
    active: Option<Selection>,
}

impl SelectionState {
    pub const fn new() -> Self {
        Self { active: None }
    }

    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub const fn get(&self) -> Option<Selection> {
        self.active
    }

    /// Returns `true` when activity changed.
    pub fn set(&mut self, selection: Selection) -> bool {
        let was_active = self.is_active();
        self.active = Some(selection);
        !was_active
    }

    /// Returns `true` when a selection was dropped.
    pub fn clear(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn rect(&self, width: u32, height: u32) -> Option<PixelRect> {
        self.active
            .and_then(|selection| selection.normalized(width, height))
    }
}
