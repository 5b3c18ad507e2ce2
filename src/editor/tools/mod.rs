mod drag;
mod inert;
mod picker;
mod scaling;
mod selection;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::CanvasState;
use crate::geometry::{CanvasPoint, Color};
use crate::state::ToolMode;
use crate::surface::PixelSurface;

pub use drag::DragState;
pub use inert::InertTool;
pub use picker::ColorPickerTool;
pub use scaling::{ScaleAxis, ScalingTool};
pub use selection::{RectangleSelectTool, MARQUEE_DASH};

/// Identifier a tool is registered and selected under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    RoundedRectangle,
    Rectangle,
    StraightLine,
    Pencil,
    Paintbrush,
    BucketFill,
    Eraser,
    Ellipse,
    ColorPicker,
    RectSelect,
    Airbrush,
    CanvasBothScale,
    CanvasHorScale,
    CanvasVerScale,
    /// Placeholder that swallows presses landing off-canvas.
    Inert,
}

impl ToolKind {
    pub const ALL: [ToolKind; 15] = [
        Self::RoundedRectangle,
        Self::Rectangle,
        Self::StraightLine,
        Self::Pencil,
        Self::Paintbrush,
        Self::BucketFill,
        Self::Eraser,
        Self::Ellipse,
        Self::ColorPicker,
        Self::RectSelect,
        Self::Airbrush,
        Self::CanvasBothScale,
        Self::CanvasHorScale,
        Self::CanvasVerScale,
        Self::Inert,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::RoundedRectangle => "draw-rounded-rectangle",
            Self::Rectangle => "draw-rectangle",
            Self::StraightLine => "straight-line",
            Self::Pencil => "pencil",
            Self::Paintbrush => "paintbrush",
            Self::BucketFill => "bucket-fill",
            Self::Eraser => "eraser",
            Self::Ellipse => "draw-ellipse",
            Self::ColorPicker => "color-picker",
            Self::RectSelect => "rect-select",
            Self::Airbrush => "airbrush",
            Self::CanvasBothScale => "canvas-both-scale",
            Self::CanvasHorScale => "canvas-hor-scale",
            Self::CanvasVerScale => "canvas-ver-scale",
            Self::Inert => "inert",
        }
    }

    pub const fn is_scaling(self) -> bool {
        matches!(
            self,
            Self::CanvasBothScale | Self::CanvasHorScale | Self::CanvasVerScale
        )
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ToolKind {
    type Err = ToolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == value)
            .ok_or_else(|| ToolError::Unknown(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("unknown tool identifier `{0}`")]
    Unknown(String),
    #[error("no tool registered for `{0}`")]
    Unregistered(ToolKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Maps toolkit button numbers (1, 2, 3); anything else counts as primary.
    pub const fn from_code(code: u32) -> Self {
        match code {
            2 => Self::Middle,
            3 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorGlyph {
    #[default]
    Default,
    Crosshair,
    Picker,
    ResizeHorizontal,
    ResizeVertical,
    ResizeDiagonal,
}

/// What the controller must do after a tool commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCommit {
    Nothing,
    /// Snapshot the surface, then print the tool's drawing into it.
    Render,
}

/// Read-only canvas facts a tool needs while drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawContext {
    pub width: u32,
    pub height: u32,
    pub primary: Color,
    pub secondary: Color,
}

impl DrawContext {
    /// Colour the button paints with; the secondary button swaps the pair.
    pub const fn foreground(&self, button: PointerButton) -> Color {
        match button {
            PointerButton::Secondary => self.secondary,
            _ => self.primary,
        }
    }

    pub const fn background(&self, button: PointerButton) -> Color {
        match button {
            PointerButton::Secondary => self.primary,
            _ => self.secondary,
        }
    }
}

/// Pluggable pointer tool. Gesture methods default to tracking the drag
/// through [`DragState`]; tools override what they react to.
pub trait Tool: fmt::Debug {
    fn kind(&self) -> ToolKind;

    fn drag_state(&self) -> &DragState;

    fn drag_state_mut(&mut self) -> &mut DragState;

    fn mode(&self) -> ToolMode {
        self.drag_state().mode()
    }

    /// Overlay tools draw into the persistent overlay instead of the working frame.
    fn draws_to_overlay(&self) -> bool {
        false
    }

    fn begin(&mut self, _state: &mut CanvasState, point: CanvasPoint, button: PointerButton) {
        self.drag_state_mut().begin(point, button);
    }

    fn drag(&mut self, _state: &mut CanvasState, point: CanvasPoint) {
        self.drag_state_mut().drag(point);
    }

    fn end(&mut self, _state: &mut CanvasState, point: CanvasPoint) {
        self.drag_state_mut().end(point);
    }

    /// Applies the gesture's effect. The tool is still drawing when this runs
    /// so a following print can render its final shape.
    fn commit(&mut self, _state: &mut CanvasState) -> ToolCommit {
        ToolCommit::Render
    }

    /// Returns to `Ready` once the controller has handled the commit.
    fn finish(&mut self) {
        self.drag_state_mut().finish();
    }

    fn draw(&self, context: &DrawContext, target: &mut PixelSurface);

    /// Hover feedback while not drawing.
    fn select(&self, state: &mut CanvasState) {
        state.set_cursor(CursorGlyph::Crosshair);
    }

    fn picked_color(&self) -> Option<Color> {
        None
    }
}

/// Registry of the tools a controller can activate.
#[derive(Debug, Default)]
pub struct ToolChest {
    tools: HashMap<ToolKind, Box<dyn Tool>>,
}

impl ToolChest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chest holding the tools the controller itself depends on.
    pub fn with_builtin() -> Self {
        let mut chest = Self::new();
        chest.register(Box::new(InertTool::new()));
        chest.register(Box::new(RectangleSelectTool::new()));
        chest.register(Box::new(ColorPickerTool::new()));
        for axis in [ScaleAxis::Both, ScaleAxis::Horizontal, ScaleAxis::Vertical] {
            chest.register(Box::new(ScalingTool::new(axis)));
        }
        chest
    }

    /// Registers `tool` under its own kind, returning any tool it replaces.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Option<Box<dyn Tool>> {
        let kind = tool.kind();
        tracing::debug!(tool = %kind, "registered tool");
        self.tools.insert(kind, tool)
    }

    pub fn contains(&self, kind: ToolKind) -> bool {
        self.tools.contains_key(&kind)
    }

    pub fn get(&self, kind: ToolKind) -> Option<&dyn Tool> {
        self.tools.get(&kind).map(|tool| tool.as_ref())
    }

    pub fn get_mut(&mut self, kind: ToolKind) -> Option<&mut (dyn Tool + 'static)> {
        self.tools.get_mut(&kind).map(|tool| tool.as_mut())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
