#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolMode {
    #[default]
    Ready,
    Drawing,
}

impl ToolMode {
    pub const fn is_drawing(self) -> bool {
        matches!(self, Self::Drawing)
    }
}
