//! Interaction lifecycle shared by every tool: `Ready` until a press, `Drawing`
//! until the matching release.

pub mod error;
pub mod event;
pub mod machine;
pub mod model;

pub use error::{StateError, StateResult};
pub use event::{InteractionEvent, StateTransition};
pub use machine::InteractionMachine;
pub use model::ToolMode;
