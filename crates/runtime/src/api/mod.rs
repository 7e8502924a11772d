//! Public API surface for runtime consumers.

mod errors;
mod events;
mod handle;

pub use errors::{Result, RuntimeError};
pub use events::BuildEvent;
pub use handle::CharacterHandle;
