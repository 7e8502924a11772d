//! Background workers owned by the runtime.

mod character;

pub use character::{CharacterWorker, Command};
