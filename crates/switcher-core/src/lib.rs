pub mod config;
pub mod host;
pub mod keys;
pub mod overlay;
pub mod strip;

mod controller;
mod debounce;
mod error;

#[cfg(test)]
mod tests;

pub use controller::{InputEvent, Phase, SwitchController, SwitcherEvent, WheelDirection};
pub use debounce::HoverDebouncer;
pub use error::{Error, Result};

pub use switcher_types::*;
