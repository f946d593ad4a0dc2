pub mod core;
pub mod render;
pub mod runtime;
#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneError {
    /// Settings text could not be deserialized.
    Parse,
    /// Settings were well-formed but out of range.
    InvalidConfig,
    /// A settings file could not be read.
    Io,
}

impl fmt::Display for PlaneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "failed to parse plane settings"),
            Self::InvalidConfig => write!(f, "invalid plane settings"),
            Self::Io => write!(f, "failed to read plane settings"),
        }
    }
}

impl std::error::Error for PlaneError {}

pub type Result<T> = std::result::Result<T, error_stack::Report<PlaneError>>;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

pub mod prelude {
    pub use crate::core::*;
    pub use crate::render::*;
    pub use crate::runtime::*;
}
