//! Browser binding error types

use thiserror::Error;

/// Errors raised while attaching to or detaching from the browser window
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    /// No `window` object in this environment
    #[error("No window object available")]
    NoWindow,

    /// A DOM call threw
    #[error("DOM call failed: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl DomError {
    pub(crate) fn from_js(value: wasm_bindgen::JsValue) -> Self {
        DomError::Js(format!("{value:?}"))
    }
}

/// Result type for browser binding operations
pub type Result<T> = std::result::Result<T, DomError>;
