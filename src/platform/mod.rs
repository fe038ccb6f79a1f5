//! Platform abstraction layer
//!
//! Browser glue lives in `web` (wasm32 only). Everything else in the crate
//! stays platform independent.

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("No global `window` object")]
    NoWindow,
    #[error("No `document` on the window")]
    NoDocument,
    #[error("Element `#{0}` not found")]
    MissingElement(String),
    #[error("Element `#{0}` is not a canvas")]
    NotACanvas(String),
    #[error("Canvas has no 2D context")]
    NoContext,
    #[error("JavaScript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for PlatformError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        PlatformError::Js(format!("{:?}", value))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<PlatformError> for wasm_bindgen::JsValue {
    fn from(err: PlatformError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

/// Map a pointer position in client space into canvas space
pub fn client_to_canvas(client: glam::Vec2, canvas_origin: glam::Vec2) -> glam::Vec2 {
    client - canvas_origin
}
