//! Browser helpers

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use super::{PlatformError, client_to_canvas};
use crate::settings::Settings;
use crate::sim::Viewport;
use crate::tuning::Tuning;

/// Id of the optional `<script type="application/json">` tuning block
const TUNING_ELEMENT_ID: &str = "tuning";

pub fn window() -> Result<Window, PlatformError> {
    web_sys::window().ok_or(PlatformError::NoWindow)
}

pub fn document() -> Result<Document, PlatformError> {
    window()?.document().ok_or(PlatformError::NoDocument)
}

pub fn canvas(id: &str) -> Result<HtmlCanvasElement, PlatformError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| PlatformError::MissingElement(id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| PlatformError::NotACanvas(id.to_string()))
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, PlatformError> {
    canvas
        .get_context("2d")?
        .ok_or(PlatformError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| PlatformError::NoContext)
}

pub fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .filter(|r| *r > 0.0)
        .unwrap_or(1.0)
}

/// Size the canvas backing store to its CSS box and return that box
pub fn fit_canvas(canvas: &HtmlCanvasElement, pixel_ratio: f64) -> Viewport {
    let width = canvas.client_width().max(1);
    let height = canvas.client_height().max(1);
    canvas.set_width((width as f64 * pixel_ratio) as u32);
    canvas.set_height((height as f64 * pixel_ratio) as u32);
    Viewport::new(width as f32, height as f32)
}

/// Client coordinates to canvas CSS coordinates
pub fn canvas_point(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    client_to_canvas(
        Vec2::new(client_x as f32, client_y as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
    )
}

/// Tuning from the page, or defaults if the page has none
pub fn load_tuning() -> Tuning {
    let json = document()
        .ok()
        .and_then(|d| d.get_element_by_id(TUNING_ELEMENT_ID))
        .and_then(|el| el.text_content());

    match json {
        Some(json) if !json.trim().is_empty() => Tuning::from_json_or_default(&json),
        _ => Tuning::default(),
    }
}

/// Settings from the URL query string
pub fn load_settings() -> Settings {
    let query = window()
        .ok()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    Settings::from_query(&query)
}
