//! Small DOM helpers shared by the stage and the article loader

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent, Touch, TouchEvent};

pub fn document() -> Result<Document, JsValue> {
    crate::window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))
}

/// Milliseconds on the page clock, 0 when the Performance API is missing
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

pub fn viewport() -> Result<motion_core::Viewport, JsValue> {
    let window = crate::window()?;
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(motion_core::Viewport::new(width as f32, height as f32))
}

pub fn create_html(tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let element = document()?.create_element(tag)?;
    element.set_class_name(class);
    element.dyn_into::<HtmlElement>().map_err(JsValue::from)
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        log::warn!("failed to set {}: {:?}", property, e);
    }
}

pub fn mouse_position(event: &web_sys::Event) -> Option<glam::Vec2> {
    let event = event.dyn_ref::<MouseEvent>()?;
    Some(glam::Vec2::new(event.client_x() as f32, event.client_y() as f32))
}

/// Touches that changed in this event
pub fn changed_touches(event: &web_sys::Event) -> Vec<Touch> {
    let Some(event) = event.dyn_ref::<TouchEvent>() else {
        return Vec::new();
    };
    let list = event.changed_touches();
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

pub fn touch_position(touch: &Touch) -> glam::Vec2 {
    glam::Vec2::new(touch.client_x() as f32, touch.client_y() as f32)
}
