//! Browser client for the portfolio page
//!
//! Hosts the motion effects from `motion_core` on real DOM elements and
//! loads the article list through the worker's proxy.
//!
//! Note: only built for the wasm32 target

#![cfg(target_arch = "wasm32")]

mod articles;
mod dom;
mod frame;
mod listener;
mod stage;

pub use articles::load_articles;
pub use stage::Stage;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("client_wasm starting");
    Ok(())
}

pub(crate) fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window"))
}
