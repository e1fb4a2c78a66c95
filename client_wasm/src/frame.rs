//! Browser timers owned by Rust values
//!
//! Both types cancel their callback when dropped, so tearing down the owner
//! is enough to stop all further work.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// requestAnimationFrame loop that reschedules itself until dropped
pub struct FrameLoop {
    handle: Rc<Cell<Option<i32>>>,
    holder: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let window = crate::window()?;
        let handle = Rc::new(Cell::new(None));
        let holder: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let handle_for_cb = Rc::clone(&handle);
        let holder_for_cb = Rc::downgrade(&holder);
        let cb = Closure::wrap(Box::new(move |timestamp: f64| {
            on_frame(timestamp);

            let Some(holder) = holder_for_cb.upgrade() else {
                return;
            };
            let holder = holder.borrow();
            let Some(cb) = holder.as_ref() else {
                return;
            };
            match web_sys::window().map(|w| w.request_animation_frame(cb.as_ref().unchecked_ref())) {
                Some(Ok(id)) => handle_for_cb.set(Some(id)),
                _ => {
                    handle_for_cb.set(None);
                    log::error!("requestAnimationFrame failed, frame loop stopped");
                }
            }
        }) as Box<dyn FnMut(f64)>);

        let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        handle.set(Some(id));
        *holder.borrow_mut() = Some(cb);

        Ok(Self { handle, holder })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        self.holder.borrow_mut().take();
    }
}

/// One-shot setTimeout, cleared if dropped before it fires
pub struct Timeout {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new(delay_ms: i32, callback: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        let id = crate::window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms,
        )?;
        Ok(Self {
            id,
            _callback: callback,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.id);
        }
    }
}
