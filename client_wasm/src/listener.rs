use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

/// DOM event listener, removed from its target when dropped
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    capture: bool,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Plain listener; the browser may treat it as passive
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        Self::attach(target, event, false, None, callback)
    }

    /// Listener allowed to call `preventDefault` (touchmove, wheel)
    pub fn active(
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        Self::attach(target, event, false, Some(false), callback)
    }

    /// Capture-phase listener, runs before handlers on descendants
    pub fn capture(
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        Self::attach(target, event, true, None, callback)
    }

    fn attach(
        target: &EventTarget,
        event: &'static str,
        capture: bool,
        passive: Option<bool>,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);

        let options = AddEventListenerOptions::new();
        options.set_capture(capture);
        if let Some(passive) = passive {
            options.set_passive(passive);
        }
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;

        Ok(Self {
            target: target.clone(),
            event,
            capture,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            self.event,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}
