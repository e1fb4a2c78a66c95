//! Page-wide effect host
//!
//! One `Stage` owns every effect instance on the page and drives them all
//! from a single animation frame loop. JS addresses instances by the id
//! returned when they were added.

use crate::dom;
use crate::frame::{FrameLoop, Timeout};
use crate::listener::Listener;
use hecs::Entity;
use motion_core::{
    shade, CardOptions, ClickVerdict, Config, MotionError, Pointer, Scene, Transform,
    TransformSink,
};
use std::cell::{RefCell, RefMut};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, HtmlImageElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewKind {
    Mascot,
    Card,
    Particle,
}

/// DOM side of one instance
struct View {
    element: HtmlElement,
    kind: ViewKind,
    _listeners: Vec<Listener>,
}

impl View {
    /// Undo what the stage did to the page. Cards belong to the page, so only
    /// their transform is cleared; everything else was created here.
    fn detach(&self) {
        match self.kind {
            ViewKind::Card => {
                let _ = self.element.style().remove_property("transform");
            }
            ViewKind::Mascot | ViewKind::Particle => self.element.remove(),
        }
    }
}

type TimerSlot = Rc<RefCell<Option<Timeout>>>;

struct StageInner {
    scene: Scene,
    views: HashMap<Entity, View>,
}

impl StageInner {
    fn frame(&mut self, now_ms: f64) {
        match dom::viewport() {
            Ok(viewport) => self.scene.set_viewport(viewport),
            Err(e) => log::warn!("viewport unavailable, keeping last: {:?}", e),
        }

        for (entity, view) in &self.views {
            if view.kind == ViewKind::Mascot {
                let rect = view.element.get_bounding_client_rect();
                let _ = self
                    .scene
                    .measure_sprite(*entity, rect.width() as f32, rect.height() as f32);
            }
        }

        self.scene.tick(now_ms);
        self.scene.present(&mut DomSink { views: &self.views });
    }
}

/// Writes transforms straight into element styles
struct DomSink<'a> {
    views: &'a HashMap<Entity, View>,
}

impl TransformSink for DomSink<'_> {
    fn write(&mut self, instance: Entity, transform: Transform) {
        let Some(view) = self.views.get(&instance) else {
            return;
        };
        dom::set_style(&view.element, "transform", &transform.css());
        if view.kind == ViewKind::Particle {
            dom::set_style(&view.element, "opacity", &format!("{:.3}", transform.opacity));
        }
    }
}

/// Run `f` against the scene if the stage is still alive and not mid-update.
/// Errors mean the instance went away under a pending event and are dropped.
fn with_scene<R>(
    stage: &Weak<RefCell<StageInner>>,
    f: impl FnOnce(&mut Scene) -> Result<R, MotionError>,
) -> Option<R> {
    let stage = stage.upgrade()?;
    let Ok(mut inner) = stage.try_borrow_mut() else {
        log::warn!("stage busy, event dropped");
        return None;
    };
    let result = f(&mut inner.scene);
    result.map_err(|e| log::debug!("event ignored: {}", e)).ok()
}

fn instance_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

fn instance(id: u64) -> Result<Entity, JsValue> {
    Entity::from_bits(id).ok_or_else(|| JsValue::from_str(&format!("Invalid instance id {}", id)))
}

fn to_js(e: MotionError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn apply_shade(hero: &HtmlElement, overlay: &HtmlElement, config: &Config) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let scroll = window.scroll_y().unwrap_or(0.0) as f32;
    let height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0) as f32;

    let shading = shade(scroll, height, config);
    dom::set_style(
        hero,
        "transform",
        &format!("translate3d(0, {:.2}px, 0)", shading.hero_offset),
    );
    dom::set_style(overlay, "opacity", &format!("{:.3}", shading.overlay_opacity));
}

#[wasm_bindgen]
pub struct Stage {
    inner: Rc<RefCell<StageInner>>,
    frames: Option<FrameLoop>,
    parallax: Vec<Listener>,
}

#[wasm_bindgen]
impl Stage {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Stage, JsValue> {
        let seed = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
        let scene = Scene::new(seed, dom::viewport()?);
        let inner = Rc::new(RefCell::new(StageInner {
            scene,
            views: HashMap::new(),
        }));

        let weak = Rc::downgrade(&inner);
        let frames = FrameLoop::start(move |timestamp| {
            let Some(stage) = weak.upgrade() else {
                return;
            };
            let Ok(mut inner) = stage.try_borrow_mut() else {
                return;
            };
            inner.frame(timestamp);
        })?;

        log::info!("stage started (seed {})", seed);
        Ok(Stage {
            inner,
            frames: Some(frames),
            parallax: Vec::new(),
        })
    }

    /// Append a bouncing image to `parent`
    pub fn add_mascot(&self, parent: &Element, src: &str) -> Result<u64, JsValue> {
        let img = dom::create_html("img", "mascot")?;
        let image = img
            .clone()
            .dyn_into::<HtmlImageElement>()
            .map_err(JsValue::from)?;
        image.set_alt("");

        let entity = self.inner()?.scene.spawn_sprite(None);
        let weak = self.weak();
        let hidden = img.clone();
        let on_error = Listener::new(&img, "error", move |_| {
            if with_scene(&weak, |scene| scene.fail_sprite(entity)).is_some() {
                dom::set_style(&hidden, "display", "none");
            }
        })?;

        image.set_src(src);
        parent.append_child(&img)?;
        self.inner()?.views.insert(
            entity,
            View {
                element: img,
                kind: ViewKind::Mascot,
                _listeners: vec![on_error],
            },
        );
        Ok(instance_id(entity))
    }

    /// Make an existing element a floating, draggable card
    pub fn add_card(
        &self,
        element: &HtmlElement,
        return_speed: Option<f32>,
        float_intensity: Option<f32>,
    ) -> Result<u64, JsValue> {
        let defaults = CardOptions::default();
        let options = CardOptions {
            return_speed: return_speed.unwrap_or(defaults.return_speed),
            float_intensity: float_intensity.unwrap_or(defaults.float_intensity),
        };

        let entity = self.inner()?.scene.spawn_card(options);
        let listeners = match self.card_listeners(element, entity) {
            Ok(listeners) => listeners,
            Err(e) => {
                let _ = self.inner()?.scene.despawn(entity);
                return Err(e);
            }
        };

        self.inner()?.views.insert(
            entity,
            View {
                element: element.clone(),
                kind: ViewKind::Card,
                _listeners: listeners,
            },
        );
        Ok(instance_id(entity))
    }

    /// Fill `container` with `count` drifting particles
    pub fn add_particles(&self, container: &Element, count: u32) -> Result<Vec<u64>, JsValue> {
        let mut inner = self.inner()?;
        let entities = inner.scene.spawn_particles(count as usize);

        let mut ids = Vec::with_capacity(entities.len());
        for entity in entities {
            let particle = inner.scene.particle(entity).map_err(to_js)?;
            let dot = dom::create_html("div", "particle")?;
            let size = format!("{:.1}px", particle.size);
            dom::set_style(&dot, "width", &size);
            dom::set_style(&dot, "height", &size);
            container.append_child(&dot)?;

            inner.views.insert(
                entity,
                View {
                    element: dot,
                    kind: ViewKind::Particle,
                    _listeners: Vec::new(),
                },
            );
            ids.push(instance_id(entity));
        }
        Ok(ids)
    }

    /// Drive the hero parallax and darkening overlay from page scroll
    pub fn attach_parallax(&mut self, hero: HtmlElement, overlay: HtmlElement) -> Result<(), JsValue> {
        let window = crate::window()?;
        let config = self.inner()?.scene.config.clone();
        apply_shade(&hero, &overlay, &config);

        let mut listeners = Vec::with_capacity(2);
        for event in ["scroll", "resize"] {
            let (hero, overlay, config) = (hero.clone(), overlay.clone(), config.clone());
            listeners.push(Listener::new(&window, event, move |_| {
                apply_shade(&hero, &overlay, &config)
            })?);
        }
        self.parallax = listeners;
        Ok(())
    }

    /// Tear down one instance; it gets no further updates
    pub fn remove(&self, id: u64) -> Result<(), JsValue> {
        let entity = instance(id)?;
        let mut inner = self.inner()?;
        inner.scene.despawn(entity).map_err(to_js)?;
        if let Some(view) = inner.views.remove(&entity) {
            view.detach();
        }
        Ok(())
    }

    /// Number of live instances
    pub fn instance_count(&self) -> Result<usize, JsValue> {
        Ok(self.inner()?.views.len())
    }

    /// Stop the frame loop and tear down every instance
    pub fn destroy(&mut self) {
        self.frames.take();
        self.parallax.clear();
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            for (_, view) in inner.views.drain() {
                view.detach();
            }
            inner.scene.world.clear();
        }
        log::info!("stage destroyed");
    }
}

impl Stage {
    fn inner(&self) -> Result<RefMut<'_, StageInner>, JsValue> {
        self.inner
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("Stage is busy"))
    }

    fn weak(&self) -> Weak<RefCell<StageInner>> {
        Rc::downgrade(&self.inner)
    }

    fn card_listeners(&self, element: &HtmlElement, entity: Entity) -> Result<Vec<Listener>, JsValue> {
        let document = dom::document()?;
        let long_press_ms = self.inner()?.scene.config.long_press_ms;
        let timer: TimerSlot = Rc::new(RefCell::new(None));
        let mut listeners = Vec::with_capacity(7);

        // Mouse: press on the card, track on the document so fast drags don't slip off
        let weak = self.weak();
        listeners.push(Listener::active(element, "mousedown", move |event| {
            let Some(pos) = dom::mouse_position(&event) else {
                return;
            };
            if let Some(effect) = with_scene(&weak, |scene| scene.mouse_down(entity, pos)) {
                if effect.prevent_default {
                    event.prevent_default();
                }
            }
        })?);

        let weak = self.weak();
        listeners.push(Listener::new(&document, "mousemove", move |event| {
            if let Some(pos) = dom::mouse_position(&event) {
                with_scene(&weak, |scene| scene.pointer_move(entity, Pointer::Mouse, pos));
            }
        })?);

        let weak = self.weak();
        listeners.push(Listener::new(&document, "mouseup", move |_| {
            with_scene(&weak, |scene| scene.pointer_up(entity, Pointer::Mouse));
        })?);

        // Touch: arm on press, drag only once the long press fires
        let weak = self.weak();
        let slot = Rc::clone(&timer);
        listeners.push(Listener::new(element, "touchstart", move |event| {
            for touch in dom::changed_touches(&event) {
                let started = dom::now_ms();
                let pos = dom::touch_position(&touch);
                let Some(effect) = with_scene(&weak, |scene| {
                    scene.touch_start(entity, touch.identifier(), pos, started)
                }) else {
                    continue;
                };
                if !effect.schedule_long_press {
                    continue;
                }

                let weak = weak.clone();
                let fire = move || {
                    // timestamps are coarsened; the timer itself guarantees the delay
                    let now = dom::now_ms().max(started + long_press_ms);
                    with_scene(&weak, |scene| scene.long_press_elapsed(entity, now));
                };
                match Timeout::new(long_press_ms.ceil() as i32, fire) {
                    Ok(timeout) => *slot.borrow_mut() = Some(timeout),
                    Err(e) => log::warn!("long press timer failed: {:?}", e),
                }
            }
        })?);

        let weak = self.weak();
        let slot = Rc::clone(&timer);
        listeners.push(Listener::active(element, "touchmove", move |event| {
            for touch in dom::changed_touches(&event) {
                let pointer = Pointer::Touch(touch.identifier());
                let pos = dom::touch_position(&touch);
                let Some(effect) = with_scene(&weak, |scene| scene.pointer_move(entity, pointer, pos))
                else {
                    continue;
                };
                if effect.prevent_default {
                    event.prevent_default();
                }
                if effect.cancel_long_press {
                    slot.borrow_mut().take();
                }
            }
        })?);

        listeners.push(self.touch_release(element, "touchend", entity, &timer, false)?);
        listeners.push(self.touch_release(element, "touchcancel", entity, &timer, true)?);

        // Swallow the click that ends a drag, before any handler inside the card sees it
        let weak = self.weak();
        listeners.push(Listener::capture(element, "click", move |event| {
            if with_scene(&weak, |scene| scene.click(entity)) == Some(ClickVerdict::Suppress) {
                event.prevent_default();
                event.stop_propagation();
            }
        })?);

        Ok(listeners)
    }

    fn touch_release(
        &self,
        element: &HtmlElement,
        event: &'static str,
        entity: Entity,
        timer: &TimerSlot,
        cancelled: bool,
    ) -> Result<Listener, JsValue> {
        let weak = self.weak();
        let slot = Rc::clone(timer);
        Listener::new(element, event, move |event: Event| {
            for touch in dom::changed_touches(&event) {
                let pointer = Pointer::Touch(touch.identifier());
                let effect = with_scene(&weak, |scene| {
                    if cancelled {
                        scene.pointer_cancel(entity, pointer)
                    } else {
                        scene.pointer_up(entity, pointer)
                    }
                });
                if effect.is_some_and(|e| e.cancel_long_press) {
                    slot.borrow_mut().take();
                }
            }
        })
    }
}
