//! Browser bridge for the pet simulation.
//!
//! The page calls `pet_init` once, feeds pointer/touch/button input through
//! the `pet_*` functions, calls `pet_tick` from `requestAnimationFrame`, and
//! then reads circles, events and sleep glyphs straight out of WASM memory.

pub mod runner;

pub use runner::{PetRunner, GLYPH_FLOATS};

use std::cell::RefCell;

use pet_core::{InputEvent, InteractionKind, SimConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<PetRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut PetRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Pet not initialized. Call pet_init() first.");
        f(runner)
    })
}

fn install(runner: PetRunner) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("pet-web: initialized");
}

#[wasm_bindgen]
pub fn pet_init(width: f32, height: f32, particle_count: u32) {
    install(PetRunner::new(SimConfig::with_canvas(
        width,
        height,
        particle_count as usize,
    )));
}

/// Initialize from a JSON `SimConfig`; unparseable JSON falls back to defaults.
#[wasm_bindgen]
pub fn pet_init_with_config(json: &str, width: f32, height: f32) {
    install(PetRunner::from_json(json, width, height));
}

#[wasm_bindgen]
pub fn pet_tick(now: f64) {
    with_runner(|r| r.tick(now));
}

/// Tick stamped with the wall clock, for hosts without a frame timestamp.
#[wasm_bindgen]
pub fn pet_tick_now() {
    let now = js_sys::Date::now();
    with_runner(|r| r.tick(now));
}

/// One-call frame: record the pointer (or its absence) and tick.
#[wasm_bindgen]
pub fn pet_advance_frame(x: f32, y: f32, has_pointer: bool, now: f64) {
    with_runner(|r| {
        if has_pointer {
            r.push_input(InputEvent::PointerMove { x, y });
        } else {
            r.push_input(InputEvent::PointerLeave);
        }
        r.tick(now);
    });
}

#[wasm_bindgen]
pub fn pet_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

// ---- Pointer & touch ----

#[wasm_bindgen]
pub fn pet_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn pet_pointer_leave() {
    with_runner(|r| r.push_input(InputEvent::PointerLeave));
}

#[wasm_bindgen]
pub fn pet_touch_start(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::TouchStart { x, y }));
}

#[wasm_bindgen]
pub fn pet_touch_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::TouchMove { x, y }));
}

#[wasm_bindgen]
pub fn pet_touch_end() {
    with_runner(|r| r.push_input(InputEvent::TouchEnd));
}

// ---- Interaction buttons ----

#[wasm_bindgen]
pub fn trigger_feed() {
    with_runner(|r| r.push_input(InputEvent::Interaction(InteractionKind::Feed)));
}

#[wasm_bindgen]
pub fn trigger_pet() {
    with_runner(|r| r.push_input(InputEvent::Interaction(InteractionKind::Pet)));
}

#[wasm_bindgen]
pub fn trigger_sleep() {
    with_runner(|r| r.push_input(InputEvent::Interaction(InteractionKind::Sleep)));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_circles_ptr() -> *const f32 {
    with_runner(|r| r.circles_ptr())
}

#[wasm_bindgen]
pub fn get_circle_count() -> u32 {
    with_runner(|r| r.circle_count())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

#[wasm_bindgen]
pub fn get_glyphs_ptr() -> *const f32 {
    with_runner(|r| r.glyphs_ptr())
}

#[wasm_bindgen]
pub fn get_glyph_count() -> u32 {
    with_runner(|r| r.glyph_count())
}

#[wasm_bindgen]
pub fn get_trail_alpha() -> f32 {
    with_runner(|r| r.trail_alpha())
}

#[wasm_bindgen]
pub fn get_active_interaction() -> i32 {
    with_runner(|r| r.active_interaction())
}

#[wasm_bindgen]
pub fn get_canvas_width() -> f32 {
    with_runner(|r| r.canvas_width())
}

#[wasm_bindgen]
pub fn get_canvas_height() -> f32 {
    with_runner(|r| r.canvas_height())
}

#[wasm_bindgen]
pub fn get_frame_count() -> u32 {
    with_runner(|r| r.frame_count())
}
