use pet_core::{
    CircleBuffer, InputEvent, InputQueue, PetEvent, PointerTracker, SimConfig,
    SimulationState,
};

/// Floats per sleep glyph: x, y, size, alpha.
pub const GLYPH_FLOATS: usize = 4;

/// Frame driver that wires page input into the simulation.
///
/// Lives in a `thread_local!` in `lib.rs` and is reached through free
/// `#[wasm_bindgen]` functions. Output buffers are read by JS through raw
/// pointers into WASM memory after every `tick`.
pub struct PetRunner {
    state: SimulationState,
    input: InputQueue,
    pointer: PointerTracker,
    circles: CircleBuffer,
    /// Events from the last tick, including triggers handled before it.
    event_buffer: Vec<PetEvent>,
    glyph_buffer: Vec<f32>,
}

impl PetRunner {
    pub fn new(config: SimConfig) -> Self {
        let circles = CircleBuffer::with_capacity(config.particle_count);
        Self {
            state: SimulationState::setup(config),
            input: InputQueue::new(),
            pointer: PointerTracker::new(),
            circles,
            event_buffer: Vec::with_capacity(8),
            glyph_buffer: Vec::with_capacity(16),
        }
    }

    /// Build a runner from a JSON config, falling back to defaults when the
    /// JSON does not parse. The canvas is always the host's `width` x `height`.
    pub fn from_json(json: &str, width: f32, height: f32) -> Self {
        let mut config = match SimConfig::from_json(json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("pet-web: bad config ({}), using defaults", err);
                SimConfig::default()
            }
        };
        config.width = width;
        config.height = height;
        Self::new(config)
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame at timestamp `now` (ms): apply queued input, advance
    /// the simulation and refresh the output buffers.
    pub fn tick(&mut self, now: f64) {
        self.event_buffer.clear();

        for event in self.input.drain() {
            match event {
                InputEvent::Interaction(kind) => {
                    // Pressed since the last frame; started at this frame's time.
                    self.state.trigger_at(kind, now);
                    // Each trigger raises exactly one event.
                    if let Some(event) = self.state.events().last() {
                        self.event_buffer.push(*event);
                    }
                }
                InputEvent::Resize { width, height } => self.state.resize(width, height),
                _ => self.pointer.apply(&event),
            }
        }

        self.circles.clear();
        self.state
            .advance_frame(self.pointer.last_known(), now, &mut self.circles);
        self.event_buffer.extend_from_slice(self.state.events());

        self.glyph_buffer.clear();
        for glyph in self.state.sleep_glyphs() {
            self.glyph_buffer
                .extend_from_slice(&[glyph.position.x, glyph.position.y, glyph.size, glyph.alpha]);
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    // ---- Pointer accessors for JS reads ----

    pub fn circles_ptr(&self) -> *const f32 {
        self.circles.instances_ptr()
    }

    pub fn circle_count(&self) -> u32 {
        self.circles.instance_count() as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.event_buffer.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.event_buffer.len() as u32
    }

    pub fn glyphs_ptr(&self) -> *const f32 {
        self.glyph_buffer.as_ptr()
    }

    pub fn glyph_count(&self) -> u32 {
        (self.glyph_buffer.len() / GLYPH_FLOATS) as u32
    }

    pub fn events(&self) -> &[PetEvent] {
        &self.event_buffer
    }

    pub fn glyphs(&self) -> &[f32] {
        &self.glyph_buffer
    }

    pub fn trail_alpha(&self) -> f32 {
        self.state.config().trail_alpha
    }

    /// Active interaction id (0 feed, 1 pet, 2 sleep), or -1 when idle.
    pub fn active_interaction(&self) -> i32 {
        self.state
            .active_interaction()
            .map_or(-1, |kind| kind.id() as i32)
    }

    pub fn canvas_width(&self) -> f32 {
        self.state.canvas().width
    }

    pub fn canvas_height(&self) -> f32 {
        self.state.canvas().height
    }

    pub fn frame_count(&self) -> u32 {
        self.state.frame_count() as u32
    }
}
