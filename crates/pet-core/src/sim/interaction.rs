// sim/interaction.rs
//
// Interaction controller: a small timed state machine (Idle / Feeding /
// Petting / Sleeping) that produces the single target every particle
// steers toward.
//
// Interactions are mutually exclusive. A trigger is accepted only from
// Idle; the active interaction returns to Idle once `now - start` exceeds
// its duration. All trajectories are deterministic in elapsed time and
// canvas size.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use crate::api::config::InteractionTuning;
use crate::api::types::{Canvas, InteractionKind};
use crate::core::math::lerp_vec2;

use super::smoother::TargetSmoother;

/// Rise cycle of a sleep glyph in milliseconds.
const GLYPH_CYCLE: f32 = 2400.0;
const GLYPH_COUNT: usize = 3;
const GLYPH_RISE: f32 = 60.0;

/// Active interaction, with the timestamp (ms) it started at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    Idle,
    Feeding { start: f64 },
    Petting { start: f64 },
    /// `anchor` eases toward the sleep corner; curl and pulse ride on top.
    Sleeping { start: f64, anchor: Vec2 },
}

impl Interaction {
    pub fn kind(&self) -> Option<InteractionKind> {
        match self {
            Interaction::Idle => None,
            Interaction::Feeding { .. } => Some(InteractionKind::Feed),
            Interaction::Petting { .. } => Some(InteractionKind::Pet),
            Interaction::Sleeping { .. } => Some(InteractionKind::Sleep),
        }
    }

    fn start(&self) -> Option<f64> {
        match *self {
            Interaction::Idle => None,
            Interaction::Feeding { start }
            | Interaction::Petting { start }
            | Interaction::Sleeping { start, .. } => Some(start),
        }
    }
}

/// Decorative "z" rising above the sleeping creature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepGlyph {
    pub position: Vec2,
    pub size: f32,
    /// Opacity in [0, 1].
    pub alpha: f32,
}

/// Owns the interaction state and the idle pointer smoother.
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: Interaction,
    tuning: InteractionTuning,
    smoother: TargetSmoother,
    last_target: Vec2,
}

impl InteractionController {
    pub fn new(tuning: InteractionTuning, canvas: Canvas) -> Self {
        let center = canvas.center();
        Self {
            state: Interaction::Idle,
            smoother: TargetSmoother::new(center, tuning.idle_smoothing),
            tuning,
            last_target: center,
        }
    }

    pub fn state(&self) -> Interaction {
        self.state
    }

    pub fn active(&self) -> Option<InteractionKind> {
        self.state.kind()
    }

    pub fn is_active(&self, kind: InteractionKind) -> bool {
        self.active() == Some(kind)
    }

    pub fn smoother(&self) -> &TargetSmoother {
        &self.smoother
    }

    /// Target produced by the most recent `target` call.
    pub fn last_target(&self) -> Vec2 {
        self.last_target
    }

    pub fn duration(&self, kind: InteractionKind) -> f32 {
        match kind {
            InteractionKind::Feed => self.tuning.feed_duration,
            InteractionKind::Pet => self.tuning.pet_duration,
            InteractionKind::Sleep => self.tuning.sleep_duration,
        }
    }

    /// Try to start `kind` at `now`. Rejected (returns false, no state
    /// change) while any interaction is active.
    pub fn try_start(&mut self, kind: InteractionKind, now: f64, canvas: Canvas) -> bool {
        if let Some(active) = self.active() {
            log::debug!("interaction: {:?} rejected, {:?} active", kind, active);
            return false;
        }
        self.state = match kind {
            InteractionKind::Feed => Interaction::Feeding { start: now },
            InteractionKind::Pet => {
                self.smoother.reset(canvas.center());
                Interaction::Petting { start: now }
            }
            InteractionKind::Sleep => Interaction::Sleeping {
                start: now,
                anchor: self.last_target,
            },
        };
        log::info!("interaction: {:?} started at {:.0}ms", kind, now);
        true
    }

    /// Move the start of the active interaction to `now`. Idle is untouched.
    pub fn restamp(&mut self, now: f64) {
        match &mut self.state {
            Interaction::Idle => {}
            Interaction::Feeding { start }
            | Interaction::Petting { start }
            | Interaction::Sleeping { start, .. } => *start = now,
        }
    }

    /// Return to Idle if the active interaction has run past its duration.
    /// Returns the interaction that just ended.
    pub fn expire(&mut self, now: f64) -> Option<InteractionKind> {
        let kind = self.active()?;
        let start = self.state.start()?;
        if now - start > self.duration(kind) as f64 {
            self.state = Interaction::Idle;
            self.smoother.reseed(self.last_target);
            log::info!("interaction: {:?} ended at {:.0}ms", kind, now);
            Some(kind)
        } else {
            None
        }
    }

    /// Compute this frame's target. `pointer` is the raw mouse/touch
    /// position, `None` when absent.
    pub fn target(&mut self, now: f64, canvas: Canvas, pointer: Option<Vec2>) -> Vec2 {
        self.smoother.observe(pointer);
        let tuning = &self.tuning;
        let center = canvas.center();

        let target = match &mut self.state {
            Interaction::Sleeping { start, anchor } => {
                let elapsed = elapsed_ms(now, *start);
                let corner = canvas.fraction(tuning.sleep_corner.0, tuning.sleep_corner.1);
                *anchor = lerp_vec2(*anchor, corner, tuning.sleep_easing);

                let curl = Vec2::from_angle(phase(elapsed, tuning.sleep_curl_period))
                    * tuning.sleep_curl_radius;
                let pulse = Vec2::new(
                    0.0,
                    phase(elapsed, tuning.sleep_pulse_period).sin() * tuning.sleep_pulse_amplitude,
                );
                *anchor + curl + pulse
            }
            Interaction::Petting { start } => {
                let elapsed = elapsed_ms(now, *start);
                let (ax, ay) = tuning.pet_amplitude;
                let (fx, fy) = tuning.pet_frequency;
                center + Vec2::new((elapsed * fx).sin() * ax, (elapsed * fy).cos() * ay)
            }
            Interaction::Feeding { start } => {
                let elapsed = elapsed_ms(now, *start);
                let progress = if tuning.feed_duration > 0.0 {
                    (elapsed / tuning.feed_duration).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                let radius_x = canvas.width * tuning.feed_radius_fraction;
                let radius_y = radius_x / 2.0;
                let (sin, cos) = (PI * progress).sin_cos();
                center + Vec2::new(cos * radius_x, sin * radius_y)
            }
            Interaction::Idle => self.smoother.step(),
        };

        self.last_target = target;
        target
    }

    /// Rising glyphs above the target while sleeping; empty otherwise.
    pub fn sleep_glyphs(&self, now: f64) -> Vec<SleepGlyph> {
        let Interaction::Sleeping { start, .. } = self.state else {
            return Vec::new();
        };
        let elapsed = elapsed_ms(now, start);
        (0..GLYPH_COUNT)
            .map(|i| {
                let stagger = i as f32 / GLYPH_COUNT as f32;
                let rise = (elapsed / GLYPH_CYCLE + stagger).fract();
                SleepGlyph {
                    position: self.last_target
                        + Vec2::new(20.0 + i as f32 * 12.0, -30.0 - rise * GLYPH_RISE),
                    size: 14.0 + i as f32 * 4.0,
                    alpha: 1.0 - rise,
                }
            })
            .collect()
    }
}

fn elapsed_ms(now: f64, start: f64) -> f32 {
    (now - start).max(0.0) as f32
}

/// Angle after `elapsed` ms of a cycle lasting `period` ms.
fn phase(elapsed: f32, period: f32) -> f32 {
    if period > 0.0 {
        TAU * elapsed / period
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(800.0, 600.0)
    }

    fn controller() -> InteractionController {
        InteractionController::new(InteractionTuning::default(), canvas())
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 0.01
    }

    #[test]
    fn starts_idle_at_center() {
        let c = controller();
        assert_eq!(c.state(), Interaction::Idle);
        assert_eq!(c.last_target(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn idle_smooths_pointer() {
        let mut c = controller();
        let t = c.target(0.0, canvas(), Some(Vec2::new(500.0, 300.0)));
        assert!(close(t, Vec2::new(410.0, 300.0)));
        let t = c.target(16.0, canvas(), None);
        assert!(close(t, Vec2::new(419.0, 300.0)));
    }

    #[test]
    fn feeding_arc_endpoints() {
        let mut c = controller();
        assert!(c.try_start(InteractionKind::Feed, 1000.0, canvas()));
        let rx = 800.0 * 0.2;
        let ry = rx / 2.0;

        let start = c.target(1000.0, canvas(), None);
        assert!(close(start, Vec2::new(400.0 + rx, 300.0)));

        let mid = c.target(2000.0, canvas(), None);
        assert!(close(mid, Vec2::new(400.0, 300.0 + ry)), "mid was {:?}", mid);

        let end = c.target(3000.0, canvas(), None);
        assert!(close(end, Vec2::new(400.0 - rx, 300.0)));
    }

    #[test]
    fn petting_recenters_and_wiggles_near_center() {
        let mut c = controller();
        c.target(0.0, canvas(), Some(Vec2::new(10.0, 10.0)));
        assert!(c.try_start(InteractionKind::Pet, 0.0, canvas()));
        assert_eq!(c.smoother().current(), Vec2::new(400.0, 300.0));
        assert_eq!(c.smoother().raw(), Vec2::new(400.0, 300.0));

        for ms in (0..3000).step_by(50) {
            let t = c.target(ms as f64, canvas(), None);
            assert!((t.x - 400.0).abs() <= 40.0 + 0.01);
            assert!((t.y - 300.0).abs() <= 25.0 + 0.01);
        }
    }

    #[test]
    fn sleeping_drifts_toward_corner() {
        let mut c = controller();
        assert!(c.try_start(InteractionKind::Sleep, 0.0, canvas()));
        let corner = Vec2::new(120.0, 510.0);
        let first = c.target(16.0, canvas(), None);
        let mut last = first;
        for frame in 2..300 {
            last = c.target(frame as f64 * 16.0, canvas(), None);
        }
        let tuning = InteractionTuning::default();
        let wobble = tuning.sleep_curl_radius + tuning.sleep_pulse_amplitude;
        assert!(last.distance(corner) < first.distance(corner));
        assert!(last.distance(corner) <= wobble + 1.0, "ended at {:?}", last);
    }

    #[test]
    fn interactions_are_mutually_exclusive() {
        let mut c = controller();
        assert!(c.try_start(InteractionKind::Feed, 0.0, canvas()));
        assert!(!c.try_start(InteractionKind::Pet, 10.0, canvas()));
        assert!(!c.try_start(InteractionKind::Sleep, 10.0, canvas()));
        assert!(!c.try_start(InteractionKind::Feed, 10.0, canvas()));
        assert!(c.is_active(InteractionKind::Feed));
    }

    #[test]
    fn petting_rejects_other_triggers_until_timeout() {
        let mut c = controller();
        assert!(c.try_start(InteractionKind::Pet, 0.0, canvas()));
        assert!(!c.try_start(InteractionKind::Sleep, 100.0, canvas()));
        assert!(!c.try_start(InteractionKind::Feed, 100.0, canvas()));
        assert_eq!(c.expire(3000.0), None);
        assert!(!c.try_start(InteractionKind::Sleep, 3000.0, canvas()));
        assert_eq!(c.expire(3001.0), Some(InteractionKind::Pet));
        assert!(c.try_start(InteractionKind::Sleep, 3001.0, canvas()));
    }

    #[test]
    fn sleeping_rejects_other_triggers() {
        let mut c = controller();
        assert!(c.try_start(InteractionKind::Sleep, 0.0, canvas()));
        assert!(!c.try_start(InteractionKind::Pet, 10.0, canvas()));
        assert!(!c.try_start(InteractionKind::Feed, 10.0, canvas()));
        assert!(c.is_active(InteractionKind::Sleep));
        assert_eq!(c.expire(6001.0), Some(InteractionKind::Sleep));
        assert!(c.try_start(InteractionKind::Pet, 6001.0, canvas()));
    }

    #[test]
    fn restamp_moves_start() {
        let mut c = controller();
        c.restamp(500.0);
        assert_eq!(c.state(), Interaction::Idle);
        c.try_start(InteractionKind::Feed, 0.0, canvas());
        c.restamp(10_000.0);
        assert_eq!(c.state(), Interaction::Feeding { start: 10_000.0 });
        assert_eq!(c.expire(11_000.0), None);
    }

    #[test]
    fn expires_only_after_duration() {
        let mut c = controller();
        assert!(c.try_start(InteractionKind::Feed, 100.0, canvas()));
        assert_eq!(c.expire(2100.0), None);
        assert_eq!(c.expire(2100.5), Some(InteractionKind::Feed));
        assert_eq!(c.state(), Interaction::Idle);
        assert_eq!(c.expire(5000.0), None);
    }

    #[test]
    fn sleep_accepted_after_feeding_times_out() {
        let mut c = controller();
        assert!(c.try_start(InteractionKind::Feed, 0.0, canvas()));
        assert!(!c.try_start(InteractionKind::Sleep, 500.0, canvas()));
        c.expire(2500.0);
        assert!(c.try_start(InteractionKind::Sleep, 2500.0, canvas()));
    }

    #[test]
    fn idle_glides_back_from_last_interaction_target() {
        let mut c = controller();
        assert!(c.try_start(InteractionKind::Feed, 0.0, canvas()));
        let last = c.target(1500.0, canvas(), Some(Vec2::new(0.0, 0.0)));
        c.expire(2500.0);
        let next = c.target(2516.0, canvas(), None);
        assert!(close(next, lerp_vec2(last, Vec2::ZERO, 0.1)));
    }

    #[test]
    fn sleep_glyphs_only_while_sleeping() {
        let mut c = controller();
        assert!(c.sleep_glyphs(0.0).is_empty());
        c.try_start(InteractionKind::Sleep, 0.0, canvas());
        c.target(100.0, canvas(), None);
        let glyphs = c.sleep_glyphs(100.0);
        assert_eq!(glyphs.len(), 3);
        for g in &glyphs {
            assert!(g.position.y < c.last_target().y);
            assert!((0.0..=1.0).contains(&g.alpha));
        }
        assert_ne!(glyphs[0].position.y, glyphs[1].position.y);
    }

    #[test]
    fn zero_duration_feeding_jumps_to_arc_end() {
        let tuning = InteractionTuning {
            feed_duration: 0.0,
            ..InteractionTuning::default()
        };
        let mut c = InteractionController::new(tuning, canvas());
        c.try_start(InteractionKind::Feed, 0.0, canvas());
        let t = c.target(0.0, canvas(), None);
        assert!(close(t, Vec2::new(400.0 - 160.0, 300.0)));
    }
}
