//! Long-press vs click disambiguation for card presses.
//!
//! One interaction is press → (moves) → release. It ends in exactly one of
//! `Click`, `LongPress`, or nothing:
//!
//! - release before the delay, within tolerance → `Click`
//! - delay elapses while still within tolerance → `LongPress` at fire time,
//!   and the later release is swallowed
//! - movement past tolerance (a scroll or drag) → nothing
//! - cancel (pointer left the card) → nothing
//!
//! The page owns the timer. `begin` hands back a `TimerRequest`; the page
//! schedules it and calls `timer_fired` with the same generation. Timers
//! from earlier presses carry an old generation and are ignored.

use serde::Serialize;

/// Press delay before a hold becomes a long press, in milliseconds.
pub const DEFAULT_LONG_PRESS_MS: u32 = 400;

/// Per-axis movement allowed before a press is treated as a drag.
pub const DEFAULT_MOVE_TOLERANCE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub delay_ms: u32,
    pub tolerance: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_LONG_PRESS_MS,
            tolerance: DEFAULT_MOVE_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Click,
    LongPress,
}

/// Ask the page to call `timer_fired(generation)` after `delay_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerRequest {
    pub generation: u32,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle,
    /// Timer armed. `dragged` latches once movement exceeds tolerance.
    Pressing { origin: Point, dragged: bool },
    /// Long press already emitted; waiting for release.
    Fired,
}

#[derive(Debug, Clone)]
pub struct LongPress {
    config: GestureConfig,
    phase: Phase,
    generation: u32,
}

impl Default for LongPress {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl LongPress {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn config(&self) -> GestureConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Start an interaction. A press that was still open is abandoned.
    pub fn begin(&mut self, at: Point) -> TimerRequest {
        self.generation = self.generation.wrapping_add(1);
        self.phase = Phase::Pressing {
            origin: at,
            dragged: false,
        };
        TimerRequest {
            generation: self.generation,
            delay_ms: self.config.delay_ms,
        }
    }

    /// Track movement. Returns true when this move turned the press into a
    /// drag, i.e. the page may clear its timer.
    pub fn moved(&mut self, to: Point) -> bool {
        if let Phase::Pressing { origin, dragged } = &mut self.phase {
            if !*dragged && beyond(*origin, to, self.config.tolerance) {
                *dragged = true;
                return true;
            }
        }
        false
    }

    /// The page's timer for `generation` elapsed.
    pub fn timer_fired(&mut self, generation: u32) -> Option<Gesture> {
        if generation != self.generation {
            return None;
        }
        match self.phase {
            Phase::Pressing { dragged: false, .. } => {
                self.phase = Phase::Fired;
                Some(Gesture::LongPress)
            }
            _ => None,
        }
    }

    /// Release. Emits `Click` only for a short, stationary press.
    pub fn end(&mut self, at: Point) -> Option<Gesture> {
        let outcome = match self.phase {
            Phase::Pressing { origin, dragged } => {
                if dragged || beyond(origin, at, self.config.tolerance) {
                    None
                } else {
                    Some(Gesture::Click)
                }
            }
            Phase::Fired | Phase::Idle => None,
        };
        self.disarm();
        outcome
    }

    /// Pointer left the tracked area: no click, no long press.
    pub fn cancel(&mut self) {
        self.disarm();
    }

    fn disarm(&mut self) {
        self.phase = Phase::Idle;
        // Invalidate any timer still scheduled by the page.
        self.generation = self.generation.wrapping_add(1);
    }
}

fn beyond(origin: Point, to: Point, tolerance: f64) -> bool {
    (to.x - origin.x).abs() > tolerance || (to.y - origin.y).abs() > tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn quick_release_is_a_click() {
        let mut lp = LongPress::default();
        lp.begin(at(0.0, 0.0));
        assert_eq!(lp.end(at(2.0, 3.0)), Some(Gesture::Click));
        assert_eq!(lp.phase(), Phase::Idle);
    }

    #[test]
    fn hold_past_delay_is_only_a_long_press() {
        let mut lp = LongPress::default();
        let timer = lp.begin(at(5.0, 5.0));
        assert_eq!(timer.delay_ms, DEFAULT_LONG_PRESS_MS);
        assert_eq!(lp.timer_fired(timer.generation), Some(Gesture::LongPress));
        assert_eq!(lp.phase(), Phase::Fired);
        assert_eq!(lp.end(at(5.0, 5.0)), None);
    }

    #[test]
    fn drag_emits_nothing() {
        let mut lp = LongPress::default();
        let timer = lp.begin(at(0.0, 0.0));
        assert!(lp.moved(at(0.0, 11.0)));
        assert_eq!(lp.timer_fired(timer.generation), None);
        assert_eq!(lp.end(at(0.0, 0.0)), None);
    }

    #[test]
    fn movement_within_tolerance_still_clicks() {
        let mut lp = LongPress::default();
        lp.begin(at(0.0, 0.0));
        assert!(!lp.moved(at(10.0, -10.0)));
        assert_eq!(lp.end(at(9.0, 9.0)), Some(Gesture::Click));
    }

    #[test]
    fn release_far_from_origin_is_not_a_click() {
        let mut lp = LongPress::default();
        lp.begin(at(0.0, 0.0));
        assert_eq!(lp.end(at(40.0, 0.0)), None);
    }

    #[test]
    fn cancel_suppresses_both() {
        let mut lp = LongPress::default();
        let timer = lp.begin(at(0.0, 0.0));
        lp.cancel();
        assert_eq!(lp.timer_fired(timer.generation), None);
        assert_eq!(lp.end(at(0.0, 0.0)), None);
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut lp = LongPress::default();
        let first = lp.begin(at(0.0, 0.0));
        assert_eq!(lp.end(at(0.0, 0.0)), Some(Gesture::Click));
        let second = lp.begin(at(0.0, 0.0));
        assert_ne!(first.generation, second.generation);
        assert_eq!(lp.timer_fired(first.generation), None);
        assert_eq!(lp.timer_fired(second.generation), Some(Gesture::LongPress));
    }

    #[test]
    fn timer_fires_at_most_once() {
        let mut lp = LongPress::default();
        let timer = lp.begin(at(0.0, 0.0));
        assert_eq!(lp.timer_fired(timer.generation), Some(Gesture::LongPress));
        assert_eq!(lp.timer_fired(timer.generation), None);
    }

    #[test]
    fn release_without_press_is_silent() {
        let mut lp = LongPress::default();
        assert_eq!(lp.end(at(0.0, 0.0)), None);
    }

    #[test]
    fn custom_delay_is_requested() {
        let mut lp = LongPress::new(GestureConfig {
            delay_ms: 500,
            ..GestureConfig::default()
        });
        assert_eq!(lp.begin(at(0.0, 0.0)).delay_ms, 500);
    }
}
