use clock::Timestamp;
use time::Duration;

pub const MIN_ANGLE: f64 = 0.0;
pub const MAX_ANGLE: f64 = 180.0;
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 200;

const STEP: f64 = 1.0;

#[derive(PartialEq, Copy, Clone, Debug)]
pub enum SweepDirection {
    Up,
    Down,
}

#[derive(PartialEq, Copy, Clone, Debug)]
pub struct SweepState {
    pub current_angle: f64,
    pub direction_delta: f64,
    pub last_update: Option<Timestamp>,
}

impl SweepState {
    pub fn new() -> SweepState {
        SweepState {
            current_angle: MIN_ANGLE,
            direction_delta: STEP,
            last_update: None,
        }
    }

    pub fn direction(&self) -> SweepDirection {
        if self.direction_delta > 0.0 {
            SweepDirection::Up
        } else {
            SweepDirection::Down
        }
    }
}

/// Walks an angle back and forth between `MIN_ANGLE` and `MAX_ANGLE`, one
/// degree per update, no faster than once per `interval`.
pub struct Sweep {
    state: SweepState,
    interval: Duration,
}

impl Sweep {
    pub fn new(interval: Duration) -> Sweep {
        Sweep::with_state(SweepState::new(), interval)
    }

    pub fn with_state(state: SweepState, interval: Duration) -> Sweep {
        Sweep {
            state: state,
            interval: interval,
        }
    }

    pub fn state(&self) -> &SweepState {
        &self.state
    }

    /// Returns the angle to command, or `None` if the last update was too
    /// recent. The returned angle is the one held *before* this step, so the
    /// output trails the stored angle by one update.
    pub fn advance(&mut self, now: Timestamp) -> Option<f64> {
        if let Some(last_update) = self.state.last_update {
            if now.since(last_update) <= self.interval {
                return None;
            }
        }
        self.state.last_update = Some(now);

        let emitted = self.state.current_angle;
        self.state.current_angle += self.state.direction_delta;
        if self.state.current_angle > MAX_ANGLE {
            self.state.current_angle = MAX_ANGLE;
            self.state.direction_delta = -self.state.direction_delta;
        } else if self.state.current_angle < MIN_ANGLE {
            self.state.current_angle = MIN_ANGLE;
            self.state.direction_delta = -self.state.direction_delta;
        }
        Some(emitted)
    }
}
