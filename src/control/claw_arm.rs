// The claw arm consists of three servos: two set the height and pitch of the
// arm and one opens and closes the claw. Only the height servo moves; it
// sweeps up and down continuously.

use super::Periodic;
use super::sweep::Sweep;
use clock::Timestamp;
use errors::*;
use servo::Actuator;
use slog::Logger;
use time::Duration;

pub struct ClawArm {
    height_servo: Box<dyn Actuator>,
    pitch_servo: Box<dyn Actuator>,
    claw_servo: Box<dyn Actuator>,
    height_sweep: Sweep,
    log: Logger,
}

impl ClawArm {
    pub fn new(height_servo: Box<dyn Actuator>,
               pitch_servo: Box<dyn Actuator>,
               claw_servo: Box<dyn Actuator>,
               update_interval: Duration,
               log: Logger)
               -> Self {
        ClawArm {
            height_servo: height_servo,
            pitch_servo: pitch_servo,
            claw_servo: claw_servo,
            height_sweep: Sweep::new(update_interval),
            log: log,
        }
    }

    /// (height, pitch, claw)
    pub fn channels(&self) -> (u8, u8, u8) {
        (self.height_servo.channel(), self.pitch_servo.channel(), self.claw_servo.channel())
    }

    #[cfg(test)]
    pub fn height_sweep(&self) -> &Sweep {
        &self.height_sweep
    }

    /// Steps the height sweep and writes the emitted angle to the height
    /// servo. The sweep advances even if the write fails.
    pub fn update(&mut self, now: Timestamp) -> Result<Option<f64>> {
        let angle = match self.height_sweep.advance(now) {
            Some(angle) => angle,
            None => return Ok(None),
        };
        let state = self.height_sweep.state();
        trace!(self.log, "height step";
               "at" => now.as_millis(),
               "angle" => angle,
               "next" => state.current_angle,
               "direction" => ?state.direction());
        self.height_servo.set_angle(angle)?;
        Ok(Some(angle))
    }
}

impl Periodic for ClawArm {
    fn name(&self) -> &str {
        "claw_arm"
    }

    fn on_tick(&mut self, now: Timestamp) -> Result<()> {
        self.update(now).map(|_| ())
    }
}
