//! A mock servo that logs every angle it is commanded to.

use errors::*;
use servo::Actuator;
use slog::Logger;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub struct MockServo {
    channel: u8,
    // Only allocated once a handle is taken
    angles: Option<Rc<RefCell<Vec<f64>>>>,
    faulted: Option<Rc<Cell<bool>>>,
    log: Logger,
}

impl MockServo {
    pub fn new(channel: u8, log: Logger) -> MockServo {
        MockServo {
            channel: channel,
            angles: None,
            faulted: None,
            log: log,
        }
    }
}

impl Actuator for MockServo {
    fn channel(&self) -> u8 {
        self.channel
    }

    fn set_angle(&mut self, degrees: f64) -> Result<()> {
        if self.faulted.as_ref().map_or(false, |faulted| faulted.get()) {
            bail!(ErrorKind::HardwareFault(self.channel));
        }
        debug!(self.log, "mock servo moved"; "channel" => self.channel, "angle" => degrees);
        if let Some(ref angles) = self.angles {
            angles.borrow_mut().push(degrees);
        }
        Ok(())
    }
}

#[cfg(test)]
pub use self::recording::MockServoHandle;


#[cfg(test)]
mod tests {
    use super::*;
    use slog::Discard;

    #[test]
    fn records_commanded_angles() {
        let mut servo = MockServo::new(3, Logger::root(Discard, o!()));
        let handle = servo.handle();
        servo.set_angle(0.0).unwrap();
        servo.set_angle(1.0).unwrap();
        assert_eq!(handle.angles(), vec![0.0, 1.0]);
    }

    #[test]
    fn keeps_no_history_without_a_handle() {
        let mut servo = MockServo::new(3, Logger::root(Discard, o!()));
        for i in 0..1_000 {
            servo.set_angle((i % 181) as f64).unwrap();
        }
        assert!(servo.angles.is_none());
        assert!(servo.faulted.is_none());
    }

    #[test]
    fn faulted_servo_rejects_commands() {
        let mut servo = MockServo::new(2, Logger::root(Discard, o!()));
        let handle = servo.handle();
        handle.set_faulted(true);
        assert!(servo.set_angle(5.0).is_err());
        assert!(handle.angles().is_empty());
    }
}
