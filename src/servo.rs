
use errors::*;
use link::LinkCommand;
use std::sync::mpsc::Sender;

pub const SERVO_LOW: i16 = 1000;
pub const SERVO_MID: i16 = 1500;
pub const SERVO_HIGH: i16 = 2000;

const MAX_ANGLE: f64 = 180.0;
const MID_ANGLE: f64 = MAX_ANGLE / 2.0;

/// A servo output bound to one channel.
pub trait Actuator {
    fn channel(&self) -> u8;
    fn set_angle(&mut self, degrees: f64) -> Result<()>;
}

/// Converts an angle in degrees to an RC pulse width.
pub fn angle_to_microseconds(degrees: f64) -> i16 {
    let half_span = (SERVO_HIGH - SERVO_MID) as f64;
    let microseconds = SERVO_MID as f64 + (degrees - MID_ANGLE) / MID_ANGLE * half_span;
    (microseconds.round() as i16).max(SERVO_LOW).min(SERVO_HIGH)
}

/// A servo on the controller board, commanded over the serial link.
pub struct LinkServo {
    channel: u8,
    command_sender: Sender<Option<LinkCommand>>,
    prev_microseconds: Option<i16>,
}

impl LinkServo {
    pub fn new(channel: u8, command_sender: Sender<Option<LinkCommand>>) -> Self {
        LinkServo {
            channel: channel,
            command_sender: command_sender,
            prev_microseconds: None,
        }
    }
}

impl Actuator for LinkServo {
    fn channel(&self) -> u8 {
        self.channel
    }

    fn set_angle(&mut self, degrees: f64) -> Result<()> {
        let microseconds = angle_to_microseconds(degrees);
        if self.prev_microseconds == Some(microseconds) {
            return Ok(());
        }
        let channel = self.channel;
        self.command_sender
            .send(Some(LinkCommand::ControlServo {
                id: channel,
                microseconds: microseconds,
            }))
            .chain_err(|| ErrorKind::HardwareFault(channel))?;
        self.prev_microseconds = Some(microseconds);
        Ok(())
    }
}
