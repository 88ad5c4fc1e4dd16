
pub mod claw_arm;
pub mod sweep;

use clock::Timestamp;
use errors::*;

/// Something the scheduler calls once per frame.
pub trait Periodic {
    fn name(&self) -> &str;
    fn on_tick(&mut self, now: Timestamp) -> Result<()>;
}
