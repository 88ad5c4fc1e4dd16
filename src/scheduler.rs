//! Runs registered subsystems once per frame at a fixed period.

use clock::{Clock, Timestamp};
use control::Periodic;
use slog::Logger;
use std::thread;
use std::time::Duration as StdDuration;
use time::Duration;
use util::get_error_trace;

pub const DEFAULT_PERIOD_MS: u64 = 20;

pub struct Scheduler {
    subsystems: Vec<Box<dyn Periodic>>,
    period: Duration,
    log: Logger,
}

impl Scheduler {
    pub fn new(period: Duration, log: Logger) -> Scheduler {
        Scheduler {
            subsystems: Vec::new(),
            period: period,
            log: log,
        }
    }

    pub fn register(&mut self, subsystem: Box<dyn Periodic>) {
        info!(self.log, "registered subsystem"; "name" => subsystem.name());
        self.subsystems.push(subsystem);
    }

    /// Ticks every subsystem in registration order. A failing subsystem is
    /// logged and skipped; returns how many failed.
    pub fn run_once(&mut self, now: Timestamp) -> usize {
        let mut failures = 0;
        for subsystem in self.subsystems.iter_mut() {
            if let Err(e) = subsystem.on_tick(now) {
                failures += 1;
                warn!(self.log, "subsystem tick failed";
                      "subsystem" => subsystem.name(),
                      "error" => get_error_trace(&e));
            }
        }
        failures
    }

    /// Runs `frames` frames, or forever if `None`. Returns the frame count.
    pub fn run<C: Clock>(&mut self, clock: &C, frames: Option<u64>) -> u64 {
        let mut frame = 0;
        while frames.map_or(true, |limit| frame < limit) {
            let start = clock.now();
            self.run_once(start);
            frame += 1;

            let elapsed = clock.now().since(start);
            if elapsed < self.period {
                let remaining = (self.period - elapsed).num_milliseconds() as u64;
                thread::sleep(StdDuration::from_millis(remaining));
            } else if self.period > Duration::zero() {
                debug!(self.log, "frame overran"; "elapsed_ms" => elapsed.num_milliseconds());
            }
        }
        info!(self.log, "scheduler stopped"; "frames" => frame);
        frame
    }
}
