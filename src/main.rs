#![recursion_limit = "1024"]

extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serialport;
#[macro_use]
extern crate slog;
extern crate slog_async;
extern crate slog_json;
extern crate slog_term;
#[macro_use]
extern crate fomat_macros;
#[macro_use]
extern crate error_chain;
extern crate time;
extern crate toml;

mod clock;
mod config;
mod control;
mod errors;
mod link;
mod logging;
mod mock;
mod scheduler;
mod servo;
mod util;

use clock::SystemClock;
use config::Config;
use control::claw_arm::ClawArm;
use errors::*;
use link::Link;
use mock::MockServo;
use scheduler::Scheduler;
use servo::Actuator;

const USAGE: &'static str = "Usage: romi-claw [--list-ports] [--frames N] [CONFIG.toml]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    list_ports: bool,
    frames: Option<u64>,
    config_path: Option<String>,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--list-ports" => parsed.list_ports = true,
            "--frames" => {
                let value = args.next().ok_or_else(|| ErrorKind::InvalidArgument(String::from(USAGE)))?;
                let frames = value.parse()
                    .chain_err(|| ErrorKind::InvalidArgument(fomat!("--frames "(value))))?;
                parsed.frames = Some(frames);
            }
            flag if flag.starts_with("--") => {
                bail!(ErrorKind::InvalidArgument(String::from(flag)))
            }
            path => parsed.config_path = Some(String::from(path.trim())),
        }
    }
    Ok(parsed)
}

fn main() {
    if let Err(ref e) = run() {
        epintln!((util::get_error_trace(e)));
        ::std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = parse_args(::std::env::args().skip(1))?;

    if args.list_ports {
        let ports = serialport::available_ports().chain_err(|| "Unable to enumerate serial ports")?;
        pintln!((ports.len())" serial ports available");
        for port in ports {
            pintln!((port.port_name));
        }
        return Ok(());
    }

    let config = match args.config_path {
        Some(ref path) => util::load_config_from_file(path)?,
        None => Config::default(),
    };
    let log = logging::build_logger(&config.log)?;
    let update_interval = config.claw_arm.update_interval()?;
    let period = config.scheduler.period()?;

    let arm_config = &config.claw_arm;
    let link = match config.link.port {
        Some(_) => Some(Link::open(&config.link, log.new(o!("subsystem" => "link")))?),
        None => {
            warn!(log, "no servo link configured, using mock servos");
            None
        }
    };
    let servo_log = log.new(o!("subsystem" => "servo"));
    let make_servo = |channel: u8| -> Box<dyn Actuator> {
        match link {
            Some(ref link) => Box::new(link.servo(channel)),
            None => Box::new(MockServo::new(channel, servo_log.clone())),
        }
    };
    let arm = ClawArm::new(make_servo(arm_config.height_channel),
                           make_servo(arm_config.pitch_channel),
                           make_servo(arm_config.claw_channel),
                           update_interval,
                           log.new(o!("subsystem" => "claw_arm")));
    let (height, pitch, claw) = arm.channels();
    info!(log, "claw arm ready"; "height" => height, "pitch" => pitch, "claw" => claw);

    let mut scheduler = Scheduler::new(period, log.clone());
    scheduler.register(Box::new(arm));
    if let Some(link) = link {
        scheduler.register(Box::new(link));
    }
    scheduler.run(&SystemClock::new(), args.frames);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_means_defaults() {
        assert_eq!(args(&[]).unwrap(), Args::default());
    }

    #[test]
    fn parses_frames_and_config_path() {
        let parsed = args(&["--frames", "50", "claw.toml"]).unwrap();
        assert_eq!(parsed.frames, Some(50));
        assert_eq!(parsed.config_path, Some(String::from("claw.toml")));
        assert!(!parsed.list_ports);
    }

    #[test]
    fn rejects_bad_frame_count() {
        let err = args(&["--frames", "many"]).unwrap_err();
        match *err.kind() {
            ErrorKind::InvalidArgument(ref arg) => assert_eq!(arg, "--frames many"),
            ref other => panic!("unexpected error {:?}", other),
        }
        assert!(args(&["--frames"]).is_err());
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(args(&["--fast"]).is_err());
    }
}
