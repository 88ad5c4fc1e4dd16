
use errors::*;
use std::convert::TryFrom;
use std::default::Default;
use time::Duration;

fn millis(key: &str, value: u64) -> Result<Duration> {
    let ms = i64::try_from(value)
        .chain_err(|| ErrorKind::InvalidArgument(fomat!((key)" = "(value))))?;
    Ok(Duration::milliseconds(ms))
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub scheduler: Scheduler,
    pub claw_arm: ClawArm,
    pub link: Link,
    pub log: Log,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Scheduler {
    pub period_ms: u64,
}

impl Scheduler {
    pub fn period(&self) -> Result<Duration> {
        millis("scheduler.period_ms", self.period_ms)
    }
}

impl Default for Scheduler {
    fn default() -> Scheduler {
        Scheduler { period_ms: ::scheduler::DEFAULT_PERIOD_MS }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ClawArm {
    pub height_channel: u8,
    pub pitch_channel: u8,
    pub claw_channel: u8,
    pub update_interval_ms: u64,
}

impl ClawArm {
    pub fn update_interval(&self) -> Result<Duration> {
        millis("claw_arm.update_interval_ms", self.update_interval_ms)
    }
}

impl Default for ClawArm {
    fn default() -> ClawArm {
        ClawArm {
            height_channel: 3,
            pitch_channel: 2,
            claw_channel: 4,
            update_interval_ms: ::control::sweep::DEFAULT_UPDATE_INTERVAL_MS,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Link {
    /// Serial port of the servo controller. Servos are mocked when unset.
    pub port: Option<String>,
    pub baud_rate: u32,
    pub timeout_ms: u64,
}

impl Default for Link {
    fn default() -> Link {
        Link {
            port: None,
            baud_rate: 115_200,
            timeout_ms: 5,
        }
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Term,
    Json,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Log {
    pub level: String,
    pub format: LogFormat,
}

impl Default for Log {
    fn default() -> Log {
        Log {
            level: String::from("info"),
            format: LogFormat::Term,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = ::toml::de::from_str("").unwrap();
        assert_eq!(config.scheduler.period_ms, 20);
        assert_eq!(config.claw_arm.height_channel, 3);
        assert_eq!(config.claw_arm.pitch_channel, 2);
        assert_eq!(config.claw_arm.claw_channel, 4);
        assert_eq!(config.claw_arm.update_interval_ms, 200);
        assert_eq!(config.link.port, None);
        assert_eq!(config.link.baud_rate, 115_200);
        assert_eq!(config.log.format, LogFormat::Term);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: Config = ::toml::de::from_str(r#"
            [claw_arm]
            height_channel = 7

            [link]
            port = "/dev/ttyACM0"

            [log]
            format = "json"
            level = "debug"
        "#)
            .unwrap();
        assert_eq!(config.claw_arm.height_channel, 7);
        assert_eq!(config.claw_arm.claw_channel, 4);
        assert_eq!(config.link.port, Some(String::from("/dev/ttyACM0")));
        assert_eq!(config.link.timeout_ms, 5);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn default_durations() {
        let config = Config::default();
        assert_eq!(config.scheduler.period().unwrap(), Duration::milliseconds(20));
        assert_eq!(config.claw_arm.update_interval().unwrap(), Duration::milliseconds(200));
    }

    #[test]
    fn durations_beyond_i64_are_rejected() {
        let mut config = Config::default();
        config.claw_arm.update_interval_ms = u64::max_value();
        config.scheduler.period_ms = 1 << 63;

        let err = config.claw_arm.update_interval().unwrap_err();
        match *err.kind() {
            ErrorKind::InvalidArgument(ref arg) => {
                assert_eq!(arg, &fomat!("claw_arm.update_interval_ms = "(u64::max_value())))
            }
            ref other => panic!("unexpected error {:?}", other),
        }
        assert!(config.scheduler.period().is_err());
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let result: ::std::result::Result<Config, _> = ::toml::de::from_str("[log]\nformat = \"xml\"\n");
        assert!(result.is_err());
    }
}
