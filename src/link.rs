
use config;
use control::Periodic;
use clock::Timestamp;
use errors::*;
use servo::LinkServo;
use slog::Logger;
use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use serialport::{self, DataBits, Parity, SerialPort, StopBits};

const COMMAND_CONTROL_SERVO: u8 = 0x66;

#[derive(Clone, Debug, PartialEq)]
pub enum LinkCommand {
    ControlServo { id: u8, microseconds: i16 },
}

impl LinkCommand {
    pub fn to_byte_slice(&self) -> Vec<u8> {
        match *self {
            LinkCommand::ControlServo { id, microseconds } => {
                vec![COMMAND_CONTROL_SERVO,
                     id,
                     ((microseconds >> 8) & 0xFF) as u8,
                     (microseconds & 0xFF) as u8]
            }
        }
    }
}

const RESPONSE_SERVO: u8 = 0x66;
const RESPONSE_SERVO_FAULT: u8 = 0x67;

#[derive(Debug, PartialEq)]
pub enum LinkResponse {
    Servo { id: u8, microseconds: i16 },
    ServoFault { id: u8 },
}

#[derive(Debug, PartialEq)]
pub enum ParseStatus {
    Ok(LinkResponse, usize), // bytes read
    TooShort,
    Invalid,
}

impl LinkResponse {
    /// The length of the response, not including the id
    pub fn response_length(command_byte: u8) -> Option<usize> {
        match command_byte {
            RESPONSE_SERVO => Some(3),
            RESPONSE_SERVO_FAULT => Some(1),
            _ => None,
        }
    }

    pub fn parse(buffer: &VecDeque<u8>) -> ParseStatus {
        let length = match buffer.front().and_then(|&b| Self::response_length(b)) {
            Some(len) => len,
            None if buffer.is_empty() => return ParseStatus::TooShort,
            None => return ParseStatus::Invalid,
        };
        // The `+1` is because the length doesn't include the command id
        if buffer.len() < (length + 1) {
            return ParseStatus::TooShort;
        }

        let i16_from_bytes = |left: u8, right: u8| ((left as i16) << 8) | (right as i16);
        let response = match buffer[0] {
            RESPONSE_SERVO => LinkResponse::Servo {
                id: buffer[1],
                microseconds: i16_from_bytes(buffer[2], buffer[3]),
            },
            RESPONSE_SERVO_FAULT => LinkResponse::ServoFault { id: buffer[1] },
            _ => return ParseStatus::Invalid,
        };
        ParseStatus::Ok(response, length + 1)
    }
}

/// Appends the XOR parity byte the controller expects after each frame.
pub fn frame_message(message: &[u8]) -> Vec<u8> {
    let parity = message.iter().fold(0, |acc, i| acc ^ i);
    let mut frame = message.to_vec();
    frame.push(parity);
    frame
}

pub struct Link {
    command_sender: Sender<Option<LinkCommand>>,
    response_receiver: Receiver<LinkResponse>,
    log: Logger,
}

impl Link {
    pub fn open(settings: &config::Link, log: Logger) -> Result<Link> {
        let port_name = match settings.port {
            Some(ref port) => port.clone(),
            None => {
                bail!("No serial port configured for the servo link")
            }
        };
        let port = serialport::new(port_name.as_str(), settings.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(Duration::from_millis(settings.timeout_ms))
            .open()
            .chain_err(|| format!("Couldn't open port {}", port_name))?;
        info!(log, "servo link open"; "port" => &port_name, "baud" => settings.baud_rate);

        let (command_sender, command_receiver) = mpsc::channel();
        let (response_sender, response_receiver) = mpsc::channel();
        let thread_log = log.clone();
        thread::spawn(move || {
            Link::run_device_thread(port, command_receiver, response_sender, thread_log)
        });
        Ok(Link {
            command_sender: command_sender,
            response_receiver: response_receiver,
            log: log,
        })
    }

    pub fn servo(&self, channel: u8) -> LinkServo {
        LinkServo::new(channel, self.command_sender.clone())
    }

    pub fn responses(&mut self) -> Vec<LinkResponse> {
        self.response_receiver.try_iter().collect()
    }

    fn run_device_thread(mut port: Box<dyn SerialPort>,
                         command_receiver: Receiver<Option<LinkCommand>>,
                         response_sender: Sender<LinkResponse>,
                         log: Logger) {
        // Give the controller time to reset after the port opens
        thread::sleep(Duration::from_millis(1000));

        let mut response_buffer = VecDeque::new();

        'device: loop {
            // Check for commands to send
            for command_option in command_receiver.try_iter() {
                if let Some(command) = command_option {
                    let frame = frame_message(&command.to_byte_slice());
                    if let Err(e) = port.write_all(&frame) {
                        error!(log, "couldn't write to port"; "error" => %e);
                        break 'device;
                    }
                } else {
                    break 'device;
                }
            }

            // Read 1 byte
            let mut buffer = [0u8; 1];
            match port.read_exact(&mut buffer) {
                Ok(()) => {
                    response_buffer.push_back(buffer[0]);
                    loop {
                        match LinkResponse::parse(&response_buffer) {
                            ParseStatus::Ok(response, bytes_read) => {
                                if response_sender.send(response).is_err() {
                                    break 'device;
                                }
                                for _ in 0..bytes_read {
                                    response_buffer.pop_front();
                                }
                            }
                            ParseStatus::TooShort => break,
                            ParseStatus::Invalid => {
                                response_buffer.pop_front();
                            }
                        }
                    }
                }
                Err(ref e) if e.kind() == io::ErrorKind::TimedOut => {
                    // Do nothing
                }
                Err(e) => {
                    error!(log, "couldn't read from port"; "error" => %e);
                    break 'device;
                }
            }
        }
        debug!(log, "device thread stopped");
    }
}

impl Periodic for Link {
    fn name(&self) -> &str {
        "link"
    }

    fn on_tick(&mut self, _now: Timestamp) -> Result<()> {
        for response in self.responses() {
            match response {
                LinkResponse::Servo { id, microseconds } => {
                    debug!(self.log, "servo ack"; "channel" => id, "microseconds" => microseconds);
                }
                LinkResponse::ServoFault { id } => {
                    warn!(self.log, "controller reported servo fault"; "channel" => id);
                }
            }
        }
        Ok(())
    }
}

impl Drop for Link {
    fn drop(&mut self) {
        let _ = self.command_sender.send(None);
    }
}
