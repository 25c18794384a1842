//! Serial command interpreter.
//!
//! Reads at most one command byte per tick from a [`LineTransport`] and
//! answers with fixed CR/LF terminated text (see [`text`]). The code
//! commands `'4'` and `'5'` park a [`CodeCapture`] that collects its four
//! digits across as many ticks as the peer needs. A `'4'` sent while the
//! system is blocked still swallows its four digits, then answers once.
//!
//! ```text
//!   ┌──────────┐  '4' / '5'   ┌───────────┐  4th byte   ┌──────────┐
//!   │ Command  │─────────────▶│ Capturing │────────────▶│ Finish   │
//!   │ (1 byte) │◀─────────────│           │             │ (verify/ │
//!   └──────────┘   timeout    └───────────┘             │ replace) │
//!        ▲                                              └────┬─────┘
//!        └───────────────────────────────────────────────────┘
//! ```

pub mod capture;
pub mod command;
pub mod text;

use core::fmt::{self, Write as _};

use log::{debug, warn};

use crate::alarm::code::Code;
use crate::alarm::guard::{CodeGuard, Verdict};
use crate::app::ports::SensorPort;
use crate::config::TICK_PERIOD_MS;
use crate::fsm::context::FsmContext;
use crate::sensors::temperature::celsius_to_fahrenheit;
use crate::transport::LineTransport;

use capture::{CodeCapture, Purpose};
use command::Command;

/// Something the console did that the controller should know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleOutcome {
    /// A serial code attempt was evaluated.
    Verified(Verdict),
    /// The secret code was overwritten.
    CodeReplaced(Code),
    /// A pending capture was abandoned.
    CaptureTimedOut,
}

#[derive(Debug, Default)]
pub struct Console {
    capture: Option<CodeCapture>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// A code capture is waiting for digits.
    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Service the console for one tick.
    pub fn poll<T: LineTransport>(
        &mut self,
        serial: &mut T,
        ctx: &mut FsmContext,
        guard: &mut CodeGuard,
        sensors: &mut impl SensorPort,
    ) -> Option<ConsoleOutcome> {
        if self.capture.is_some() {
            return self.poll_capture(serial, ctx, guard, true);
        }

        if !serial.available() {
            return None;
        }
        let byte = match serial.read_byte() {
            Ok(Some(b)) => b,
            Ok(None) => return None,
            Err(e) => {
                warn!("console read failed: {:?}", e);
                return None;
            }
        };

        let cmd = Command::from_byte(byte);
        debug!("console command {:?} (0x{:02x})", cmd, byte);

        match cmd {
            Command::AlarmState => {
                let msg = if ctx.alarm.is_on() {
                    text::ALARM_ACTIVATED
                } else {
                    text::ALARM_NOT_ACTIVATED
                };
                send(serial, msg);
            }
            Command::GasState => {
                let msg = if ctx.sensors.gas_present() {
                    text::GAS_DETECTED
                } else {
                    text::GAS_NOT_DETECTED
                };
                send(serial, msg);
            }
            Command::OverTempState => {
                let msg = if ctx.over_temp {
                    text::OVER_TEMP
                } else {
                    text::NOT_OVER_TEMP
                };
                send(serial, msg);
            }
            Command::EnterCode => {
                if guard.is_blocked() {
                    return self.begin_capture(Purpose::Refused, serial, ctx, guard);
                }
                send(serial, text::ENTER_CODE_PROMPT);
                send(serial, text::CODE_INSTRUCTIONS);
                return self.begin_capture(Purpose::Verify, serial, ctx, guard);
            }
            Command::NewCode => {
                send(serial, text::NEW_CODE_PROMPT);
                send(serial, text::CODE_INSTRUCTIONS);
                return self.begin_capture(Purpose::Replace, serial, ctx, guard);
            }
            Command::Potentiometer => {
                let reading = sensors.read_potentiometer();
                send_fmt(serial, format_args!("Potentiometer: {:.2}\r\n", reading));
            }
            Command::Celsius => {
                send_fmt(
                    serial,
                    format_args!("Temperature: {:.2} \u{b0} C\r\n", ctx.temperature_c),
                );
            }
            Command::Fahrenheit => {
                send_fmt(
                    serial,
                    format_args!(
                        "Temperature: {:.2} \u{b0} F\r\n",
                        celsius_to_fahrenheit(ctx.temperature_c)
                    ),
                );
            }
            Command::Help => send(serial, text::HELP),
        }

        None
    }

    fn begin_capture<T: LineTransport>(
        &mut self,
        purpose: Purpose,
        serial: &mut T,
        ctx: &mut FsmContext,
        guard: &mut CodeGuard,
    ) -> Option<ConsoleOutcome> {
        self.capture = Some(CodeCapture::new(purpose, ctx.config.code_entry_timeout_ms));
        // Digits already queued behind the command byte are taken now.
        self.poll_capture(serial, ctx, guard, false)
    }

    fn poll_capture<T: LineTransport>(
        &mut self,
        serial: &mut T,
        ctx: &mut FsmContext,
        guard: &mut CodeGuard,
        count_tick: bool,
    ) -> Option<ConsoleOutcome> {
        let capture = self.capture.as_mut()?;

        while !capture.is_complete() {
            match serial.read_byte() {
                Ok(Some(b)) => {
                    capture.push(b);
                    if capture.echoes() {
                        send(serial, text::CAPTURE_ECHO);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("console read failed during code entry: {:?}", e);
                    break;
                }
            }
        }

        if !capture.is_complete() {
            if count_tick {
                capture.elapse(TICK_PERIOD_MS);
            }
            if capture.is_timed_out() {
                warn!("code entry abandoned after {} digit(s)", capture.len());
                self.capture = None;
                send(serial, text::CODE_ENTRY_TIMED_OUT);
                return Some(ConsoleOutcome::CaptureTimedOut);
            }
            return None;
        }

        let done = self.capture.take()?;
        Some(finish(done, serial, ctx, guard))
    }
}

fn finish<T: LineTransport>(
    capture: CodeCapture,
    serial: &mut T,
    ctx: &mut FsmContext,
    guard: &mut CodeGuard,
) -> ConsoleOutcome {
    match capture.purpose() {
        Purpose::Verify => {
            let verdict = guard.verify(capture.code(), ctx);
            let msg = match verdict {
                Verdict::Accepted => text::CODE_CORRECT,
                Verdict::Rejected { .. } => text::CODE_INCORRECT,
                Verdict::Blocked => text::SYSTEM_BLOCKED,
            };
            send(serial, msg);
            ConsoleOutcome::Verified(verdict)
        }
        Purpose::Replace => {
            let code = guard.replace_digits(capture.digits());
            send(serial, text::NEW_CODE_GENERATED);
            ConsoleOutcome::CodeReplaced(code)
        }
        Purpose::Refused => {
            send(serial, text::SYSTEM_BLOCKED);
            ConsoleOutcome::Verified(Verdict::Blocked)
        }
    }
}

/// Write all of `msg`, retrying partial writes. Failures are logged and
/// the rest of the message is dropped.
fn send<T: LineTransport>(serial: &mut T, msg: &str) {
    let mut remaining = msg.as_bytes();
    while !remaining.is_empty() {
        match serial.write(remaining) {
            Ok(0) => {
                warn!("console write stalled, {} byte(s) dropped", remaining.len());
                return;
            }
            Ok(n) => remaining = &remaining[n.min(remaining.len())..],
            Err(e) => {
                warn!("console write failed: {:?}", e);
                return;
            }
        }
    }
    if let Err(e) = serial.flush() {
        warn!("console flush failed: {:?}", e);
    }
}

fn send_fmt<T: LineTransport>(serial: &mut T, args: fmt::Arguments<'_>) {
    let mut line: heapless::String<64> = heapless::String::new();
    if line.write_fmt(args).is_err() {
        warn!("console response truncated");
    }
    send(serial, &line);
}
