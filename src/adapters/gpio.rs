//! GPIO board adapter: bridges `embedded-hal` pins to the domain ports.
//!
//! [`GpioBoard`] owns every input, output and analog channel of the alarm
//! board and exposes them through [`SensorPort`] and [`ActuatorPort`]. It
//! is generic over the `embedded-hal` 1.0 digital traits, so the same code
//! drives `esp-idf-hal` pin drivers on the target and mock pins in tests.
//!
//! Read failures never reach the domain: the failure is logged and the
//! last good level is reported instead. Write failures are logged and
//! retried on the next tick, since every output is rewritten each tick.

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use log::{debug, warn};

use crate::alarm::code::CODE_LENGTH;
use crate::app::ports::{ActuatorPort, SensorPort};
use crate::error::{ActuatorError, Result, SensorError};
use crate::fsm::context::{SensorSnapshot, SirenDrive};

/// An ADC channel that reports its reading normalised to `[0, 1]`.
pub trait AnalogChannel {
    fn read_normalised(&mut self) -> Result<f32>;
}

/// Every pin the alarm board uses.
///
/// * `I`: digital inputs
/// * `O`: push-pull LED outputs
/// * `S`: the open-drain siren output
/// * `A`: analog channels
pub struct BoardPins<I, O, S, A> {
    pub confirm_key: I,
    /// Keys A, B, C, D.
    pub code_keys: [I; CODE_LENGTH],
    pub test_button: I,
    /// Active-low gas detector output.
    pub gas_sensor: I,

    pub alarm_led: O,
    pub incorrect_code_led: O,
    pub system_blocked_led: O,
    pub siren: S,

    pub potentiometer: A,
    pub temperature: A,
}

pub struct GpioBoard<I, O, S, A> {
    pins: BoardPins<I, O, S, A>,
    last: SensorSnapshot,
    last_potentiometer: f32,
    siren: Option<SirenDrive>,
}

impl<I, O, S, A> GpioBoard<I, O, S, A>
where
    I: InputPin,
    O: OutputPin,
    S: OutputPin,
    A: AnalogChannel,
{
    pub fn new(pins: BoardPins<I, O, S, A>) -> Self {
        Self {
            pins,
            last: SensorSnapshot::default(),
            last_potentiometer: 0.0,
            siren: None,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I, O, S, A> SensorPort for GpioBoard<I, O, S, A>
where
    I: InputPin,
    O: OutputPin,
    S: OutputPin,
    A: AnalogChannel,
{
    fn read_all(&mut self) -> SensorSnapshot {
        let prev = self.last;
        let p = &mut self.pins;

        let mut code_keys = prev.code_keys;
        for (i, (key, level)) in p.code_keys.iter_mut().zip(code_keys.iter_mut()).enumerate() {
            *level = keep_last(read_level(key), *level, KEY_NAMES[i]);
        }

        let temperature_raw = match p.temperature.read_normalised() {
            Ok(v) => v,
            Err(e) => {
                warn!("temperature: {}, keeping {:.4}", e, prev.temperature_raw);
                prev.temperature_raw
            }
        };

        self.last = SensorSnapshot {
            gas_sensor_level: keep_last(
                read_level(&mut p.gas_sensor),
                prev.gas_sensor_level,
                "gas sensor",
            ),
            test_button: keep_last(read_level(&mut p.test_button), prev.test_button, "test button"),
            confirm_key: keep_last(read_level(&mut p.confirm_key), prev.confirm_key, "confirm key"),
            code_keys,
            temperature_raw,
        };
        self.last
    }

    fn read_potentiometer(&mut self) -> f32 {
        match self.pins.potentiometer.read_normalised() {
            Ok(v) => self.last_potentiometer = v,
            Err(e) => warn!("potentiometer: {}, keeping {:.4}", e, self.last_potentiometer),
        }
        self.last_potentiometer
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<I, O, S, A> ActuatorPort for GpioBoard<I, O, S, A>
where
    I: InputPin,
    O: OutputPin,
    S: OutputPin,
    A: AnalogChannel,
{
    fn set_siren(&mut self, drive: SirenDrive) {
        let res = match drive {
            SirenDrive::Sounding => self.pins.siren.set_low(),
            SirenDrive::Released => self.pins.siren.set_high(),
        };
        match res {
            Ok(()) => {
                if self.siren != Some(drive) {
                    debug!("siren -> {:?}", drive);
                    self.siren = Some(drive);
                }
            }
            Err(_) => warn!("siren: {}", ActuatorError::GpioWriteFailed),
        }
    }

    fn set_alarm_led(&mut self, on: bool) {
        write_level(&mut self.pins.alarm_led, on, "alarm LED");
    }

    fn set_incorrect_code_led(&mut self, on: bool) {
        write_level(&mut self.pins.incorrect_code_led, on, "incorrect code LED");
    }

    fn set_system_blocked_led(&mut self, on: bool) {
        write_level(&mut self.pins.system_blocked_led, on, "system blocked LED");
    }
}

// ── Helpers ───────────────────────────────────────────────────

const KEY_NAMES: [&str; CODE_LENGTH] = ["key A", "key B", "key C", "key D"];

fn read_level(pin: &mut impl InputPin) -> Result<bool> {
    pin.is_high().map_err(|_| SensorError::GpioReadFailed.into())
}

fn keep_last(read: Result<bool>, last: bool, name: &str) -> bool {
    read.unwrap_or_else(|e| {
        warn!("{}: {}, keeping {}", name, e, last);
        last
    })
}

fn write_level(pin: &mut impl OutputPin, on: bool, name: &str) {
    if pin.set_state(PinState::from(on)).is_err() {
        warn!("{}: {}", name, ActuatorError::GpioWriteFailed);
    }
}
