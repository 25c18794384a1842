//! Host simulation of the alarm board.
//!
//! Inputs are plain fields set by the caller; outputs are recorded so the
//! simulator (or a test) can inspect what the controller asked for.

use log::debug;

use crate::alarm::code::CODE_LENGTH;
use crate::app::ports::{ActuatorPort, SensorPort};
use crate::fsm::context::{ActuatorCommands, SensorSnapshot, SirenDrive};

#[derive(Debug, Default)]
pub struct SimHardware {
    inputs: SensorSnapshot,
    potentiometer: f32,
    outputs: ActuatorCommands,
}

impl SimHardware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert or release the gas detector (drives its active-low line).
    pub fn set_gas(&mut self, present: bool) {
        self.inputs.gas_sensor_level = !present;
    }

    pub fn set_test_button(&mut self, held: bool) {
        self.inputs.test_button = held;
    }

    pub fn set_confirm_key(&mut self, held: bool) {
        self.inputs.confirm_key = held;
    }

    pub fn set_code_keys(&mut self, keys: [bool; CODE_LENGTH]) {
        self.inputs.code_keys = keys;
    }

    /// Normalised temperature sensor reading.
    pub fn set_temperature_raw(&mut self, raw: f32) {
        self.inputs.temperature_raw = raw;
    }

    pub fn set_potentiometer(&mut self, value: f32) {
        self.potentiometer = value;
    }

    /// Output levels last written by the controller.
    pub fn outputs(&self) -> ActuatorCommands {
        self.outputs
    }
}

impl SensorPort for SimHardware {
    fn read_all(&mut self) -> SensorSnapshot {
        self.inputs
    }

    fn read_potentiometer(&mut self) -> f32 {
        self.potentiometer
    }
}

impl ActuatorPort for SimHardware {
    fn set_siren(&mut self, drive: SirenDrive) {
        if self.outputs.siren != drive {
            debug!("sim: siren -> {:?}", drive);
        }
        self.outputs.siren = drive;
    }

    fn set_alarm_led(&mut self, on: bool) {
        if self.outputs.alarm_led != on {
            debug!("sim: alarm LED -> {}", on);
        }
        self.outputs.alarm_led = on;
    }

    fn set_incorrect_code_led(&mut self, on: bool) {
        if self.outputs.incorrect_code_led != on {
            debug!("sim: incorrect code LED -> {}", on);
        }
        self.outputs.incorrect_code_led = on;
    }

    fn set_system_blocked_led(&mut self, on: bool) {
        if self.outputs.system_blocked_led != on {
            debug!("sim: system blocked LED -> {}", on);
        }
        self.outputs.system_blocked_led = on;
    }
}
