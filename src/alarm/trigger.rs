//! Alarm trigger evaluator.
//!
//! Runs every tick after the temperature average has been refreshed.
//! Raises the alarm when gas, over-temperature or the test button is
//! active, and latches the detector flags for the siren driver. It never
//! lowers the alarm.

use log::info;

use super::AlarmState;
use crate::config::OVER_TEMP_LEVEL_C;
use crate::fsm::context::FsmContext;

/// Conditions active on a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Triggers {
    pub gas: bool,
    pub over_temp: bool,
    pub test: bool,
}

impl Triggers {
    pub fn any(&self) -> bool {
        self.gas || self.over_temp || self.test
    }
}

/// Evaluate this tick's triggers against `ctx.sensors` and
/// `ctx.temperature_c`, updating the latch and flags in place.
pub fn evaluate(ctx: &mut FsmContext) -> Triggers {
    let triggers = Triggers {
        gas: ctx.sensors.gas_present(),
        over_temp: ctx.temperature_c > OVER_TEMP_LEVEL_C,
        test: ctx.sensors.test_button,
    };

    ctx.over_temp = triggers.over_temp;

    if triggers.any() && !ctx.alarm.is_on() {
        info!(
            "alarm raised: gas={} over_temp={} ({:.1}\u{00b0}C) test={}",
            triggers.gas, triggers.over_temp, ctx.temperature_c, triggers.test
        );
        ctx.alarm = AlarmState::On;
    }

    ctx.detectors.gas_detected |= triggers.gas;
    ctx.detectors.over_temp_detected |= triggers.over_temp;

    // The test button simulates both conditions at once.
    if triggers.test {
        ctx.detectors.gas_detected = true;
        ctx.detectors.over_temp_detected = true;
    }

    triggers
}
