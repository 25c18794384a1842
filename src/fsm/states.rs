//! Siren/LED state handlers and table builder.
//!
//! ```text
//!  IDLE ──[alarm On]──▶ ALARMING ──[alarm Off]──▶ IDLE
//! ```
//!
//! While alarming the siren is held at its active level and the alarm LED
//! blinks at a rate that encodes which conditions have been seen:
//!
//! | Detected              | Toggle period |
//! |-----------------------|---------------|
//! | gas + over-temp       | 100 ms        |
//! | gas only              | 1000 ms       |
//! | over-temp only        | 500 ms        |

use super::context::{FsmContext, SirenDrive};
use super::{StateDescriptor, StateId};
use crate::alarm::DetectorFlags;
use crate::config::{
    BLINK_GAS_AND_OVER_TEMP_MS, BLINK_GAS_MS, BLINK_OVER_TEMP_MS, TICK_PERIOD_MS,
};
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1: Alarming
        StateDescriptor {
            id: StateId::Alarming,
            name: "Alarming",
            on_enter: Some(alarming_enter),
            on_exit: None,
            on_update: alarming_update,
        },
    ]
}

/// Alarm LED toggle period for the conditions seen so far, fastest first.
pub fn blink_period_ms(flags: &DetectorFlags) -> Option<u32> {
    match (flags.gas_detected, flags.over_temp_detected) {
        (true, true) => Some(BLINK_GAS_AND_OVER_TEMP_MS),
        (true, false) => Some(BLINK_GAS_MS),
        (false, true) => Some(BLINK_OVER_TEMP_MS),
        (false, false) => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut FsmContext) {
    ctx.commands.alarm_led = false;
    ctx.commands.siren = SirenDrive::Released;
    ctx.detectors.clear();
    ctx.accumulated_alarm_ms = 0;
    info!("IDLE: siren released, detectors cleared");
}

fn idle_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.alarm.is_on() {
        return Some(StateId::Alarming);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ALARMING state
// ═══════════════════════════════════════════════════════════════════════════

fn alarming_enter(ctx: &mut FsmContext) {
    ctx.commands.siren = SirenDrive::Sounding;
    ctx.accumulated_alarm_ms = 0;
    info!(
        "ALARMING: siren on (gas={}, over_temp={})",
        ctx.detectors.gas_detected, ctx.detectors.over_temp_detected
    );
    // The tick that raised the alarm counts towards the first blink.
    advance_blink(ctx);
}

fn alarming_update(ctx: &mut FsmContext) -> Option<StateId> {
    if !ctx.alarm.is_on() {
        return Some(StateId::Idle);
    }
    ctx.commands.siren = SirenDrive::Sounding;
    advance_blink(ctx);
    None
}

fn advance_blink(ctx: &mut FsmContext) {
    ctx.accumulated_alarm_ms = ctx.accumulated_alarm_ms.saturating_add(TICK_PERIOD_MS);

    let Some(period) = blink_period_ms(&ctx.detectors) else {
        return;
    };
    if ctx.accumulated_alarm_ms >= period {
        ctx.accumulated_alarm_ms = 0;
        ctx.commands.alarm_led = !ctx.commands.alarm_led;
        debug!("alarm LED -> {}", ctx.commands.alarm_led);
    }
}
