//! Application service, the hexagonal core.
//!
//! [`AlarmController`] owns the siren FSM, the temperature averager, the
//! code guard, the serial console and the shared context. It exposes a
//! hardware-agnostic API. All I/O flows through port traits injected at
//! call sites, making the whole controller testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │        AlarmController        │
//! ActuatorPort ◀──│ Trigger · FSM · Guard · Console│◀─▶ LineTransport
//!                 └──────────────────────────────┘
//! ```

use std::time::Duration;

use log::{info, trace, warn};

use crate::alarm::code::Code;
use crate::alarm::guard::{CodeGuard, Verdict};
use crate::alarm::trigger;
use crate::alarm::{AlarmState, DetectorFlags};
use crate::config::{AlarmConfig, DEFAULT_CODE, MAX_FAILED_ATTEMPTS, TICK_PERIOD_MS};
use crate::console::{Console, ConsoleOutcome};
use crate::fsm::context::{ActuatorCommands, FsmContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::sensors::temperature::TemperatureAverager;
use crate::transport::LineTransport;

use super::events::{AppEvent, CodeSource};
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// AlarmController
// ───────────────────────────────────────────────────────────────

/// The alarm controller orchestrates all domain logic.
pub struct AlarmController {
    fsm: Fsm,
    ctx: FsmContext,
    averager: TemperatureAverager,
    guard: CodeGuard,
    console: Console,
    tick_count: u64,
}

impl AlarmController {
    /// Construct the controller from configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: AlarmConfig) -> Self {
        let averager = TemperatureAverager::new();
        let guard = CodeGuard::new(DEFAULT_CODE, MAX_FAILED_ATTEMPTS);
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Idle);

        Self {
            fsm,
            ctx,
            averager,
            guard,
            console: Console::new(),
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the siren FSM in Idle.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AlarmController started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full cycle: read sensors → averager → triggers → siren FSM
    /// → keypad → console → actuators.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`]; this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick<T: LineTransport>(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        serial: &mut T,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        let prev_state = self.fsm.current_state();
        let was_on = self.ctx.alarm.is_on();
        let was_blocked = self.guard.is_blocked();

        // 1. Read sensors via SensorPort
        self.ctx.sensors = hw.read_all();

        // 2. Temperature average
        self.averager.sample(self.ctx.sensors.temperature_raw);
        self.ctx.temperature_c = self.averager.celsius();

        // 3. Alarm triggers (latch)
        let triggers = trigger::evaluate(&mut self.ctx);
        if !was_on && self.ctx.alarm.is_on() {
            sink.emit(&AppEvent::AlarmRaised(triggers));
        }

        // 4. Siren / LED driver
        self.fsm.tick(&mut self.ctx);

        // 5. Keypad code entry
        if let Some(verdict) = self.guard.update_keypad(&mut self.ctx) {
            emit_verdict(verdict, CodeSource::Keypad, sink);
        }

        // 6. Serial console
        match self.console.poll(serial, &mut self.ctx, &mut self.guard, &mut *hw) {
            Some(ConsoleOutcome::Verified(verdict)) => {
                emit_verdict(verdict, CodeSource::Serial, sink);
            }
            Some(ConsoleOutcome::CodeReplaced(code)) => {
                sink.emit(&AppEvent::CodeReplaced(code));
            }
            Some(ConsoleOutcome::CaptureTimedOut) => {
                sink.emit(&AppEvent::CodeEntryTimedOut);
            }
            None => {}
        }

        if !was_blocked && self.guard.is_blocked() {
            sink.emit(&AppEvent::SystemBlocked {
                failures: self.guard.failures(),
            });
        }

        // 7. Apply actuator commands via ActuatorPort
        self.apply_actuators(hw);

        // 8. Emit state change if the FSM moved
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }

        trace!(
            "tick {} | alarm={:?} siren={:?} T={:.2}",
            self.tick_count, self.ctx.alarm, self.ctx.commands.siren, self.ctx.temperature_c
        );
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn alarm_state(&self) -> AlarmState {
        self.ctx.alarm
    }

    /// Current siren driver state.
    pub fn siren_state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn failed_attempts(&self) -> u8 {
        self.guard.failures()
    }

    pub fn is_blocked(&self) -> bool {
        self.guard.is_blocked()
    }

    pub fn secret_code(&self) -> Code {
        self.guard.secret()
    }

    /// Averaged temperature in Celsius.
    pub fn temperature_c(&self) -> f32 {
        self.ctx.temperature_c
    }

    pub fn detectors(&self) -> DetectorFlags {
        self.ctx.detectors
    }

    /// Output levels requested on the last tick.
    pub fn commands(&self) -> ActuatorCommands {
        self.ctx.commands
    }

    /// Milliseconds accumulated towards the next alarm LED toggle.
    pub fn accumulated_alarm_ms(&self) -> u32 {
        self.ctx.accumulated_alarm_ms
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &AlarmConfig {
        &self.ctx.config
    }

    /// A serial code entry is in progress.
    pub fn is_capturing(&self) -> bool {
        self.console.is_capturing()
    }

    /// Sleep interval between ticks.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(u64::from(TICK_PERIOD_MS))
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate requested output levels into port calls.
    fn apply_actuators(&self, hw: &mut impl ActuatorPort) {
        let cmds = &self.ctx.commands;
        hw.set_siren(cmds.siren);
        hw.set_alarm_led(cmds.alarm_led);
        hw.set_incorrect_code_led(cmds.incorrect_code_led);
        hw.set_system_blocked_led(cmds.system_blocked_led);
    }
}

fn emit_verdict(verdict: Verdict, source: CodeSource, sink: &mut impl EventSink) {
    match verdict {
        Verdict::Accepted => sink.emit(&AppEvent::AlarmCleared(source)),
        Verdict::Rejected { failures } => {
            sink.emit(&AppEvent::CodeRejected { source, failures });
        }
        Verdict::Blocked => warn!("{:?} code attempt ignored, system blocked", source),
    }
}
