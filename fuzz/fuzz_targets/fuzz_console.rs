//! Fuzz target: `AlarmController::tick` driven by arbitrary serial bytes.
//!
//! Every input byte is both queued on the serial line and decoded into
//! the board inputs for one tick, so console commands, code captures and
//! keypad attempts interleave arbitrarily. The controller must never
//! panic, never count past the failure threshold and never unblock.
//!
//! cargo fuzz run fuzz_console

#![no_main]

use std::collections::VecDeque;

use alarmctl::adapters::sim::SimHardware;
use alarmctl::app::events::AppEvent;
use alarmctl::app::ports::EventSink;
use alarmctl::app::service::AlarmController;
use alarmctl::config::{AlarmConfig, MAX_FAILED_ATTEMPTS};
use alarmctl::transport::LineTransport;
use libfuzzer_sys::fuzz_target;

struct Scripted(VecDeque<u8>);

impl LineTransport for Scripted {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
        let mut n = 0;
        while n < buf.len() {
            let Some(b) = self.0.pop_front() else { break };
            buf[n] = b;
            n += 1;
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }

    fn available(&mut self) -> bool {
        !self.0.is_empty()
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let config = AlarmConfig {
        code_entry_timeout_ms: Some(50),
    };
    let max = MAX_FAILED_ATTEMPTS;
    let mut app = AlarmController::new(config);
    let mut hw = SimHardware::new();
    let mut serial = Scripted(data.iter().copied().collect());
    app.start(&mut Discard);

    let mut was_blocked = false;
    for &b in data.iter().chain(std::iter::repeat(&0).take(16)) {
        hw.set_gas(b & 0x01 != 0);
        hw.set_test_button(b & 0x02 != 0);
        hw.set_confirm_key(b & 0x04 != 0);
        hw.set_code_keys([b & 0x08 != 0, b & 0x10 != 0, b & 0x20 != 0, b & 0x40 != 0]);
        hw.set_temperature_raw(f32::from(b) / 255.0);

        app.tick(&mut hw, &mut serial, &mut Discard);

        assert!(app.failed_attempts() <= max);
        assert!(!was_blocked || app.is_blocked(), "system unblocked");
        was_blocked = app.is_blocked();
    }
});
