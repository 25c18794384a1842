//! Serial command interpreter through the full controller.

use alarmctl::alarm::AlarmState;
use alarmctl::alarm::code::Code;
use alarmctl::app::events::{AppEvent, CodeSource};
use alarmctl::config::AlarmConfig;
use alarmctl::fsm::context::SirenDrive;

use crate::mock_hw::Bench;

const CODE_INSTRUCTIONS: &str = "First enter 'A', then 'B', then 'C', and finally 'D' button\r\n\
In each case type 1 for pressed or 0 for not pressed\r\n\
For example, for 'A' = pressed, 'B' = pressed, 'C' = not pressed, \
'D' = not pressed, enter '1', then '1', then '0', and finally '0'\r\n\r\n";

#[test]
fn alarm_state_query() {
    let mut b = Bench::new();
    assert_eq!(b.command(b"1"), "The alarm is not activated\r\n");
    b.hw.set_gas(true);
    b.tick();
    assert_eq!(b.command(b"1"), "The alarm is activated\r\n");
}

#[test]
fn gas_query_reports_raw_input_not_latch() {
    let mut b = Bench::new();
    b.hw.set_gas(true);
    assert_eq!(b.command(b"2"), "Gas is being detected\r\n");
    b.hw.set_gas(false);
    assert_eq!(b.command(b"2"), "Gas is not being detected\r\n");
    assert_eq!(b.app.alarm_state(), AlarmState::On);
}

#[test]
fn over_temperature_query_is_instantaneous() {
    let mut b = Bench::new();
    assert_eq!(b.command(b"3"), "Temperature is below the maximum level\r\n");
    b.settle_temperature(70.0);
    assert_eq!(b.command(b"3"), "Temperature is above the maximum level\r\n");
    b.settle_temperature(20.0);
    assert_eq!(b.command(b"3"), "Temperature is below the maximum level\r\n");
    // The alarm itself stays latched.
    assert_eq!(b.app.alarm_state(), AlarmState::On);
}

#[test]
fn correct_serial_code_full_transcript() {
    let mut b = Bench::new();
    b.hw.inputs.test_button = true;
    b.tick();
    b.hw.inputs.test_button = false;

    let out = b.command(b"41100");
    let expected = format!(
        "Please enter the code sequence.\r\n{}****\r\nThe code is correct\r\n\r\n",
        CODE_INSTRUCTIONS
    );
    assert_eq!(out, expected);
    assert_eq!(b.app.alarm_state(), AlarmState::Off);
    assert_eq!(b.app.failed_attempts(), 0);
    assert!(!b.hw.incorrect_code_led());
    assert!(b
        .sink
        .events
        .contains(&AppEvent::AlarmCleared(CodeSource::Serial)));
}

#[test]
fn wrong_serial_code_counts_and_lights_led() {
    let mut b = Bench::new();
    let out = b.command(b"41101");
    assert!(out.ends_with("****\r\nThe code is incorrect\r\n\r\n"));
    assert_eq!(b.app.failed_attempts(), 1);
    assert!(b.hw.incorrect_code_led());
}

#[test]
fn non_binary_digit_is_a_mismatch() {
    let mut b = Bench::new();
    let out = b.command(b"411x0");
    assert!(out.ends_with("\r\nThe code is incorrect\r\n\r\n"));
    assert_eq!(b.app.failed_attempts(), 1);
}

#[test]
fn new_code_then_verify_round_trip() {
    let mut b = Bench::new();
    let out = b.command(b"50110");
    assert_eq!(
        out,
        format!(
            "Please enter new code sequence\r\n{}****\r\nNew code generated\r\n\r\n",
            CODE_INSTRUCTIONS
        )
    );
    assert_eq!(b.app.secret_code(), Code::new([false, true, true, false]));
    assert!(b
        .sink
        .events
        .contains(&AppEvent::CodeReplaced(Code::new([false, true, true, false]))));

    b.hw.set_gas(true);
    b.tick();
    b.hw.set_gas(false);

    assert!(b.command(b"41100").ends_with("The code is incorrect\r\n\r\n"));
    assert!(b.command(b"40110").ends_with("The code is correct\r\n\r\n"));
    assert_eq!(b.app.alarm_state(), AlarmState::Off);
    assert_eq!(b.app.failed_attempts(), 0);
}

#[test]
fn new_code_keeps_digits_for_invalid_bytes() {
    let mut b = Bench::new();
    b.command(b"5?0?1");
    // Default 1100: positions 0 and 2 untouched.
    assert_eq!(b.app.secret_code(), Code::new([true, false, false, true]));
}

#[test]
fn temperature_readings_two_decimals() {
    let mut b = Bench::new();
    b.settle_temperature(23.456);
    assert_eq!(b.command(b"c"), "Temperature: 23.46 \u{b0} C\r\n");
    assert_eq!(b.command(b"C"), "Temperature: 23.46 \u{b0} C\r\n");
    assert_eq!(b.command(b"f"), "Temperature: 74.22 \u{b0} F\r\n");
    assert_eq!(b.command(b"F"), "Temperature: 74.22 \u{b0} F\r\n");
}

#[test]
fn potentiometer_reading() {
    let mut b = Bench::new();
    b.hw.potentiometer = 0.3333;
    assert_eq!(b.command(b"p"), "Potentiometer: 0.33\r\n");
    b.hw.potentiometer = 1.0;
    assert_eq!(b.command(b"P"), "Potentiometer: 1.00\r\n");
}

#[test]
fn unknown_command_lists_help() {
    let mut b = Bench::new();
    let out = b.command(b"x");
    assert!(out.starts_with("Available commands:\r\n"));
    assert!(out.contains("Press '4' to enter the code sequence\r\n"));
    assert!(out.ends_with("Press 'c' or 'C' to get lm35 reading in Celsius\r\n\r\n"));
}

#[test]
fn at_most_one_command_per_tick() {
    let mut b = Bench::new();
    b.serial.send(b"11");
    b.tick();
    assert_eq!(b.serial.take_output(), "The alarm is not activated\r\n");
    b.tick();
    assert_eq!(b.serial.take_output(), "The alarm is not activated\r\n");
    b.tick();
    assert_eq!(b.serial.take_output(), "");
}

#[test]
fn slow_typist_does_not_stall_the_controller() {
    let mut b = Bench::new();
    b.command(b"4");
    assert!(b.app.is_capturing());

    // Gas arrives mid-entry: the siren still starts.
    b.hw.set_gas(true);
    b.tick_n(3);
    assert_eq!(b.app.alarm_state(), AlarmState::On);
    assert_eq!(b.hw.siren(), SirenDrive::Sounding);
    b.hw.set_gas(false);

    assert_eq!(b.command(b"1"), "*");
    assert_eq!(b.command(b"10"), "**");
    assert!(b.app.is_capturing());
    let out = b.command(b"0");
    assert_eq!(out, "*\r\nThe code is correct\r\n\r\n");
    assert!(!b.app.is_capturing());
    assert_eq!(b.app.alarm_state(), AlarmState::Off);
}

#[test]
fn five_serial_failures_block() {
    let mut b = Bench::new();
    b.hw.set_gas(true);
    b.tick();
    b.hw.set_gas(false);

    for _ in 0..5 {
        b.command(b"40000");
    }
    assert!(b.app.is_blocked());
    assert!(b.hw.system_blocked_led());
    assert_eq!(
        b.sink.count(|e| matches!(e, AppEvent::SystemBlocked { failures: 5 })),
        1
    );

    // A whole code frame gets exactly one reply.
    assert_eq!(b.command(b"41100"), "The system is blocked\r\n");
    assert!(!b.app.is_capturing());
    b.tick_n(5);
    assert_eq!(b.serial.take_output(), "");
    assert_eq!(b.app.failed_attempts(), 5);
    assert_eq!(b.app.alarm_state(), AlarmState::On);
    assert_eq!(b.command(b"1"), "The alarm is activated\r\n");
}

#[test]
fn blocked_code_digits_are_not_read_as_commands() {
    let mut b = Bench::new();
    b.hw.set_gas(true);
    b.tick();
    b.hw.set_gas(false);
    for _ in 0..5 {
        b.command(b"40000");
    }
    assert!(b.app.is_blocked());

    assert_eq!(b.command(b"4"), "");
    assert!(b.app.is_capturing());
    assert_eq!(b.command(b"12"), "");
    assert_eq!(b.command(b"x1"), "The system is blocked\r\n");
    assert!(!b.app.is_capturing());
    assert_eq!(b.command(b"2"), "Gas is not being detected\r\n");
}

#[test]
fn block_reached_mid_capture_refuses_the_code() {
    let mut b = Bench::new();
    b.hw.set_gas(true);
    b.tick();
    b.hw.set_gas(false);
    for _ in 0..4 {
        b.command(b"40000");
    }

    // Start a serial entry, then exhaust the last attempt on the keypad.
    b.command(b"41");
    b.hw.press([true; 4], false);
    b.tick();
    b.hw.press([false; 4], true);
    b.tick();
    assert!(b.app.is_blocked());

    let out = b.command(b"100");
    assert_eq!(out, "***The system is blocked\r\n");
    assert_eq!(b.app.alarm_state(), AlarmState::On);
}

#[test]
fn stalled_entry_times_out_without_penalty() {
    let config = AlarmConfig {
        code_entry_timeout_ms: Some(100),
    };
    let mut b = Bench::with_config(config);
    b.command(b"41");
    b.tick_n(9);
    assert!(b.app.is_capturing());
    assert_eq!(b.serial.take_output(), "");

    b.tick();
    assert!(!b.app.is_capturing());
    assert_eq!(b.serial.take_output(), "\r\nCode entry timed out\r\n\r\n");
    assert_eq!(b.app.failed_attempts(), 0);
    assert!(!b.hw.incorrect_code_led());
    assert!(b.sink.events.contains(&AppEvent::CodeEntryTimedOut));
}

#[test]
fn without_timeout_entry_waits_forever() {
    let mut b = Bench::new();
    b.command(b"4");
    b.tick_n(10_000);
    assert!(b.app.is_capturing());
    assert!(b.command(b"1100").ends_with("The code is correct\r\n\r\n"));
}

#[test]
fn partial_writes_still_deliver_whole_response() {
    let mut b = Bench::new();
    b.serial.max_write = Some(3);
    assert_eq!(b.command(b"1"), "The alarm is not activated\r\n");
}
