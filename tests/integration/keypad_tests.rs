//! Physical keypad code entry through the full controller.

use alarmctl::alarm::AlarmState;
use alarmctl::app::events::{AppEvent, CodeSource};

use crate::mock_hw::Bench;

const SECRET: [bool; 4] = [true, true, false, false];
const WRONG: [bool; 4] = [true, false, true, false];
const CLEAR_GESTURE: [bool; 4] = [true; 4];

/// Raise the alarm with a short gas pulse.
fn alarmed() -> Bench {
    let mut b = Bench::new();
    b.hw.set_gas(true);
    b.tick();
    b.hw.set_gas(false);
    b.tick();
    assert_eq!(b.app.alarm_state(), AlarmState::On);
    b
}

fn wrong_attempt_then_clear(b: &mut Bench) {
    b.hw.press(WRONG, true);
    b.tick();
    b.hw.press(CLEAR_GESTURE, false);
    b.tick();
}

#[test]
fn correct_code_turns_alarm_off() {
    let mut b = alarmed();
    b.hw.press(SECRET, true);
    b.tick();
    assert_eq!(b.app.alarm_state(), AlarmState::Off);
    assert_eq!(b.app.failed_attempts(), 0);
    assert!(b
        .sink
        .events
        .contains(&AppEvent::AlarmCleared(CodeSource::Keypad)));
}

#[test]
fn keys_without_confirm_do_nothing() {
    let mut b = alarmed();
    b.hw.press(SECRET, false);
    b.tick_n(10);
    assert_eq!(b.app.alarm_state(), AlarmState::On);
}

#[test]
fn keypad_is_ignored_while_alarm_off() {
    let mut b = Bench::new();
    b.hw.press(WRONG, true);
    b.tick_n(10);
    assert_eq!(b.app.failed_attempts(), 0);
    assert!(!b.hw.incorrect_code_led());
}

#[test]
fn held_wrong_code_counts_once() {
    let mut b = alarmed();
    b.hw.press(WRONG, true);
    b.tick_n(25);
    assert_eq!(b.app.failed_attempts(), 1);
    assert!(b.hw.incorrect_code_led());
    assert_eq!(
        b.sink.count(|e| matches!(e, AppEvent::CodeRejected { .. })),
        1
    );
}

#[test]
fn incorrect_led_locks_keypad_until_clear_gesture() {
    let mut b = alarmed();
    b.hw.press(WRONG, true);
    b.tick();
    b.hw.release_keys();
    b.tick();

    // The right code is not evaluated while the incorrect-code LED is lit.
    b.hw.press(SECRET, true);
    b.tick();
    assert_eq!(b.app.alarm_state(), AlarmState::On);
    assert!(b.hw.incorrect_code_led());

    b.hw.press(CLEAR_GESTURE, false);
    b.tick();
    assert!(!b.hw.incorrect_code_led());

    b.hw.press(SECRET, true);
    b.tick();
    assert_eq!(b.app.alarm_state(), AlarmState::Off);
    assert_eq!(b.app.failed_attempts(), 0);
}

#[test]
fn five_keypad_failures_block_the_system() {
    let mut b = alarmed();
    for _ in 0..4 {
        wrong_attempt_then_clear(&mut b);
    }
    assert!(!b.app.is_blocked());
    assert!(!b.hw.system_blocked_led());

    b.hw.press(WRONG, true);
    b.tick();
    assert!(b.app.is_blocked());
    assert!(b.hw.system_blocked_led());
    assert_eq!(
        b.sink.count(|e| matches!(e, AppEvent::SystemBlocked { failures: 5 })),
        1
    );

    // Nothing gets through any more.
    b.hw.press(CLEAR_GESTURE, false);
    b.tick();
    b.hw.press(SECRET, true);
    b.tick_n(10);
    assert_eq!(b.app.alarm_state(), AlarmState::On);
    assert_eq!(b.app.failed_attempts(), 5);
    assert!(b.hw.system_blocked_led());
    assert_eq!(
        b.sink.count(|e| matches!(e, AppEvent::SystemBlocked { .. })),
        1
    );
}

#[test]
fn keypad_and_serial_share_the_failure_counter() {
    let mut b = alarmed();
    b.command(b"40000");
    b.command(b"40000");
    assert_eq!(b.app.failed_attempts(), 2);

    b.hw.press(CLEAR_GESTURE, false);
    b.tick();
    for _ in 0..2 {
        wrong_attempt_then_clear(&mut b);
    }
    assert_eq!(b.app.failed_attempts(), 4);

    b.hw.press(WRONG, true);
    b.tick();
    assert!(b.app.is_blocked());
}

#[test]
fn success_resets_counter_after_failures() {
    let mut b = alarmed();
    wrong_attempt_then_clear(&mut b);
    wrong_attempt_then_clear(&mut b);
    assert_eq!(b.app.failed_attempts(), 2);

    b.hw.press(SECRET, true);
    b.tick();
    assert_eq!(b.app.failed_attempts(), 0);
    assert_eq!(b.app.alarm_state(), AlarmState::Off);
}
