//! End-to-end tests for the sensors → triggers → siren/LED pipeline.

use alarmctl::alarm::AlarmState;
use alarmctl::app::events::AppEvent;
use alarmctl::fsm::StateId;
use alarmctl::fsm::context::SirenDrive;

use crate::mock_hw::Bench;

#[test]
fn quiet_inputs_keep_everything_off() {
    let mut b = Bench::new();
    b.settle_temperature(23.0);
    assert_eq!(b.app.alarm_state(), AlarmState::Off);
    assert_eq!(b.app.siren_state(), StateId::Idle);
    assert_eq!(b.hw.siren(), SirenDrive::Released);
    assert!(!b.hw.alarm_led());
    assert_eq!(
        b.sink.events,
        vec![AppEvent::Started(StateId::Idle)],
        "no events besides start-up"
    );
}

#[test]
fn gas_sounds_siren_and_blinks_once_per_second() {
    let mut b = Bench::new();
    b.hw.set_gas(true);

    b.tick();
    assert_eq!(b.app.alarm_state(), AlarmState::On);
    assert_eq!(b.hw.siren(), SirenDrive::Sounding);
    assert!(b.app.detectors().gas_detected);
    assert!(!b.app.detectors().over_temp_detected);

    // First toggle on tick 100, second on tick 200.
    b.tick_n(98);
    assert!(!b.hw.alarm_led());
    b.tick();
    assert!(b.hw.alarm_led());
    b.tick_n(99);
    assert!(b.hw.alarm_led());
    b.tick();
    assert!(!b.hw.alarm_led());
    assert_eq!(b.hw.siren(), SirenDrive::Sounding);
}

#[test]
fn alarm_stays_latched_after_gas_clears() {
    let mut b = Bench::new();
    b.hw.set_gas(true);
    b.tick();
    b.hw.set_gas(false);
    b.tick_n(500);
    assert_eq!(b.app.alarm_state(), AlarmState::On);
    assert_eq!(b.hw.siren(), SirenDrive::Sounding);
    assert!(b.app.detectors().gas_detected);
}

#[test]
fn averaged_temperature_raises_alarm_once_above_limit() {
    let mut b = Bench::new();
    // 60 °C fills the zero-padded window linearly: 0.6 °C per tick.
    b.hw.inputs.temperature_raw = 60.0 * 0.01 / 3.3;
    b.tick_n(83);
    assert_eq!(b.app.alarm_state(), AlarmState::Off);
    assert!(b.app.temperature_c() < 50.0);

    b.tick();
    assert_eq!(b.app.alarm_state(), AlarmState::On);
    assert!(b.app.detectors().over_temp_detected);
    assert!(!b.app.detectors().gas_detected);
    assert!(b.sink.events.iter().any(|e| matches!(
        e,
        AppEvent::AlarmRaised(t) if t.over_temp && !t.gas && !t.test
    )));

    // Over-temperature alone blinks every 500 ms, activation tick included.
    b.tick_n(48);
    assert!(!b.hw.alarm_led());
    b.tick();
    assert!(b.hw.alarm_led());
}

#[test]
fn test_button_simulates_both_conditions() {
    let mut b = Bench::new();
    b.hw.inputs.test_button = true;
    b.tick();
    b.hw.inputs.test_button = false;
    let d = b.app.detectors();
    assert!(d.gas_detected && d.over_temp_detected);

    // Both conditions: fastest blink, 100 ms.
    b.tick_n(8);
    assert!(!b.hw.alarm_led());
    b.tick();
    assert!(b.hw.alarm_led());
    b.tick_n(10);
    assert!(!b.hw.alarm_led());
}

#[test]
fn alarm_raised_event_fires_once_per_episode() {
    let mut b = Bench::new();
    b.hw.set_gas(true);
    b.tick_n(50);
    assert_eq!(
        b.sink.count(|e| matches!(e, AppEvent::AlarmRaised(_))),
        1
    );
    assert_eq!(
        b.sink.count(|e| matches!(
            e,
            AppEvent::StateChanged { from: StateId::Idle, to: StateId::Alarming }
        )),
        1
    );
}

#[test]
fn clearing_the_alarm_resets_siren_led_and_flags() {
    let mut b = Bench::new();
    b.hw.inputs.test_button = true;
    b.tick();
    b.hw.inputs.test_button = false;
    b.tick_n(15);
    assert!(b.hw.alarm_led());

    let out = b.command(b"41100");
    assert!(out.ends_with("\r\nThe code is correct\r\n\r\n"));
    assert_eq!(b.app.alarm_state(), AlarmState::Off);

    // The siren driver notices on the following tick.
    b.tick();
    assert_eq!(b.app.siren_state(), StateId::Idle);
    assert_eq!(b.hw.siren(), SirenDrive::Released);
    assert!(!b.hw.alarm_led());
    assert!(!b.app.detectors().any());
    assert_eq!(b.app.accumulated_alarm_ms(), 0);
}

#[test]
fn tick_counter_and_period() {
    let mut b = Bench::new();
    b.tick_n(7);
    assert_eq!(b.app.tick_count(), 7);
    assert_eq!(b.app.tick_period(), std::time::Duration::from_millis(10));
}
