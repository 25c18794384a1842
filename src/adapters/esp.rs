//! ESP-IDF board bring-up.
//!
//! Builds a [`GpioBoard`] from `esp-idf-hal` pin drivers using the pin map
//! in [`crate::pins`], plus two ADC1 oneshot channels driven through the
//! raw `esp_idf_svc::sys` bindings.

use std::rc::Rc;

use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Input, InputOutput, Output, PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::sys::*;
use log::{info, warn};

use super::gpio::{AnalogChannel, BoardPins, GpioBoard};
use crate::error::{Error, Result, SensorError};
use crate::pins;

/// Inputs use IO-capable pins so the internal pull resistors are available.
pub type EspInput = PinDriver<'static, AnyIOPin, Input>;
pub type EspOutput = PinDriver<'static, AnyOutputPin, Output>;
pub type EspOpenDrain = PinDriver<'static, AnyIOPin, InputOutput>;

/// The concrete board type on the target.
pub type EspBoard = GpioBoard<EspInput, EspOutput, EspOpenDrain, EspAdcChannel>;

// ── ADC (oneshot) ─────────────────────────────────────────────

struct AdcUnit {
    handle: adc_oneshot_unit_handle_t,
}

impl AdcUnit {
    fn new() -> Result<Self> {
        let init_cfg = adc_oneshot_unit_init_cfg_t {
            unit_id: adc_unit_t_ADC_UNIT_1,
            ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
            ..Default::default()
        };
        let mut handle: adc_oneshot_unit_handle_t = core::ptr::null_mut();
        // SAFETY: `handle` is a valid out-pointer; ADC1 is claimed once at boot.
        let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &mut handle) };
        if ret != ESP_OK as i32 {
            return Err(Error::Init("ADC1 unit"));
        }
        Ok(Self { handle })
    }

    fn configure(&self, channel: u32) -> Result<()> {
        let chan_cfg = adc_oneshot_chan_cfg_t {
            atten: adc_atten_t_ADC_ATTEN_DB_12,
            bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
        };
        // SAFETY: handle was produced by adc_oneshot_new_unit and is live.
        let ret = unsafe { adc_oneshot_config_channel(self.handle, channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(Error::Init("ADC1 channel"));
        }
        Ok(())
    }
}

impl Drop for AdcUnit {
    fn drop(&mut self) {
        // SAFETY: handle is live and no channel outlives the unit (Rc).
        unsafe {
            adc_oneshot_del_unit(self.handle);
        }
    }
}

/// One ADC1 channel, normalised over the 12-bit range.
pub struct EspAdcChannel {
    unit: Rc<AdcUnit>,
    channel: u32,
}

impl AnalogChannel for EspAdcChannel {
    fn read_normalised(&mut self) -> Result<f32> {
        let mut raw: i32 = 0;
        // SAFETY: single-threaded main-loop access to a configured channel.
        let ret = unsafe { adc_oneshot_read(self.unit.handle, self.channel, &mut raw) };
        if ret != ESP_OK as i32 {
            return Err(SensorError::AdcReadFailed.into());
        }
        Ok(raw.clamp(0, pins::ADC_MAX_RAW as i32) as f32 / pins::ADC_MAX_RAW)
    }
}

// ── GPIO ──────────────────────────────────────────────────────

fn input(gpio: i32, pull: Pull) -> Result<EspInput> {
    // SAFETY: every number in `pins` is used exactly once, and the
    // peripheral singleton is claimed in `take_board` before this runs.
    let pin = unsafe { AnyIOPin::new(gpio) };
    let mut driver = PinDriver::input(pin).map_err(|_| Error::Init("GPIO input"))?;
    driver.set_pull(pull).map_err(|_| Error::Init("GPIO pull"))?;
    Ok(driver)
}

fn output(gpio: i32) -> Result<EspOutput> {
    // SAFETY: see `input`.
    let pin = unsafe { AnyOutputPin::new(gpio) };
    let mut driver = PinDriver::output(pin).map_err(|_| Error::Init("GPIO output"))?;
    driver.set_low().map_err(|_| Error::Init("GPIO output"))?;
    Ok(driver)
}

fn open_drain(gpio: i32) -> Result<EspOpenDrain> {
    // SAFETY: see `input`.
    let pin = unsafe { AnyIOPin::new(gpio) };
    let mut driver = PinDriver::input_output_od(pin).map_err(|_| Error::Init("GPIO open-drain"))?;
    // Released: the siren stays silent until the controller says otherwise.
    driver.set_high().map_err(|_| Error::Init("GPIO open-drain"))?;
    Ok(driver)
}

/// Claim the peripherals and configure every pin of the alarm board.
pub fn take_board() -> Result<EspBoard> {
    if Peripherals::take().is_err() {
        warn!("esp: peripherals already taken");
        return Err(Error::Init("peripherals already taken"));
    }

    let adc = Rc::new(AdcUnit::new()?);
    adc.configure(pins::POT_ADC_CHANNEL)?;
    adc.configure(pins::TEMP_ADC_CHANNEL)?;

    let board = GpioBoard::new(BoardPins {
        confirm_key: input(pins::CONFIRM_KEY_GPIO, Pull::Down)?,
        code_keys: [
            input(pins::KEY_A_GPIO, Pull::Down)?,
            input(pins::KEY_B_GPIO, Pull::Down)?,
            input(pins::KEY_C_GPIO, Pull::Down)?,
            input(pins::KEY_D_GPIO, Pull::Down)?,
        ],
        test_button: input(pins::TEST_BUTTON_GPIO, Pull::Down)?,
        gas_sensor: input(pins::GAS_SENSOR_GPIO, Pull::Floating)?,
        alarm_led: output(pins::ALARM_LED_GPIO)?,
        incorrect_code_led: output(pins::INCORRECT_CODE_LED_GPIO)?,
        system_blocked_led: output(pins::SYSTEM_BLOCKED_LED_GPIO)?,
        siren: open_drain(pins::SIREN_GPIO)?,
        potentiometer: EspAdcChannel {
            unit: Rc::clone(&adc),
            channel: pins::POT_ADC_CHANNEL,
        },
        temperature: EspAdcChannel {
            unit: adc,
            channel: pins::TEMP_ADC_CHANNEL,
        },
    });

    info!("esp: board configured");
    Ok(board)
}
