//! LM35 temperature averager.
//!
//! The LM35 outputs 10 mV/°C; the ADC reports it normalised to full scale
//! (`[0, 1]` over 3.3 V). Raw samples go into a fixed ring of
//! [`SAMPLE_WINDOW`] slots and the mean over every slot is recomputed on
//! each sample.
//!
//! The ring starts zero-filled, so for the first `SAMPLE_WINDOW` samples
//! the average is biased low (warm-up). This is not corrected.

use crate::config::{ADC_FULL_SCALE_VOLTS, SENSOR_VOLTS_PER_DEGREE};

/// Number of raw samples averaged.
pub const SAMPLE_WINDOW: usize = 100;

pub struct TemperatureAverager {
    ring: [f32; SAMPLE_WINDOW],
    head: usize,
    average: f32,
}

impl Default for TemperatureAverager {
    fn default() -> Self {
        Self::new()
    }
}

impl TemperatureAverager {
    pub fn new() -> Self {
        Self {
            ring: [0.0; SAMPLE_WINDOW],
            head: 0,
            average: 0.0,
        }
    }

    /// Overwrite the oldest slot with `raw` and return the new average.
    pub fn sample(&mut self, raw: f32) -> f32 {
        self.ring[self.head] = raw;
        self.head = (self.head + 1) % SAMPLE_WINDOW;

        let sum: f32 = self.ring.iter().sum();
        self.average = sum / SAMPLE_WINDOW as f32;
        self.average
    }

    /// Current average of the raw (normalised) readings.
    pub fn average(&self) -> f32 {
        self.average
    }

    /// Current average in degrees Celsius.
    pub fn celsius(&self) -> f32 {
        self.to_celsius(self.average)
    }

    /// Scale a normalised reading to degrees Celsius.
    pub fn to_celsius(&self, reading: f32) -> f32 {
        reading * ADC_FULL_SCALE_VOLTS / SENSOR_VOLTS_PER_DEGREE
    }
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}
