//! Single-byte console commands.

/// A decoded command byte. Anything unrecognised maps to [`Command::Help`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `'1'`: report the alarm latch.
    AlarmState,
    /// `'2'`: report the raw gas detector level.
    GasState,
    /// `'3'`: report this tick's over-temperature comparison.
    OverTempState,
    /// `'4'`: capture and verify a code.
    EnterCode,
    /// `'5'`: capture and install a new code.
    NewCode,
    /// `'p'` / `'P'`
    Potentiometer,
    /// `'c'` / `'C'`
    Celsius,
    /// `'f'` / `'F'`
    Fahrenheit,
    Help,
}

impl Command {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'1' => Self::AlarmState,
            b'2' => Self::GasState,
            b'3' => Self::OverTempState,
            b'4' => Self::EnterCode,
            b'5' => Self::NewCode,
            b'p' | b'P' => Self::Potentiometer,
            b'c' | b'C' => Self::Celsius,
            b'f' | b'F' => Self::Fahrenheit,
            _ => Self::Help,
        }
    }
}
