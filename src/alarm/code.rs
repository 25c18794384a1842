//! Four-key binary code (keys A, B, C, D).

use core::fmt;

/// Number of code keys on the pad.
pub const CODE_LENGTH: usize = 4;

/// A code: one digit per key, `true` = key pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Code([bool; CODE_LENGTH]);

impl Code {
    pub const fn new(digits: [bool; CODE_LENGTH]) -> Self {
        Self(digits)
    }

    pub fn digits(&self) -> [bool; CODE_LENGTH] {
        self.0
    }

    pub fn digit(&self, index: usize) -> Option<bool> {
        self.0.get(index).copied()
    }

    /// Overwrite one digit. Returns `false` if `index` is out of range.
    pub fn set_digit(&mut self, index: usize, value: bool) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Element-wise comparison of an entered code against this one.
    pub fn matches(&self, entered: &Code) -> bool {
        self.0.iter().zip(entered.0.iter()).all(|(a, b)| a == b)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &d in &self.0 {
            f.write_str(if d { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Decode one serial code byte: `'1'` = pressed, `'0'` = not pressed.
pub fn digit_from_byte(byte: u8) -> Option<bool> {
    match byte {
        b'1' => Some(true),
        b'0' => Some(false),
        _ => None,
    }
}
