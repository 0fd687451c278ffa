//! Packed status word published to the output port.
//!
//! Layout (bit-exact, other bits zero):
//!
//! ```text
//!  22      21..15        10..4
//! alarm | temperature | threshold
//! ```
//!
//! Temperature and threshold are truncated to 7 bits, so out-of-range values wrap
//! modulo 128 rather than saturate.

use core::fmt;

/// Width mask applied to temperature and threshold before packing.
pub const FIELD_MASK: i32 = 0x7F;

/// Bit position of the alarm flag.
pub const ALARM_SHIFT: u32 = 22;

/// Bit position of the lowest temperature bit.
pub const TEMPERATURE_SHIFT: u32 = 15;

/// Bit position of the lowest threshold bit.
pub const THRESHOLD_SHIFT: u32 = 4;

/// Shift used for the "pixels" console diagnostics.
pub const PIXEL_SHIFT: u32 = 4;

/// Packed {alarm, temperature, threshold} status word.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusWord(u32);

impl StatusWord {
    /// Pack the three fields.
    pub const fn encode(alarm: bool, temperature: i32, threshold: i32) -> Self {
        let alarm = alarm as u32;
        let temperature = (temperature & FIELD_MASK) as u32;
        let threshold = (threshold & FIELD_MASK) as u32;
        Self(
            (alarm << ALARM_SHIFT)
                | (temperature << TEMPERATURE_SHIFT)
                | (threshold << THRESHOLD_SHIFT),
        )
    }

    /// Wrap a raw word read back from hardware.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw value written to the output channel.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Alarm flag (bit 22).
    pub const fn alarm(self) -> bool {
        (self.0 >> ALARM_SHIFT) & 1 == 1
    }

    /// Masked temperature field (bits 21..15).
    pub const fn temperature(self) -> u8 {
        ((self.0 >> TEMPERATURE_SHIFT) & FIELD_MASK as u32) as u8
    }

    /// Masked threshold field (bits 10..4).
    pub const fn threshold(self) -> u8 {
        ((self.0 >> THRESHOLD_SHIFT) & FIELD_MASK as u32) as u8
    }
}

impl From<StatusWord> for u32 {
    fn from(word: StatusWord) -> u32 {
        word.bits()
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#08x} (alarm={} temperature={} threshold={})",
            self.0,
            self.alarm() as u8,
            self.temperature(),
            self.threshold()
        )
    }
}

/// Display "pixel" value of a reading.
///
/// Independent of the packed layout: the value is reinterpreted as unsigned and
/// shifted by [`PIXEL_SHIFT`], so negative readings print as large numbers.
pub const fn pixels(value: i32) -> u32 {
    (value as u32) << PIXEL_SHIFT
}
