//! Error types for control loop operations.
//!
//! Only peripheral initialisation errors are fatal. Everything else is logged by
//! the loop that hit it and the loop carries on with its next period.

use core::fmt;

/// Peripheral that failed, as reported by [`ControlError::PeripheralInit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Peripheral {
    /// Analog temperature sensor
    Sensor,

    /// Discrete button input channel
    Buttons,

    /// Discrete status output channel
    Output,
}

impl fmt::Display for Peripheral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Peripheral::Sensor => write!(f, "temperature sensor"),
            Peripheral::Buttons => write!(f, "button input"),
            Peripheral::Output => write!(f, "status output"),
        }
    }
}

/// Control loop error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    /// Peripheral initialisation failed (fatal at startup)
    PeripheralInit(Peripheral),

    /// Raw sensor acquisition failed
    SensorRead,

    /// Button channel read failed
    ButtonRead,

    /// Writing the status word to the output channel failed
    OutputWrite,

    /// Writing to the console failed
    ConsoleWrite,
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::PeripheralInit(p) => write!(f, "Failed to initialize {}", p),
            ControlError::SensorRead => write!(f, "Sensor read failed"),
            ControlError::ButtonRead => write!(f, "Button read failed"),
            ControlError::OutputWrite => write!(f, "Output write failed"),
            ControlError::ConsoleWrite => write!(f, "Console write failed"),
        }
    }
}

impl ControlError {
    /// Whether the error stops the application.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ControlError::PeripheralInit(_))
    }
}
