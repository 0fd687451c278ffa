//! Board support interface.
//!
//! Traits for the three peripherals the control loops touch: the analog
//! temperature sensor, the discrete button input and the discrete status output.
//! Boards implement them on top of their HAL; tests implement them with mocks.

use core::cell::RefCell;
use core::fmt;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::error::{ControlError, Peripheral};
use crate::word::StatusWord;

/// Analog temperature sensor.
pub trait TemperatureSensor {
    /// Platform-specific error type
    type Error;

    /// Bring up the converter. Called once before the first sample.
    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Acquire one raw conversion result.
    #[allow(async_fn_in_trait)]
    async fn read_raw(&mut self) -> Result<u16, Self::Error>;

    /// Convert a raw sample to whole degrees Celsius. Must be pure.
    fn to_celsius(&self, raw: u16) -> i32;
}

/// Discrete button input channel.
pub trait ButtonPort {
    /// Platform-specific error type
    type Error;

    /// Configure the channel as input. Called once before the first poll.
    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Read the raw button code of the channel.
    fn read(&mut self) -> Result<u32, Self::Error>;
}

/// Discrete status output channel.
pub trait StatusPort {
    /// Platform-specific error type
    type Error;

    /// Configure the channel as output. Called once however many loops share it.
    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Drive the channel with a raw word.
    fn write(&mut self, bits: u32) -> Result<(), Self::Error>;
}

/// Button state decoded from the input channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonCode {
    /// Left button: lower the threshold by one
    Decrease,

    /// Right button: raise the threshold by one
    Increase,

    /// Nothing pressed, or a combination the application ignores
    Other(u32),
}

impl ButtonCode {
    /// Raw code of the decrease button.
    pub const DECREASE: u32 = 1;

    /// Raw code of the increase button.
    pub const INCREASE: u32 = 2;

    /// Threshold change requested by this code.
    pub const fn delta(self) -> i32 {
        match self {
            ButtonCode::Decrease => -1,
            ButtonCode::Increase => 1,
            ButtonCode::Other(_) => 0,
        }
    }
}

impl From<u32> for ButtonCode {
    fn from(raw: u32) -> Self {
        match raw {
            Self::DECREASE => ButtonCode::Decrease,
            Self::INCREASE => ButtonCode::Increase,
            other => ButtonCode::Other(other),
        }
    }
}

/// Transfer function of the Zynq XADC on-die temperature sensor.
///
/// Converts the whole 16-bit register, low nibble included, as the vendor driver
/// does. The fractional part is truncated toward zero.
pub fn xadc_raw_to_celsius(raw: u16) -> i32 {
    (raw as f32 / 65536.0 * 503.975 - 273.15) as i32
}

struct PortSlot<O> {
    port: O,
    initialized: bool,
    last: Option<StatusWord>,
}

/// Status output shared by the sampler and input loops.
///
/// Every write happens inside one critical section, and the port is initialised
/// only on the first [`init`](SharedPort::init).
pub struct SharedPort<M: RawMutex, O: StatusPort> {
    slot: Mutex<M, RefCell<PortSlot<O>>>,
}

impl<M: RawMutex, O: StatusPort> SharedPort<M, O> {
    /// Wrap an output port.
    pub const fn new(port: O) -> Self {
        Self {
            slot: Mutex::new(RefCell::new(PortSlot {
                port,
                initialized: false,
                last: None,
            })),
        }
    }

    /// Initialise the port unless an earlier caller already did.
    pub fn init(&self) -> Result<(), ControlError> {
        self.slot.lock(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.initialized {
                return Ok(());
            }
            slot.port
                .init()
                .map_err(|_| ControlError::PeripheralInit(Peripheral::Output))?;
            slot.initialized = true;
            Ok(())
        })
    }

    /// Write a status word to the port.
    pub fn publish(&self, word: StatusWord) -> Result<(), ControlError> {
        self.slot.lock(|slot| {
            let mut slot = slot.borrow_mut();
            slot.port
                .write(word.bits())
                .map_err(|_| ControlError::OutputWrite)?;
            slot.last = Some(word);
            Ok(())
        })
    }

    /// Last word successfully written, if any.
    pub fn last_published(&self) -> Option<StatusWord> {
        self.slot.lock(|slot| slot.borrow().last)
    }

    /// Exclusive access to the wrapped port.
    pub fn port_mut(&mut self) -> &mut O {
        &mut self.slot.get_mut().get_mut().port
    }
}

impl<M: RawMutex, O: StatusPort> fmt::Debug for SharedPort<M, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedPort")
            .field("last", &self.last_published())
            .finish_non_exhaustive()
    }
}
