//! Heartbeat: a dot on the console every period.

use core::convert::Infallible;
use core::fmt;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::config::ControlConfig;
use crate::controller::Controller;
use crate::error::ControlError;
use crate::hal::StatusPort;
use crate::io::ConsoleIo;

/// Marker printed each period.
pub const MARKER: &str = ".";

/// Liveness marker of the startup activity.
pub struct Heartbeat<'a, M, IO, O, C, D>
where
    M: RawMutex,
    IO: ConsoleIo,
    O: StatusPort,
    C: ControlConfig,
    D: DelayNs,
{
    controller: &'a Controller<M, IO, O, C>,
    delay: D,
}

impl<'a, M, IO, O, C, D> Heartbeat<'a, M, IO, O, C, D>
where
    M: RawMutex,
    IO: ConsoleIo,
    O: StatusPort,
    C: ControlConfig,
    D: DelayNs,
{
    /// Create a heartbeat printing to `controller`'s console.
    pub fn new(controller: &'a Controller<M, IO, O, C>, delay: D) -> Self {
        Self { controller, delay }
    }

    /// Wait one period, then print the marker.
    pub async fn cycle(&mut self) {
        self.delay.delay_ms(C::HEARTBEAT_PERIOD_MS).await;
        self.controller.console().print(MARKER).await;
    }

    /// Beat forever.
    ///
    /// Shares the signature of the other activities so they can be driven
    /// together; it never returns.
    pub async fn run(mut self) -> Result<Infallible, ControlError> {
        loop {
            self.cycle().await;
        }
    }

    /// Beat `cycles` times.
    pub async fn run_for(&mut self, cycles: usize) {
        for _ in 0..cycles {
            self.cycle().await;
        }
    }
}

impl<M, IO, O, C, D> fmt::Debug for Heartbeat<'_, M, IO, O, C, D>
where
    M: RawMutex,
    IO: ConsoleIo,
    O: StatusPort,
    C: ControlConfig,
    D: DelayNs,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heartbeat")
            .field("period_ms", &C::HEARTBEAT_PERIOD_MS)
            .finish_non_exhaustive()
    }
}
