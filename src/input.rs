//! Input loop: button polling and threshold adjustment.

use core::convert::Infallible;
use core::fmt;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::config::ControlConfig;
use crate::controller::Controller;
use crate::error::{ControlError, Peripheral};
use crate::hal::{ButtonCode, ButtonPort, StatusPort};
use crate::io::ConsoleIo;

/// Printed once the input loop's peripherals are up.
pub const STARTED_MESSAGE: &str = "Buttons task has started \r\n";

/// Printed after a decrease press.
pub const DECREASE_MESSAGE: &str = "Threshold - 1 \r\n";

/// Printed after an increase press.
pub const INCREASE_MESSAGE: &str = "Threshold + 1 \r\n";

/// Periodic button poller.
///
/// Publishes every cycle, pressed or not, using whatever sample the sampler
/// stored last. It never takes a fresh sample itself.
pub struct InputPoller<'a, M, IO, O, C, B, D>
where
    M: RawMutex,
    IO: ConsoleIo,
    O: StatusPort,
    C: ControlConfig,
    B: ButtonPort,
    D: DelayNs,
{
    controller: &'a Controller<M, IO, O, C>,
    buttons: B,
    delay: D,
}

impl<'a, M, IO, O, C, B, D> InputPoller<'a, M, IO, O, C, B, D>
where
    M: RawMutex,
    IO: ConsoleIo,
    O: StatusPort,
    C: ControlConfig,
    B: ButtonPort,
    D: DelayNs,
{
    /// Create a poller sharing `controller`'s state, console and output.
    pub fn new(controller: &'a Controller<M, IO, O, C>, buttons: B, delay: D) -> Self {
        Self {
            controller,
            buttons,
            delay,
        }
    }

    /// Initialise the button and output ports and announce the loop.
    pub async fn start(&mut self) -> Result<(), ControlError> {
        if self.buttons.init().is_err() {
            error!("button input init failed");
            return Err(ControlError::PeripheralInit(Peripheral::Buttons));
        }
        self.controller.output().init()?;
        self.controller.console().print(STARTED_MESSAGE).await;
        info!("input poller started, period {} ms", C::INPUT_PERIOD_MS);
        Ok(())
    }

    /// Run one polling cycle.
    pub async fn cycle(&mut self) {
        let code = match self.buttons.read() {
            Ok(raw) => ButtonCode::from(raw),
            Err(_) => {
                warn!("{}; treating as released", ControlError::ButtonRead);
                ButtonCode::Other(0)
            }
        };

        let (threshold, word) = self.controller.state().apply_button(code);

        match code {
            ButtonCode::Decrease => {
                debug!("threshold lowered to {}", threshold);
                self.controller.console().print(DECREASE_MESSAGE).await;
            }
            ButtonCode::Increase => {
                debug!("threshold raised to {}", threshold);
                self.controller.console().print(INCREASE_MESSAGE).await;
            }
            ButtonCode::Other(_) => {}
        }

        if let Err(e) = self.controller.output().publish(word) {
            warn!("{}", e);
        }

        self.delay.delay_ms(C::INPUT_PERIOD_MS).await;
    }

    /// Start, then poll forever.
    pub async fn run(mut self) -> Result<Infallible, ControlError> {
        self.start().await?;
        loop {
            self.cycle().await;
        }
    }

    /// Start, then poll `cycles` times.
    pub async fn run_for(&mut self, cycles: usize) -> Result<(), ControlError> {
        self.start().await?;
        for _ in 0..cycles {
            self.cycle().await;
        }
        Ok(())
    }

    /// Mutable access to the button port.
    pub fn buttons_mut(&mut self) -> &mut B {
        &mut self.buttons
    }
}

impl<M, IO, O, C, B, D> fmt::Debug for InputPoller<'_, M, IO, O, C, B, D>
where
    M: RawMutex,
    IO: ConsoleIo,
    O: StatusPort,
    C: ControlConfig,
    B: ButtonPort,
    D: DelayNs,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputPoller")
            .field("period_ms", &C::INPUT_PERIOD_MS)
            .finish_non_exhaustive()
    }
}
