//! Startup activity and ownership of everything the loops share.
//!
//! `Controller` owns the control state, the reporting sink and the shared status
//! output. Loops borrow it, so all three activities must finish (or be dropped)
//! before the controller can be inspected mutably again.

use core::convert::Infallible;
use core::fmt;
use core::marker::PhantomData;

use embassy_futures::select::{Either3, select3};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::config::ControlConfig;
use crate::error::ControlError;
use crate::hal::{ButtonPort, SharedPort, StatusPort, TemperatureSensor};
use crate::heartbeat::Heartbeat;
use crate::input::InputPoller;
use crate::io::{Console, ConsoleIo};
use crate::sampler::Sampler;
use crate::state::ControlState;

/// Welcome banner, printed once before the activities start.
pub const WELCOME_BANNER: &[&str] = &[
    "\x0c\x0c\r\n",
    "Micrium\r\n",
    "uCOS-III\r\n\r\n",
    "This application runs three different tasks:\r\n\r\n",
    "1. Task Start: Initializes the OS and creates tasks and\r\n",
    "               other kernel objects such as the mutex.\r\n",
    "               This task remains running and printing a\r\n",
    "               dot '.' every 100 milliseconds.\r\n",
    "2. Task #1   : Reads temperature every 200-milliseconds.\r\n",
    "3. Task #2   : Reads input buttons every 500-milliseconds.\r\n\r\n",
];

/// Printed by the startup activity before the loops are brought up.
pub const STARTUP_MESSAGE: &str = "Task Start Created\r\n";

/// Owner of the shared state, console and status output.
///
/// Generic over:
/// - `M`: raw mutex guarding state, console and output
/// - `IO`: console implementation
/// - `O`: status output port
/// - `C`: timing configuration
pub struct Controller<M, IO, O, C>
where
    M: RawMutex,
    IO: ConsoleIo,
    O: StatusPort,
    C: ControlConfig,
{
    state: ControlState<M>,
    console: Console<M, IO>,
    output: SharedPort<M, O>,
    _config: PhantomData<C>,
}

impl<M, IO, O, C> Controller<M, IO, O, C>
where
    M: RawMutex,
    IO: ConsoleIo,
    O: StatusPort,
    C: ControlConfig,
{
    /// Create a controller with the configured default threshold.
    pub fn new(console: IO, output: O) -> Self {
        Self {
            state: ControlState::new(C::DEFAULT_THRESHOLD),
            console: Console::new(console),
            output: SharedPort::new(output),
            _config: PhantomData,
        }
    }

    /// Print the welcome banner.
    ///
    /// Needs `&mut self`, so it cannot race the loops and skips the console lock.
    pub fn print_welcome(&mut self) {
        for line in WELCOME_BANNER {
            self.console.print_exclusive(line);
        }
    }

    /// Build the sampler loop around a sensor and its delay provider.
    pub fn sampler<S, D>(&self, sensor: S, delay: D) -> Sampler<'_, M, IO, O, C, S, D>
    where
        S: TemperatureSensor,
        D: DelayNs,
    {
        Sampler::new(self, sensor, delay)
    }

    /// Build the input loop around a button port and its delay provider.
    pub fn input_poller<B, D>(&self, buttons: B, delay: D) -> InputPoller<'_, M, IO, O, C, B, D>
    where
        B: ButtonPort,
        D: DelayNs,
    {
        InputPoller::new(self, buttons, delay)
    }

    /// Build the heartbeat activity.
    pub fn heartbeat<D: DelayNs>(&self, delay: D) -> Heartbeat<'_, M, IO, O, C, D> {
        Heartbeat::new(self, delay)
    }

    /// Bring up and drive all three activities.
    ///
    /// Only returns if a loop fails to initialise its peripherals; the other
    /// activities are dropped at that point.
    pub async fn run<S, B, D>(
        &self,
        sensor: S,
        buttons: B,
        delays: [D; 3],
    ) -> Result<Infallible, ControlError>
    where
        S: TemperatureSensor,
        B: ButtonPort,
        D: DelayNs,
    {
        let [heartbeat_delay, sample_delay, input_delay] = delays;

        self.console.print(STARTUP_MESSAGE).await;
        info!("starting control activities");

        let result = match select3(
            self.heartbeat(heartbeat_delay).run(),
            self.sampler(sensor, sample_delay).run(),
            self.input_poller(buttons, input_delay).run(),
        )
        .await
        {
            Either3::First(r) | Either3::Second(r) | Either3::Third(r) => r,
        };

        if let Err(e) = &result {
            error!("control activity stopped: {}", e);
        }
        result
    }

    /// Shared control state.
    pub fn state(&self) -> &ControlState<M> {
        &self.state
    }

    /// Reporting sink.
    pub fn console(&self) -> &Console<M, IO> {
        &self.console
    }

    /// Exclusive access to the reporting sink.
    pub fn console_mut(&mut self) -> &mut Console<M, IO> {
        &mut self.console
    }

    /// Shared status output.
    pub fn output(&self) -> &SharedPort<M, O> {
        &self.output
    }

    /// Exclusive access to the shared status output.
    pub fn output_mut(&mut self) -> &mut SharedPort<M, O> {
        &mut self.output
    }
}

impl<M, IO, O, C> fmt::Debug for Controller<M, IO, O, C>
where
    M: RawMutex,
    IO: ConsoleIo,
    O: StatusPort,
    C: ControlConfig,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("state", &self.state)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}
