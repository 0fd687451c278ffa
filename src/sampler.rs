//! Sampler loop: temperature acquisition, alarm derivation, output publishing.

use core::convert::Infallible;
use core::fmt;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::config::ControlConfig;
use crate::controller::Controller;
use crate::error::{ControlError, Peripheral};
use crate::hal::{StatusPort, TemperatureSensor};
use crate::io::{ConsoleIo, format_line};
use crate::state::Reading;
use crate::word::{FIELD_MASK, pixels};

/// Printed once the sampler's peripherals are up.
pub const STARTED_MESSAGE: &str = "Temperature task has started\r\n";

/// Periodic temperature sampler.
///
/// Each cycle:
/// 1. acquire and convert a sample
/// 2. compare it against the threshold, store it and encode the word
/// 3. print the diagnostic lines
/// 4. wait one sample period
/// 5. publish the word
///
/// A failed acquisition keeps the previous sample and still publishes.
pub struct Sampler<'a, M, IO, O, C, S, D>
where
    M: RawMutex,
    IO: ConsoleIo,
    O: StatusPort,
    C: ControlConfig,
    S: TemperatureSensor,
    D: DelayNs,
{
    controller: &'a Controller<M, IO, O, C>,
    sensor: S,
    delay: D,
}

impl<'a, M, IO, O, C, S, D> Sampler<'a, M, IO, O, C, S, D>
where
    M: RawMutex,
    IO: ConsoleIo,
    O: StatusPort,
    C: ControlConfig,
    S: TemperatureSensor,
    D: DelayNs,
{
    /// Create a sampler sharing `controller`'s state, console and output.
    pub fn new(controller: &'a Controller<M, IO, O, C>, sensor: S, delay: D) -> Self {
        Self {
            controller,
            sensor,
            delay,
        }
    }

    /// Initialise the sensor and output port and announce the loop.
    pub async fn start(&mut self) -> Result<(), ControlError> {
        if self.sensor.init().is_err() {
            error!("temperature sensor init failed");
            return Err(ControlError::PeripheralInit(Peripheral::Sensor));
        }
        self.controller.output().init()?;
        self.controller.console().print(STARTED_MESSAGE).await;
        info!("sampler started, period {} ms", C::SAMPLE_PERIOD_MS);
        Ok(())
    }

    /// Run one sampling cycle.
    pub async fn cycle(&mut self) {
        let word = match self.sample().await {
            Ok(reading) => {
                self.report(&reading).await;
                reading.word
            }
            Err(e) => {
                warn!("{}; holding last sample", e);
                self.controller.state().status_word()
            }
        };

        self.delay.delay_ms(C::SAMPLE_PERIOD_MS).await;

        if let Err(e) = self.controller.output().publish(word) {
            warn!("{}", e);
        }
    }

    /// Start, then sample forever.
    pub async fn run(mut self) -> Result<Infallible, ControlError> {
        self.start().await?;
        loop {
            self.cycle().await;
        }
    }

    /// Start, then sample `cycles` times.
    pub async fn run_for(&mut self, cycles: usize) -> Result<(), ControlError> {
        self.start().await?;
        for _ in 0..cycles {
            self.cycle().await;
        }
        Ok(())
    }

    /// Mutable access to the sensor.
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    async fn sample(&mut self) -> Result<Reading, ControlError> {
        let raw = self
            .sensor
            .read_raw()
            .await
            .map_err(|_| ControlError::SensorRead)?;
        let temperature = self.sensor.to_celsius(raw);
        let reading = self.controller.state().record_temperature(temperature);
        trace!("sampled {} -> {}", temperature, reading.word);
        Ok(reading)
    }

    async fn report(&self, reading: &Reading) {
        let temperature = reading.sample.temperature;
        let threshold = reading.threshold & FIELD_MASK;
        let console = self.controller.console();

        let lines = [
            format_line(format_args!("\n Temperature: {}", temperature)),
            format_line(format_args!("\n Temperature pixels: {}", pixels(temperature))),
            format_line(format_args!("\n Threshold: {}", threshold)),
            format_line(format_args!("\n Threshold pixels: {}", pixels(threshold))),
            format_line(format_args!("\n alarm: {}", reading.sample.alarm as u8)),
        ];
        for line in &lines {
            console.print(line).await;
        }
    }
}

impl<M, IO, O, C, S, D> fmt::Debug for Sampler<'_, M, IO, O, C, S, D>
where
    M: RawMutex,
    IO: ConsoleIo,
    O: StatusPort,
    C: ControlConfig,
    S: TemperatureSensor,
    D: DelayNs,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sampler")
            .field("period_ms", &C::SAMPLE_PERIOD_MS)
            .finish_non_exhaustive()
    }
}
