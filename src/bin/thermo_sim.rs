//! Host simulation of the threshold/alarm controller.
//!
//! Runs the three activities on a single-threaded Tokio runtime with simulated
//! peripherals:
//! - a sensor sweeping between 35 and 65 degrees
//! - buttons pressing increase, then decrease, every few polls
//! - console output on stdout, output-port writes logged on stderr
//!
//! To run:
//! ```bash
//! RUST_LOG=info cargo run --bin thermo-sim --features sim
//! ```

use std::convert::Infallible;
use std::io::{self, Write as _};
use std::time::Duration;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_hal_async::delay::DelayNs;
use thermo_guard::hal::xadc_raw_to_celsius;
use thermo_guard::{
    ButtonCode, ButtonPort, ConsoleIo, Controller, DefaultConfig, StatusPort, StatusWord,
    TemperatureSensor,
};
use tracing_subscriber::EnvFilter;

/// Console on stdout, flushed on every write.
struct StdoutConsole;

impl ConsoleIo for StdoutConsole {
    type Error = io::Error;

    fn put_char(&mut self, c: char) -> Result<(), Self::Error> {
        let mut buf = [0u8; 4];
        self.write_str(c.encode_utf8(&mut buf))
    }

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        let mut out = io::stdout().lock();
        out.write_all(s.as_bytes())?;
        out.flush()
    }
}

/// XADC-like sensor producing a triangle wave.
#[derive(Default)]
struct SweepSensor {
    step: u32,
}

impl SweepSensor {
    const LOW: i32 = 35;
    const SPAN: u32 = 30;

    fn celsius(&self) -> i32 {
        let phase = self.step % (2 * Self::SPAN);
        let offset = if phase < Self::SPAN { phase } else { 2 * Self::SPAN - phase };
        Self::LOW + offset as i32
    }
}

impl TemperatureSensor for SweepSensor {
    type Error = Infallible;

    async fn read_raw(&mut self) -> Result<u16, Self::Error> {
        // Aim half a degree up so truncation lands on the intended value
        let kelvin = self.celsius() as f32 + 0.5 + 273.15;
        let raw = (kelvin * 65536.0 / 503.975) as u16;
        self.step = self.step.wrapping_add(1);
        Ok(raw)
    }

    fn to_celsius(&self, raw: u16) -> i32 {
        xadc_raw_to_celsius(raw)
    }
}

/// Buttons following a fixed press pattern.
#[derive(Default)]
struct ScriptedButtons {
    polls: u32,
}

impl ButtonPort for ScriptedButtons {
    type Error = Infallible;

    fn read(&mut self) -> Result<u32, Self::Error> {
        self.polls = self.polls.wrapping_add(1);
        Ok(match self.polls % 12 {
            3 => ButtonCode::INCREASE,
            9 => ButtonCode::DECREASE,
            _ => 0,
        })
    }
}

/// Output port that logs every word.
struct LoggingPort;

impl StatusPort for LoggingPort {
    type Error = Infallible;

    fn write(&mut self, bits: u32) -> Result<(), Self::Error> {
        log::info!("output <- {}", StatusWord::from_bits(bits));
        Ok(())
    }
}

/// Delay backed by the Tokio timer.
#[derive(Clone, Copy)]
struct TokioDelay;

impl DelayNs for TokioDelay {
    async fn delay_ns(&mut self, ns: u32) {
        tokio::time::sleep(Duration::from_nanos(ns.into())).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        tokio::time::sleep(Duration::from_millis(ms.into())).await;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut controller: Controller<
        CriticalSectionRawMutex,
        StdoutConsole,
        LoggingPort,
        DefaultConfig,
    > = Controller::new(StdoutConsole, LoggingPort);

    controller.print_welcome();

    tokio::select! {
        result = controller.run(
            SweepSensor::default(),
            ScriptedButtons::default(),
            [TokioDelay; 3],
        ) => {
            if let Err(e) = result {
                eprintln!("thermo-sim: {}", e);
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\r\nStopped.");
        }
    }
}
