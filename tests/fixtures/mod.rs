//! Test fixtures for thermo-guard testing.
//!
//! Provides:
//! - `MockConsole`: captures console output
//! - `MockSensor`: queued raw readings, identity conversion
//! - `MockButtons`: queued button codes
//! - `MockPort`: records every status word written
//! - `MockDelay`: records requested periods and yields to the executor

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use embedded_hal_async::delay::DelayNs;
use thermo_guard::{ButtonPort, ConsoleIo, StatusPort, TemperatureSensor};

// ============================================================================
// MockConsole - Output Capture
// ============================================================================

/// Console that collects everything written to it.
#[derive(Debug, Default)]
pub struct MockConsole {
    output: String,
}

impl MockConsole {
    /// Create an empty console.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured output.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Clear captured output.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }
}

impl ConsoleIo for MockConsole {
    type Error = ();

    fn put_char(&mut self, c: char) -> Result<(), Self::Error> {
        self.output.push(c);
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.output.push_str(s);
        Ok(())
    }
}

// ============================================================================
// MockSensor - Queued Readings
// ============================================================================

/// Sensor returning queued raw readings.
///
/// `to_celsius` reinterprets the raw value as `i16`, so a queued reading is the
/// temperature itself and negative values are representable. Once the queue is
/// empty the last successful reading repeats.
#[derive(Debug, Default)]
pub struct MockSensor {
    readings: VecDeque<Result<u16, ()>>,
    last: u16,
    pub fail_init: bool,
    pub inits: usize,
    pub reads: usize,
}

impl MockSensor {
    /// Sensor that reports the given temperatures in order.
    pub fn with_temperatures(temperatures: &[i16]) -> Self {
        Self {
            readings: temperatures.iter().map(|&t| Ok(t as u16)).collect(),
            ..Self::default()
        }
    }

    /// Sensor replaying raw results, including failures.
    pub fn with_results(results: &[Result<i16, ()>]) -> Self {
        Self {
            readings: results.iter().copied().map(|r| r.map(|t| t as u16)).collect(),
            ..Self::default()
        }
    }

    /// Sensor whose initialisation fails.
    pub fn failing_init() -> Self {
        Self {
            fail_init: true,
            ..Self::default()
        }
    }

    /// Queue another temperature.
    pub fn push_temperature(&mut self, temperature: i16) {
        self.readings.push_back(Ok(temperature as u16));
    }
}

impl TemperatureSensor for MockSensor {
    type Error = ();

    fn init(&mut self) -> Result<(), Self::Error> {
        self.inits += 1;
        if self.fail_init { Err(()) } else { Ok(()) }
    }

    async fn read_raw(&mut self) -> Result<u16, Self::Error> {
        self.reads += 1;
        let raw = self.readings.pop_front().unwrap_or(Ok(self.last))?;
        self.last = raw;
        Ok(raw)
    }

    fn to_celsius(&self, raw: u16) -> i32 {
        raw as i16 as i32
    }
}

// ============================================================================
// MockButtons - Queued Codes
// ============================================================================

/// Button port returning queued codes, then 0 (nothing pressed).
#[derive(Debug, Default)]
pub struct MockButtons {
    codes: VecDeque<Result<u32, ()>>,
    pub fail_init: bool,
    pub reads: usize,
}

impl MockButtons {
    /// Buttons that report the given codes in order.
    pub fn with_codes(codes: &[u32]) -> Self {
        Self {
            codes: codes.iter().copied().map(Ok).collect(),
            ..Self::default()
        }
    }

    /// Buttons replaying raw results, including failures.
    pub fn with_results(results: &[Result<u32, ()>]) -> Self {
        Self {
            codes: results.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Buttons whose initialisation fails.
    pub fn failing_init() -> Self {
        Self {
            fail_init: true,
            ..Self::default()
        }
    }
}

impl ButtonPort for MockButtons {
    type Error = ();

    fn init(&mut self) -> Result<(), Self::Error> {
        if self.fail_init { Err(()) } else { Ok(()) }
    }

    fn read(&mut self) -> Result<u32, Self::Error> {
        self.reads += 1;
        self.codes.pop_front().unwrap_or(Ok(0))
    }
}

// ============================================================================
// MockPort - Output Capture
// ============================================================================

/// Output port recording every word written.
#[derive(Debug, Default)]
pub struct MockPort {
    pub writes: Vec<u32>,
    pub inits: usize,
    pub fail_init: bool,
    pub fail_write: bool,
}

impl MockPort {
    /// Create a working port.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusPort for MockPort {
    type Error = ();

    fn init(&mut self) -> Result<(), Self::Error> {
        self.inits += 1;
        if self.fail_init { Err(()) } else { Ok(()) }
    }

    fn write(&mut self, bits: u32) -> Result<(), Self::Error> {
        if self.fail_write {
            return Err(());
        }
        self.writes.push(bits);
        Ok(())
    }
}

// ============================================================================
// MockDelay - Period Recording
// ============================================================================

/// Delay that records requested milliseconds and yields once.
///
/// Clones share the same record, so a handle kept by the test sees the delays
/// of the activity it was moved into.
#[derive(Debug, Default, Clone)]
pub struct MockDelay {
    calls: Arc<Mutex<Vec<u32>>>,
}

impl MockDelay {
    /// Create a delay with an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds requested so far.
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.calls.lock().unwrap().push(ns / 1_000_000);
        tokio::task::yield_now().await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.calls.lock().unwrap().push(ms);
        tokio::task::yield_now().await;
    }
}
