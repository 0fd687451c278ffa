//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]
#![allow(unused_imports)]

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
mod fixtures;

pub use fixtures::{MockButtons, MockConsole, MockDelay, MockPort, MockSensor};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use thermo_guard::{Controller, DefaultConfig, StatusWord};

/// Controller type used throughout the integration tests.
pub type TestController = Controller<CriticalSectionRawMutex, MockConsole, MockPort, DefaultConfig>;

// ============================================================================
// Controller Creation Helpers
// ============================================================================

/// Create a controller with a working console and output port.
pub fn create_controller() -> TestController {
    Controller::new(MockConsole::new(), MockPort::new())
}

/// Create a controller around a prepared output port.
pub fn create_controller_with_port(port: MockPort) -> TestController {
    Controller::new(MockConsole::new(), port)
}

// ============================================================================
// Inspection Helpers
// ============================================================================

/// Everything printed to the console so far.
pub fn console_output(controller: &mut TestController) -> String {
    controller.console_mut().io_mut().output().to_string()
}

/// Every word written to the output port so far.
pub fn published(controller: &mut TestController) -> Vec<StatusWord> {
    controller
        .output_mut()
        .port_mut()
        .writes
        .iter()
        .copied()
        .map(StatusWord::from_bits)
        .collect()
}

/// Shorthand for the expected word.
pub fn word(alarm: bool, temperature: i32, threshold: i32) -> StatusWord {
    StatusWord::encode(alarm, temperature, threshold)
}

/// Assert output contains all expected strings.
pub fn assert_contains_all(output: &str, expected: &[&str]) {
    for s in expected {
        assert!(
            output.contains(s),
            "Expected '{}' in output, got: {:?}",
            s,
            output
        );
    }
}
