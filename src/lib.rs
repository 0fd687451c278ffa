//! # thermo-guard
//!
//! Threshold/alarm temperature control loop for small real-time systems.
//!
//! **Key features:**
//! - **Three activities** - Sampler loop, input loop and heartbeat, driven by any async executor
//! - **Bit-exact status word** - Alarm, temperature and threshold packed into 23 bits
//! - **Consistent shared state** - Every update is one critical section, no torn words
//! - **Platform-agnostic** - Sensor, buttons, output and console are traits the board implements
//! - **Static allocation** - No heap; console lines are fixed-capacity buffers
//!
//! ## Optional Features
//!
//! - `log` - Internal diagnostics through the `log` facade (default)
//! - `defmt` - Internal diagnostics through `defmt`, `defmt::Format` on public types
//! - `sim` - Host simulation binary `thermo-sim`
//!
//! This library is `no_std` compatible.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Must come first so the logging macros are visible to every module below
#[macro_use]
mod fmt;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod error;
pub mod hal;
pub mod io;
pub mod word;

pub mod state;

pub mod controller;
pub mod heartbeat;
pub mod input;
pub mod sampler;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Configuration
pub use config::{ControlConfig, DefaultConfig};

// Error types
pub use error::{ControlError, Peripheral};

// Board interface
pub use hal::{ButtonCode, ButtonPort, SharedPort, StatusPort, TemperatureSensor};
pub use io::{Console, ConsoleIo};

// Shared state and encoding
pub use state::{ControlState, Reading, Sample};
pub use word::StatusWord;

// Activities
pub use controller::Controller;
pub use heartbeat::Heartbeat;
pub use input::InputPoller;
pub use sampler::Sampler;

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
