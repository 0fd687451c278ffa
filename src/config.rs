//! Configuration traits and implementations for loop timing.
//!
//! The `ControlConfig` trait fixes loop periods and the startup threshold at
//! compile time without runtime overhead.

/// Control loop configuration trait defining periods and the default threshold.
///
/// All values are const (zero runtime cost). Periods are in milliseconds of the
/// delay provider handed to each activity.
pub trait ControlConfig {
    /// Sampler loop period (default: 200)
    const SAMPLE_PERIOD_MS: u32;

    /// Input loop period (default: 500)
    const INPUT_PERIOD_MS: u32;

    /// Heartbeat period (default: 100)
    const HEARTBEAT_PERIOD_MS: u32;

    /// Threshold at startup (default: 50)
    const DEFAULT_THRESHOLD: i32;
}

/// Default configuration matching the reference board application.
///
/// - SAMPLE_PERIOD_MS: 200
/// - INPUT_PERIOD_MS: 500
/// - HEARTBEAT_PERIOD_MS: 100
/// - DEFAULT_THRESHOLD: 50
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl ControlConfig for DefaultConfig {
    const SAMPLE_PERIOD_MS: u32 = 200;
    const INPUT_PERIOD_MS: u32 = 500;
    const HEARTBEAT_PERIOD_MS: u32 = 100;
    const DEFAULT_THRESHOLD: i32 = 50;
}
