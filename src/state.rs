//! Shared control state.
//!
//! Threshold and the last temperature sample live in one small block behind a
//! blocking mutex. Every accessor is a single critical section, so a status word
//! is always encoded from one consistent snapshot while each field keeps a single
//! writer: the sampler loop owns the sample, the input loop owns the threshold.

use core::cell::Cell;
use core::fmt;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::hal::ButtonCode;
use crate::word::StatusWord;

/// Most recent temperature sample and the alarm derived from it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Temperature in whole degrees
    pub temperature: i32,

    /// Temperature exceeded the threshold at sample time
    pub alarm: bool,
}

/// Outcome of recording one temperature sample.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Sample as stored
    pub sample: Sample,

    /// Threshold the sample was compared against
    pub threshold: i32,

    /// Word encoded from the sample and threshold
    pub word: StatusWord,
}

#[derive(Copy, Clone)]
struct Snapshot {
    threshold: i32,
    sample: Option<Sample>,
}

impl Snapshot {
    fn word(&self) -> StatusWord {
        let sample = self.sample.unwrap_or_default();
        StatusWord::encode(sample.alarm, sample.temperature, self.threshold)
    }
}

/// Threshold, last sample and the encoding between them.
pub struct ControlState<M: RawMutex> {
    inner: Mutex<M, Cell<Snapshot>>,
}

impl<M: RawMutex> ControlState<M> {
    /// Create state with the given startup threshold and no sample yet.
    pub const fn new(threshold: i32) -> Self {
        Self {
            inner: Mutex::new(Cell::new(Snapshot {
                threshold,
                sample: None,
            })),
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut Snapshot) -> R) -> R {
        self.inner.lock(|cell| {
            let mut snapshot = cell.get();
            let result = f(&mut snapshot);
            cell.set(snapshot);
            result
        })
    }

    /// Current threshold (unmasked).
    pub fn threshold(&self) -> i32 {
        self.inner.lock(|cell| cell.get().threshold)
    }

    /// Move the threshold by `delta`, wrapping on overflow. Returns the new value.
    ///
    /// The stored alarm is left alone; it is only re-derived on the next sample.
    pub fn adjust_threshold(&self, delta: i32) -> i32 {
        self.update(|s| {
            s.threshold = s.threshold.wrapping_add(delta);
            s.threshold
        })
    }

    /// Store a sample as-is.
    pub fn set_sample(&self, temperature: i32, alarm: bool) {
        self.update(|s| s.sample = Some(Sample { temperature, alarm }));
    }

    /// Last stored sample, `None` before the first one.
    pub fn sample(&self) -> Option<Sample> {
        self.inner.lock(|cell| cell.get().sample)
    }

    /// Compare `temperature` against the current threshold, store the resulting
    /// sample and encode the word, all in one critical section.
    pub fn record_temperature(&self, temperature: i32) -> Reading {
        self.update(|s| {
            let sample = Sample {
                temperature,
                alarm: temperature > s.threshold,
            };
            s.sample = Some(sample);
            Reading {
                sample,
                threshold: s.threshold,
                word: s.word(),
            }
        })
    }

    /// Apply a button press and encode the word with the last known sample.
    ///
    /// Returns the threshold after the change and the word.
    pub fn apply_button(&self, code: ButtonCode) -> (i32, StatusWord) {
        self.update(|s| {
            s.threshold = s.threshold.wrapping_add(code.delta());
            (s.threshold, s.word())
        })
    }

    /// Encode the current state.
    ///
    /// Before the first sample the temperature and alarm fields are zero.
    pub fn status_word(&self) -> StatusWord {
        self.inner.lock(|cell| cell.get().word())
    }
}

impl<M: RawMutex> fmt::Debug for ControlState<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.inner.lock(|cell| cell.get());
        f.debug_struct("ControlState")
            .field("threshold", &snapshot.threshold)
            .field("sample", &snapshot.sample)
            .finish()
    }
}
