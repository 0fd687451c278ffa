//! Shared state consistency under real parallelism.
//!
//! One thread plays the input loop, one the sampler loop, and readers check
//! every word they observe against the values the writers could have produced.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use thermo_guard::{ButtonCode, ControlState, StatusWord};

const PRESSES: i32 = 60;
const COLD: i32 = 0;
// Above every threshold the input thread can reach (50 + PRESSES)
const HOT: i32 = 120;

#[test]
fn test_no_torn_status_word() {
    let state: ControlState<CriticalSectionRawMutex> = ControlState::new(50);
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..PRESSES {
                state.apply_button(ButtonCode::Increase);
                thread::yield_now();
            }
        });

        let sampler = s.spawn(|| {
            let mut samples = 0u32;
            while !done.load(Ordering::Relaxed) || samples < 1_000 {
                let temperature = if samples % 2 == 0 { COLD } else { HOT };
                let reading = state.record_temperature(temperature);
                assert_eq!(reading.sample.alarm, temperature == HOT);
                samples += 1;
            }
        });

        let reader = s.spawn(|| {
            let mut last_threshold = 50u8;
            for _ in 0..10_000 {
                let word = state.status_word();
                check_word(word);
                assert!(word.threshold() >= last_threshold, "threshold went backwards: {}", word);
                last_threshold = word.threshold();
            }
        });

        reader.join().unwrap();
        done.store(true, Ordering::Relaxed);
        sampler.join().unwrap();
    });

    assert_eq!(state.threshold(), 50 + PRESSES);
}

#[test]
fn test_button_words_never_torn() {
    let state: ControlState<CriticalSectionRawMutex> = ControlState::new(50);
    state.record_temperature(HOT);

    thread::scope(|s| {
        s.spawn(|| {
            for i in 0..5_000 {
                state.record_temperature(if i % 2 == 0 { COLD } else { HOT });
            }
        });

        for _ in 0..2 {
            s.spawn(|| {
                for _ in 0..PRESSES / 2 {
                    let (_, word) = state.apply_button(ButtonCode::Increase);
                    check_word(word);
                }
            });
        }
    });

    assert_eq!(state.threshold(), 50 + PRESSES);
}

fn check_word(word: StatusWord) {
    let valid = matches!(
        (word.temperature() as i32, word.alarm()),
        (COLD, false) | (HOT, true)
    );
    assert!(valid, "torn word {}", word);
    assert!((50..=50 + PRESSES as u8).contains(&word.threshold()), "bad threshold {}", word);
}
