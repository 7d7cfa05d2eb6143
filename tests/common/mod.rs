//! Shared test infrastructure for led-ticker integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use led_ticker::{FadeCurve, LedOutput, Millis, Pin, TimeSource};

// ============================================================================
// Mock Output
// ============================================================================

/// Mock output that records every write for testing
pub struct MockOutput {
    writes: heapless::Vec<(Pin, u8), 128>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self {
            writes: heapless::Vec::new(),
        }
    }

    pub fn writes(&self) -> &[(Pin, u8)] {
        &self.writes
    }

    /// Values written to `pin`, oldest first
    pub fn values_for(&self, pin: Pin) -> heapless::Vec<u8, 128> {
        self.writes
            .iter()
            .filter(|(p, _)| *p == pin)
            .map(|(_, v)| *v)
            .collect()
    }

    pub fn last_for(&self, pin: Pin) -> Option<u8> {
        self.writes
            .iter()
            .rev()
            .find(|(p, _)| *p == pin)
            .map(|(_, v)| *v)
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl LedOutput for MockOutput {
    fn write(&mut self, pin: Pin, value: u8) {
        self.writes
            .push((pin, value))
            .expect("mock write history full");
    }
}

// ============================================================================
// Mock Clock
// ============================================================================

/// Mock millisecond clock with controllable time advancement
pub struct MockClock {
    now: Cell<Millis>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(ms: u32) -> Self {
        Self {
            now: Cell::new(Millis(ms)),
        }
    }

    /// Advance time by `ms`, wrapping like a hardware counter
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl TimeSource for MockClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}

// ============================================================================
// Curves
// ============================================================================

pub static ON_OFF: [u8; 2] = [0, 255];
pub static RAMP4: [u8; 4] = [0, 85, 170, 255];
pub static RAMP10: [u8; 10] = [0, 28, 56, 85, 113, 141, 170, 198, 226, 255];

pub fn curve(values: &'static [u8]) -> FadeCurve<'static> {
    FadeCurve::new(values).unwrap()
}

pub const PINS: [Pin; 4] = [Pin(5), Pin(3), Pin(6), Pin(10)];
