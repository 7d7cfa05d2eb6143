//! Wrap-safe millisecond timestamps and the clock abstraction.

/// A millisecond timestamp from a free-running, wrapping 32-bit counter.
///
/// Comparisons use modular arithmetic, so ordering stays correct across the
/// counter overflow (every ~49.7 days) as long as the two timestamps are less
/// than `2^31` ms apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl Millis {
    /// Timestamp zero.
    pub const ZERO: Self = Millis(0);

    /// Returns the raw counter value.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Adds `ms` milliseconds, wrapping on overflow.
    #[inline]
    pub const fn wrapping_add(self, ms: u32) -> Self {
        Millis(self.0.wrapping_add(ms))
    }

    /// Milliseconds elapsed since `earlier`, wrapping on overflow.
    #[inline]
    pub const fn elapsed_since(self, earlier: Self) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Returns true if `self` is strictly later than `other`.
    #[inline]
    pub const fn is_after(self, other: Self) -> bool {
        (self.0.wrapping_sub(other.0) as i32) > 0
    }
}

impl From<u32> for Millis {
    fn from(ms: u32) -> Self {
        Millis(ms)
    }
}

/// Trait for abstracting time sources.
pub trait TimeSource {
    /// Returns the current millisecond timestamp.
    fn now(&self) -> Millis;
}

/// Returns true if strictly more than `span` ms have passed since `since`.
///
/// `None` means the timer was never started and is always due. Holds for any
/// `span` in the `u32` range.
#[inline]
pub(crate) fn has_elapsed(now: Millis, since: Option<Millis>, span: u32) -> bool {
    match since {
        None => true,
        Some(start) => now.elapsed_since(start) > span,
    }
}
