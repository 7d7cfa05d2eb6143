//! Fade curves: immutable intensity tables shared between commands.

use crate::MAX_LED_VALUE;
use crate::types::TickerError;
use palette::{LinSrgb, Srgb};

const DEFAULT_VALUES: [u8; 2] = [0, MAX_LED_VALUE];

/// An ordered table of output intensities a channel steps through.
///
/// The curve borrows its values, so one table (typically a `static` array)
/// can back any number of commands. It is never mutated after construction.
/// A curve always holds at least one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FadeCurve<'a> {
    values: &'a [u8],
}

impl<'a> FadeCurve<'a> {
    /// Two-point curve from fully off to fully on.
    pub const DEFAULT: FadeCurve<'static> = FadeCurve {
        values: &DEFAULT_VALUES,
    };

    /// Creates a curve over `values`.
    ///
    /// # Errors
    /// * `EmptyFadeCurve` - `values` is empty
    pub const fn new(values: &'a [u8]) -> Result<Self, TickerError> {
        if values.is_empty() {
            return Err(TickerError::EmptyFadeCurve);
        }
        Ok(Self { values })
    }

    /// Index of the last value.
    #[inline]
    pub const fn max_index(&self) -> usize {
        self.values.len() - 1
    }

    /// Number of values in the curve.
    #[inline]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; a curve holds at least one value.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns the value at `index`, clamped to the last value.
    #[inline]
    pub fn value_at(&self, index: usize) -> u8 {
        let index = index.min(self.max_index());
        self.values.get(index).copied().unwrap_or(0)
    }

    /// The underlying value table.
    pub const fn values(&self) -> &'a [u8] {
        self.values
    }
}

impl Default for FadeCurve<'static> {
    fn default() -> Self {
        FadeCurve::DEFAULT
    }
}

/// Generates an evenly spaced ramp from 0 to [`MAX_LED_VALUE`].
///
/// A single-entry table is `[0]`.
pub fn linear<const N: usize>() -> [u8; N] {
    core::array::from_fn(|i| {
        if N <= 1 {
            return 0;
        }
        ((i as u32 * MAX_LED_VALUE as u32) / (N as u32 - 1)) as u8
    })
}

/// Generates a ramp whose steps look evenly spaced to the eye.
///
/// Each position along the ramp is treated as an sRGB-encoded brightness and
/// decoded to linear light, which is what a PWM duty cycle produces. The
/// result starts slow and steepens towards full brightness. A single-entry
/// table is `[0]`.
pub fn perceptual<const N: usize>() -> [u8; N] {
    core::array::from_fn(|i| {
        if N <= 1 {
            return 0;
        }
        let v = i as f32 / (N - 1) as f32;
        let lin: LinSrgb = Srgb::new(v, v, v).into_linear();
        (lin.red.clamp(0.0, 1.0) * MAX_LED_VALUE as f32 + 0.5) as u8
    })
}
