//! Core types shared by commands, channels and the sequencer.

/// What a command does to its channel on every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Step one index up the fade curve per interval until the top is reached.
    FadeUp,

    /// Step one index down the fade curve per interval until the bottom is reached.
    FadeDown,

    /// Jump to the first curve value.
    Off,

    /// Jump to the last curve value.
    On,
}

/// Run state of a single output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelState {
    /// Not stepped and never written to.
    Idle,

    /// Stepped on every tick once its interval has elapsed.
    Running,
}

/// How many full passes a command list makes before it is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LapCount {
    /// Run a specific number of passes. `Finite(0)` runs once, like `Finite(1)`.
    Finite(u32),

    /// Repeat until another list is started or the ticker is stopped.
    Infinite,
}

impl LapCount {
    /// Returns true once `completed` passes exhaust this lap count.
    #[inline]
    pub fn is_exhausted(&self, completed: u32) -> bool {
        match *self {
            LapCount::Finite(laps) => completed >= laps.max(1),
            LapCount::Infinite => false,
        }
    }
}

impl Default for LapCount {
    fn default() -> Self {
        LapCount::Finite(1)
    }
}

impl From<u32> for LapCount {
    fn from(laps: u32) -> Self {
        LapCount::Finite(laps)
    }
}

/// Errors reported while building curves and lists or starting a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickerError {
    /// A command list has no commands.
    InvalidCommandList,

    /// An infinitely repeating list in which every command has zero wait.
    UnboundedBurst,

    /// A command targets a channel the ticker does not have.
    ChannelIndexOutOfRange {
        /// The channel index named by the command.
        index: usize,
        /// Number of channels configured.
        channels: usize,
    },

    /// A fade curve with no values.
    EmptyFadeCurve,

    /// A fixed-capacity command buffer is full.
    CapacityExceeded,
}

impl core::fmt::Display for TickerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TickerError::InvalidCommandList => {
                write!(f, "command list must contain at least one command")
            }
            TickerError::UnboundedBurst => {
                write!(
                    f,
                    "infinitely repeating command list needs at least one command with non-zero wait"
                )
            }
            TickerError::ChannelIndexOutOfRange { index, channels } => {
                write!(
                    f,
                    "channel index {} out of range for {} channels",
                    index, channels
                )
            }
            TickerError::EmptyFadeCurve => {
                write!(f, "fade curve must have at least one value")
            }
            TickerError::CapacityExceeded => {
                write!(f, "command buffer capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TickerError {}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::format;

    #[test]
    fn zero_and_one_laps_both_run_once() {
        assert!(!LapCount::Finite(0).is_exhausted(0));
        assert!(LapCount::Finite(0).is_exhausted(1));
        assert!(!LapCount::Finite(1).is_exhausted(0));
        assert!(LapCount::Finite(1).is_exhausted(1));
    }

    #[test]
    fn finite_laps_exhaust_at_count() {
        let laps = LapCount::Finite(3);
        assert!(!laps.is_exhausted(2));
        assert!(laps.is_exhausted(3));
    }

    #[test]
    fn infinite_laps_never_exhaust() {
        assert!(!LapCount::Infinite.is_exhausted(u32::MAX));
    }

    #[test]
    fn error_messages_format_correctly_for_display() {
        let err = TickerError::ChannelIndexOutOfRange {
            index: 7,
            channels: 4,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("7"));
        assert!(msg.contains("4 channels"));

        let msg = format!("{}", TickerError::EmptyFadeCurve);
        assert!(msg.contains("fade curve"));
    }
}
