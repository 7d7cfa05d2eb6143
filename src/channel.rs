//! Output channels and the per-tick fade stepping.
//!
//! Provides [`ChannelSet`], the fixed table of channels a ticker drives, and the
//! [`LedOutput`] trait for hardware abstraction.

use crate::command::Command;
use crate::time::{Millis, has_elapsed};
use crate::types::{Action, ChannelState, TickerError};

/// A hardware pin or PWM channel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin(pub u8);

impl From<u8> for Pin {
    fn from(pin: u8) -> Self {
        Pin(pin)
    }
}

/// Trait for abstracting LED output hardware.
///
/// Implement this for your PWM peripheral (or anything else that can show an
/// 8-bit intensity). Handle any hardware errors internally - this method
/// cannot fail.
pub trait LedOutput {
    /// Writes `value` (0 = off, 255 = full) to `pin`.
    fn write(&mut self, pin: Pin, value: u8);
}

/// Run state of one physical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel<'a> {
    pin: Pin,
    state: ChannelState,
    command: Command<'a>,
    index: usize,
    last_step: Option<Millis>,
}

impl<'a> Channel<'a> {
    /// Creates an idle channel holding [`Command::INERT`].
    pub const fn new(pin: Pin) -> Self {
        Self {
            pin,
            state: ChannelState::Idle,
            command: Command::INERT,
            index: 0,
            last_step: None,
        }
    }

    /// The output this channel writes to.
    pub fn pin(&self) -> Pin {
        self.pin
    }

    /// Whether the channel is running or idle.
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Returns true while the assigned command is still stepping.
    pub fn is_running(&self) -> bool {
        self.state == ChannelState::Running
    }

    /// The most recently assigned command.
    pub fn command(&self) -> &Command<'a> {
        &self.command
    }

    /// Current position in the assigned command's curve.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Earliest time the channel may step again; `None` means immediately.
    pub fn next_step(&self) -> Option<Millis> {
        self.last_step.map(|at| at.wrapping_add(self.command.interval_ms))
    }

    fn is_due(&self, now: Millis) -> bool {
        self.is_running() && has_elapsed(now, self.last_step, self.command.interval_ms)
    }

    /// Value at the current position of the assigned curve.
    pub fn value(&self) -> u8 {
        self.command.curve.value_at(self.index)
    }

    fn assign(&mut self, command: &Command<'a>) {
        let old_max = self.command.curve.max_index();
        let new_max = command.curve.max_index();

        self.state = ChannelState::Running;
        self.command = *command;
        self.last_step = None;

        if old_max != new_max {
            self.index = rescale_index(self.index, old_max, new_max);
        }
    }

    fn step<O: LedOutput>(&mut self, now: Millis, output: &mut O) {
        let max = self.command.curve.max_index();

        let index = match self.command.action {
            Action::FadeUp => self.index.saturating_add(1),
            Action::FadeDown => self.index.saturating_sub(1),
            Action::Off => 0,
            Action::On => max,
        };

        // Both ends of the curve finish the command.
        self.index = if index == 0 {
            self.state = ChannelState::Idle;
            0
        } else if index >= max {
            self.state = ChannelState::Idle;
            max
        } else {
            index
        };

        output.write(self.pin, self.command.curve.value_at(self.index));
        self.last_step = Some(now);
    }
}

/// Maps a position on a curve with `old_max` as its last index to the same
/// relative position on a curve ending at `new_max`.
///
/// Truncates, and never returns more than `new_max`. A single-value old curve
/// maps to 0.
pub(crate) fn rescale_index(index: usize, old_max: usize, new_max: usize) -> usize {
    if old_max == 0 {
        return 0;
    }
    let scaled = (index as u64 * new_max as u64) / old_max as u64;
    (scaled as usize).min(new_max)
}

/// The fixed table of channels driven by a ticker.
///
/// # Type Parameters
/// * `'a` - Lifetime of the fade curves referenced by assigned commands
/// * `N` - Number of channels
#[derive(Debug, Clone)]
pub struct ChannelSet<'a, const N: usize> {
    channels: [Channel<'a>; N],
}

impl<'a, const N: usize> ChannelSet<'a, N> {
    /// Creates a set of idle channels, one per entry of `pins`.
    pub fn new(pins: [Pin; N]) -> Self {
        Self {
            channels: pins.map(Channel::new),
        }
    }

    /// Assigns `command` to the channel it targets and starts that channel.
    ///
    /// When the new curve has a different length than the channel's previous
    /// curve the position is rescaled proportionally, so a fade taken over
    /// mid-way continues from the same relative brightness.
    ///
    /// # Errors
    /// * `ChannelIndexOutOfRange` - `command.channel` is not below `N`
    pub fn assign(&mut self, command: &Command<'a>) -> Result<(), TickerError> {
        let channel = self
            .channels
            .get_mut(command.channel)
            .ok_or(TickerError::ChannelIndexOutOfRange {
                index: command.channel,
                channels: N,
            })?;

        channel.assign(command);
        Ok(())
    }

    /// Steps every running channel whose interval has elapsed, highest index
    /// first, and returns how many were stepped.
    pub fn step<O: LedOutput>(&mut self, now: Millis, output: &mut O) -> usize {
        let mut stepped = 0;

        for channel in self.channels.iter_mut().rev() {
            if channel.is_due(now) {
                channel.step(now, output);
                stepped += 1;
            }
        }

        stepped
    }

    /// Returns the channel at `index`.
    pub fn get(&self, index: usize) -> Option<&Channel<'a>> {
        self.channels.get(index)
    }

    /// Iterates the channels in index order.
    pub fn iter(&self) -> core::slice::Iter<'_, Channel<'a>> {
        self.channels.iter()
    }

    /// Number of running channels.
    pub fn running(&self) -> usize {
        self.channels.iter().filter(|c| c.is_running()).count()
    }

    /// Number of channels in the set.
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns true if the set has no channels.
    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}
