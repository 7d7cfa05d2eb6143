//! Commands and command lists.

use crate::curve::FadeCurve;
use crate::types::{Action, LapCount, TickerError};
use heapless::Vec;

/// A single instruction for one channel.
///
/// A dispatched command assigns itself to `channel`; the channel then applies
/// `action` once every `interval_ms` along `curve`. The sequencer waits
/// `wait_ms` after firing this command before it fires the next one, and a
/// zero wait fires the next command within the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command<'a> {
    /// Target channel index.
    pub channel: usize,

    /// What the channel does on each step.
    pub action: Action,

    /// Delay before the next command in the list may fire.
    pub wait_ms: u32,

    /// Values the channel steps through.
    pub curve: FadeCurve<'a>,

    /// Minimum time between two steps of the channel.
    pub interval_ms: u32,
}

impl<'a> Command<'a> {
    /// Command every channel holds before it is first used.
    pub const INERT: Command<'static> = Command {
        channel: 0,
        action: Action::Off,
        wait_ms: 0,
        curve: FadeCurve::DEFAULT,
        interval_ms: 20,
    };

    /// Creates a command.
    #[inline]
    pub const fn new(
        channel: usize,
        action: Action,
        wait_ms: u32,
        curve: FadeCurve<'a>,
        interval_ms: u32,
    ) -> Self {
        Self {
            channel,
            action,
            wait_ms,
            curve,
            interval_ms,
        }
    }
}

/// An ordered run of commands plus the number of passes to make.
///
/// Borrows its commands, so the same command table may appear in several
/// lists. Cheap to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandList<'a> {
    commands: &'a [Command<'a>],
    laps: LapCount,
}

impl<'a> CommandList<'a> {
    /// Creates a list over `commands`.
    ///
    /// # Errors
    /// * `InvalidCommandList` - `commands` is empty
    /// * `UnboundedBurst` - `laps` is infinite and no command has a non-zero wait
    pub fn new(commands: &'a [Command<'a>], laps: LapCount) -> Result<Self, TickerError> {
        if commands.is_empty() {
            return Err(TickerError::InvalidCommandList);
        }

        if laps == LapCount::Infinite && commands.iter().all(|c| c.wait_ms == 0) {
            return Err(TickerError::UnboundedBurst);
        }

        Ok(Self { commands, laps })
    }

    /// Creates a list that runs once.
    pub fn once(commands: &'a [Command<'a>]) -> Result<Self, TickerError> {
        Self::new(commands, LapCount::Finite(1))
    }

    /// The commands in firing order.
    pub fn commands(&self) -> &'a [Command<'a>] {
        self.commands
    }

    /// Returns the command at `index`.
    pub fn get(&self, index: usize) -> Option<&'a Command<'a>> {
        self.commands.get(index)
    }

    /// Number of commands in one pass.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Always false; a list holds at least one command.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the last command.
    pub fn max_index(&self) -> usize {
        self.commands.len() - 1
    }

    /// Configured lap count.
    pub fn laps(&self) -> LapCount {
        self.laps
    }

    /// Checks that every command targets one of `channels` channels.
    ///
    /// # Errors
    /// * `ChannelIndexOutOfRange` - the first offending command's channel
    pub fn validate_channels(&self, channels: usize) -> Result<(), TickerError> {
        match self.commands.iter().find(|c| c.channel >= channels) {
            Some(cmd) => Err(TickerError::ChannelIndexOutOfRange {
                index: cmd.channel,
                channels,
            }),
            None => Ok(()),
        }
    }
}

/// Fixed-capacity storage for a command list assembled at runtime.
///
/// # Type Parameters
/// * `'a` - Lifetime of the fade curves the commands reference
/// * `N` - Maximum number of commands
#[derive(Debug, Clone)]
pub struct CommandBuffer<'a, const N: usize> {
    commands: Vec<Command<'a>, N>,
    laps: LapCount,
}

impl<'a, const N: usize> CommandBuffer<'a, N> {
    /// Creates a new empty buffer builder.
    pub fn builder() -> CommandBufferBuilder<'a, N> {
        CommandBufferBuilder::new()
    }

    /// Returns a list view over the buffered commands.
    pub fn list(&self) -> CommandList<'_> {
        CommandList {
            commands: &self.commands,
            laps: self.laps,
        }
    }

    /// Number of buffered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if no commands are buffered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Builder for [`CommandBuffer`].
#[derive(Debug)]
pub struct CommandBufferBuilder<'a, const N: usize> {
    commands: Vec<Command<'a>, N>,
    laps: LapCount,
}

impl<'a, const N: usize> CommandBufferBuilder<'a, N> {
    /// Creates an empty builder running once.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            laps: LapCount::default(),
        }
    }

    /// Appends a command.
    ///
    /// # Errors
    /// * `CapacityExceeded` - the buffer already holds `N` commands
    pub fn command(mut self, command: Command<'a>) -> Result<Self, TickerError> {
        self.commands
            .push(command)
            .map_err(|_| TickerError::CapacityExceeded)?;
        Ok(self)
    }

    /// Sets how many passes the list makes. Default is `LapCount::Finite(1)`.
    pub fn laps(mut self, laps: LapCount) -> Self {
        self.laps = laps;
        self
    }

    /// Builds and validates the buffer.
    ///
    /// # Errors
    /// Same as [`CommandList::new`].
    pub fn build(self) -> Result<CommandBuffer<'a, N>, TickerError> {
        CommandList::new(&self.commands, self.laps)?;

        Ok(CommandBuffer {
            commands: self.commands,
            laps: self.laps,
        })
    }
}

impl<'a, const N: usize> Default for CommandBufferBuilder<'a, N> {
    fn default() -> Self {
        Self::new()
    }
}
