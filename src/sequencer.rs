//! Command sequencer driving a set of LED channels from a polled tick.
//!
//! Provides [`LedTicker`] which fires the commands of a [`CommandList`] on
//! schedule and steps every running channel along its fade curve. Also
//! defines the [`CompletionHandler`] trait for end-of-list notification.

use crate::channel::{ChannelSet, LedOutput, Pin};
use crate::command::{Command, CommandList};
use crate::time::{Millis, TimeSource, has_elapsed};
use crate::types::TickerError;

/// Pins of the four-channel default table.
pub const DEFAULT_PINS: [Pin; 4] = [Pin(5), Pin(3), Pin(6), Pin(10)];

/// Receives notification that the active command list ran all its laps.
///
/// Implemented for every `FnMut()` closure and for plain `fn()` pointers.
/// The handler runs synchronously inside [`LedTicker::tick`] and must not block.
pub trait CompletionHandler {
    /// Called once when the active list finishes.
    fn on_finished(&mut self);
}

impl<F: FnMut()> CompletionHandler for F {
    fn on_finished(&mut self) {
        self()
    }
}

/// What a call to [`LedTicker::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// No active list. Nothing was dispatched; running channels still step.
    Inactive {
        /// Channels stepped during this tick.
        stepped: usize,
    },

    /// The active list is still running.
    Running {
        /// Commands fired during this tick.
        dispatched: usize,
        /// Channels stepped during this tick.
        stepped: usize,
    },

    /// The active list ran its last lap during this tick. The completion
    /// handler has been called and channels were not stepped.
    Finished {
        /// Commands fired during this tick before the list ended.
        dispatched: usize,
    },
}

/// Drives a fixed set of LED channels through command lists.
///
/// Call [`tick`](Self::tick) periodically, from the main loop or a timer
/// interrupt. Each tick fires every command that has come due and then gives
/// each running channel a chance to advance one step along its fade curve.
///
/// The ticker takes no locks. If more than one context can call into it, the
/// caller provides mutual exclusion (e.g. a `critical_section::Mutex`).
///
/// # Type Parameters
/// * `'a` - Lifetime of the command lists and fade curves
/// * `O` - LED output implementation type
/// * `H` - Completion handler type
/// * `N` - Number of channels
pub struct LedTicker<'a, O: LedOutput, H: CompletionHandler = fn(), const N: usize = 4> {
    output: O,
    channels: ChannelSet<'a, N>,
    handler: Option<H>,
    list: Option<CommandList<'a>>,
    cursor: Option<usize>,
    fired_at: Option<Millis>,
    wait_ms: u32,
    lap: u32,
}

impl<'a, O: LedOutput, const N: usize> LedTicker<'a, O, fn(), N> {
    /// Creates an idle ticker with one channel per entry of `pins`.
    ///
    /// Nothing is written to the output until a command runs.
    pub fn new(output: O, pins: [Pin; N]) -> Self {
        Self::build(output, pins, None)
    }
}

impl<'a, O: LedOutput> LedTicker<'a, O, fn(), 4> {
    /// Creates an idle ticker over [`DEFAULT_PINS`].
    pub fn with_default_pins(output: O) -> Self {
        Self::new(output, DEFAULT_PINS)
    }
}

impl<'a, O: LedOutput, H: CompletionHandler, const N: usize> LedTicker<'a, O, H, N> {
    /// Creates an idle ticker with a completion handler already registered.
    pub fn with_callback(output: O, pins: [Pin; N], handler: H) -> Self {
        Self::build(output, pins, Some(handler))
    }

    fn build(output: O, pins: [Pin; N], handler: Option<H>) -> Self {
        Self {
            output,
            channels: ChannelSet::new(pins),
            handler,
            list: None,
            cursor: None,
            fired_at: None,
            wait_ms: 0,
            lap: 0,
        }
    }

    /// Starts `list`, replacing any list in progress.
    ///
    /// The first command fires on the next tick. A list that is replaced
    /// before it finishes is dropped silently, without calling the handler.
    /// Channels keep their current state.
    ///
    /// # Errors
    /// * `ChannelIndexOutOfRange` - a command targets a channel not below `N`
    pub fn run_list(&mut self, list: CommandList<'a>) -> Result<(), TickerError> {
        list.validate_channels(N)?;

        self.list = Some(list);
        self.cursor = None;
        self.fired_at = None;
        self.lap = 0;

        debug!("run list: {} commands", list.len());
        Ok(())
    }

    /// Sets the handler called when the active list finishes.
    pub fn register_callback(&mut self, handler: H) {
        self.handler = Some(handler);
    }

    /// Removes and returns the completion handler.
    pub fn remove_callback(&mut self) -> Option<H> {
        self.handler.take()
    }

    /// Drops the active list without calling the completion handler.
    ///
    /// Channels that are mid-fade keep running to the end of their curves.
    pub fn stop(&mut self) {
        self.list = None;
        self.cursor = None;
        self.fired_at = None;
    }

    /// Assigns a single command to its channel immediately, outside of any list.
    ///
    /// The channel steps on the next tick whether or not a list is active.
    ///
    /// # Errors
    /// * `ChannelIndexOutOfRange` - `command.channel` is not below `N`
    pub fn dispatch(&mut self, command: &Command<'a>) -> Result<(), TickerError> {
        self.channels.assign(command)
    }

    /// Advances the ticker to `now`.
    ///
    /// Fires the next command once `now` is strictly past the previous
    /// command's wait, then keeps firing while each fired command has zero
    /// wait. Afterwards every running channel whose interval has elapsed is
    /// stepped, highest channel index first. The tick on which the list
    /// finishes returns right after calling the handler, without stepping.
    ///
    /// Without an active list no commands fire, but running channels still
    /// step, so fades left by a finished list or started with
    /// [`dispatch`](Self::dispatch) run to the end of their curves.
    pub fn tick(&mut self, now: Millis) -> TickOutcome {
        let Some(list) = self.list else {
            let stepped = self.channels.step(now, &mut self.output);
            return TickOutcome::Inactive { stepped };
        };

        let mut dispatched = 0;

        if has_elapsed(now, self.fired_at, self.wait_ms) {
            loop {
                let mut index = self.cursor.map_or(0, |i| i + 1);

                if index > list.max_index() {
                    self.lap = self.lap.saturating_add(1);

                    if list.laps().is_exhausted(self.lap) {
                        self.finish();
                        return TickOutcome::Finished { dispatched };
                    }

                    trace!("lap {} complete", self.lap);
                    index = 0;
                }

                self.cursor = Some(index);

                let Some(command) = list.get(index) else {
                    break;
                };

                if let Err(err) = self.channels.assign(command) {
                    warn!("skipping command {}: {}", index, err);
                }
                self.fired_at = Some(now);
                self.wait_ms = command.wait_ms;
                dispatched += 1;

                trace!(
                    "dispatch {} -> channel {} at {}",
                    index,
                    command.channel,
                    now
                );

                if command.wait_ms != 0 {
                    break;
                }
            }
        }

        let stepped = self.channels.step(now, &mut self.output);
        TickOutcome::Running {
            dispatched,
            stepped,
        }
    }

    /// Reads `time_source` and ticks with the result.
    pub fn tick_with<T: TimeSource>(&mut self, time_source: &T) -> TickOutcome {
        self.tick(time_source.now())
    }

    fn finish(&mut self) {
        // Cleared before the handler runs.
        self.list = None;
        self.cursor = None;
        self.fired_at = None;

        debug!("list finished after {} laps", self.lap);

        if let Some(handler) = self.handler.as_mut() {
            handler.on_finished();
        }
    }

    /// Returns true while a list is loaded and not yet finished.
    pub fn is_active(&self) -> bool {
        self.list.is_some()
    }

    /// The list in progress, if any.
    pub fn active_list(&self) -> Option<&CommandList<'a>> {
        self.list.as_ref()
    }

    /// Index of the most recently fired command of the active list.
    pub fn command_index(&self) -> Option<usize> {
        self.cursor
    }

    /// Number of laps completed by the current or most recent list.
    pub fn lap(&self) -> u32 {
        self.lap
    }

    /// The channel table, for inspecting per-channel state.
    pub fn channels(&self) -> &ChannelSet<'a, N> {
        &self.channels
    }

    /// Returns a reference to the output.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Returns a mutable reference to the output.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Consumes the ticker and returns the output.
    pub fn release(self) -> O {
        self.output
    }
}

/// Four-channel ticker over [`DEFAULT_PINS`] with a function-pointer callback.
pub type DefaultTicker<'a, O> = LedTicker<'a, O, fn(), 4>;
