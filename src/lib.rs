#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`FadeCurve`**: An immutable table of 8-bit intensities, shared by reference
//! - **`Command`**: Channel + action + wait + curve + step interval
//! - **`Action`**: What a channel does per step (`FadeUp`, `FadeDown`, `Off`, `On`)
//! - **`CommandList`**: An ordered run of commands repeated for a number of laps
//! - **`CommandBuffer`**: Fixed-capacity, runtime-built storage for a command list
//! - **`ChannelSet`**: The fixed table of output channels and their fade state
//! - **`LedTicker`**: Fires commands on schedule and steps every running channel
//! - **`LedOutput`**: Trait to implement for your PWM hardware
//! - **`TimeSource`**: Trait to implement for your millisecond clock
//! - **`CompletionHandler`**: Notified when a command list finishes all laps
//!
//! Timestamps are wrapping 32-bit millisecond counts ([`Millis`]), so a ticker
//! keeps working across the counter overflow of a typical SysTick clock.

#[macro_use]
mod fmt;

pub mod time;
pub mod types;
pub mod curve;
pub mod command;
pub mod channel;
pub mod sequencer;

pub use channel::{Channel, ChannelSet, LedOutput, Pin};
pub use command::{Command, CommandBuffer, CommandBufferBuilder, CommandList};
pub use curve::FadeCurve;
pub use sequencer::{CompletionHandler, DEFAULT_PINS, DefaultTicker, LedTicker, TickOutcome};
pub use time::{Millis, TimeSource};
pub use types::{Action, ChannelState, LapCount, TickerError};

/// Largest value written to an output (8-bit PWM).
pub const MAX_LED_VALUE: u8 = 255;
