//! Integration tests for ChannelSet

mod common;
use common::*;

use led_ticker::{Action, ChannelSet, ChannelState, Command, FadeCurve, Millis, Pin};

#[test]
fn index_stays_within_curve_across_curve_swaps() {
    // BEHAVIOR: any sequence of assignments and steps keeps index in [0, max_index]
    let curves = [curve(&ON_OFF), curve(&RAMP4), curve(&RAMP10)];
    let actions = [Action::FadeUp, Action::FadeDown, Action::On, Action::Off];
    let mut set = ChannelSet::new([Pin(1)]);
    let mut out = MockOutput::new();

    let mut now = 0;
    for round in 0..60 {
        let curve = curves[round % curves.len()];
        let action = actions[(round / 3) % actions.len()];
        set.assign(&Command::new(0, action, 0, curve, 0)).unwrap();

        for _ in 0..(round % 5) {
            now += 1;
            set.step(Millis(now), &mut out);
            let channel = set.get(0).unwrap();
            assert!(channel.index() <= channel.command().curve.max_index());
        }
        out.clear();
    }
}

#[test]
fn fade_up_then_down_walks_whole_curve() {
    let mut set = ChannelSet::new([Pin(9)]);
    let mut out = MockOutput::new();

    set.assign(&Command::new(0, Action::FadeUp, 0, curve(&RAMP4), 0))
        .unwrap();
    for now in 1..10 {
        set.step(Millis(now), &mut out);
    }
    set.assign(&Command::new(0, Action::FadeDown, 0, curve(&RAMP4), 0))
        .unwrap();
    for now in 10..20 {
        set.step(Millis(now), &mut out);
    }

    assert_eq!(
        out.values_for(Pin(9)).as_slice(),
        &[85, 170, 255, 170, 85, 0]
    );
    assert_eq!(set.get(0).unwrap().state(), ChannelState::Idle);
}

#[test]
fn off_and_on_jump_to_curve_ends() {
    let mut set = ChannelSet::new([Pin(1), Pin(2)]);
    let mut out = MockOutput::new();

    set.assign(&Command::new(0, Action::On, 0, curve(&RAMP10), 0))
        .unwrap();
    set.assign(&Command::new(1, Action::Off, 0, curve(&RAMP10), 0))
        .unwrap();
    assert_eq!(set.running(), 2);

    assert_eq!(set.step(Millis(1), &mut out), 2);

    assert_eq!(out.writes(), &[(Pin(2), 0), (Pin(1), 255)]);
    assert_eq!(set.get(0).unwrap().index(), 9);
    assert_eq!(set.get(1).unwrap().index(), 0);
    assert_eq!(set.running(), 0);
}

#[test]
fn idle_set_never_steps() {
    let mut set = ChannelSet::new([Pin(1), Pin(2), Pin(3)]);
    let mut out = MockOutput::new();

    for now in [0, 1, 1_000, u32::MAX] {
        assert_eq!(set.step(Millis(now), &mut out), 0);
    }
    assert!(out.writes().is_empty());
}

#[test]
fn long_interval_holds_the_fade_across_a_clock_wrap() {
    let mut set = ChannelSet::new([Pin(1)]);
    let mut out = MockOutput::new();

    set.assign(&Command::new(0, Action::FadeUp, 0, curve(&RAMP10), 0xC000_0000))
        .unwrap();
    assert_eq!(set.step(Millis(0x8000_0000), &mut out), 1);

    // Next step is due past 0x4000_0000, after the counter wraps.
    for now in [0x8000_0001, 0xF000_0000, u32::MAX, 0, 0x4000_0000] {
        assert_eq!(set.step(Millis(now), &mut out), 0);
    }
    assert_eq!(set.step(Millis(0x4000_0001), &mut out), 1);

    assert_eq!(out.values_for(Pin(1)).as_slice(), &[28, 56]);
}

#[test]
fn generated_perceptual_curve_fades_smoothly() {
    let table: [u8; 32] = led_ticker::curve::perceptual();
    let fade = FadeCurve::new(&table).unwrap();
    let mut set = ChannelSet::new([Pin(4)]);
    let mut out = MockOutput::new();

    set.assign(&Command::new(0, Action::FadeUp, 0, fade, 0))
        .unwrap();
    for now in 1..64 {
        set.step(Millis(now), &mut out);
    }

    let values = out.values_for(Pin(4));
    assert_eq!(values.len(), 31);
    assert_eq!(values.last(), Some(&255));
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
}
