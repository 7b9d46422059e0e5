// Host-side tests for the frame clock.

use chase_core::FrameClock;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn steady_ticks_accumulate_exactly() {
    let mut clock = FrameClock::default();
    let mut seen = Vec::new();
    for _ in 0..3 {
        seen.push(clock.elapsed());
        clock.tick(0.016);
    }
    assert_eq!(seen, vec![0.0, 0.016, 0.032]);
    assert_eq!(clock.ticks(), 3);
}

#[test]
fn invalid_deltas_become_zero() {
    let mut clock = FrameClock::default();
    clock.tick(0.1);
    for bad in [f64::NAN, -0.5, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(clock.tick(bad), 0.0, "delta {bad} not rejected");
        assert_eq!(clock.elapsed(), 0.1);
        assert_eq!(clock.delta(), 0.0);
    }
}

#[test]
fn stalls_are_clamped() {
    let mut clock = FrameClock::new(0.25);
    assert_eq!(clock.tick(5.0), 0.25);
    assert_eq!(clock.elapsed(), 0.25);
}

#[test]
fn clamp_can_be_disabled() {
    let mut clock = FrameClock::new(0.0);
    assert_eq!(clock.tick(10.0), 10.0);
    let mut clock = FrameClock::new(f64::NAN);
    assert_eq!(clock.tick(3.0), 3.0);
}

#[test]
fn elapsed_is_sum_of_reported_deltas() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut clock = FrameClock::default();
    let mut sum = 0.0f64;
    for _ in 0..10_000 {
        let raw: f64 = rng.gen_range(-0.05..0.4);
        sum += clock.tick(raw);
        assert_eq!(clock.elapsed(), sum);
    }
}

#[test]
fn first_wall_clock_tick_is_zero() {
    let mut clock = FrameClock::default();
    assert_eq!(clock.tick_now(), 0.0);
    let second = clock.tick_now();
    assert!(second >= 0.0 && second <= 0.25);
}

#[test]
fn reset_starts_over() {
    let mut clock = FrameClock::default();
    clock.tick(0.2);
    clock.tick_now();
    clock.reset();
    assert_eq!(clock.elapsed(), 0.0);
    assert_eq!(clock.ticks(), 0);
    assert_eq!(clock.tick_now(), 0.0);
}
