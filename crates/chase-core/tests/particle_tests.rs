// Host-side tests for the dust pool.

use chase_core::{DustConfig, ParticleField};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn field(config: DustConfig, seed: u64) -> ParticleField {
    ParticleField::new(config, StdRng::seed_from_u64(seed))
}

#[test]
fn every_particle_respawns_over_a_long_run() {
    let config = DustConfig {
        count: 10,
        speed_range: (1.0, 1.0),
        ..DustConfig::default()
    };
    let mut dust = field(config, 1);
    for p in dust.particles() {
        assert!((0.0..1.0).contains(&p.lifetime));
    }
    for _ in 0..2000 {
        dust.advance(0.1);
    }
    for (i, p) in dust.particles().iter().enumerate() {
        assert!(p.respawns >= 1, "particle {i} never recycled");
    }
}

#[test]
fn lifetimes_stay_in_unit_range() {
    let mut dust = field(DustConfig::default(), 2);
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..500 {
        dust.advance(rng.gen_range(0.0..1.0));
        for p in dust.particles() {
            assert!(
                (0.0..=1.0).contains(&p.lifetime),
                "lifetime {} out of range",
                p.lifetime
            );
            assert!(p.position.is_finite());
        }
    }
}

#[test]
fn zero_or_invalid_delta_changes_nothing() {
    let mut dust = field(DustConfig::default(), 4);
    dust.advance(0.3);
    let before = dust.particles().to_vec();
    assert_eq!(dust.advance(0.0), 0);
    assert_eq!(dust.advance(f32::NAN), 0);
    assert_eq!(dust.advance(-1.0), 0);
    assert_eq!(dust.particles(), &before[..]);
}

#[test]
fn recycled_particles_land_in_spawn_box() {
    let config = DustConfig::default();
    let (lo, hi) = (config.spawn_min, config.spawn_max);
    let mut dust = field(config, 5);
    for _ in 0..300 {
        let before = dust.particles().to_vec();
        dust.advance(0.05);
        for (old, new) in before.iter().zip(dust.particles()) {
            if new.respawns > old.respawns {
                assert_eq!(new.lifetime, 0.0);
                assert!(
                    new.position.cmpge(lo).all() && new.position.cmple(hi).all(),
                    "respawned at {:?}",
                    new.position
                );
            }
        }
    }
}

#[test]
fn live_particles_drift_with_their_speed() {
    let config = DustConfig {
        drift_per_sec: Vec3::new(0.0, 1.0, 0.0),
        lifetime_rate: 0.01,
        ..DustConfig::default()
    };
    let mut dust = field(config, 6);
    let before = dust.particles().to_vec();
    dust.advance(0.1);
    for (old, new) in before.iter().zip(dust.particles()) {
        if new.respawns == old.respawns {
            let moved = new.position - old.position;
            assert!((moved.y - 0.1 * old.speed).abs() < 1e-5);
            assert!(moved.x.abs() < 1e-6 && moved.z.abs() < 1e-6);
        }
    }
}

#[test]
fn pool_never_reallocates() {
    let mut dust = field(DustConfig::default(), 7);
    let ptr = dust.particles().as_ptr();
    let len = dust.len();
    for _ in 0..1000 {
        dust.advance(0.2);
    }
    assert_eq!(dust.len(), len);
    assert_eq!(dust.particles().as_ptr(), ptr);
}

#[test]
fn same_seed_same_dust() {
    let mut a = field(DustConfig::default(), 8);
    let mut b = field(DustConfig::default(), 8);
    for _ in 0..200 {
        assert_eq!(a.advance(0.1), b.advance(0.1));
    }
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn reseed_controls_future_respawns() {
    let mut a = field(DustConfig::default(), 9);
    let mut b = field(DustConfig::default(), 9);
    a.reseed(Some(42));
    b.reseed(Some(42));
    for _ in 0..200 {
        a.advance(0.1);
        b.advance(0.1);
    }
    assert_eq!(a.particles(), b.particles());

    a.reseed(Some(1));
    b.reseed(Some(2));
    for _ in 0..200 {
        a.advance(0.1);
        b.advance(0.1);
    }
    assert_ne!(a.particles(), b.particles());
}

#[test]
fn opacity_pulses_around_its_base() {
    let dust = field(DustConfig::default(), 11);
    let cfg = dust.config().clone();
    for i in 0..100 {
        let o = dust.opacity(i as f64 * 0.1);
        assert!(o >= cfg.opacity_base - cfg.opacity_swing - 1e-6);
        assert!(o <= cfg.opacity_base + cfg.opacity_swing + 1e-6);
    }
    assert_eq!(dust.opacity(0.0), cfg.opacity_base);
}

#[test]
fn empty_pool_is_fine() {
    let mut dust = field(
        DustConfig {
            count: 0,
            ..DustConfig::default()
        },
        12,
    );
    assert!(dust.is_empty());
    assert_eq!(dust.advance(0.1), 0);
}
