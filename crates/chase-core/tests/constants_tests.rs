// Host-side tests for tuning constants.

use chase_core::*;

#[test]
fn blend_factors_are_fractions() {
    for k in [
        JAX_POSITION_BLEND,
        JAX_ORIENTATION_BLEND,
        NINO_POSITION_BLEND,
        NINO_ORIENTATION_BLEND,
        CAMERA_BLEND,
        SUN_BLEND,
    ] {
        assert!(k > 0.0 && k <= 1.0, "blend {k} out of range");
    }
}

#[test]
fn camera_is_slower_than_the_actors() {
    assert!(CAMERA_BLEND < JAX_POSITION_BLEND);
    assert!(CAMERA_BLEND < NINO_POSITION_BLEND);
}

#[test]
fn nino_follows_within_one_loop() {
    assert!(NINO_PATH_OFFSET < 0.0 && NINO_PATH_OFFSET > -1.0);
    assert_eq!(JAX_PATH_OFFSET, 0.0);
}

#[test]
fn timing_constants_are_sane() {
    assert!(LOOP_SECONDS > 0.0);
    assert!(MAX_FRAME_DELTA > 0.0 && MAX_FRAME_DELTA < LOOP_SECONDS);
    assert!(REFERENCE_HZ > 0.0);
    assert!(ARC_LENGTH_DIVISIONS >= PATH_POINTS.len());
}

#[test]
fn dust_boxes_are_ordered() {
    let pairs = [
        (DUST_INITIAL_MIN, DUST_INITIAL_MAX),
        (DUST_SPAWN_MIN, DUST_SPAWN_MAX),
    ];
    for (lo, hi) in pairs {
        assert!(vec3(lo).cmple(vec3(hi)).all());
    }
    assert!(DUST_SPEED_RANGE.0 > 0.0 && DUST_SPEED_RANGE.0 <= DUST_SPEED_RANGE.1);
    assert!(DUST_OPACITY_BASE - DUST_OPACITY_SWING > 0.0);
    assert!(DUST_OPACITY_BASE + DUST_OPACITY_SWING <= 1.0);
}

#[test]
fn fog_and_clip_planes_are_ordered() {
    assert!(FOG_NEAR < FOG_FAR);
    assert!(CAMERA_ZNEAR > 0.0 && CAMERA_ZNEAR < CAMERA_ZFAR);
    assert!(FOG_FAR < CAMERA_ZFAR);
}

#[test]
fn forward_axes_are_unit_length() {
    assert!((vec3(JAX_FORWARD_AXIS).length() - 1.0).abs() < 1e-6);
    assert!((vec3(NINO_FORWARD_AXIS).length() - 1.0).abs() < 1e-6);
}
