use glam::Vec3;

// Shared animation and staging constants. Every tuned number lives here and is
// surfaced through `ChaseConfig` so frontends can override it.

// Timing
pub const LOOP_SECONDS: f64 = 8.0; // one full traversal of the path
pub const REFERENCE_HZ: f32 = 60.0; // blend factors below are per frame at this rate
pub const MAX_FRAME_DELTA: f64 = 0.25; // clamp for stalled hosts (tab switch, debugger)

// Path control points (ground plane, y = 0)
pub const PATH_POINTS: [[f32; 3]; 6] = [
    [-3.6, 0.0, -0.2],
    [-2.1, 0.0, -0.3],
    [-0.8, 0.0, 0.05],
    [0.8, 0.0, 0.32],
    [2.4, 0.0, 0.15],
    [3.6, 0.0, -0.08],
];
pub const ARC_LENGTH_DIVISIONS: usize = 200;

// Jax (vehicle, lead actor)
pub const JAX_FORWARD_AXIS: [f32; 3] = [1.0, 0.0, 0.0]; // model faces +X
pub const JAX_PATH_OFFSET: f32 = 0.0;
pub const JAX_RIDE_HEIGHT: f32 = 0.18;
pub const JAX_BOB_AMPLITUDE: f32 = 0.01;
pub const JAX_BOB_FREQUENCY: f32 = 6.0; // rad/s
pub const JAX_POSITION_BLEND: f32 = 0.35;
pub const JAX_ORIENTATION_BLEND: f32 = 0.2;
pub const JAX_WHEEL_SPIN_RATE: f32 = 19.38; // rad/s about each wheel axle

// Nino (walker, trails Jax)
pub const NINO_FORWARD_AXIS: [f32; 3] = [0.0, 0.0, 1.0]; // model faces +Z
pub const NINO_PATH_OFFSET: f32 = -0.08; // fraction of the loop behind Jax
pub const NINO_LATERAL_OFFSET: [f32; 3] = [-0.2, 0.0, 0.22];
pub const NINO_BASE_HEIGHT: f32 = 0.15;
pub const NINO_HOP_HEIGHT: f32 = 0.12;
pub const NINO_HOP_FREQUENCY: f32 = 6.0;
pub const NINO_JITTER_AMPLITUDE: f32 = 0.05;
pub const NINO_JITTER_FREQUENCY: f32 = 9.0;
pub const NINO_POSITION_BLEND: f32 = 0.34;
pub const NINO_ORIENTATION_BLEND: f32 = 0.34;
pub const NINO_PITCH_AMPLITUDE: f32 = 0.08;
pub const NINO_PITCH_FREQUENCY: f32 = 4.0;
pub const NINO_ROLL_AMPLITUDE: f32 = 0.15;
pub const NINO_ROLL_FREQUENCY: f32 = 3.0;

// Camera
pub const CAMERA_START_POSITION: [f32; 3] = [-2.2, 0.62, 1.2];
pub const CAMERA_OFFSET: [f32; 3] = [-1.3, 0.32, 0.3]; // in the lead's heading frame (+X forward)
pub const CAMERA_LOOK_AHEAD: f32 = 0.4;
pub const CAMERA_LOOK_HEIGHT: f32 = 0.42;
pub const CAMERA_BLEND: f32 = 0.08;
pub const CAMERA_FOVY_DEGREES: f32 = 42.0;
pub const CAMERA_ASPECT: f32 = 16.0 / 9.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 50.0;

// Dust
pub const DUST_COUNT: usize = 60;
pub const DUST_LIFETIME_RATE: f32 = 0.6; // lifetime fraction per second at speed 1
pub const DUST_SPEED_RANGE: (f32, f32) = (0.4, 1.0);
pub const DUST_DRIFT_PER_SEC: [f32; 3] = [-0.18, 0.24, 0.0];
pub const DUST_INITIAL_MIN: [f32; 3] = [-0.1, 0.15, -0.1];
pub const DUST_INITIAL_MAX: [f32; 3] = [0.1, 0.27, 0.1];
pub const DUST_SPAWN_MIN: [f32; 3] = [-0.35, 0.1, -0.15];
pub const DUST_SPAWN_MAX: [f32; 3] = [-0.05, 0.3, 0.15];
pub const DUST_OPACITY_BASE: f32 = 0.4;
pub const DUST_OPACITY_SWING: f32 = 0.05;
pub const DUST_OPACITY_FREQUENCY: f32 = 2.0;
pub const DUST_SPIN_RATE: f32 = 0.15; // rad/s about the anchor's Y axis
pub const DUST_POINT_SIZE: f32 = 0.12;
pub const DUST_COLOR: [f32; 3] = [0.81, 0.66, 0.52];

// Sun
pub const SUN_HOME: [f32; 3] = [4.0, 4.5, -1.5];
pub const SUN_TARGET_OFFSET: [f32; 3] = [1.6, 0.2, -0.6];
pub const SUN_BLEND: f32 = 0.02;

// Palette
pub const BACKGROUND_RGB: [f32; 3] = [0.051, 0.090, 0.141];
pub const FOG_NEAR: f32 = 6.0;
pub const FOG_FAR: f32 = 14.0;

// Degenerate-input guard for tangents and headings
pub const TANGENT_EPSILON: f32 = 1e-6;

#[inline]
pub fn vec3(a: [f32; 3]) -> Vec3 {
    Vec3::from_array(a)
}
