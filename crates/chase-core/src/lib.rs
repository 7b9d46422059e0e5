pub mod actor;
pub mod builder;
pub mod camera;
pub mod clock;
pub mod constants;
pub mod curve;
pub mod driver;
pub mod error;
pub mod particles;
pub mod scene;
pub mod smoothing;
pub mod sun;
pub mod teardown;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use actor::*;
pub use camera::*;
pub use clock::*;
pub use constants::*;
pub use curve::*;
pub use driver::*;
pub use error::*;
pub use particles::*;
pub use scene::*;
pub use sun::*;
pub use teardown::*;
