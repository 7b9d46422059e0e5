use chase_core::builder::{build_jax, build_landscape, build_nino};
use chase_core::{ChaseConfig, ChaseScene};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use winit::keyboard::Key;
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

mod render;

use render::{landscape_instances, GpuBuffer, GpuState};

const SEED_ENV: &str = "CHASE_SEED";

fn scene_rng() -> StdRng {
    match std::env::var(SEED_ENV).ok().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => {
            log::info!("[rng] seeded from {SEED_ENV}={seed}");
            StdRng::seed_from_u64(seed)
        }
        Some(Err(e)) => {
            log::warn!("[rng] ignoring {SEED_ENV}: {e}");
            StdRng::from_entropy()
        }
        None => StdRng::from_entropy(),
    }
}

fn run() -> anyhow::Result<()> {
    let mut rng = scene_rng();
    let landscape = build_landscape(&mut rng);
    let jax_model = build_jax();
    let nino_model = build_nino();
    let mut scene = ChaseScene::new(
        ChaseConfig::default(),
        StdRng::seed_from_u64(rng.gen()),
    )?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Miniature Chase")
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(GpuState::new(&window, landscape_instances(&landscape)))?;
    for (label, buffer) in gpu.buffers() {
        scene
            .teardown_mut()
            .register(Box::new(GpuBuffer::new(label, buffer)));
    }
    let size = window.inner_size();
    scene.set_viewport(size.width, size.height);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => {
            gpu.resize(size);
            scene.set_viewport(size.width, size.height);
        }
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key: Key::Character(key),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                },
            ..
        } => match key.as_str() {
            "r" | "R" => {
                scene.reseed_dust(None);
                log::info!("[keys] reseeded dust");
            }
            _ => {}
        },
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            scene.dispose();
            elwt.exit();
        }
        Event::AboutToWait => {
            let result = match scene.tick_now() {
                Some(frame) => gpu.render(&frame, &jax_model, &nino_model),
                None => return,
            };
            match result {
                Ok(_) => gpu.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[gpu] out of memory, shutting down");
                    scene.dispose();
                    elwt.exit();
                }
                Err(e) => log::warn!("[gpu] frame skipped: {e:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(e) = run() {
        log::error!("fatal: {e:#}");
        std::process::exit(1);
    }
}
