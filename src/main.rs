//! Headless orbit camera demo.
//!
//! Replays a scripted gesture sequence from an input thread while the main
//! thread runs a frame loop, and logs the camera until it settles. Pass a
//! TOML preset path to override the default options; run with
//! `RUST_LOG=debug` to see every frame.

use std::path::Path;
use std::thread;
use std::time::Duration;

use orbit_camera::input::{DragMode, Gesture, GestureMapper};
use orbit_camera::options::Options;
use orbit_camera::util::frame_timing::FrameClock;
use orbit_camera::{CameraPatch, OrbitCamera};

/// Consecutive clean frames after which the camera counts as settled.
const SETTLE_FRAMES: u32 = 10;
/// Hard stop for the frame loop.
const MAX_FRAMES: u32 = 5_000;
/// Interval between info-level progress reports.
const REPORT_INTERVAL_MS: f64 = 250.0;

fn gesture_script() -> Vec<Gesture> {
    let mut script = Vec::new();
    script.extend((0..20).map(|_| Gesture::Drag {
        dx: 0.01,
        dy: 0.004,
        mode: DragMode::Rotate,
    }));
    script.extend((0..10).map(|_| Gesture::Wheel {
        x: 0.25,
        y: -0.1,
        delta: -40.0,
    }));
    script.extend((0..10).map(|_| Gesture::Drag {
        dx: -0.02,
        dy: 0.01,
        mode: DragMode::Pan,
    }));
    script.extend((0..5).map(|_| Gesture::Drag {
        dx: 0.005,
        dy: 0.0,
        mode: DragMode::Pivot,
    }));
    script.push(Gesture::Pinch {
        x: 0.0,
        y: 0.0,
        dx: 0.01,
        dy: 0.0,
        scale: 0.8,
    });
    script
}

fn run(options: &Options) {
    let mut camera = OrbitCamera::new(&options.camera);
    let mapper =
        GestureMapper::new(options.input.clone(), camera.input_handle());
    let mut clock = FrameClock::new(60);

    let producer = thread::spawn(move || {
        for gesture in gesture_script() {
            if !mapper.apply(&gesture) {
                log::debug!("gesture ignored: {gesture:?}");
            }
            thread::sleep(Duration::from_millis(8));
        }
    });

    let nudge = CameraPatch {
        d_theta: Some(0.05),
        ..CameraPatch::default()
    };
    let mut idle_frames = 0;
    let mut last_report_ms = f64::NEG_INFINITY;

    for frame_index in 0..MAX_FRAMES {
        thread::sleep(clock.until_next_frame());
        if frame_index == 60 {
            camera.resize(16.0 / 9.0);
        }
        let patch = (frame_index == 90).then_some(&nudge);

        let now_ms = clock.now_ms();
        let frame = camera.update(now_ms, patch);
        clock.end_frame();

        for correction in camera.corrections() {
            log::info!("frame {frame_index}: corrected {correction}");
        }
        if frame.dirty {
            idle_frames = 0;
            log::debug!("frame {frame_index}: eye {}", frame.eye);
        } else {
            idle_frames += 1;
        }
        if now_ms - last_report_ms >= REPORT_INTERVAL_MS {
            last_report_ms = now_ms;
            let state = camera.state();
            log::info!(
                "{:.0} fps, distance {:.3}, phi {:.3}, theta {:.3}",
                clock.fps(),
                state.distance,
                state.phi,
                state.theta
            );
        }
        if producer.is_finished() && idle_frames >= SETTLE_FRAMES {
            log::info!("settled after {frame_index} frames");
            break;
        }
    }

    if producer.join().is_err() {
        log::error!("input thread panicked");
    }
    let state = camera.state();
    log::info!(
        "final center {}, distance {:.3}, eye {}",
        state.center,
        state.distance,
        camera.frame().eye
    );
}

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    run(&options);
}
