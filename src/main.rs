//! Headless driver: builds the tree scene, simulates it at a fixed frame
//! rate and toggles between assembled and scattered on a schedule.
//!
//! Usage: `tree-sim [PRESET.toml] [SECONDS]`

use std::path::Path;

use yuletide::{
    engine::TreeEngine,
    options::Options,
    scene::UploadTally,
};

const FPS: u32 = 60;
const TOGGLE_EVERY_SECS: u32 = 8;
const DEFAULT_SECS: u32 = 20;

fn load_options(arg: Option<&str>) -> Options {
    let Some(path) = arg else {
        return Options::default();
    };
    match Options::load(Path::new(path)) {
        Ok(options) => {
            log::info!("using preset {path}");
            options
        }
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = load_options(args.first().map(String::as_str));
    let seconds = args
        .get(1)
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_SECS);

    let mut engine = match TreeEngine::new(options) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    let switch = engine.mode_switch();
    let delta = 1.0 / FPS as f32;
    let mut tally = UploadTally::default();

    for second in 0..seconds {
        if second > 0 && second % TOGGLE_EVERY_SECS == 0 {
            switch.toggle();
        }
        tally.reset();
        for _ in 0..FPS {
            let _ = engine.advance(delta);
            engine.submit(&mut tally);
        }
        log::info!(
            "t={:>3}s {:?}: {} dirty group uploads, {} instances uploaded",
            second + 1,
            engine.mode(),
            tally.dirty_groups,
            tally.uploaded_instances
        );
    }
    log::info!(
        "simulated {} frames ({:.1}s) over {} instances",
        engine.frames(),
        engine.elapsed(),
        engine.scene().instance_count()
    );
}
