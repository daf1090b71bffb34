use std::{env, process};

use csivk::{
    camera::{
        opencv::{HighGuiWindow, OpenCvCapture},
        run_viewer,
    },
    config::CameraConfig,
    logging,
};

fn try_main() -> anyhow::Result<()> {
    logging::init();

    let config = CameraConfig::from_args(env::args().skip(1))?;

    let pipeline = config.capture.pipeline_description();
    log::info!("Using pipeline: \n\t{pipeline}");

    let mut capture = OpenCvCapture::open(&pipeline)?;
    let mut window = HighGuiWindow::new(&config.window_name, config.fullscreen)?;

    log::info!("Hit ESC to exit");
    let stats = run_viewer(&mut capture, &mut window, config.key_delay_ms)?;
    log::info!("Shown {} frames, exit: {:?}", stats.frames_shown, stats.exit);

    Ok(())
}

fn main() {
    if let Err(e) = try_main() {
        eprintln!("{e:#}");
        process::exit(1);
    }
}
