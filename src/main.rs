use crossbeam::atomic::AtomicCell;

use flexi_logger::{Duplicate, FileSpec, Logger};

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use argh::FromArgs;

use dipole_viz::app::DipoleApp;
use dipole_viz::config::Config;

#[derive(FromArgs)]
/// Electric field of a point dipole, drawn as a grid of arrows.
struct Args {
    /// directory holding vertex.glsl and fragment.glsl (default: shaders)
    #[argh(option)]
    shaders: Option<PathBuf>,

    /// log specification (default: info)
    #[argh(option, default = "String::from(\"info\")")]
    log: String,

    /// start with arrows scaled by field magnitude
    #[argh(switch)]
    magnitude: bool,
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();

    let logger = Logger::try_with_env_or_str(&args.log)?
        .log_to_file(FileSpec::default().suppress_timestamp())
        .duplicate_to_stderr(Duplicate::Info)
        .start()?;

    let config = Config::default()
        .with_shader_dir(args.shaders)
        .with_magnitude_mode(args.magnitude);

    if let Err(e) = run(config) {
        log::error!("{:?}", e);
        logger.flush();
        std::process::exit(-1);
    }

    Ok(())
}

fn run(config: Config) -> Result<()> {
    let should_exit = Arc::new(AtomicCell::new(false));

    {
        let exit = should_exit.clone();
        ctrlc::set_handler(move || {
            exit.store(true);
        })?;
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size(config.window_size),
        renderer: eframe::Renderer::Glow,
        vsync: true,
        ..Default::default()
    };

    let title = config.title.clone();

    log::debug!("Opening window \"{}\"", title);

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let app = DipoleApp::new(cc, config, should_exit)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow!("{}", e))?;

    log::debug!("Window closed");

    Ok(())
}
