#![forbid(unsafe_code)]

//! On-screen keyboard entry point.

use std::process;

use osk::{assets, cli, logging};
use osk_linux::{FramebufferCanvas, HostSystem, JoypadInput, VcsConsole};
use osk_runtime::{Controller, UiState};
use tracing::{error, info};

fn main() {
    let opts = cli::Opts::parse();
    logging::init(opts.config.silent);

    let images = match assets::load_images(&opts.asset_dir) {
        Ok(images) => images,
        Err(e) => {
            error!(error = %e, "failed to load keyboard images");
            process::exit(1);
        }
    };

    let mut controller = Controller::new(
        opts.config,
        images,
        JoypadInput::new(&opts.joypad_device),
        FramebufferCanvas::new(&opts.fb_device),
        VcsConsole::new(&opts.vcs_device),
        HostSystem::new(&opts.screenshot_dir, &opts.poweroff),
    );
    if let Err(e) = controller.initialize() {
        error!(error = %e, "startup failed");
        process::exit(1);
    }
    info!(
        consoles = opts.config.consoles(),
        input = ?opts.config.input,
        "on-screen keyboard started"
    );

    if let Err(e) = controller.run() {
        error!(error = %e, "keyboard loop could not run");
        process::exit(1);
    }
    if controller.state() == UiState::Failed {
        process::exit(1);
    }
}
