//! Binary entry point for the flockvis viewer.

use flockvis::{options::Options, viewer::Viewer};

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(std::path::Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("failed to load options from {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("viewer error: {e}");
        std::process::exit(1);
    }
}
