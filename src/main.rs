use std::process::ExitCode;

use rotator::config::Config;
use rotator::error::StartupError;
use rotator::{logger, server};

fn main() -> ExitCode {
    let cfg = Config::load();

    let level = cfg.as_ref().map_or("info", |c| c.logging.level.as_str());
    if let Err(e) = logger::init(level) {
        eprintln!("{e}");
    }

    match cfg.map_err(StartupError::from).and_then(server::serve) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
