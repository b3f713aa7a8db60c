use std::error::Error;
use std::fs::File;
use std::io::Read;

use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Installs a stderr logger; each `-v` raises the level by one step from `Warn`.
pub fn init_logger(verbosity: u8) -> Result<(), Box<dyn Error>> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    Ok(())
}

pub fn read_bytes(input_file: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut file: File = File::open(input_file)?;
    let n_bytes = file.metadata()?.len();
    let mut text = Vec::with_capacity(n_bytes as usize);
    file.read_to_end(&mut text)?;
    Ok(text)
}
