//! Retouch - interactive image editor.
//!
//! Opens a BMP or JPEG image and offers brightness, crop and box blur edits
//! on it from a text menu, then saves the result.

mod config;
mod logger;
mod menu;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::config::Config;
use crate::menu::Menu;

#[derive(Parser, Debug)]
#[command(name = "retouch", version, about = "Adjust brightness, crop and blur images")]
struct Args {
    /// Image to edit. Prompted for when omitted.
    input: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    logger::init();

    match run(Args::parse()) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(stdin.lock(), stdout.lock(), &config);

    let path = match args.input {
        Some(path) => path,
        None => match menu.prompt_input_path()? {
            Some(path) => path,
            None => return Ok(ExitCode::SUCCESS),
        },
    };

    let Some(mut session) = menu.open(&path)? else {
        return Ok(ExitCode::FAILURE);
    };

    menu.run(&mut session)?;
    Ok(ExitCode::SUCCESS)
}
