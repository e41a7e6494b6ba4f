use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use recorder::{RecorderConfig, Session};
use tracing_subscriber::EnvFilter;

mod console;
mod tui;
mod widgets;

/// Drive a simulated robot from the keyboard and record, save, load and play
/// back autonomous routines.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Configuration file. Defaults to the per-user configuration directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where logs go while the terminal is taken by the interface.
    #[arg(long, default_value = "recorder-tui.log")]
    log_file: PathBuf,

    /// Also offer single skills sections and the hard-coded routine when loading.
    #[arg(long)]
    sections: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = RecorderConfig::resolve(cli.config.as_deref())
        .wrap_err("failed to read configuration")?;

    let log = File::create(&cli.log_file)
        .wrap_err_with(|| format!("cannot create log file {}", cli.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    let session = Session::from_config(&config).wrap_err_with(|| {
        format!(
            "failed to open slot storage at {}",
            config.storage_dir.display()
        )
    })?;
    tui::run(session, &config, cli.sections)
}
