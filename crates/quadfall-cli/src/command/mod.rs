use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    logging::{self, LogTarget},
    util,
};

use self::{
    play::{AutoPlayArg, ManualPlayArg},
    simulate::SimulateArg,
};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// JSON file with engine timing, scoring and heuristic weights
    #[clap(long, global = true)]
    config: Option<PathBuf>,
    /// Write logs to this file
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play with the keyboard (default)
    #[command(name = "play")]
    ManualPlay(#[clap(flatten)] ManualPlayArg),
    /// Watch the heuristic player
    #[command(name = "auto-play")]
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Run an automatic game without a terminal UI and print a summary
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args
        .mode
        .unwrap_or(Mode::ManualPlay(ManualPlayArg::default()));

    let log_target = match mode {
        Mode::Simulate(_) => LogTarget::Stderr,
        Mode::ManualPlay(_) | Mode::AutoPlay(_) => LogTarget::FileOnly,
    };
    logging::init(args.verbose, args.log_file.as_deref(), log_target)?;
    let config = util::load_config(args.config.as_deref())?;

    match mode {
        Mode::ManualPlay(arg) => play::run_manual(&arg, &config)?,
        Mode::AutoPlay(arg) => play::run_auto(&arg, &config)?,
        Mode::Simulate(arg) => simulate::run(&arg, &config)?,
    }
    Ok(())
}
