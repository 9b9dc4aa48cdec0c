use std::time::Duration;

use anyhow::Context as _;
use quadfall_engine::{Game, PieceSeed};
use quadfall_evaluator::HeuristicController;
use quadfall_runtime::Runtime;

use crate::{command::play::app::PlayApp, util::AppConfig};

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ManualPlayArg {
    /// Piece sequence seed (32 hex digits); random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Piece sequence seed (32 hex digits); random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Milliseconds between automatic placements (overrides the config file)
    #[clap(long)]
    interval_ms: Option<u64>,
}

pub(crate) fn run_manual(arg: &ManualPlayArg, config: &AppConfig) -> anyhow::Result<()> {
    let game = Game::manual(config.engine.clone(), arg.seed);
    let mut app = PlayApp::new(game);
    Runtime::new().run(&mut app)?;
    Ok(())
}

pub(crate) fn run_auto(arg: &AutoPlayArg, config: &AppConfig) -> anyhow::Result<()> {
    let AutoPlayArg { seed, interval_ms } = arg;

    let mut engine = config.engine.clone();
    if let Some(ms) = interval_ms {
        engine.auto_move_interval_secs = Duration::from_millis(*ms).as_secs_f64();
        engine
            .validate()
            .context("Invalid --interval-ms value")?;
    }
    let controller = HeuristicController::new(config.move_evaluator(), engine.auto_move_interval());
    let game = Game::automatic(engine, Box::new(controller), *seed);

    let mut app = PlayApp::new(game);
    Runtime::new().run(&mut app)?;
    Ok(())
}
