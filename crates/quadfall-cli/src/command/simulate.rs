use std::io::{self, Write as _};

use anyhow::Context as _;
use quadfall_engine::PieceSeed;
use quadfall_evaluator::{HeuristicController, SessionSummary, play_session};

use crate::util::AppConfig;

const DEFAULT_MAX_PIECES: usize = 100_000;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Piece sequence seed (32 hex digits); random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Stop after this many pieces have locked
    #[clap(long, default_value_t = DEFAULT_MAX_PIECES)]
    pub(super) max_pieces: usize,
    /// Print the summary as JSON
    #[clap(long, default_value_t = false)]
    json: bool,
}

pub(crate) fn run(arg: &SimulateArg, config: &AppConfig) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        max_pieces,
        json,
    } = arg;

    let controller =
        HeuristicController::new(config.move_evaluator(), config.engine.auto_move_interval());
    let summary = play_session(&config.engine, &controller, *seed, Some(*max_pieces));

    let mut stdout = io::stdout().lock();
    if *json {
        serde_json::to_writer_pretty(&mut stdout, &summary)
            .context("Failed to write JSON summary to stdout")?;
        writeln!(stdout)?;
    } else {
        write_summary(&mut stdout, &summary)?;
    }
    stdout.flush()?;
    Ok(())
}

fn write_summary<W>(out: &mut W, summary: &SessionSummary) -> io::Result<()>
where
    W: io::Write,
{
    let [_, singles, doubles, triples, tetrises] = summary.line_cleared_counter;
    if let Some(seed) = &summary.seed {
        writeln!(out, "seed:      {seed}")?;
    }
    writeln!(out, "score:     {}", summary.score)?;
    writeln!(out, "lines:     {}", summary.lines)?;
    writeln!(out, "level:     {}", summary.level)?;
    writeln!(out, "pieces:    {}", summary.pieces)?;
    writeln!(
        out,
        "clears:    {singles} single / {doubles} double / {triples} triple / {tetrises} tetris"
    )?;
    writeln!(out, "time:      {:.2}s", summary.simulated_secs)?;
    writeln!(
        out,
        "result:    {}",
        if summary.game_over {
            "game over"
        } else if summary.stalled {
            "stalled (pieces land above the board)"
        } else {
            "piece limit reached"
        }
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_summary() {
        let summary = SessionSummary {
            seed: None,
            score: 300,
            lines: 3,
            level: 1,
            pieces: 12,
            line_cleared_counter: [0, 1, 1, 0, 0],
            game_over: true,
            stalled: false,
            simulated_secs: 12.96,
        };
        let mut out = Vec::new();
        write_summary(&mut out, &summary).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("seed:"));
        assert!(text.contains("score:     300\n"));
        assert!(text.contains("1 single / 1 double / 0 triple / 0 tetris"));
        assert!(text.contains("time:      12.96s"));
        assert!(text.ends_with("result:    game over\n"));
    }

    #[test]
    fn test_text_summary_reports_stall() {
        let summary = SessionSummary {
            seed: Some("01010101010101010101010101010101".to_owned()),
            score: 0,
            lines: 0,
            level: 1,
            pieces: 7,
            line_cleared_counter: [0; 5],
            game_over: false,
            stalled: true,
            simulated_secs: 0.0,
        };
        let mut out = Vec::new();
        write_summary(&mut out, &summary).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("seed:      0101"));
        assert!(text.ends_with("result:    stalled (pieces land above the board)\n"));
    }
}
