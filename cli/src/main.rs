use std::fmt::Write as _;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use minegrid_core::*;

/// Plays a scripted minesweeper game and prints the resulting board.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[arg(long, default_value_t = 10)]
    rows: Coord,

    #[arg(long, default_value_t = 10)]
    cols: Coord,

    #[arg(short, long, default_value_t = 10)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Moves to apply in order: `r:ROW,COL` reveals, `f:ROW,COL` toggles a flag
    moves: Vec<Move>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Move {
    Reveal(Coord2),
    Flag(Coord2),
}

impl FromStr for Move {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let (kind, coords) = s
            .split_once(':')
            .ok_or_else(|| format!("expected `r:ROW,COL` or `f:ROW,COL`, got `{s}`"))?;
        let (row, col) = coords
            .split_once(',')
            .ok_or_else(|| format!("expected `ROW,COL`, got `{coords}`"))?;
        let row = row.trim().parse().map_err(|e| format!("bad row `{row}`: {e}"))?;
        let col = col.trim().parse().map_err(|e| format!("bad column `{col}`: {e}"))?;

        match kind {
            "r" => Ok(Self::Reveal((row, col))),
            "f" => Ok(Self::Flag((row, col))),
            other => Err(format!("unknown move kind `{other}`")),
        }
    }
}

fn apply(game: &mut Game, mv: Move) -> Result<bool> {
    Ok(match mv {
        Move::Reveal(coords) => game
            .reveal(coords)
            .with_context(|| format!("reveal at {coords:?}"))?
            .has_update(),
        Move::Flag(coords) => game
            .toggle_flag(coords)
            .with_context(|| format!("flag at {coords:?}"))?
            .has_update(),
    })
}

fn view_char(view: CellView) -> char {
    use CellView::*;
    match view {
        Hidden => '.',
        Flagged => 'F',
        Revealed(0) => ' ',
        Revealed(count) => char::from(b'0' + count),
        Exploded => '*',
        Mine => 'x',
        IncorrectFlag => '!',
    }
}

fn render(game: &Game) -> Result<String> {
    let (rows, cols) = game.size();
    let mut out = String::new();
    for row in 0..rows {
        for col in 0..cols {
            out.push(view_char(game.view_at((row, col))?));
        }
        out.push('\n');
    }
    writeln!(
        out,
        "flagged: {}  mines left: {}",
        game.flagged_count(),
        game.remaining_mine_estimate()
    )?;
    match game.is_victory() {
        Some(true) => writeln!(out, "Victory!")?,
        Some(false) => writeln!(out, "You lose!")?,
        None => {}
    }
    Ok(out)
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config =
        GameConfig::new((args.rows, args.cols), args.mines).context("invalid board configuration")?;
    let mut game = match args.seed {
        Some(seed) => Game::with_seed(config, seed)?,
        None => Game::new(config)?,
    };
    log::debug!("seed: {:?}", game.seed());

    for mv in args.moves {
        if game.is_finished() {
            log::info!("Game over, skipping remaining moves");
            break;
        }
        if !apply(&mut game, mv)? {
            log::debug!("{:?} changed nothing", mv);
        }
    }

    print!("{}", render(&game)?);
    Ok(())
}
