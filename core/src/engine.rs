use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// `None` while the game is still being played.
    pub const fn victory(self) -> Option<bool> {
        match self {
            Self::Active => None,
            Self::Won => Some(true),
            Self::Lost => Some(false),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Active
    }
}

/// Starts a game on a random `size × size` board. [`Coord`] is a `u8`, so boards are at
/// most 255 cells on a side.
#[cfg(feature = "std")]
pub fn create_game(size: Coord, mines: CellCount) -> Result<Game> {
    GameConfig::square(size, mines).and_then(Game::new)
}

/// One game from the first move to the end. Moves are only accepted while the state is
/// [`GameState::Active`], a finished game stays readable until it is dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    grid: Grid,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    state: GameState,
    triggered_mine: Option<Coord2>,
    seed: Option<u64>,
}

impl Game {
    #[cfg(feature = "std")]
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_seed(config, rand::random())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        let grid = RandomGridGenerator::new(seed).generate(config)?;
        let mut game = Self::from_grid(grid);
        game.seed = Some(seed);
        Ok(game)
    }

    /// Starts a game on a prepared grid, taking over any marks already on it.
    pub fn from_grid(grid: Grid) -> Self {
        let (revealed, flagged) = grid.iter().fold((0, 0), |(revealed, flagged), (_, cell)| {
            (
                revealed + CellCount::from(cell.is_revealed),
                flagged + CellCount::from(cell.has_flag),
            )
        });
        log::debug!(
            "New game {:?} with {} mines",
            grid.size(),
            grid.mine_count()
        );
        Self {
            grid,
            revealed_count: Saturating(revealed),
            flagged_count: Saturating(flagged),
            state: GameState::Active,
            triggered_mine: None,
            seed: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_victory(&self) -> Option<bool> {
        self.state.victory()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> GameConfig {
        self.grid.config()
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn total_mines(&self) -> CellCount {
        self.grid.mine_count()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.grid.safe_cell_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn remaining_mine_estimate(&self) -> isize {
        (self.grid.mine_count() as isize) - (self.flagged_count.0 as isize)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.grid.validate_coords(coords)?;
        Ok(self.grid[coords])
    }

    /// Visual state of a cell. Mines and wrong flags are only exposed after a loss.
    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        use CellView::*;

        let cell = self.cell_at(coords)?;
        let lost = matches!(self.state, GameState::Lost);

        Ok(match cell {
            Cell { is_revealed: true, has_mine: true, .. } => Exploded,
            Cell { is_revealed: true, adjacent_mines, .. } => Revealed(adjacent_mines),
            Cell { has_flag: true, has_mine: false, .. } if lost => IncorrectFlag,
            Cell { has_flag: true, .. } => Flagged,
            Cell { has_mine: true, .. } if lost => Mine,
            _ => Hidden,
        })
    }

    /// Reveal a cell. Flagged cells are protected, a mine ends the game at once and
    /// anything else is flood filled.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if !self.is_active() {
            log::trace!("Ignoring reveal at {:?}, game already ended", coords);
            return Ok(RevealOutcome::NoChange);
        }

        let cell = self.grid[coords];
        if cell.has_flag || cell.is_revealed {
            return Ok(RevealOutcome::NoChange);
        }

        if cell.has_mine {
            self.grid.cell_mut(coords).is_revealed = true;
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return Ok(RevealOutcome::HitMine);
        }

        let revealed = self.grid.reveal_cells(coords);
        self.revealed_count += revealed;
        log::debug!("Revealed {} cells from {:?}", revealed, coords);

        Ok(if self.grid.check_solution() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    /// Toggle the flag on an unrevealed cell. Flagging can finish the game when it
    /// completes the solution.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if !self.is_active() {
            log::trace!("Ignoring flag at {:?}, game already ended", coords);
            return Ok(FlagOutcome::NoChange);
        }

        if !self.grid.toggle_flag(coords) {
            return Ok(FlagOutcome::NoChange);
        }

        if self.grid[coords].has_flag {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }

        Ok(if self.grid.check_solution() {
            self.end_game(true);
            FlagOutcome::Won
        } else {
            FlagOutcome::Changed
        })
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!(
            "Game ended: {:?}, revealed {} of {} safe cells",
            self.state,
            self.revealed_count.0,
            self.grid.safe_cell_count()
        );
    }
}
