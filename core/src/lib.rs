#![no_std]

extern crate alloc;

use alloc::vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Board dimensions and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

impl GameConfig {
    /// Fails when a dimension is zero or when no cell would be left without a mine.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        Self { size, mines }.validate()
    }

    pub fn square(size: Coord, mines: CellCount) -> Result<Self> {
        Self::new((size, size), mines)
    }

    /// Forces any input into a playable configuration: at least one row and column and at
    /// least one safe cell.
    pub fn clamped((rows, cols): Coord2, mines: CellCount) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let mines = mines.min(area(rows, cols) - 1);
        Self {
            size: (rows, cols),
            mines,
        }
    }

    pub fn validate(self) -> Result<Self> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 {
            Err(GameError::EmptyBoard)
        } else if self.mines >= self.total_cells() {
            Err(GameError::TooManyMines)
        } else {
            Ok(self)
        }
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: (10, 10),
            mines: 10,
        }
    }
}

/// The cells of one game: mine placement, adjacency counts and player marks.
///
/// Cells are read through indexing; placement can't be edited from outside the crate.
///
/// ```compile_fail
/// use minegrid_core::Grid;
///
/// let mut grid = Grid::from_mine_coords((2, 2), &[]).unwrap();
/// grid[(0, 0)].has_mine = true;
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Grid {
    /// Builds a grid from a `rows × cols` mask and computes every adjacency count.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        let (Ok(rows), Ok(cols)) = (Coord::try_from(rows), Coord::try_from(cols)) else {
            return Err(GameError::InvalidCoords);
        };

        let mine_count = mine_mask.iter().filter(|&&has_mine| has_mine).count();
        if mine_count >= usize::from(area(rows, cols)) {
            return Err(GameError::TooManyMines);
        }

        let mut grid = Self {
            cells: mine_mask.map(|&has_mine| Cell {
                has_mine,
                ..Default::default()
            }),
            // bounded by area() above
            mine_count: mine_count as CellCount,
        };
        for row in 0..rows {
            for col in 0..cols {
                let adjacent_mines = grid.count_adjacent_mines((row, col));
                grid.cell_mut((row, col)).adjacent_mines = adjacent_mines;
            }
        }
        Ok(grid)
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // checked in from_mine_mask
        (rows as Coord, cols as Coord)
    }

    pub fn config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        area(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Mines among the up-to-8 neighbors of `coords`, read from the mine placement.
    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].has_mine)
            .count() as u8
    }

    /// Reveals `start` and, through zero cells, everything reachable from it. Mines,
    /// flagged and already revealed cells are left alone, numbered cells are revealed but
    /// not expanded. Returns how many cells were newly revealed.
    pub fn reveal_cells(&mut self, start: Coord2) -> CellCount {
        let mut revealed = 0;
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            let cell = self.cell_mut(coords);
            if cell.has_mine || cell.is_revealed || cell.has_flag {
                continue;
            }
            cell.is_revealed = true;
            revealed += 1;

            if cell.adjacent_mines == 0 {
                let neighbors = self.iter_neighbors(coords);
                to_visit.extend(neighbors.filter(|&pos| self[pos].is_untouched()));
                log::trace!("Flood fill expanded at {:?}, pending: {}", coords, to_visit.len());
            }
        }

        revealed
    }

    /// Only the crate mutates cells, so placement and adjacency stay as built.
    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    /// Flips the flag on an unrevealed cell. Returns whether anything changed.
    pub fn toggle_flag(&mut self, coords: Coord2) -> bool {
        let cell = self.cell_mut(coords);
        if cell.is_revealed {
            return false;
        }
        cell.has_flag = !cell.has_flag;
        true
    }

    /// A board is solved when flags sit exactly on the mines and no cell is left untouched.
    pub fn check_solution(&self) -> bool {
        let mut flagged_or_revealed: CellCount = 0;
        for cell in self.cells.iter() {
            if cell.has_flag != cell.has_mine {
                return false;
            }
            if cell.is_flagged_or_revealed() {
                flagged_or_revealed += 1;
            }
        }
        flagged_or_revealed == self.total_cells()
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
    Won,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
            Self::Won => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
