use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform placement without replacement. Sparse boards draw random cells and redraw on
/// collision; boards more than half full pick each mine by index among the free cells so
/// that no draw is wasted.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: GameConfig) -> Result<Grid> {
        let config = config.validate()?;
        let (rows, cols) = config.size();
        let total_cells = config.total_cells();
        let mines = config.mines();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());

        if mines <= total_cells / 2 {
            let mut placed = 0;
            let mut collisions = 0u32;
            while placed < mines {
                let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
                let slot = &mut mine_mask[coords.to_nd_index()];
                if *slot {
                    collisions += 1;
                    continue;
                }
                *slot = true;
                placed += 1;
            }
            log::trace!("Placed {} mines with {} redraws", placed, collisions);
        } else {
            let mut free_cells = total_cells;
            for _ in 0..mines {
                let place = usize::from(rng.random_range(0..free_cells));
                if let Some(slot) = mine_mask.iter_mut().filter(|slot| !**slot).nth(place) {
                    *slot = true;
                }
                free_cells -= 1;
            }
            log::trace!("Placed {} mines by index over {} cells", mines, total_cells);
        }

        let grid = Grid::from_mine_mask(mine_mask)?;
        if grid.mine_count() != mines {
            log::warn!(
                "Generated grid count mismatch, actual: {}, requested: {}",
                grid.mine_count(),
                mines
            );
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: Coord2, mines: CellCount) -> GameConfig {
        GameConfig::new(size, mines).unwrap()
    }

    #[test]
    fn sparse_board_gets_exact_mine_count() {
        let grid = RandomGridGenerator::new(7).generate(config((10, 10), 12)).unwrap();
        assert_eq!(grid.mine_count(), 12);
        assert_eq!(grid.iter().filter(|(_, cell)| cell.has_mine).count(), 12);
    }

    #[test]
    fn dense_board_leaves_exactly_one_safe_cell() {
        let grid = RandomGridGenerator::new(7).generate(config((4, 5), 19)).unwrap();
        assert_eq!(grid.mine_count(), 19);
        assert_eq!(grid.safe_cell_count(), 1);
    }

    #[test]
    fn same_seed_same_layout() {
        let a = RandomGridGenerator::new(99).generate(config((8, 8), 10)).unwrap();
        let b = RandomGridGenerator::new(99).generate(config((8, 8), 10)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_mines_gives_empty_field() {
        let grid = RandomGridGenerator::new(1).generate(config((3, 3), 0)).unwrap();
        assert_eq!(grid.mine_count(), 0);
        assert!(grid.iter().all(|(_, cell)| cell.adjacent_mines == 0));
    }

    #[test]
    fn adjacency_is_computed_after_placement() {
        let grid = RandomGridGenerator::new(3).generate(config((6, 7), 15)).unwrap();
        for (coords, cell) in grid.iter() {
            assert_eq!(cell.adjacent_mines, grid.count_adjacent_mines(coords));
        }
    }
}
