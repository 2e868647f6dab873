use std::collections::{BTreeSet, VecDeque};

use minegrid_core::*;
use proptest::prelude::*;

fn board() -> impl Strategy<Value = (GameConfig, u64)> {
    (1..=12u8, 1..=12u8)
        .prop_flat_map(|(rows, cols)| {
            let cells = area(rows, cols);
            (Just((rows, cols)), 0..cells, any::<u64>())
        })
        .prop_map(|(size, mines, seed)| (GameConfig::new(size, mines).unwrap(), seed))
}

fn generate(config: GameConfig, seed: u64) -> Grid {
    RandomGridGenerator::new(seed).generate(config).unwrap()
}

fn brute_force_count(grid: &Grid, (row, col): Coord2) -> u8 {
    let (rows, cols) = grid.size();
    let mut count = 0;
    for r in i32::from(row) - 1..=i32::from(row) + 1 {
        for c in i32::from(col) - 1..=i32::from(col) + 1 {
            let inside = r >= 0 && c >= 0 && r < i32::from(rows) && c < i32::from(cols);
            let center = (r, c) == (i32::from(row), i32::from(col));
            if inside && !center && grid[(r as u8, c as u8)].has_mine() {
                count += 1;
            }
        }
    }
    count
}

/// Zero cells connected to `start` plus their numbered border.
fn expected_region(grid: &Grid, start: Coord2) -> BTreeSet<Coord2> {
    let mut region = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(coords) = queue.pop_front() {
        if grid[coords].adjacent_mines() != 0 {
            continue;
        }
        for pos in grid.iter_neighbors(coords) {
            if region.insert(pos) {
                queue.push_back(pos);
            }
        }
    }
    region
}

proptest! {
    #[test]
    fn placement_yields_requested_mines((config, seed) in board()) {
        let grid = generate(config, seed);
        let placed = grid.iter().filter(|(_, cell)| cell.has_mine()).count();
        prop_assert_eq!(placed, usize::from(config.mines()));
        prop_assert_eq!(grid.mine_count(), config.mines());
    }

    #[test]
    fn adjacency_matches_neighborhood((config, seed) in board()) {
        let grid = generate(config, seed);
        for (coords, cell) in grid.iter() {
            prop_assert_eq!(cell.adjacent_mines(), brute_force_count(&grid, coords));
        }
    }

    #[test]
    fn flood_fill_covers_exactly_the_zero_region((config, seed) in board()) {
        let mut grid = generate(config, seed);
        let start = grid
            .iter()
            .find(|(_, cell)| !cell.has_mine() && cell.adjacent_mines() == 0)
            .map(|(coords, _)| coords);
        prop_assume!(start.is_some());
        let start = start.unwrap();

        let expected = expected_region(&grid, start);
        let revealed_count = grid.reveal_cells(start);
        let revealed: BTreeSet<_> = grid
            .iter()
            .filter(|(_, cell)| cell.is_revealed())
            .map(|(coords, _)| coords)
            .collect();

        prop_assert_eq!(usize::from(revealed_count), revealed.len());
        prop_assert_eq!(&revealed, &expected);
        prop_assert!(grid.iter().all(|(_, cell)| !(cell.is_revealed() && cell.has_mine())));
    }

    #[test]
    fn untouched_board_with_mines_is_unsolved((config, seed) in board()) {
        prop_assume!(config.mines() > 0);
        prop_assert!(!generate(config, seed).check_solution());
    }

    #[test]
    fn exact_flags_and_reveals_solve((config, seed) in board()) {
        let mut grid = generate(config, seed);
        let coords: Vec<_> = grid.iter().map(|(coords, _)| coords).collect();
        for &pos in &coords {
            if grid[pos].has_mine() {
                grid.toggle_flag(pos);
            } else {
                grid.reveal_cells(pos);
            }
        }
        prop_assert!(grid.check_solution());

        // flags on every mine alone leave the game running
        let mut game = Game::from_grid(generate(config, seed));
        for &pos in &coords {
            if game.grid()[pos].has_mine() {
                game.toggle_flag(pos).unwrap();
            }
        }
        prop_assert_eq!(game.is_victory(), None);
    }

    #[test]
    fn double_flag_is_identity((config, seed) in board(), pick in any::<prop::sample::Index>()) {
        let mut game = Game::with_seed(config, seed).unwrap();
        let (rows, cols) = config.size();
        let index = pick.index(usize::from(config.total_cells()));
        let coords = ((index / usize::from(cols)) as u8, (index % usize::from(cols)) as u8);
        prop_assert!(coords.0 < rows);

        let before = game.clone();
        game.toggle_flag(coords).unwrap();
        if game.is_active() {
            game.toggle_flag(coords).unwrap();
            prop_assert_eq!(game, before);
        }
    }

    #[test]
    fn playing_every_safe_cell_wins((config, seed) in board()) {
        let mut game = Game::with_seed(config, seed).unwrap();
        let (rows, cols) = game.size();
        for row in 0..rows {
            for col in 0..cols {
                if game.grid()[(row, col)].has_mine() {
                    game.toggle_flag((row, col)).unwrap();
                }
            }
        }
        for row in 0..rows {
            for col in 0..cols {
                game.reveal((row, col)).unwrap();
            }
        }
        prop_assert_eq!(game.state(), GameState::Won);
        prop_assert_eq!(game.remaining_mine_estimate(), 0);
        prop_assert_eq!(game.revealed_count(), game.safe_cell_count());
    }
}
