#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use toroid::grid::check_invariants;
use toroid::{Board, CoreError, Coord, Direction, Grid, Move, MoveSet, Site, simulate};

/// Structured input for simulator fuzzing.
#[derive(Arbitrary, Debug)]
struct SimulateInput {
    /// Board width (wrapped to 1..=8).
    width: u8,
    /// Board height (wrapped to 1..=8).
    height: u8,
    /// Raw sites, reused cyclically to fill the board.
    sites: Vec<(u8, u8, u8)>,
    /// Raw moves as (x, y, direction code).
    moves: Vec<(u8, u8, u8)>,
}

fuzz_target!(|input: SimulateInput| {
    let width = u16::from(input.width % 8) + 1;
    let height = u16::from(input.height % 8) + 1;
    if input.sites.is_empty() {
        return;
    }

    // Cap owners to a few players so forces actually meet
    let count = usize::from(width) * usize::from(height);
    let sites: Vec<Site> = input
        .sites
        .iter()
        .cycle()
        .take(count)
        .map(|&(owner, strength, production)| Site::new(owner % 4, strength, production))
        .collect();
    let Ok(board) = Board::new(width, height, sites) else {
        return;
    };
    let Ok(grid) = Grid::from_board(&board) else {
        return;
    };

    let moves: MoveSet = input
        .moves
        .iter()
        .take(64)
        .filter_map(|&(x, y, code)| {
            let direction = Direction::from_code(code % 5)?;
            let coord = Coord::new(u16::from(x) % width, u16::from(y) % height);
            Some(Move::new(coord, direction))
        })
        .collect();

    let next = match simulate(&grid, &moves) {
        Ok(next) => next,
        // A double claim is reported, never resolved silently
        Err(CoreError::ContestedCell { .. }) => return,
        Err(e) => panic!("full-board simulation failed: {e}"),
    };

    let violations = check_invariants(&next);
    assert!(violations.is_empty(), "invariants violated: {violations:?}");

    // Input grid is untouched
    for cell in grid.cells() {
        assert_eq!(Some(&cell.site()), board.get(cell.coord()));
    }
});
