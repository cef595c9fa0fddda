#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use toroid::{Board, Config, Direction, Fields, Grid, Site, plan_moves};

/// Structured input for field and planner fuzzing.
#[derive(Arbitrary, Debug)]
struct FieldsInput {
    /// Board width (wrapped to 1..=10).
    width: u8,
    /// Board height (wrapped to 1..=10).
    height: u8,
    /// Raw sites, reused cyclically to fill the board.
    sites: Vec<(u8, u8, u8)>,
    /// Owner to build fields for (wrapped to 1..=3).
    owner: u8,
}

fuzz_target!(|input: FieldsInput| {
    let width = u16::from(input.width % 10) + 1;
    let height = u16::from(input.height % 10) + 1;
    if input.sites.is_empty() {
        return;
    }
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
    let owner = input.owner % 3 + 1;

    let fields = Fields::build(&grid, owner);
    let fixed = [&fields.body, &fields.support, &fields.prospects];
    for field in fixed.into_iter().chain(fields.threats.values()) {
        for (coord, entry) in field.iter() {
            // Off a seed, a direction always leads one hop closer to it
            if entry.distance == 0 || entry.direction == Direction::Still {
                continue;
            }
            let next = grid.location(coord, entry.direction);
            let Some(next_entry) = field.entry(next) else {
                panic!("direction at {coord:?} leads off the field");
            };
            assert!(next_entry.cost <= entry.cost);
            assert_eq!(next_entry.distance + 1, entry.distance);
        }
    }

    // Planning a full board never fails and covers every owned cell
    let config = Config {
        search: toroid::config::SearchConfig {
            max_deciders: 2,
            ..Default::default()
        },
        ..Config::default()
    };
    if let Ok(moves) = plan_moves(&grid, owner, &config) {
        assert_eq!(moves.len(), grid.stats(owner).territory as usize);
    }
});
