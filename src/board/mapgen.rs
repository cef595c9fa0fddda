//! Deterministic board generation for tests, benchmarks and the CLI.

// Generation uses intentional casts for RNG output
#![allow(clippy::cast_possible_truncation)]

use super::{Board, OwnerId, Site};
use crate::error::{CoreError, CoreResult};
use crate::grid::Coord;

/// Maximum number of players on a generated board.
pub const MAX_PLAYERS: OwnerId = 8;

/// Strength each player starts with on its home site.
pub const HOME_STRENGTH: u8 = 255;

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
struct Rng {
    state: u64,
}

impl Rng {
    const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Random value in [0, max).
    fn below(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % u64::from(max)) as u32
    }
}

/// Generate a board with `players` home sites scattered over neutral land.
///
/// Production is smoothed over each site's neighbourhood so that rich and
/// poor regions form, and neutral strength loosely tracks production.
///
/// # Errors
///
/// Returns an error if a dimension is zero, if `players` exceeds
/// [`MAX_PLAYERS`], or if the board has fewer sites than players.
pub fn generate(seed: u64, width: u16, height: u16, players: OwnerId) -> CoreResult<Board> {
    if players > MAX_PLAYERS {
        return Err(CoreError::InvalidConfig(format!(
            "at most {MAX_PLAYERS} players, got {players}"
        )));
    }
    let mut board = Board::filled(width, height, Site::default())?;
    let area = u32::from(width) * u32::from(height);
    if u32::from(players) > area {
        return Err(CoreError::InvalidConfig(format!(
            "{players} players do not fit on a {width}x{height} board"
        )));
    }

    let mut rng = Rng::new(seed);
    let raw: Vec<u32> = (0..area).map(|_| rng.below(16)).collect();

    for y in 0..height {
        for x in 0..width {
            let coord = Coord::new(x, y);
            let mut sum = raw[index(coord, width)] * 2;
            for n in coord.neighbors(width, height) {
                sum += raw[index(n, width)];
            }
            let production = (sum / 6 + 1).min(15) as u8;
            let strength = (u32::from(production) * 8 + rng.below(40)).min(255) as u8;
            board.set(coord, Site::new(0, strength, production));
        }
    }

    let mut placed: Vec<Coord> = Vec::new();
    let mut owner: OwnerId = 1;
    while owner <= players {
        let coord = Coord::new(
            rng.below(u32::from(width)) as u16,
            rng.below(u32::from(height)) as u16,
        );
        if placed.contains(&coord) {
            continue;
        }
        let production = board.get(coord).map_or(1, |s| s.production);
        board.set(coord, Site::new(owner, HOME_STRENGTH, production));
        placed.push(coord);
        owner += 1;
    }

    Ok(board)
}

fn index(coord: Coord, width: u16) -> usize {
    usize::from(coord.y) * usize::from(width) + usize::from(coord.x)
}
