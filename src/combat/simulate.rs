//! The combat simulator.

use super::MoveSet;
use crate::board::{MAX_STRENGTH, NEUTRAL, OwnerId};
use crate::error::{CoreError, CoreResult};
use crate::grid::{Coord, Direction, Grid, assert_invariants};
use std::collections::{BTreeMap, BTreeSet};

/// Strength per owner per location.
type Forces = BTreeMap<Coord, BTreeMap<OwnerId, u32>>;

/// Resolve one turn of `moves` on a copy of `grid`.
///
/// The input grid is never modified. Moves from neutral cells are ignored.
///
/// # Errors
///
/// Returns [`CoreError::OutsideWindow`] if a move starts or ends outside the
/// grid window, and [`CoreError::ContestedCell`] if two forces survive on the
/// same cell.
pub fn simulate(grid: &Grid, moves: &MoveSet) -> CoreResult<Grid> {
    let mut next = grid.clone();
    let mut conflict: BTreeSet<Coord> = BTreeSet::new();
    let mut destinations: BTreeSet<Coord> = BTreeSet::new();
    let mut active: Forces = BTreeMap::new();
    let mut passive: Forces = BTreeMap::new();

    // Movers leave their cells and fight at the destination
    for m in moves.iter() {
        if m.direction == Direction::Still {
            continue;
        }
        if !next.try_cell(m.coord)?.is_owned() {
            tracing::debug!(x = m.coord.x, y = m.coord.y, "ignoring move from neutral cell");
            continue;
        }
        let dest = next.location(m.coord, m.direction);
        if !next.contains(dest) {
            return Err(CoreError::OutsideWindow { coord: dest });
        }
        let (owner, strength) = take_strength(&mut next, m.coord)?;
        add_force(&mut active, dest, owner, strength);
        conflict.insert(m.coord);
        conflict.insert(dest);
        destinations.insert(dest);
    }

    // Everything within one step of a destination is drawn in
    for &dest in &destinations {
        for loc in reach(&next, dest) {
            let (owner, strength) = take_strength(&mut next, loc)?;
            conflict.insert(loc);
            match active.get_mut(&loc).and_then(|f| f.get_mut(&owner)) {
                Some(force) => *force = capped(*force + u32::from(strength)),
                None => add_force(&mut passive, loc, owner, strength),
            }
        }
    }

    // Each active force hits every foreign force within one step
    let mut effect: Forces = BTreeMap::new();
    let mut ownerless: BTreeSet<Coord> = BTreeSet::new();
    for (&loc, forces) in &active {
        for (&owner, &force) in forces {
            for target in reach(&next, loc) {
                if let Some(others) = active.get(&target) {
                    for &other in others.keys().filter(|&&o| o != owner) {
                        add_effect(&mut effect, target, other, force);
                        ownerless.insert(target);
                    }
                }
                if let Some(others) = passive.get(&target) {
                    for (&other, &held) in others.iter().filter(|&(&o, _)| o != owner) {
                        add_effect(&mut effect, target, other, force);
                        ownerless.insert(target);
                        // Neutral land only fights back where it stands
                        if other != NEUTRAL || target == loc {
                            add_effect(&mut effect, loc, owner, held);
                        }
                    }
                }
            }
        }
    }

    for forces in [&mut active, &mut passive] {
        for (loc, by_owner) in forces.iter_mut() {
            let Some(hits) = effect.get(loc) else {
                continue;
            };
            for (owner, force) in by_owner.iter_mut() {
                *force = force.saturating_sub(hits.get(owner).copied().unwrap_or(0));
            }
        }
    }

    // Survivors claim their cells; active forces are listed first
    let locations: BTreeSet<Coord> = active.keys().chain(passive.keys()).copied().collect();
    for loc in locations {
        let survivors: Vec<(OwnerId, u32)> = active
            .get(&loc)
            .into_iter()
            .chain(passive.get(&loc))
            .flatten()
            .filter(|&(_, &force)| force > 0)
            .map(|(&owner, &force)| (owner, force))
            .collect();
        if let Some((owner, strength)) = claim(loc, &survivors, ownerless.contains(&loc))? {
            next.cell_mut(loc)
                .ok_or(CoreError::OutsideWindow { coord: loc })?
                .set_owner(owner, strength);
        }
    }

    for cell in next.cells_mut() {
        if cell.is_owned() && !conflict.contains(&cell.coord()) {
            cell.set_strength(cell.strength().saturating_add(cell.production()));
        }
    }

    next.reset();
    assert_invariants(&next);
    tracing::trace!(
        moves = moves.len(),
        active = active.len(),
        passive = passive.len(),
        conflict = conflict.len(),
        "simulated turn"
    );
    Ok(next)
}

/// The owner and strength `loc` ends the turn with, if it changes hands.
///
/// Every pair of foreign forces sharing a location damages each other in
/// full, so more than one survivor means the resolution rules were broken.
fn claim(loc: Coord, survivors: &[(OwnerId, u32)], ownerless: bool) -> CoreResult<Option<(OwnerId, u8)>> {
    match *survivors {
        [] if ownerless => Ok(Some((NEUTRAL, 0))),
        [] => Ok(None),
        [(owner, force)] => Ok(Some((owner, narrow(force)))),
        [(first, _), (second, _), ..] => Err(CoreError::ContestedCell {
            coord: loc,
            first,
            second,
        }),
    }
}

/// Distinct in-window locations within one step of `loc`, `loc` first.
fn reach(grid: &Grid, loc: Coord) -> Vec<Coord> {
    let mut out = Vec::with_capacity(Direction::ALL.len());
    for d in Direction::ALL {
        let c = grid.location(loc, d);
        if grid.contains(c) && !out.contains(&c) {
            out.push(c);
        }
    }
    out
}

/// Zero the strength of the cell at `coord`, returning its owner and what it held.
fn take_strength(grid: &mut Grid, coord: Coord) -> CoreResult<(OwnerId, u8)> {
    let cell = grid
        .cell_mut(coord)
        .ok_or(CoreError::OutsideWindow { coord })?;
    let taken = (cell.owner(), cell.strength());
    cell.set_strength(0);
    Ok(taken)
}

fn add_force(forces: &mut Forces, loc: Coord, owner: OwnerId, strength: u8) {
    let force = forces.entry(loc).or_default().entry(owner).or_default();
    *force = capped(*force + u32::from(strength));
}

fn add_effect(effect: &mut Forces, loc: Coord, owner: OwnerId, amount: u32) {
    *effect.entry(loc).or_default().entry(owner).or_default() += amount;
}

fn capped(force: u32) -> u32 {
    force.min(u32::from(MAX_STRENGTH))
}

fn narrow(force: u32) -> u8 {
    u8::try_from(force).unwrap_or(MAX_STRENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Site};
    use crate::combat::Move;
    use crate::grid::Window;

    fn site(grid: &Grid, x: u16, y: u16) -> Site {
        grid.cell(Coord::new(x, y)).unwrap().site()
    }

    fn moves(list: &[(u16, u16, Direction)]) -> MoveSet {
        list.iter()
            .map(|&(x, y, d)| Move::new(Coord::new(x, y), d))
            .collect()
    }

    #[test]
    fn test_all_still_adds_production() {
        let mut board = Board::filled(3, 3, Site::new(0, 7, 2)).unwrap();
        board.set(Coord::new(1, 1), Site::new(1, 250, 9));
        board.set(Coord::new(0, 0), Site::new(2, 10, 3));
        let grid = Grid::from_board(&board).unwrap();

        let next = simulate(&grid, &MoveSet::new()).unwrap();
        assert_eq!(site(&next, 1, 1), Site::new(1, 255, 9));
        assert_eq!(site(&next, 0, 0), Site::new(2, 13, 3));
        assert_eq!(site(&next, 2, 2), Site::new(0, 7, 2));
        assert_eq!(site(&grid, 1, 1).strength, 250);
    }

    #[test]
    fn test_capture_neutral_costs_its_strength() {
        let mut board = Board::filled(3, 3, Site::new(0, 5, 1)).unwrap();
        board.set(Coord::new(1, 1), Site::new(1, 20, 2));
        let grid = Grid::from_board(&board).unwrap();

        let next = simulate(&grid, &moves(&[(1, 1, Direction::East)])).unwrap();
        assert_eq!(site(&next, 2, 1), Site::new(1, 15, 1));
        // The vacated source stays owned and does not produce
        assert_eq!(site(&next, 1, 1), Site::new(1, 0, 2));
        // Neutral land next to the fight is overrun
        assert_eq!(site(&next, 2, 0), Site::new(0, 0, 1));
    }

    #[test]
    fn test_weak_attack_on_neutral_fails() {
        let mut board = Board::filled(3, 3, Site::new(0, 30, 1)).unwrap();
        board.set(Coord::new(1, 1), Site::new(1, 20, 2));
        let grid = Grid::from_board(&board).unwrap();

        let next = simulate(&grid, &moves(&[(1, 1, Direction::North)])).unwrap();
        assert_eq!(site(&next, 1, 0), Site::new(0, 10, 1));
        assert_eq!(next.stats(1).territory, 1);
    }

    #[test]
    fn test_same_owner_forces_merge_and_cap() {
        let mut board = Board::filled(3, 1, Site::new(0, 0, 1)).unwrap();
        board.set(Coord::new(0, 0), Site::new(1, 200, 1));
        board.set(Coord::new(2, 0), Site::new(1, 200, 1));
        let grid = Grid::from_board(&board).unwrap();

        let next = simulate(
            &grid,
            &moves(&[(0, 0, Direction::East), (2, 0, Direction::West)]),
        )
        .unwrap();
        assert_eq!(site(&next, 1, 0), Site::new(1, 255, 1));
    }

    #[test]
    fn test_stationary_owner_reinforces_incoming() {
        let mut board = Board::filled(3, 1, Site::new(0, 0, 1)).unwrap();
        board.set(Coord::new(0, 0), Site::new(1, 10, 1));
        board.set(Coord::new(1, 0), Site::new(1, 6, 1));
        let grid = Grid::from_board(&board).unwrap();

        let next = simulate(&grid, &moves(&[(0, 0, Direction::East)])).unwrap();
        assert_eq!(site(&next, 1, 0), Site::new(1, 16, 1));
    }

    #[test]
    fn test_neutral_move_is_ignored() {
        let board = Board::filled(2, 2, Site::new(0, 9, 1)).unwrap();
        let grid = Grid::from_board(&board).unwrap();
        let next = simulate(&grid, &moves(&[(0, 0, Direction::South)])).unwrap();
        assert_eq!(site(&next, 0, 0), Site::new(0, 9, 1));
        assert_eq!(site(&next, 0, 1), Site::new(0, 9, 1));
    }

    #[test]
    fn test_move_leaving_window_is_rejected() {
        let mut board = Board::filled(5, 5, Site::default()).unwrap();
        board.set(Coord::new(1, 1), Site::new(1, 5, 1));
        let window = Window {
            origin: Coord::new(1, 1),
            width: 2,
            height: 2,
        };
        let grid = Grid::build(window, &board).unwrap();

        let err = simulate(&grid, &moves(&[(1, 1, Direction::West)])).unwrap_err();
        assert!(matches!(err, CoreError::OutsideWindow { coord } if coord == Coord::new(0, 1)));

        let err = simulate(&grid, &moves(&[(4, 4, Direction::Still)]));
        assert!(err.is_ok());
        let err = simulate(&grid, &moves(&[(4, 4, Direction::North)])).unwrap_err();
        assert!(matches!(err, CoreError::OutsideWindow { .. }));
    }

    #[test]
    fn test_window_neighbours_outside_are_untouched() {
        let mut board = Board::filled(5, 5, Site::new(0, 3, 1)).unwrap();
        board.set(Coord::new(1, 1), Site::new(1, 20, 1));
        let window = Window {
            origin: Coord::new(1, 1),
            width: 2,
            height: 2,
        };
        let grid = Grid::build(window, &board).unwrap();

        let next = simulate(&grid, &moves(&[(1, 1, Direction::East)])).unwrap();
        assert_eq!(site(&next, 2, 1), Site::new(1, 17, 1));
        assert!(next.cell(Coord::new(3, 1)).is_none());
        assert!(check_clean(&next));
    }

    #[test]
    fn test_claim_rejects_two_survivors() {
        let loc = Coord::new(2, 3);
        assert_eq!(claim(loc, &[], true).unwrap(), Some((NEUTRAL, 0)));
        assert_eq!(claim(loc, &[], false).unwrap(), None);
        assert_eq!(claim(loc, &[(4, 300)], false).unwrap(), Some((4, 255)));

        let err = claim(loc, &[(1, 5), (2, 7)], true).unwrap_err();
        assert!(matches!(
            err,
            CoreError::ContestedCell { coord, first: 1, second: 2 } if coord == loc
        ));
    }

    #[test]
    fn test_three_way_clash_leaves_one_claimant() {
        // Owners 1, 2 and 3 all pour into (1,1); only the strongest survives.
        let mut board = Board::filled(3, 3, Site::default()).unwrap();
        board.set(Coord::new(1, 0), Site::new(1, 100, 1));
        board.set(Coord::new(0, 1), Site::new(2, 30, 1));
        board.set(Coord::new(2, 1), Site::new(3, 20, 1));
        let grid = Grid::from_board(&board).unwrap();

        let next = simulate(
            &grid,
            &moves(&[
                (1, 0, Direction::South),
                (0, 1, Direction::East),
                (2, 1, Direction::West),
            ]),
        )
        .unwrap();
        assert_eq!(site(&next, 1, 1), Site::new(1, 50, 0));
        assert!(check_clean(&next));
    }

    fn check_clean(grid: &Grid) -> bool {
        crate::grid::check_invariants(grid).is_empty()
    }
}
