//! Board snapshots: the per-turn input handed to the decision core.

pub mod mapgen;

use crate::error::{CoreError, CoreResult};
use crate::grid::Coord;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Player identifier. `0` is the neutral owner.
pub type OwnerId = u8;

/// The neutral owner.
pub const NEUTRAL: OwnerId = 0;

/// Largest strength a site can hold.
pub const MAX_STRENGTH: u8 = u8::MAX;

/// One board square as reported by the game engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Site {
    /// Owning player, or [`NEUTRAL`].
    pub owner: OwnerId,
    /// Current strength.
    pub strength: u8,
    /// Strength gained per uncontested turn.
    pub production: u8,
}

impl Site {
    /// Create a new site.
    #[must_use]
    pub const fn new(owner: OwnerId, strength: u8, production: u8) -> Self {
        Self {
            owner,
            strength,
            production,
        }
    }
}

/// A full snapshot of the torus, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    width: u16,
    height: u16,
    sites: Vec<Site>,
}

#[derive(Deserialize)]
struct BoardData {
    width: u16,
    height: u16,
    sites: Vec<Site>,
}

impl TryFrom<BoardData> for Board {
    type Error = CoreError;

    fn try_from(data: BoardData) -> CoreResult<Self> {
        Self::new(data.width, data.height, data.sites)
    }
}

impl Board {
    /// Create a board from row-major sites.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or the site count does not
    /// equal `width * height`.
    pub fn new(width: u16, height: u16, sites: Vec<Site>) -> CoreResult<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        let expected = usize::from(width) * usize::from(height);
        if sites.len() != expected {
            return Err(CoreError::SiteCountMismatch {
                expected,
                actual: sites.len(),
            });
        }
        Ok(Self {
            width,
            height,
            sites,
        })
    }

    /// Create a board with every site set to `site`.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero.
    pub fn filled(width: u16, height: u16, site: Site) -> CoreResult<Self> {
        Self::new(width, height, vec![site; usize::from(width) * usize::from(height)])
    }

    /// Load a board from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe a
    /// valid board.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Torus width.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Torus height.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        (coord.x < self.width && coord.y < self.height)
            .then(|| usize::from(coord.y) * usize::from(self.width) + usize::from(coord.x))
    }

    /// Site at `coord`, if it lies on the board.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Site> {
        self.index(coord).and_then(|i| self.sites.get(i))
    }

    /// Replace the site at `coord`. Returns `false` if `coord` is off the board.
    pub fn set(&mut self, coord: Coord, site: Site) -> bool {
        match self.index(coord).and_then(|i| self.sites.get_mut(i)) {
            Some(slot) => {
                *slot = site;
                true
            }
            None => false,
        }
    }

    /// Iterate over all sites in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Site)> {
        let width = self.width;
        self.sites.iter().enumerate().map(move |(i, site)| {
            let w = usize::from(width);
            (Coord::new(narrow(i % w), narrow(i / w)), site)
        })
    }
}

/// Narrow an index already bounded by a `u16` dimension.
pub(crate) fn narrow(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(matches!(
            Board::new(0, 3, Vec::new()),
            Err(CoreError::InvalidDimensions { width: 0, height: 3 })
        ));
    }

    #[test]
    fn test_new_rejects_wrong_site_count() {
        let err = Board::new(2, 2, vec![Site::default(); 3]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::SiteCountMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_get_and_set_row_major() {
        let mut board = Board::filled(3, 2, Site::new(0, 1, 1)).unwrap();
        assert!(board.set(Coord::new(2, 1), Site::new(4, 9, 2)));
        assert!(!board.set(Coord::new(3, 0), Site::default()));
        assert_eq!(board.get(Coord::new(2, 1)), Some(&Site::new(4, 9, 2)));
        let last = board.iter().last().unwrap();
        assert_eq!(last.0, Coord::new(2, 1));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok = r#"{"width":1,"height":1,"sites":[{"owner":1,"strength":2,"production":3}]}"#;
        let board: Board = serde_json::from_str(ok).unwrap();
        assert_eq!(board.get(Coord::new(0, 0)), Some(&Site::new(1, 2, 3)));

        let bad = r#"{"width":2,"height":1,"sites":[]}"#;
        assert!(serde_json::from_str::<Board>(bad).is_err());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        let board = Board::filled(2, 2, Site::new(1, 5, 1)).unwrap();
        std::fs::write(&path, serde_json::to_string(&board).unwrap()).unwrap();
        assert_eq!(Board::from_json_file(&path).unwrap(), board);
    }
}
