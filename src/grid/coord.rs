//! Coordinates, directions and windows on a torus.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// An absolute coordinate on the source torus.
///
/// Coordinates are always stored wrapped into `0..width` and `0..height`
/// of the torus they belong to. They order row-major (by `y`, then `x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Step once in `direction`, wrapping on a `width` x `height` torus.
    #[must_use]
    #[inline]
    pub fn step(self, direction: Direction, width: u16, height: u16) -> Self {
        match direction {
            Direction::Still => self,
            Direction::North => Self::new(self.x, decrement(self.y, height)),
            Direction::South => Self::new(self.x, increment(self.y, height)),
            Direction::East => Self::new(increment(self.x, width), self.y),
            Direction::West => Self::new(decrement(self.x, width), self.y),
        }
    }

    /// The four cardinal neighbours in [`Direction::CARDINALS`] order.
    #[must_use]
    pub fn neighbors(self, width: u16, height: u16) -> [Self; 4] {
        Direction::CARDINALS.map(|d| self.step(d, width, height))
    }

    /// Offset by a signed amount, wrapping on a `width` x `height` torus.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32, width: u16, height: u16) -> Self {
        Self::new(
            wrap(i32::from(self.x) + dx, width),
            wrap(i32::from(self.y) + dy, height),
        )
    }

    /// Shortest wrapped distance between two coordinates (Manhattan metric).
    #[must_use]
    pub fn torus_distance(self, other: Self, width: u16, height: u16) -> u32 {
        axis_distance(self.x, other.x, width) + axis_distance(self.y, other.y, height)
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

const fn decrement(v: u16, size: u16) -> u16 {
    if v == 0 { size.saturating_sub(1) } else { v - 1 }
}

fn increment(v: u16, size: u16) -> u16 {
    match v.checked_add(1) {
        Some(next) if next < size => next,
        _ => 0,
    }
}

fn wrap(v: i32, size: u16) -> u16 {
    if size == 0 {
        return 0;
    }
    u16::try_from(v.rem_euclid(i32::from(size))).unwrap_or(0)
}

fn axis_distance(a: u16, b: u16, size: u16) -> u32 {
    let d = u32::from(a.abs_diff(b));
    d.min(u32::from(size).saturating_sub(d))
}

/// A move direction.
///
/// Serialized in lowercase; the numeric encoding used by the game engine is
/// available through [`Direction::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Hold position.
    #[default]
    Still,
    /// Towards smaller `y`.
    North,
    /// Towards larger `x`.
    East,
    /// Towards larger `y`.
    South,
    /// Towards smaller `x`.
    West,
}

impl Direction {
    /// All directions, in enumeration order (Still first).
    pub const ALL: [Self; 5] = [
        Self::Still,
        Self::North,
        Self::East,
        Self::South,
        Self::West,
    ];

    /// The four cardinal directions.
    pub const CARDINALS: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// The direction that undoes this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Still => Self::Still,
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Engine wire code (0 = Still, then N, E, S, W).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Still => 0,
            Self::North => 1,
            Self::East => 2,
            Self::South => 3,
            Self::West => 4,
        }
    }

    /// Inverse of [`Direction::code`].
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Still),
            1 => Some(Self::North),
            2 => Some(Self::East),
            3 => Some(Self::South),
            4 => Some(Self::West),
            _ => None,
        }
    }
}

/// A rectangular view onto a torus.
///
/// The window's own size only bounds which cells it holds; stepping between
/// cells always wraps against the dimensions of the source torus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Top-left corner on the source torus.
    pub origin: Coord,
    /// Number of columns.
    pub width: u16,
    /// Number of rows.
    pub height: u16,
}

impl Window {
    /// A window covering a whole `width` x `height` torus.
    #[must_use]
    pub const fn full(width: u16, height: u16) -> Self {
        Self {
            origin: Coord::new(0, 0),
            width,
            height,
        }
    }

    /// A square window of side `size` centered on `focus`.
    ///
    /// The side is clamped to the torus dimensions so the window never
    /// overlaps itself.
    #[must_use]
    pub fn centered(focus: Coord, size: u16, source_width: u16, source_height: u16) -> Self {
        let width = size.min(source_width);
        let height = size.min(source_height);
        Self {
            origin: focus.offset(
                -i32::from(width / 2),
                -i32::from(height / 2),
                source_width,
                source_height,
            ),
            width,
            height,
        }
    }

    /// Number of cells in the window.
    #[must_use]
    pub fn area(self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }

    /// Window-local position of an absolute coordinate, if the window holds it.
    #[must_use]
    pub fn local(self, coord: Coord, source_width: u16, source_height: u16) -> Option<(u16, u16)> {
        if coord.x >= source_width || coord.y >= source_height {
            return None;
        }
        let dx = forward_distance(self.origin.x, coord.x, source_width);
        let dy = forward_distance(self.origin.y, coord.y, source_height);
        (dx < self.width && dy < self.height).then_some((dx, dy))
    }

    /// Absolute coordinate of a window-local position.
    #[must_use]
    pub fn absolute(self, local_x: u16, local_y: u16, source_width: u16, source_height: u16) -> Coord {
        self.origin.offset(
            i32::from(local_x),
            i32::from(local_y),
            source_width,
            source_height,
        )
    }
}

/// Steps needed to walk forward from `from` to `to` on an axis of `size`.
fn forward_distance(from: u16, to: u16, size: u16) -> u16 {
    if to >= from {
        to - from
    } else {
        size - from + to
    }
}
