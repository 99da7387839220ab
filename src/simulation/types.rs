//! Core types for the crossroad simulation
//!
//! Plain geometry and identifiers shared by every other module.

/// A unique identifier for a vehicle, issued by the world and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub usize);

/// Direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Left,
    Right,
    Down,
    /// Not yet placed on an entry edge
    Undef,
}

impl Direction {
    /// The four directions a vehicle can enter the field with
    pub const ENTRY: [Direction; 4] = [
        Direction::Left,
        Direction::Down,
        Direction::Up,
        Direction::Right,
    ];

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// The direction this one has to give way to under right-hand priority
    pub fn yields_to(self) -> Option<Direction> {
        match self {
            Direction::Up => Some(Direction::Left),
            Direction::Down => Some(Direction::Right),
            Direction::Left => Some(Direction::Down),
            Direction::Right => Some(Direction::Up),
            Direction::Undef => None,
        }
    }
}

/// An axis-aligned rectangle in screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Half-open overlap test: rectangles that only touch along an edge
    /// do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(other.right() <= self.x
            || other.bottom() <= self.y
            || other.x >= self.right()
            || other.y >= self.bottom())
    }
}
