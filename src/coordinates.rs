use smallvec::SmallVec;
use std::fmt;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}
impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x, y }
    }
}
impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;
pub type DirectionSmallVec = SmallVec<[Direction; 4]>;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::East, Direction::West];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// The coordinate one cell away in this direction.
    /// `None` when that coordinate is not representable (u32 underflow);
    /// grid extent checks belong to the grid itself.
    pub fn offset(self, coord: GridCoordinate) -> Option<GridCoordinate> {
        let GridCoordinate { x, y } = coord;
        match self {
            Direction::North => {
                if y > 0 {
                    Some(GridCoordinate { x, y: y - 1 })
                } else {
                    None
                }
            }
            Direction::South => Some(GridCoordinate { x, y: y + 1 }),
            Direction::East => Some(GridCoordinate { x: x + 1, y }),
            Direction::West => {
                if x > 0 {
                    Some(GridCoordinate { x: x - 1, y })
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        };
        write!(f, "{}", name)
    }
}
