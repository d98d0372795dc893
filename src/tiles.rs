use crate::coordinates::Direction;

use std::error;
use std::fmt;

/// The visual asset category a cell maps to, determined solely by its open
/// directions. Each curve orientation is its own pre-authored asset.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum TileShape {
    Straight,
    CurveSouthWest,
    CurveNorthWest,
    CurveNorthEast,
    CurveSouthEast,
    TJunction,
    Cross,
    DeadEnd,
}

impl TileShape {
    /// Whether the renderer applies the [`TileSpec`] rotation to this shape.
    /// Curves are pre-oriented assets and the cross is symmetric; both are
    /// always placed as authored.
    pub fn uses_rotation(self) -> bool {
        matches!(self,
                 TileShape::Straight | TileShape::TJunction | TileShape::DeadEnd)
    }

    /// The image file this shape is loaded from within the asset directory.
    pub fn asset_file(self) -> &'static str {
        match self {
            TileShape::Straight => "straight.png",
            TileShape::CurveSouthWest => "curve_sw.png",
            TileShape::CurveNorthWest => "curve_nw.png",
            TileShape::CurveNorthEast => "curve_ne.png",
            TileShape::CurveSouthEast => "curve_se.png",
            TileShape::TJunction => "t_junction.png",
            TileShape::Cross => "cross.png",
            TileShape::DeadEnd => "dead_end.png",
        }
    }
}

/// A counter clockwise rotation in quarter turns.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct TileSpec {
    pub shape: TileShape,
    pub rotation: Rotation,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum TopologyError {
    /// A cell with no open direction reached the classifier. A generated,
    /// connected maze never contains one, so this is a generation bug.
    UnconnectedCell,
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TopologyError::UnconnectedCell => {
                write!(f, "cell has no open directions to classify")
            }
        }
    }
}
impl error::Error for TopologyError {}

/// Map a cell's open directions to the tile drawn for it.
///
/// Pure and total over the 15 non-empty direction subsets; duplicate
/// directions in the input are ignored. The shape and rotation pairing is
/// fixed by the tile assets and is the single source of truth for how open
/// sets look on screen - it is matched exactly, not derived geometrically.
pub fn classify(open: &[Direction]) -> Result<TileSpec, TopologyError> {
    let north = open.contains(&Direction::North);
    let south = open.contains(&Direction::South);
    let east = open.contains(&Direction::East);
    let west = open.contains(&Direction::West);

    let spec = |shape, rotation| TileSpec { shape, rotation };
    let tile = match (north, south, east, west) {
        (false, false, false, false) => return Err(TopologyError::UnconnectedCell),

        // Straights
        (true, true, false, false) => spec(TileShape::Straight, Rotation::R0),
        (false, false, true, true) => spec(TileShape::Straight, Rotation::R90),

        // Curves, one pre-oriented asset each
        (false, true, false, true) => spec(TileShape::CurveSouthWest, Rotation::R0),
        (true, false, false, true) => spec(TileShape::CurveNorthWest, Rotation::R0),
        (true, false, true, false) => spec(TileShape::CurveNorthEast, Rotation::R0),
        (false, true, true, false) => spec(TileShape::CurveSouthEast, Rotation::R0),

        // T junctions, rotated by the single closed direction
        (false, true, true, true) => spec(TileShape::TJunction, Rotation::R0),
        (true, false, true, true) => spec(TileShape::TJunction, Rotation::R180),
        (true, true, false, true) => spec(TileShape::TJunction, Rotation::R270),
        (true, true, true, false) => spec(TileShape::TJunction, Rotation::R90),

        (true, true, true, true) => spec(TileShape::Cross, Rotation::R0),

        // Dead ends, rotated by the single open direction
        (false, true, false, false) => spec(TileShape::DeadEnd, Rotation::R0),
        (false, false, true, false) => spec(TileShape::DeadEnd, Rotation::R90),
        (true, false, false, false) => spec(TileShape::DeadEnd, Rotation::R180),
        (false, false, false, true) => spec(TileShape::DeadEnd, Rotation::R270),
    };
    Ok(tile)
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::collections::HashSet;

    use crate::coordinates::Direction::{East, North, South, West};

    fn tile(open: &[Direction]) -> TileSpec {
        classify(open).unwrap()
    }

    #[test]
    fn the_lookup_table_is_preserved_exactly() {
        let expect = |open: &[Direction], shape, rotation| {
            assert_eq!(tile(open), TileSpec { shape, rotation }, "open set {:?}", open);
        };

        expect(&[North, South], TileShape::Straight, Rotation::R0);
        expect(&[East, West], TileShape::Straight, Rotation::R90);

        expect(&[South, West], TileShape::CurveSouthWest, Rotation::R0);
        expect(&[North, West], TileShape::CurveNorthWest, Rotation::R0);
        expect(&[North, East], TileShape::CurveNorthEast, Rotation::R0);
        expect(&[South, East], TileShape::CurveSouthEast, Rotation::R0);

        expect(&[South, East, West], TileShape::TJunction, Rotation::R0);
        expect(&[North, East, West], TileShape::TJunction, Rotation::R180);
        expect(&[North, South, West], TileShape::TJunction, Rotation::R270);
        expect(&[North, South, East], TileShape::TJunction, Rotation::R90);

        expect(&[North, South, East, West], TileShape::Cross, Rotation::R0);

        expect(&[South], TileShape::DeadEnd, Rotation::R0);
        expect(&[East], TileShape::DeadEnd, Rotation::R90);
        expect(&[North], TileShape::DeadEnd, Rotation::R180);
        expect(&[West], TileShape::DeadEnd, Rotation::R270);
    }

    #[test]
    fn total_and_distinct_over_all_non_empty_subsets() {
        let mut seen = HashSet::new();
        for bits in 1u8..16 {
            let mut open = vec![];
            for (i, &dir) in Direction::ALL.iter().enumerate() {
                if bits & (1 << i) != 0 {
                    open.push(dir);
                }
            }
            let spec = classify(&open).expect("classifier must be total");
            assert!(seen.insert(spec), "duplicate tile for open set {:?}", open);
        }
        assert_eq!(seen.len(), 15);
    }

    #[test]
    fn the_empty_set_is_invalid_topology() {
        assert_eq!(classify(&[]), Err(TopologyError::UnconnectedCell));
    }

    #[test]
    fn classification_is_idempotent() {
        let open = [North, East, West];
        assert_eq!(classify(&open), classify(&open));
    }

    #[test]
    fn duplicate_directions_are_ignored() {
        assert_eq!(tile(&[South, South]), tile(&[South]));
        assert_eq!(tile(&[East, West, East]), tile(&[East, West]));
    }

    #[test]
    fn only_straights_tees_and_dead_ends_rotate() {
        assert!(TileShape::Straight.uses_rotation());
        assert!(TileShape::TJunction.uses_rotation());
        assert!(TileShape::DeadEnd.uses_rotation());
        assert!(!TileShape::Cross.uses_rotation());
        assert!(!TileShape::CurveSouthWest.uses_rotation());
        assert!(!TileShape::CurveNorthWest.uses_rotation());
        assert!(!TileShape::CurveNorthEast.uses_rotation());
        assert!(!TileShape::CurveSouthEast.uses_rotation());
    }
}
