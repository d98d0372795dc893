use crate::coordinates::{CoordinateSmallVec, Direction, DirectionSmallVec, GridCoordinate};
use crate::units::{Height, Width};

use petgraph::graph;
pub use petgraph::graph::IndexType;
use petgraph::{Graph, Undirected};
use std::error;
use std::fmt;

/// A `width * height` maze grid.
///
/// Every cell starts with all four walls closed. Connectivity is stored as an
/// undirected graph with one node per cell and one edge per open passage, so
/// the wall symmetry invariant - a passage seen from one side is the same
/// passage seen from the other - holds by construction. [`Grid::open_between`]
/// is the sole mutation primitive.
#[derive(Debug)]
pub struct Grid<GridIndexType: IndexType = u32> {
    graph: Graph<(), (), Undirected, GridIndexType>,
    width: Width,
    height: Height,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridError {
    /// The given coordinate lies outside the grid.
    InvalidCoordinate(GridCoordinate),
    /// The neighbour in the given direction would lie outside the grid.
    OutOfBounds(GridCoordinate, Direction),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridError::InvalidCoordinate(coord) => {
                write!(f, "coordinate {} is outside the grid", coord)
            }
            GridError::OutOfBounds(coord, dir) => {
                write!(f, "no cell {} of {}", dir, coord)
            }
        }
    }
}
impl error::Error for GridError {}

impl<GridIndexType: IndexType> Grid<GridIndexType> {
    pub fn new(width: Width, height: Height) -> Grid<GridIndexType> {
        let cells_count = width.0 * height.0;
        // Upper bound on passages: every interior wall opened.
        let edges_count_hint = 2 * cells_count;

        let mut grid = Grid {
            graph: Graph::with_capacity(cells_count, edges_count_hint),
            width,
            height,
        };
        for _ in 0..cells_count {
            let _ = grid.graph.add_node(());
        }

        grid
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.width.0 * self.height.0
    }

    /// The number of open passages in the grid.
    #[inline]
    pub fn passages_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: Direction)
                                  -> Option<GridCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        direction.offset(coord).filter(|&neighbour| self.is_valid_coordinate(neighbour))
    }

    /// Open the wall between a cell and its neighbour in the given direction.
    ///
    /// The passage is opened from both sides at once. Opening an already open
    /// wall is a no-op. All higher level carving routes through here.
    pub fn open_between(&mut self,
                        coord: GridCoordinate,
                        direction: Direction)
                        -> Result<(), GridError> {
        if !self.is_valid_coordinate(coord) {
            return Err(GridError::InvalidCoordinate(coord));
        }
        let neighbour = self.neighbour_at_direction(coord, direction)
                            .ok_or(GridError::OutOfBounds(coord, direction))?;

        let a = self.graph_index(coord);
        let b = self.graph_index(neighbour);
        let _ = self.graph.update_edge(a, b, ());
        Ok(())
    }

    /// Is the wall between this cell and its neighbour in the given
    /// direction open? `false` at the grid boundary.
    pub fn is_open(&self, coord: GridCoordinate, direction: Direction) -> bool {
        match self.neighbour_at_direction(coord, direction) {
            Some(neighbour) => {
                self.graph
                    .find_edge(self.graph_index(coord), self.graph_index(neighbour))
                    .is_some()
            }
            None => false,
        }
    }

    /// The directions with an open passage away from this cell.
    pub fn open_directions(&self, coord: GridCoordinate) -> DirectionSmallVec {
        Direction::ALL
            .iter()
            .cloned()
            .filter(|&dir| self.is_open(coord, dir))
            .collect()
    }

    /// Cells reachable in one step from this cell through an open passage.
    pub fn links(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        self.open_directions(coord)
            .iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            width: self.width.0,
            cells_count: self.size(),
        }
    }

    fn graph_index(&self, coord: GridCoordinate) -> graph::NodeIndex<GridIndexType> {
        let index_raw = coord.y as usize * self.width.0 + coord.x as usize;
        graph::NodeIndex::<GridIndexType>::new(index_raw)
    }
}

impl<GridIndexType: IndexType> fmt::Display for Grid<GridIndexType> {
    /// One box drawing glyph per cell showing the cell's open directions.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height.0 {
            for x in 0..self.width.0 {
                let coord = GridCoordinate::new(x as u32, y as u32);
                let glyph = passage_glyph(self.is_open(coord, Direction::North),
                                          self.is_open(coord, Direction::South),
                                          self.is_open(coord, Direction::East),
                                          self.is_open(coord, Direction::West));
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn passage_glyph(north: bool, south: bool, east: bool, west: bool) -> char {
    match (north, south, east, west) {
        (false, false, false, false) => ' ',
        (true, false, false, false) => '╵',
        (false, true, false, false) => '╷',
        (false, false, true, false) => '╶',
        (false, false, false, true) => '╴',
        (true, true, false, false) => '│',
        (false, false, true, true) => '─',
        (true, false, true, false) => '└',
        (true, false, false, true) => '┘',
        (false, true, true, false) => '┌',
        (false, true, false, true) => '┐',
        (true, true, true, false) => '├',
        (true, true, false, true) => '┤',
        (true, false, true, true) => '┴',
        (false, true, true, true) => '┬',
        (true, true, true, true) => '┼',
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    width: usize,
    cells_count: usize,
}
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let x = self.current_cell_number % self.width;
            let y = self.current_cell_number / self.width;
            self.current_cell_number += 1;
            Some(GridCoordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

impl<'a, GridIndexType: IndexType> IntoIterator for &'a Grid<GridIndexType> {
    type Item = GridCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
