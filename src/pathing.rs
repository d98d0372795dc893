use crate::coordinates::GridCoordinate;
use crate::grid::{Grid, IndexType};

use fnv::FnvHashMap;
use rand::Rng;

/// Fraction of the maximum breadth first distance a cell must reach to be a
/// candidate goal for [`far_endpoint`].
pub const FAR_ENDPOINT_FRACTION: f64 = 0.8;

/// Breadth first distances from a start cell to every cell reachable through
/// open passages.
#[derive(Debug, Clone)]
pub struct Distances {
    start: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// `None` when the start coordinate is outside the grid.
    pub fn new<GridIndexType>(grid: &Grid<GridIndexType>,
                              start: GridCoordinate)
                              -> Option<Distances>
        where GridIndexType: IndexType
    {
        if !grid.is_valid_coordinate(start) {
            return None;
        }

        let mut distances =
            FnvHashMap::with_capacity_and_hasher(grid.size(), Default::default());
        distances.insert(start, 0u32);
        let mut max = 0;

        // Unweighted graph, so a plain frontier sweep settles every cell the
        // first time it is seen; the distance map doubles as the visited set.
        let mut frontier = vec![start];
        while !frontier.is_empty() {
            let mut next_frontier = vec![];
            for &cell in &frontier {
                let distance_to_cell = distances[&cell];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link in grid.links(cell) {
                    if !distances.contains_key(&link) {
                        distances.insert(link, distance_to_cell + 1);
                        next_frontier.push(link);
                    }
                }
            }
            frontier = next_frontier;
        }

        Some(Distances { start, distances, max_distance: max })
    }

    #[inline]
    pub fn start(&self) -> GridCoordinate {
        self.start
    }

    /// The largest distance from the start to any reachable cell.
    #[inline]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// `None` when the cell was never reached.
    #[inline]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// How many cells the breadth first search reached, the start included.
    #[inline]
    pub fn cells_reached(&self) -> usize {
        self.distances.len()
    }

    /// All reached cells whose distance is at least `fraction` of the
    /// maximum distance.
    pub fn cells_at_least(&self, fraction: f64) -> Vec<GridCoordinate> {
        let threshold = fraction * f64::from(self.max_distance);
        self.distances
            .iter()
            .filter(|&(_, &distance)| f64::from(distance) >= threshold)
            .map(|(&coord, _)| coord)
            .collect()
    }
}

/// Pick a goal cell far away from the start: a uniformly random choice among
/// the cells at `fraction` or more of the maximum distance. Far, but not
/// deterministically the single farthest cell.
///
/// `None` only when the search reached nothing (which cannot happen for a
/// `Distances` built from a valid start).
pub fn far_endpoint<R: Rng>(distances: &Distances,
                            fraction: f64,
                            rng: &mut R)
                            -> Option<GridCoordinate> {
    let candidates = distances.cells_at_least(fraction);
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.gen_range(0..candidates.len())])
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::coordinates::Direction;
    use crate::generators;
    use crate::units::{Height, Width};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type SmallGrid = Grid<u16>;

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    #[test]
    fn construction_requires_a_valid_start_coordinate() {
        let g = SmallGrid::new(Width(3), Height(3));
        assert!(Distances::new(&g, gc(3, 0)).is_none());
        assert!(Distances::new(&g, gc(0, 0)).is_some());
    }

    #[test]
    fn start_is_remembered_at_distance_zero() {
        let g = SmallGrid::new(Width(3), Height(3));
        let distances = Distances::new(&g, gc(1, 1)).unwrap();
        assert_eq!(distances.start(), gc(1, 1));
        assert_eq!(distances.distance_from_start_to(gc(1, 1)), Some(0));
    }

    #[test]
    fn unreached_cells_have_no_distance() {
        let g = SmallGrid::new(Width(3), Height(3));
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(distances.cells_reached(), 1);
        for coord in g.iter() {
            if coord == gc(0, 0) {
                assert_eq!(distances.distance_from_start_to(coord), Some(0));
            } else {
                assert_eq!(distances.distance_from_start_to(coord), None);
            }
        }
    }

    #[test]
    fn distances_on_a_fully_open_square() {
        let mut g = SmallGrid::new(Width(2), Height(2));
        g.open_between(gc(0, 0), Direction::East).unwrap();
        g.open_between(gc(0, 0), Direction::South).unwrap();
        g.open_between(gc(1, 0), Direction::South).unwrap();
        g.open_between(gc(0, 1), Direction::East).unwrap();

        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(distances.distance_from_start_to(gc(0, 0)), Some(0));
        assert_eq!(distances.distance_from_start_to(gc(1, 0)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(0, 1)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(1, 1)), Some(2));
        assert_eq!(distances.max(), 2);
    }

    #[test]
    fn corridor_distances_and_thresholding() {
        let mut g = SmallGrid::new(Width(5), Height(1));
        for x in 0..4 {
            g.open_between(gc(x, 0), Direction::East).unwrap();
        }

        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(distances.max(), 4);
        // 0.8 * 4 = 3.2, so only the far end qualifies.
        assert_eq!(distances.cells_at_least(FAR_ENDPOINT_FRACTION), vec![gc(4, 0)]);
    }

    #[test]
    fn far_endpoint_respects_the_distance_threshold() {
        let mut grid = Grid::<u32>::new(Width(15), Height(15));
        let mut rng = StdRng::seed_from_u64(99);
        generators::recursive_backtracker(&mut grid, &mut rng).unwrap();
        let start = gc(7, 7);
        generators::force_start_cross(&mut grid, start).unwrap();

        let distances = Distances::new(&grid, start).unwrap();
        assert_eq!(distances.cells_reached(), 15 * 15);

        let end = far_endpoint(&distances, FAR_ENDPOINT_FRACTION, &mut rng).unwrap();
        let end_distance = distances.distance_from_start_to(end).unwrap();
        assert!(f64::from(end_distance) >=
                FAR_ENDPOINT_FRACTION * f64::from(distances.max()));
    }

    #[test]
    fn far_endpoint_on_a_single_cell_grid_is_the_start() {
        let g = SmallGrid::new(Width(1), Height(1));
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(far_endpoint(&distances, FAR_ENDPOINT_FRACTION, &mut rng),
                   Some(gc(0, 0)));
    }
}
