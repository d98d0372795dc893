use crate::coordinates::{Direction, GridCoordinate};
use crate::grid::{Grid, IndexType};

use fnv::FnvHashSet;

pub type Colour = [u8; 3];

/// Colours handed to players in join order, cycling when there are more
/// players than colours.
pub const DEFAULT_PALETTE: [Colour; 4] =
    [[0xff, 0, 0], [0, 0xff, 0], [0, 0, 0xff], [0xff, 0xff, 0]];

#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    colour: Colour,
    position: GridCoordinate,
}

impl Player {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn colour(&self) -> Colour {
        self.colour
    }
    pub fn position(&self) -> GridCoordinate {
        self.position
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum TurnState {
    AwaitingMove,
    /// Terminal: the winning player stands on the end cell and no further
    /// moves are accepted.
    Won { winner: usize },
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MoveOutcome {
    /// The active player moved and the turn passed to the next player.
    Moved { player: usize, to: GridCoordinate },
    /// The input did not match an open direction (or the game is over);
    /// nothing changed.
    Ignored,
    Won { winner: usize },
}

/// A turn based traversal of a generated maze.
///
/// The session owns all game state explicitly - players, whose turn it is,
/// the visited cells - and borrows the maze read-only; the grid is fixed for
/// the whole game.
pub struct GameSession<'g, GridIndexType: IndexType = u32> {
    grid: &'g Grid<GridIndexType>,
    players: Vec<Player>,
    active: usize,
    visited: FnvHashSet<GridCoordinate>,
    start: GridCoordinate,
    end: GridCoordinate,
    state: TurnState,
}

impl<'g, GridIndexType: IndexType> GameSession<'g, GridIndexType> {
    /// All players begin on the start cell. `None` when there are no players
    /// or the start or end cell is outside the grid.
    pub fn new(grid: &'g Grid<GridIndexType>,
               players: Vec<(String, Colour)>,
               start: GridCoordinate,
               end: GridCoordinate)
               -> Option<GameSession<'g, GridIndexType>> {
        if players.is_empty() || !grid.is_valid_coordinate(start) ||
           !grid.is_valid_coordinate(end) {
            return None;
        }

        let players = players
            .into_iter()
            .map(|(name, colour)| Player { name, colour, position: start })
            .collect();
        let mut visited = FnvHashSet::default();
        visited.insert(start);

        Some(GameSession {
            grid,
            players,
            active: 0,
            visited,
            start,
            end,
            state: TurnState::AwaitingMove,
        })
    }

    /// Play the active player's turn.
    ///
    /// A direction without an open passage from the player's cell is ignored
    /// outright - no move, no turn advance, no error. A valid move either
    /// wins the game (destination is the end cell) or passes the turn to the
    /// next player round-robin.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        if let TurnState::Won { .. } = self.state {
            return MoveOutcome::Ignored;
        }

        let position = self.players[self.active].position;
        if !self.grid.is_open(position, direction) {
            return MoveOutcome::Ignored;
        }
        let destination = match self.grid.neighbour_at_direction(position, direction) {
            Some(coord) => coord,
            None => return MoveOutcome::Ignored,
        };

        self.players[self.active].position = destination;
        self.visited.insert(destination);

        if destination == self.end {
            let winner = self.active;
            self.state = TurnState::Won { winner };
            MoveOutcome::Won { winner }
        } else {
            let player = self.active;
            self.active = (self.active + 1) % self.players.len();
            MoveOutcome::Moved { player, to: destination }
        }
    }

    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Index into [`GameSession::players`] of the player whose turn it is.
    #[inline]
    pub fn active_player(&self) -> usize {
        self.active
    }

    #[inline]
    pub fn state(&self) -> TurnState {
        self.state
    }

    #[inline]
    pub fn start(&self) -> GridCoordinate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> GridCoordinate {
        self.end
    }

    #[inline]
    pub fn is_visited(&self, coord: GridCoordinate) -> bool {
        self.visited.contains(&coord)
    }

    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
