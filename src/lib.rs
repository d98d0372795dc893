//! **tilemaze** is a maze generation, tiled image rendering and turn based
//! maze traversal game library.
//!
//! A maze is carved over a rectangular [`grid::Grid`] by the randomized
//! depth first [`generators`], analysed with breadth first [`pathing`],
//! classified cell by cell into tile shapes by [`tiles::classify`] and
//! composited into a single raster image by [`renderers`]. The [`game`]
//! module drives a turn based multiplayer traversal of the finished maze.

pub mod coordinates;
pub mod game;
pub mod generators;
pub mod grid;
pub mod pathing;
pub mod renderers;
pub mod tiles;
pub mod units;
