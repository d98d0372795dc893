use docopt::Docopt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_derive::Deserialize;
use tilemaze::{
    coordinates::{Direction, GridCoordinate},
    game::{GameSession, MoveOutcome, DEFAULT_PALETTE},
    generators,
    grid::Grid,
    pathing,
    renderers::{render_tiled_maze, RenderOptionsBuilder, TileSet},
    units::{Height, TilePixels, Width},
};
use std::{
    io,
    io::prelude::*,
    path::Path,
};

const USAGE: &str = "Tilemaze

Usage:
    tilemaze_driver -h | --help
    tilemaze_driver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--loops=<p>]
    tilemaze_driver render --assets=<dir> --image-out=<path> [--tile-pixels=<n>] [--mark-start-end] [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--loops=<p>]
    tilemaze_driver play [--players=<n>] [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--loops=<p>]

Options:
    -h --help           Show this screen.
    --grid-size=<n>     The grid size is n * n.
    --grid-width=<w>    The grid width in a w*h grid [default: 15].
    --grid-height=<h>   The grid height in a w*h grid [default: 15].
    --seed=<s>          Fix the random number generator seed for reproducible mazes.
    --loops=<p>         Probability in [0, 1] of opening each remaining wall, adding alternate routes [default: 0].
    --assets=<dir>      Directory holding the tile image files.
    --image-out=<path>  Output file path for the maze image. Always PNG format.
    --tile-pixels=<n>   Square pixel size of one rendered tile [default: 64].
    --mark-start-end    Overlay the start and finish marker tiles.
    --players=<n>       Number of players in a play session [default: 2].
";

#[derive(Debug, Deserialize)]
struct DriverArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_loops: f64,
    cmd_render: bool,
    flag_assets: String,
    flag_image_out: String,
    flag_tile_pixels: u32,
    flag_mark_start_end: bool,
    cmd_play: bool,
    flag_players: usize,
}

mod errors {
    use error_chain::error_chain;
    error_chain! {
        foreign_links {
            DocOptFailure(::docopt::Error);
            ImageFailure(::image::ImageError);
            Io(::std::io::Error);
            Grid(::tilemaze::grid::GridError);
            Render(::tilemaze::renderers::RenderError);
        }
    }
}
use crate::errors::*;
use error_chain::bail;

fn main() -> Result<()> {
    let args: DriverArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };
    if width == 0 || height == 0 {
        bail!("the grid needs at least one cell in each dimension");
    }
    if !(0.0..=1.0).contains(&args.flag_loops) {
        bail!("--loops must be a probability in [0, 1]");
    }

    let mut rng = match args.flag_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut maze: Grid = Grid::new(Width(width), Height(height));
    generators::recursive_backtracker(&mut maze, &mut rng)?;
    if args.flag_loops > 0.0 {
        generators::add_loops(&mut maze, args.flag_loops, &mut rng)?;
    }

    let start = GridCoordinate::new((width / 2) as u32, (height / 2) as u32);
    generators::force_start_cross(&mut maze, start)?;

    let distances = pathing::Distances::new(&maze, start)
        .ok_or("the start cell is not on the grid")?;
    let end = pathing::far_endpoint(&distances, pathing::FAR_ENDPOINT_FRACTION, &mut rng)
        .ok_or("no far endpoint is reachable from the start cell")?;

    if args.cmd_render {
        render_maze(&maze, &args, start, end)?;
    } else if args.cmd_play {
        play_session(&maze, &args, start, end)?;
    } else {
        println!("{}", maze);
        println!("start: {}  end: {}  goal distance: {}",
                 start,
                 end,
                 distances.distance_from_start_to(end).unwrap_or(0));
    }

    Ok(())
}

fn render_maze(maze: &Grid,
               args: &DriverArgs,
               start: GridCoordinate,
               end: GridCoordinate)
               -> Result<()> {
    let tiles = TileSet::load(Path::new(&args.flag_assets),
                              TilePixels(args.flag_tile_pixels))?;
    let out_path = Path::new(&args.flag_image_out);
    let options = RenderOptionsBuilder::new()
        .start(Some(start))
        .end(Some(end))
        .mark_start_end(args.flag_mark_start_end)
        .output_file(Some(out_path))
        .build();

    render_tiled_maze(maze, &tiles, &options)?;
    println!("maze image written to {}", args.flag_image_out);
    Ok(())
}

fn play_session(maze: &Grid,
                args: &DriverArgs,
                start: GridCoordinate,
                end: GridCoordinate)
                -> Result<()> {
    if args.flag_players == 0 {
        bail!("a play session needs at least one player");
    }
    let players = (0..args.flag_players)
        .map(|i| {
            (format!("Player {}", i + 1), DEFAULT_PALETTE[i % DEFAULT_PALETTE.len()])
        })
        .collect();
    let mut session = GameSession::new(maze, players, start, end)
        .ok_or("the start or end cell is not on the grid")?;

    println!("{}", maze);
    println!("all players start at {}; first to reach {} wins", start, end);
    println!("moves: n, s, e, w. q quits.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("q") {
            println!("game abandoned");
            break;
        }
        let direction = match parse_direction(input) {
            Some(direction) => direction,
            None => {
                println!("unrecognised input {:?}; moves are n, s, e, w or q", input);
                continue;
            }
        };

        let active = session.active_player();
        let name = session.players()[active].name().to_string();
        match session.apply_move(direction) {
            MoveOutcome::Ignored => {
                println!("{}: no passage {} from here", name, direction)
            }
            MoveOutcome::Moved { to, .. } => {
                println!("{} moves {} to {}", name, direction, to)
            }
            MoveOutcome::Won { winner } => {
                println!("{} reaches the finish and wins!",
                         session.players()[winner].name());
                break;
            }
        }
    }

    Ok(())
}

fn parse_direction(input: &str) -> Option<Direction> {
    match input.to_ascii_lowercase().as_str() {
        "n" | "north" => Some(Direction::North),
        "s" | "south" => Some(Direction::South),
        "e" | "east" => Some(Direction::East),
        "w" | "west" => Some(Direction::West),
        _ => None,
    }
}
