use crate::coordinates::GridCoordinate;
use crate::grid::{Grid, IndexType};
use crate::tiles::{classify, Rotation, TileShape};
use crate::units::TilePixels;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::error;
use std::fmt;
use std::path::{Path, PathBuf};

/// The square tile images a maze is composited from, all resized to one
/// configured pixel size at load time.
pub struct TileSet {
    tile_pixels: TilePixels,
    straight: RgbaImage,
    curve_sw: RgbaImage,
    curve_nw: RgbaImage,
    curve_ne: RgbaImage,
    curve_se: RgbaImage,
    t_junction: RgbaImage,
    cross: RgbaImage,
    dead_end: RgbaImage,
    start_marker: RgbaImage,
    finish_marker: RgbaImage,
}

impl TileSet {
    /// Load every tile asset from a directory. Any missing or unreadable
    /// file fails the whole load; there is no point starting with a partial
    /// tile set.
    pub fn load(asset_dir: &Path, tile_pixels: TilePixels) -> Result<TileSet, RenderError> {
        let TilePixels(px) = tile_pixels;
        let load = |file: &str| -> Result<RgbaImage, RenderError> {
            let path = asset_dir.join(file);
            let img = image::open(&path)
                .map_err(|source| RenderError::AssetMissing { path: path.clone(), source })?;
            Ok(imageops::resize(&img.to_rgba8(), px, px, FilterType::Triangle))
        };

        Ok(TileSet {
            tile_pixels,
            straight: load(TileShape::Straight.asset_file())?,
            curve_sw: load(TileShape::CurveSouthWest.asset_file())?,
            curve_nw: load(TileShape::CurveNorthWest.asset_file())?,
            curve_ne: load(TileShape::CurveNorthEast.asset_file())?,
            curve_se: load(TileShape::CurveSouthEast.asset_file())?,
            t_junction: load(TileShape::TJunction.asset_file())?,
            cross: load(TileShape::Cross.asset_file())?,
            dead_end: load(TileShape::DeadEnd.asset_file())?,
            start_marker: load("start.png")?,
            finish_marker: load("finish.png")?,
        })
    }

    #[inline]
    pub fn tile_pixels(&self) -> TilePixels {
        self.tile_pixels
    }

    fn image_for(&self, shape: TileShape) -> &RgbaImage {
        match shape {
            TileShape::Straight => &self.straight,
            TileShape::CurveSouthWest => &self.curve_sw,
            TileShape::CurveNorthWest => &self.curve_nw,
            TileShape::CurveNorthEast => &self.curve_ne,
            TileShape::CurveSouthEast => &self.curve_se,
            TileShape::TJunction => &self.t_junction,
            TileShape::Cross => &self.cross,
            TileShape::DeadEnd => &self.dead_end,
        }
    }
}

#[derive(Debug)]
pub enum RenderError {
    /// A required tile image could not be loaded.
    AssetMissing {
        path: PathBuf,
        source: image::ImageError,
    },
    /// A cell with no open directions reached the renderer.
    UnconnectedCell(GridCoordinate),
    /// Encoding or writing the output image failed.
    Image(image::ImageError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RenderError::AssetMissing { ref path, .. } => {
                write!(f, "tile asset {} cannot be loaded", path.display())
            }
            RenderError::UnconnectedCell(coord) => {
                write!(f, "cell {} has no open directions to render", coord)
            }
            RenderError::Image(ref err) => write!(f, "image output failed: {}", err),
        }
    }
}

impl error::Error for RenderError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            RenderError::AssetMissing { ref source, .. } => Some(source),
            RenderError::Image(ref err) => Some(err),
            RenderError::UnconnectedCell(_) => None,
        }
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> RenderError {
        RenderError::Image(err)
    }
}

#[derive(Debug, Default)]
pub struct RenderOptions<'a> {
    start: Option<GridCoordinate>,
    end: Option<GridCoordinate>,
    mark_start_end: bool,
    output_file: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct RenderOptionsBuilder<'a> {
    options: RenderOptions<'a>,
}

impl<'a> RenderOptionsBuilder<'a> {
    pub fn new() -> RenderOptionsBuilder<'a> {
        RenderOptionsBuilder::default()
    }

    pub fn start(mut self, start: Option<GridCoordinate>) -> Self {
        self.options.start = start;
        self
    }

    pub fn end(mut self, end: Option<GridCoordinate>) -> Self {
        self.options.end = end;
        self
    }

    pub fn mark_start_end(mut self, on: bool) -> Self {
        self.options.mark_start_end = on;
        self
    }

    pub fn output_file(mut self, path: Option<&'a Path>) -> Self {
        self.options.output_file = path;
        self
    }

    pub fn build(self) -> RenderOptions<'a> {
        self.options
    }
}

/// Composite one classified tile per cell into a single image of
/// `width * tile_pixels` by `height * tile_pixels`, optionally overlaying
/// start and finish markers and writing the result out as PNG.
pub fn render_tiled_maze<GridIndexType>(grid: &Grid<GridIndexType>,
                                        tiles: &TileSet,
                                        options: &RenderOptions)
                                        -> Result<RgbaImage, RenderError>
    where GridIndexType: IndexType
{
    let TilePixels(px) = tiles.tile_pixels();
    let mut image = RgbaImage::new(grid.width().0 as u32 * px,
                                   grid.height().0 as u32 * px);

    for cell in grid.iter() {
        let open = grid.open_directions(cell);
        let tile_spec = classify(&open).map_err(|_| RenderError::UnconnectedCell(cell))?;

        let (x, y) = (i64::from(cell.x) * i64::from(px), i64::from(cell.y) * i64::from(px));
        let tile = tiles.image_for(tile_spec.shape);
        if tile_spec.shape.uses_rotation() {
            let rotated = rotate_anticlockwise(tile, tile_spec.rotation);
            imageops::overlay(&mut image, &rotated, x, y);
        } else {
            imageops::overlay(&mut image, tile, x, y);
        }
    }

    if options.mark_start_end {
        if let Some(start) = options.start {
            overlay_marker(&mut image, &tiles.start_marker, start, px);
        }
        if let Some(end) = options.end {
            overlay_marker(&mut image, &tiles.finish_marker, end, px);
        }
    }

    if let Some(path) = options.output_file {
        image.save(path)?;
    }

    Ok(image)
}

fn overlay_marker(image: &mut RgbaImage, marker: &RgbaImage, at: GridCoordinate, px: u32) {
    imageops::overlay(image,
                      marker,
                      i64::from(at.x) * i64::from(px),
                      i64::from(at.y) * i64::from(px));
}

/// Tile rotations are counter clockwise quarter turns (the convention the
/// shape and rotation table is authored in), so a 90 degree tile rotation is
/// a 270 degree clockwise image rotation.
fn rotate_anticlockwise(tile: &RgbaImage, rotation: Rotation) -> RgbaImage {
    match rotation {
        Rotation::R0 => tile.clone(),
        Rotation::R90 => imageops::rotate270(tile),
        Rotation::R180 => imageops::rotate180(tile),
        Rotation::R270 => imageops::rotate90(tile),
    }
}
