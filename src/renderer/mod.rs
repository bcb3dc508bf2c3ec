mod util;

use anyhow::Context;

use crate::{
    camera::{Camera, Viewport},
    core::{error::CameraError, film::{self, Film}, frustum::Tile, ray::CornerRays},
};

pub struct OutputConfig {
    pub filename: String,
    pub viewport: Viewport,
    pub tiles_x: u32,
    pub tiles_y: u32,
}

/// Corner rays of every tile of a grid, each derived from the tile's own sub-frustum.
pub struct TileRays {
    tiles_x: u32,
    tiles_y: u32,
    rays: Vec<CornerRays>,
}

/// CPU stand-in for the tracing kernel: shades every pixel with its interpolated
/// eye-ray direction, mapped from `[-1, 1]` to `[0, 1]`.
pub struct PreviewRenderer {
    num_threads: u32,
    show_progress: bool,
}

impl TileRays {
    pub fn new(camera: &Camera, tiles_x: u32, tiles_y: u32) -> Result<Self, CameraError> {
        Tile::new(tiles_x, tiles_y, 0, 0)?;
        let full = camera.frustum();
        let mut rays = Vec::with_capacity(tiles_x as usize * tiles_y as usize);
        for tile_y in 0..tiles_y {
            for tile_x in 0..tiles_x {
                let tile = Tile::new(tiles_x, tiles_y, tile_x, tile_y)?;
                let mut tile_camera = camera.clone();
                tile_camera.set_frustum(full.tile(tile));
                rays.push(tile_camera.corner_rays()?);
            }
        }
        Ok(Self {
            tiles_x,
            tiles_y,
            rays,
        })
    }

    /// Eye-ray direction at full-frame coordinates `u`, `v` in `[0, 1]`, `v` upwards.
    pub fn direction_at(&self, u: f32, v: f32) -> glam::Vec3A {
        let (tile_x, u) = split(u, self.tiles_x);
        let (tile_y, v) = split(v, self.tiles_y);
        self.rays[(tile_y * self.tiles_x + tile_x) as usize].at(u, v)
    }
}

fn split(t: f32, count: u32) -> (u32, f32) {
    let scaled = t * count as f32;
    let index = (scaled as u32).min(count - 1);
    (index, scaled - index as f32)
}

impl PreviewRenderer {
    pub fn new(show_progress: bool) -> Self {
        Self {
            num_threads: num_cpus::get() as u32 * 2,
            show_progress,
        }
    }

    #[allow(dead_code)]
    pub fn with_threads(mut self, num_threads: u32) -> Self {
        self.num_threads = num_threads.max(1);
        self
    }

    pub fn render(&self, camera: &Camera, config: &OutputConfig) -> anyhow::Result<Film> {
        let Viewport { width, height } = config.viewport;
        let tiles = TileRays::new(camera, config.tiles_x, config.tiles_y)
            .context("renderer - can't derive tile rays")?;
        log::debug!(
            "rendering {}x{} preview in {}x{} tiles",
            width,
            height,
            config.tiles_x,
            config.tiles_y
        );

        let progress_bar = util::render_progress_bar(width, height, self.show_progress);
        let ranges = util::create_image_ranges(self.num_threads, height);
        let width_inv = 1.0 / width as f32;
        let height_inv = 1.0 / height as f32;

        let rows = crossbeam::scope(|scope| {
            let handles: Vec<_> = ranges
                .iter()
                .map(|&util::ImageRange { from, to }| {
                    let tiles = &tiles;
                    let progress_bar = progress_bar.clone();
                    scope.spawn(move |_| {
                        let mut pixels = Vec::with_capacity(film::pixel_count(width, to - from));
                        for j in from..to {
                            let v = 1.0 - (j as f32 + 0.5) * height_inv;
                            for i in 0..width {
                                let u = (i as f32 + 0.5) * width_inv;
                                let direction = tiles.direction_at(u, v).normalize();
                                pixels.push(direction * 0.5 + glam::Vec3A::splat(0.5));
                            }
                            progress_bar.inc(width as u64);
                        }
                        pixels
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(|_| anyhow::anyhow!("renderer - worker scope panicked"))?
        .map_err(|_| anyhow::anyhow!("renderer - worker thread panicked"))?;
        progress_bar.finish_and_clear();

        let mut film = Film::new(width, height);
        for (range, pixels) in ranges.iter().zip(rows) {
            film.write_rows(range.from, &pixels);
        }
        Ok(film)
    }

    pub fn render_to_file(&self, camera: &Camera, config: &OutputConfig) -> anyhow::Result<()> {
        let film = self.render(camera, config)?;
        film.to_image()
            .save(&config.filename)
            .with_context(|| format!("renderer - failed to save image '{}'", config.filename))?;
        log::info!("preview saved to '{}'", config.filename);
        Ok(())
    }
}
