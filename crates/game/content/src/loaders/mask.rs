//! Collision mask loader.
//!
//! Decodes the same-dimension bitmap that encodes walkability: a pixel is
//! wall iff all three color channels fall below the darkness threshold.

use std::path::Path;

use game_core::{MapOracle, MaskDimensions};

use crate::loaders::LoadResult;

/// Channel value below which a pixel counts as dark.
const DARKNESS_THRESHOLD: u8 = 48;

/// Decoded walkability mask; implements [`MapOracle`] for the engine.
#[derive(Clone, Debug)]
pub struct CollisionMask {
    width: u32,
    height: u32,
    /// Row-major wall flags, `width * height` entries.
    walls: Vec<bool>,
}

impl CollisionMask {
    pub fn new(width: u32, height: u32, walls: Vec<bool>) -> Self {
        debug_assert_eq!(walls.len(), (width as usize) * (height as usize));
        Self {
            width,
            height,
            walls,
        }
    }

    /// Builds a mask from a predicate, mainly for tests and fixtures.
    pub fn from_fn(width: u32, height: u32, mut wall_at: impl FnMut(u32, u32) -> bool) -> Self {
        let mut walls = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                walls.push(wall_at(x, y));
            }
        }
        Self::new(width, height, walls)
    }

    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|&&wall| wall).count()
    }
}

impl MapOracle for CollisionMask {
    fn dimensions(&self) -> MaskDimensions {
        MaskDimensions::new(self.width, self.height)
    }

    fn is_wall(&self, x: i32, y: i32) -> bool {
        if !self.contains(x, y) {
            return true;
        }
        self.walls[(y as usize) * (self.width as usize) + (x as usize)]
    }
}

/// Loader for collision mask bitmaps.
pub struct MaskLoader;

impl MaskLoader {
    /// Load a collision mask from a PNG file.
    pub fn load(path: &Path) -> LoadResult<CollisionMask> {
        let decoded = image::open(path)
            .map_err(|e| anyhow::anyhow!("Failed to decode mask {}: {}", path.display(), e))?
            .to_rgb8();

        let (width, height) = decoded.dimensions();
        let mut walls = Vec::with_capacity((width as usize) * (height as usize));
        for pixel in decoded.pixels() {
            let [r, g, b] = pixel.0;
            walls.push(r < DARKNESS_THRESHOLD && g < DARKNESS_THRESHOLD && b < DARKNESS_THRESHOLD);
        }

        let mask = CollisionMask::new(width, height, walls);
        tracing::debug!(
            width,
            height,
            walls = mask.wall_count(),
            "decoded collision mask"
        );
        Ok(mask)
    }
}
