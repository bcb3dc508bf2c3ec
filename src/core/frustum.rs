use crate::core::error::CameraError;

/// View volume bounds. `left/right/bottom/top` are measured on the near plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

/// One cell of a `tiles_x` x `tiles_y` grid over the frustum, indexed from the bottom-left.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tile {
    tiles_x: u32,
    tiles_y: u32,
    tile_x: u32,
    tile_y: u32,
}

impl Default for Frustum {
    fn default() -> Self {
        Self {
            left: -0.05,
            right: 0.05,
            bottom: -0.05,
            top: 0.05,
            near: 0.001,
            far: 10.0,
        }
    }
}

impl Frustum {
    /// Symmetric frustum from a vertical field of view in degrees.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let h = (fov_y.to_radians() * 0.5).tan() * near;
        let w = h * aspect;
        Self {
            left: -w,
            right: w,
            bottom: -h,
            top: h,
            near,
            far,
        }
    }

    /// The sub-rectangle of this frustum covered by `tile`. Neighbouring tiles
    /// evaluate the same expression for their shared edge, so the grid has no gaps.
    pub fn tile(&self, tile: Tile) -> Self {
        let lerp = |from: f32, to: f32, index: u32, count: u32| {
            if index == count {
                to
            } else {
                from + (to - from) * (index as f32 / count as f32)
            }
        };
        Self {
            left: lerp(self.left, self.right, tile.tile_x, tile.tiles_x),
            right: lerp(self.left, self.right, tile.tile_x + 1, tile.tiles_x),
            bottom: lerp(self.bottom, self.top, tile.tile_y, tile.tiles_y),
            top: lerp(self.bottom, self.top, tile.tile_y + 1, tile.tiles_y),
            ..*self
        }
    }

    pub fn check_extent(&self) -> Result<(), CameraError> {
        let bounds = [self.left, self.right, self.bottom, self.top, self.near, self.far];
        if bounds.iter().any(|v| !v.is_finite())
            || self.left == self.right
            || self.bottom == self.top
            || self.near == self.far
        {
            return Err(CameraError::DegenerateFrustum);
        }
        Ok(())
    }
}

impl Tile {
    pub fn new(tiles_x: u32, tiles_y: u32, tile_x: u32, tile_y: u32) -> Result<Self, CameraError> {
        if tiles_x == 0 || tiles_y == 0 || tile_x >= tiles_x || tile_y >= tiles_y {
            return Err(CameraError::InvalidTile {
                tiles_x,
                tiles_y,
                tile_x,
                tile_y,
            });
        }
        Ok(Self {
            tiles_x,
            tiles_y,
            tile_x,
            tile_y,
        })
    }
}
