use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CameraError {
    #[error("degenerate camera basis: direction and up must be non-zero and not parallel")]
    DegenerateBasis,
    #[error("degenerate frustum: left/right, bottom/top and near/far must differ")]
    DegenerateFrustum,
    #[error("view-projection matrix is not invertible")]
    NotInvertible,
    #[error("invalid tile {tile_x}x{tile_y} in a {tiles_x}x{tiles_y} grid")]
    InvalidTile {
        tiles_x: u32,
        tiles_y: u32,
        tile_x: u32,
        tile_y: u32,
    },
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },
}
