mod cached;
mod motion;
mod projection;
mod screen;

pub use cached::*;
pub use motion::*;
pub use projection::*;
pub use screen::*;

use std::convert::TryFrom;

use anyhow::Context;

use crate::core::{
    frustum::{Frustum, Tile},
    loader::InputParams,
};

/// Builds a camera from its JSON description. `aspect` is used when the camera
/// is given a field of view without an explicit aspect ratio.
pub fn create_camera_from_params(params: &mut InputParams, aspect: f32) -> anyhow::Result<Camera> {
    params.set_name("camera".into());
    let ty = params.get_str("type")?;
    params.set_name(format!("camera-{}", ty).into());

    let mut camera = Camera::new();
    match ty.as_str() {
        "perspective" => {
            if params.contains_key("fov") {
                load_fov_frustum(&mut camera, params, aspect)?;
            } else {
                camera.set_frustum(load_bounds(params)?);
            }
        }
        "orthographic" => {
            camera.set_orthographic(true);
            camera.set_frustum(load_bounds(params)?);
        }
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    }
    load_pose(&mut camera, params)?;

    params.check_unused_keys();

    Ok(camera)
}

fn load_fov_frustum(camera: &mut Camera, params: &mut InputParams, aspect: f32) -> anyhow::Result<()> {
    let fov = params.get_float("fov")?;
    let aspect = params.get_float_or("aspect", aspect)?;
    let near = params.get_float_or("near", 0.1)?;
    let far = params.get_float_or("far", 100.0)?;

    if params.contains_key("tile") {
        let [tiles_x, tiles_y, tile_x, tile_y] = params.get_int4("tile")?;
        let tile = Tile::new(
            u32::try_from(tiles_x)?,
            u32::try_from(tiles_y)?,
            u32::try_from(tile_x)?,
            u32::try_from(tile_y)?,
        )
        .with_context(|| format!("{} - bad 'tile'", params.name()))?;
        camera.set_frustum_perspective_tiled(fov, aspect, near, far, tile);
    } else {
        camera.set_frustum_perspective(fov, aspect, near, far);
    }
    Ok(())
}

fn load_bounds(params: &mut InputParams) -> anyhow::Result<Frustum> {
    let default = Frustum::default();
    let frustum = Frustum {
        left: params.get_float_or("left", default.left)?,
        right: params.get_float_or("right", default.right)?,
        bottom: params.get_float_or("bottom", default.bottom)?,
        top: params.get_float_or("top", default.top)?,
        near: params.get_float_or("near", default.near)?,
        far: params.get_float_or("far", default.far)?,
    };
    frustum
        .check_extent()
        .with_context(|| format!("{} - bad frustum bounds", params.name()))?;
    Ok(frustum)
}

fn load_pose(camera: &mut Camera, params: &mut InputParams) -> anyhow::Result<()> {
    let eye: glam::Vec3A = params.get_float3_or("eye", [0.0, 0.0, 0.0])?.into();
    let up: glam::Vec3A = params.get_float3_or("up", [0.0, 1.0, 0.0])?.into();

    if params.contains_key("target") {
        let target: glam::Vec3A = params.get_float3("target")?.into();
        camera
            .set_look_at(eye, target, up)
            .with_context(|| format!("{} - can't look at 'target'", params.name()))?;
    } else {
        let direction: glam::Vec3A = params.get_float3_or("direction", [0.0, 0.0, -1.0])?.into();
        camera.set_position(eye);
        camera.set_direction(direction);
        camera.set_up(up);
        camera
            .basis()
            .with_context(|| format!("{} - 'direction' and 'up' are parallel", params.name()))?;
    }
    Ok(())
}
