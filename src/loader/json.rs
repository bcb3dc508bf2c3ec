use std::{
    borrow::Cow,
    convert::{TryFrom, TryInto},
    path::Path,
};

use anyhow::Context;

use crate::{
    camera::{self, Motion, Viewport},
    core::loader::InputParams,
    renderer::OutputConfig,
    viewer::Viewer,
};

pub struct ViewerConfig {
    pub viewer: Viewer,
    pub output: OutputConfig,
}

pub fn load_viewer<P: AsRef<Path>>(path: P) -> anyhow::Result<ViewerConfig> {
    let path = path.as_ref();
    let json_value = read_json(path).context("viewer - can't read config")?;
    let json_value = resolve_external(path, json_value, "camera")?;
    load_viewer_from_value(&json_value)
}

pub fn load_viewer_from_value(json_value: &serde_json::Value) -> anyhow::Result<ViewerConfig> {
    let output = match json_value.get("output") {
        Some(value) => load_output(value)?,
        None => load_output(&serde_json::json!({}))?,
    };

    let camera_value = json_value
        .get("camera")
        .context("viewer - There is no 'camera' field")?;
    let mut camera_params: InputParams = camera_value.try_into()?;
    let camera = camera::create_camera_from_params(&mut camera_params, output.viewport.aspect())?;

    let script = match json_value.get("motions") {
        Some(value) => load_script(value)?,
        None => vec![],
    };

    let frames = match json_value.get("frames") {
        Some(value) => {
            let frames = value
                .as_u64()
                .context("viewer - 'frames' should be non-negative integer")?;
            u32::try_from(frames).context("viewer - 'frames' is too large")?
        }
        None => script.len().max(1) as u32,
    };

    Ok(ViewerConfig {
        viewer: Viewer::new(camera, script, frames),
        output,
    })
}

fn load_output(value: &serde_json::Value) -> anyhow::Result<OutputConfig> {
    let mut params: InputParams = value.try_into()?;
    params.set_name(Cow::Borrowed("output"));

    let filename = params.get_str_or("filename", "frame.png")?;
    let width = params.get_int_or("width", 640)?;
    let height = params.get_int_or("height", 480)?;
    let tiles_x = params.get_int_or("tiles_x", 1)?;
    let tiles_y = params.get_int_or("tiles_y", 1)?;
    params.check_unused_keys();

    let viewport = Viewport::new(
        u32::try_from(width).context("output - 'width' should be positive")?,
        u32::try_from(height).context("output - 'height' should be positive")?,
    )
    .context("output - bad image size")?;
    let tiles_x = u32::try_from(tiles_x).context("output - 'tiles_x' should be positive")?;
    let tiles_y = u32::try_from(tiles_y).context("output - 'tiles_y' should be positive")?;
    if tiles_x == 0 || tiles_y == 0 {
        anyhow::bail!("output - 'tiles_x' and 'tiles_y' should be positive");
    }

    Ok(OutputConfig {
        filename,
        viewport,
        tiles_x,
        tiles_y,
    })
}

fn load_script(value: &serde_json::Value) -> anyhow::Result<Vec<Vec<Motion>>> {
    let frames = value
        .as_array()
        .context("viewer - 'motions' should be an array of frames")?;
    let mut script = Vec::with_capacity(frames.len());
    for (i, frame) in frames.iter().enumerate() {
        let motions = frame
            .as_array()
            .with_context(|| format!("viewer - 'motions[{}]' should be an array", i))?;
        let mut frame_motions = Vec::with_capacity(motions.len());
        for motion in motions {
            let mut params: InputParams = motion.try_into()?;
            let motion = Motion::load(&mut params)
                .with_context(|| format!("viewer - bad motion in frame {}", i))?;
            frame_motions.push(motion);
        }
        script.push(frame_motions);
    }
    Ok(script)
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let json_file = std::fs::File::open(path)
        .with_context(|| format!("json file '{}' not found", path.display()))?;
    let json_reader = std::io::BufReader::new(json_file);
    let json_value: serde_json::Value = serde_json::from_reader(json_reader)?;
    Ok(json_value)
}

/// A string in place of `field` names another json file, relative to `path`.
fn resolve_external(
    path: &Path,
    mut json_value: serde_json::Value,
    field: &str,
) -> anyhow::Result<serde_json::Value> {
    let external = json_value
        .get(field)
        .and_then(|value| value.as_str())
        .map(|name| path.with_file_name(name));
    if let Some(external) = external {
        let value = read_json(&external)
            .with_context(|| format!("{} - External json file not found", field))?;
        json_value[field] = value;
    }
    Ok(json_value)
}
