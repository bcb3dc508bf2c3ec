use std::path::PathBuf;

use structopt::StructOpt;

mod camera;
mod core;
mod loader;
mod renderer;
mod viewer;

#[derive(StructOpt)]
#[structopt(name = "ray-viewer", about = "Drives a ray-tracing camera through a motion script")]
struct Opt {
    /// Viewer config json
    #[structopt(parse(from_os_str))]
    config: PathBuf,

    /// Overrides 'output.filename'
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Overrides 'frames'
    #[structopt(short, long)]
    frames: Option<u32>,

    #[structopt(long)]
    tiles_x: Option<u32>,

    #[structopt(long)]
    tiles_y: Option<u32>,

    /// Skips the CPU preview of the final frame
    #[structopt(long)]
    no_preview: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opt = Opt::from_args();

    log::info!("loading viewer config '{}'", opt.config.display());
    let loader::ViewerConfig {
        mut viewer,
        mut output,
    } = loader::load_viewer(&opt.config)?;

    if let Some(filename) = opt.output {
        output.filename = filename.to_string_lossy().into_owned();
    }
    if let Some(frames) = opt.frames {
        viewer.set_frames(frames);
    }
    if let Some(tiles_x) = opt.tiles_x {
        output.tiles_x = tiles_x;
    }
    if let Some(tiles_y) = opt.tiles_y {
        output.tiles_y = tiles_y;
    }

    let begin_time = std::time::SystemTime::now();
    viewer.run(&mut viewer::LogSink)?;

    if !opt.no_preview {
        let renderer = renderer::PreviewRenderer::new(true);
        renderer.render_to_file(viewer.camera(), &output)?;
    }

    let duration = std::time::SystemTime::now().duration_since(begin_time)?;
    log::info!("finished, time used: {:?}", duration);
    Ok(())
}
