use crate::{
    camera::{Camera, Motion},
    core::ray::CornerRays,
};

/// Per-frame camera data handed to the tracing kernel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameUniforms {
    pub eye: glam::Vec3A,
    pub rays: CornerRays,
}

/// Receiver of the per-frame uniforms, usually a GPU constant buffer.
pub trait UniformSink {
    fn upload(&mut self, frame: u32, uniforms: &FrameUniforms) -> anyhow::Result<()>;
}

pub struct LogSink;

impl UniformSink for LogSink {
    fn upload(&mut self, frame: u32, uniforms: &FrameUniforms) -> anyhow::Result<()> {
        let rays = uniforms.rays.to_arrays();
        log::debug!(
            "frame {}: eye {:?}, ray00 {:?}, ray01 {:?}, ray10 {:?}, ray11 {:?}",
            frame,
            uniforms.eye,
            rays[0],
            rays[1],
            rays[2],
            rays[3]
        );
        Ok(())
    }
}

#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingSink {
    pub frames: Vec<FrameUniforms>,
}

impl UniformSink for RecordingSink {
    fn upload(&mut self, _frame: u32, uniforms: &FrameUniforms) -> anyhow::Result<()> {
        self.frames.push(*uniforms);
        Ok(())
    }
}

/// Drives a camera through a motion script, one entry per frame. Frames past
/// the end of the script keep the camera still.
pub struct Viewer {
    camera: Camera,
    script: Vec<Vec<Motion>>,
    frames: u32,
}

impl Viewer {
    pub fn new(camera: Camera, script: Vec<Vec<Motion>>, frames: u32) -> Self {
        Self {
            camera,
            script,
            frames,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn set_frames(&mut self, frames: u32) {
        self.frames = frames;
    }

    pub fn frame_uniforms(&mut self) -> anyhow::Result<FrameUniforms> {
        let rays = self.camera.corner_rays()?;
        Ok(FrameUniforms {
            eye: self.camera.position(),
            rays,
        })
    }

    /// Applies the motions scheduled for `frame`, then derives its uniforms.
    pub fn step(&mut self, frame: u32) -> anyhow::Result<FrameUniforms> {
        if let Some(motions) = self.script.get(frame as usize) {
            for &motion in motions {
                motion.apply(&mut self.camera).map_err(|err| {
                    anyhow::anyhow!("viewer - frame {}: {:?} failed: {}", frame, motion, err)
                })?;
            }
        }
        self.frame_uniforms()
    }

    pub fn run<S: UniformSink>(&mut self, sink: &mut S) -> anyhow::Result<()> {
        log::info!("running {} frames", self.frames);
        for frame in 0..self.frames {
            let uniforms = self.step(frame)?;
            sink.upload(frame, &uniforms)?;
        }
        log::info!("camera ends at {:?}", self.camera.position());
        Ok(())
    }
}
