//! Rendering seam between the viewer core and a display surface.

use crate::camera::CameraRig;
use crate::color::Rgb;
use crate::error::Result;
use crate::graphics::{rasterize_scene, FrameBuffer};
use crate::state::SceneState;
use crate::viewport::Viewport;

/// Produces frames from the scene as seen by the camera.
pub trait Renderer {
    /// Called synchronously whenever the surface changes size.
    fn resize(&mut self, viewport: &Viewport);

    /// Draws exactly one frame.
    fn render(&mut self, scene: &SceneState, camera: &CameraRig) -> Result<()>;
}

/// CPU rasterizer rendering at `pixel_ratio` times the surface size.
#[derive(Debug)]
pub struct SoftwareRenderer {
    viewport: Viewport,
    buffer: FrameBuffer,
    frames: u64,
}

impl SoftwareRenderer {
    pub fn new(viewport: Viewport) -> Self {
        let (width, height) = viewport.buffer_size();
        SoftwareRenderer {
            viewport,
            buffer: FrameBuffer::new(width, height),
            frames: 0,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Last frame downsampled to surface pixels, row-major.
    pub fn surface_pixels(&self) -> Vec<Rgb> {
        self.buffer
            .resolve(self.viewport.width as usize, self.viewport.height as usize)
    }
}

impl Renderer for SoftwareRenderer {
    fn resize(&mut self, viewport: &Viewport) {
        self.viewport = *viewport;
        let (width, height) = viewport.buffer_size();
        self.buffer.resize(width, height);
    }

    fn render(&mut self, scene: &SceneState, camera: &CameraRig) -> Result<()> {
        rasterize_scene(scene, camera, &mut self.buffer);
        self.frames += 1;
        Ok(())
    }
}
