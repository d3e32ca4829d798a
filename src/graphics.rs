use crate::camera::CameraRig;
use crate::color::Rgb;
use crate::math::{apply_lighting, edge_function, Lighting};
use crate::state::{SceneState, Triangle};
use crate::vertex::Vertex;

/// Clip-space `w` below which a vertex counts as behind the camera
const NEAR_W: f32 = 1e-3;

/// Color and depth buffer the scene is rasterized into
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    color: Vec<Rgb>,
    depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            width,
            height,
            color: vec![Rgb::BLACK; width * height],
            depth: vec![f32::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reallocates only when the size changed
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            *self = FrameBuffer::new(width, height);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.color[y * self.width + x]
    }

    /// Fills with `background` and resets depth
    pub fn clear(&mut self, background: Rgb) {
        self.color.fill(background);
        self.depth.fill(f32::INFINITY);
    }

    /// Draws a triangle with per-pixel lighting
    pub fn draw_triangle(
        &mut self,
        v0: &Vertex,
        v1: &Vertex,
        v2: &Vertex,
        lighting: &Lighting,
        base_color: Rgb,
    ) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        // Compute bounding box of the triangle
        let min_x = v0.screen_position[0]
            .min(v1.screen_position[0])
            .min(v2.screen_position[0]);
        let max_x = v0.screen_position[0]
            .max(v1.screen_position[0])
            .max(v2.screen_position[0]);
        let min_y = v0.screen_position[1]
            .min(v1.screen_position[1])
            .min(v2.screen_position[1]);
        let max_y = v0.screen_position[1]
            .max(v1.screen_position[1])
            .max(v2.screen_position[1]);
        if max_x < 0.0 || max_y < 0.0 || min_x >= self.width as f32 || min_y >= self.height as f32
        {
            return;
        }

        let min_x = min_x.floor().max(0.0) as usize;
        let max_x = max_x.ceil().min(self.width as f32 - 1.0) as usize;
        let min_y = min_y.floor().max(0.0) as usize;
        let max_y = max_y.ceil().min(self.height as f32 - 1.0) as usize;

        let area = edge_function(&v0.screen_position, &v1.screen_position, &v2.screen_position);
        if area == 0.0 {
            return;
        }

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = [x as f32 + 0.5, y as f32 + 0.5];

                // Barycentric weights; dividing by the signed area accepts both windings
                let w0 = edge_function(&v1.screen_position, &v2.screen_position, &p) / area;
                let w1 = edge_function(&v2.screen_position, &v0.screen_position, &p) / area;
                let w2 = edge_function(&v0.screen_position, &v1.screen_position, &p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = v0.depth * w0 + v1.depth * w1 + v2.depth * w2;
                let offset = y * self.width + x;
                if depth >= self.depth[offset] {
                    continue;
                }
                self.depth[offset] = depth;

                let normal = (v0.normal * w0 + v1.normal * w1 + v2.normal * w2).normalize_or_zero();
                self.color[offset] = apply_lighting(base_color, normal, lighting);
            }
        }
    }

    /// Box-filters the buffer down to `width` x `height`
    pub fn resolve(&self, width: usize, height: usize) -> Vec<Rgb> {
        let mut out = Vec::with_capacity(width * height);
        if self.width == 0 || self.height == 0 {
            out.resize(width * height, Rgb::BLACK);
            return out;
        }
        let sx = self.width as f32 / width.max(1) as f32;
        let sy = self.height as f32 / height.max(1) as f32;
        for y in 0..height {
            let y0 = ((y as f32 * sy) as usize).min(self.height - 1);
            let y1 = (((y + 1) as f32 * sy).ceil() as usize).clamp(y0 + 1, self.height);
            for x in 0..width {
                let x0 = ((x as f32 * sx) as usize).min(self.width - 1);
                let x1 = (((x + 1) as f32 * sx).ceil() as usize).clamp(x0 + 1, self.width);
                let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);
                for yy in y0..y1 {
                    for xx in x0..x1 {
                        let c = self.color[yy * self.width + xx];
                        r += c.r as u32;
                        g += c.g as u32;
                        b += c.b as u32;
                        n += 1;
                    }
                }
                out.push(Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8));
            }
        }
        out
    }
}

/// Clears the buffer and draws every loaded model as seen from `camera`
pub fn rasterize_scene(scene: &SceneState, camera: &CameraRig, buffer: &mut FrameBuffer) {
    buffer.clear(scene.background);
    let lighting = Lighting::from_scene(scene);
    let view_projection = camera.view_projection_matrix();
    let (width, height) = (buffer.width() as f32, buffer.height() as f32);

    let project = |triangle: &Triangle| -> Option<[Vertex; 3]> {
        let mut out = [Vertex {
            screen_position: [0.0; 2],
            depth: 0.0,
            normal: glam::Vec3::ZERO,
        }; 3];
        for (i, vertex) in out.iter_mut().enumerate() {
            let clip = view_projection * triangle.positions[i].extend(1.0);
            if clip.w < NEAR_W {
                return None;
            }
            let ndc = clip.truncate() / clip.w;
            *vertex = Vertex {
                screen_position: [
                    (ndc.x * 0.5 + 0.5) * width,
                    (0.5 - ndc.y * 0.5) * height,
                ],
                depth: ndc.z,
                normal: triangle.normals[i],
            };
        }
        Some(out)
    };

    for model in &scene.models {
        for triangle in &model.triangles {
            if let Some([v0, v1, v2]) = project(triangle) {
                buffer.draw_triangle(&v0, &v1, &v2, &lighting, triangle.color);
            }
        }
    }
}
