use glam::Vec3;

/// Projected vertex with depth and world-space normal
#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    pub screen_position: [f32; 2],
    /// Normalized device depth, smaller is closer
    pub depth: f32,
    pub normal: Vec3,
}
