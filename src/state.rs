use crate::color::Rgb;
use glam::Vec3;

/// World position of the sun light; it shines towards the origin
pub const SUN_POSITION: Vec3 = Vec3::new(-69.0, 44.0, 14.0);

/// Ambient light with a flat color contribution
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub intensity: f32,
    pub color: Rgb,
}

/// Directional light
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunLight {
    pub intensity: f32,
    pub color: Rgb,
    /// Unit vector pointing from the scene towards the light
    pub direction: Vec3,
}

/// One world-space triangle of a loaded model
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub positions: [Vec3; 3],
    pub normals: [Vec3; 3],
    pub color: Rgb,
}

/// A decoded model, already flattened to world space
#[derive(Clone, Debug, Default)]
pub struct ModelHandle {
    pub name: String,
    pub triangles: Vec<Triangle>,
}

/// Everything the renderer reads each frame.
///
/// Holds exactly one background and one of each light; setters overwrite in place.
#[derive(Clone, Debug)]
pub struct SceneState {
    /// Clear color
    pub background: Rgb,
    /// Ambient light
    pub ambient: AmbientLight,
    /// Sun light
    pub sun: SunLight,
    /// Loaded models, in insertion order
    pub models: Vec<ModelHandle>,
}

impl Default for SceneState {
    fn default() -> Self {
        SceneState {
            background: Rgb::from_hex(0xc8f0f9),
            ambient: AmbientLight {
                intensity: 0.82,
                color: Rgb::from_hex(0xa0a0fc),
            },
            sun: SunLight {
                intensity: 1.96,
                color: Rgb::from_hex(0xe8c37b),
                direction: SUN_POSITION.normalize(),
            },
            models: Vec::new(),
        }
    }
}

impl SceneState {
    pub fn insert_model(&mut self, model: ModelHandle) {
        log::info!(
            "Inserted model '{}' ({} triangles)",
            model.name,
            model.triangles.len()
        );
        self.models.push(model);
    }

    pub fn triangle_count(&self) -> usize {
        self.models.iter().map(|m| m.triangles.len()).sum()
    }
}
