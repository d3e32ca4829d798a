use crate::color::Rgb;
use crate::state::SceneState;
use glam::Vec3;

/// Edge function used in rasterization
pub fn edge_function(a: &[f32; 2], b: &[f32; 2], c: &[f32; 2]) -> f32 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// Light contributions resolved once per frame from the scene
#[derive(Clone, Copy, Debug)]
pub struct Lighting {
    /// Ambient color times intensity
    pub ambient: Vec3,
    /// Sun color times intensity
    pub sun: Vec3,
    /// Unit vector towards the sun
    pub sun_direction: Vec3,
}

impl Lighting {
    pub fn from_scene(scene: &SceneState) -> Self {
        Lighting {
            ambient: scene.ambient.color.to_vec3() * scene.ambient.intensity,
            sun: scene.sun.color.to_vec3() * scene.sun.intensity,
            sun_direction: scene.sun.direction.normalize_or_zero(),
        }
    }
}

/// Lambert term for a unit normal and a unit light direction
pub fn calculate_light_intensity(normal: Vec3, light_direction: Vec3) -> f32 {
    normal.dot(light_direction).max(0.0)
}

/// Applies ambient and sun lighting to a base color
pub fn apply_lighting(color: Rgb, normal: Vec3, lighting: &Lighting) -> Rgb {
    let diffuse = calculate_light_intensity(normal, lighting.sun_direction);
    let light = lighting.ambient + lighting.sun * diffuse;
    Rgb::from_vec3(color.to_vec3() * light)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lighting(ambient: Vec3, sun: Vec3) -> Lighting {
        Lighting {
            ambient,
            sun,
            sun_direction: Vec3::Y,
        }
    }

    #[test]
    fn edge_function_sign_follows_winding() {
        let a = [0.0, 0.0];
        let b = [4.0, 0.0];
        assert!(edge_function(&a, &b, &[1.0, 1.0]) < 0.0);
        assert!(edge_function(&a, &b, &[1.0, -1.0]) > 0.0);
        assert_eq!(edge_function(&a, &b, &[2.0, 0.0]), 0.0);
    }

    #[test]
    fn back_faces_get_ambient_only() {
        let l = lighting(Vec3::splat(0.5), Vec3::ONE);
        assert_eq!(apply_lighting(Rgb::WHITE, -Vec3::Y, &l), Rgb::new(128, 128, 128));
    }

    #[test]
    fn lit_faces_saturate() {
        let l = lighting(Vec3::splat(0.5), Vec3::ONE);
        assert_eq!(apply_lighting(Rgb::WHITE, Vec3::Y, &l), Rgb::WHITE);
    }

    #[test]
    fn light_color_tints_surface() {
        let l = lighting(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(apply_lighting(Rgb::WHITE, Vec3::Y, &l), Rgb::new(255, 0, 0));
    }

    #[test]
    fn scene_lighting_scales_by_intensity() {
        let scene = SceneState::default();
        let l = Lighting::from_scene(&scene);
        let expected = scene.ambient.color.to_vec3() * 0.82;
        assert!((l.ambient - expected).length() < 1e-6);
    }
}
