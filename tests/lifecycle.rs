//! End-to-end viewer scenarios driven without a terminal.

use std::f32::consts::PI;
use std::thread;
use std::time::{Duration, Instant};

use flyby3d::camera::{CameraMode, CameraRig};
use flyby3d::color::Rgb;
use flyby3d::intro::{quartic_in_out, IntroAnimationSpec};
use flyby3d::lifecycle::Phase;
use flyby3d::loader;
use flyby3d::orbit::polar_angle;
use flyby3d::params::{LightParams, ParamValue, BINDINGS};
use flyby3d::renderer::{Renderer, SoftwareRenderer};
use flyby3d::state::SceneState;
use flyby3d::viewport::Viewport;
use flyby3d::{PointerInput, Result, Viewer};
use glam::Vec3;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Records what each frame saw.
#[derive(Default)]
struct RecordingRenderer {
    backgrounds: Vec<Rgb>,
    model_counts: Vec<usize>,
}

impl Renderer for RecordingRenderer {
    fn resize(&mut self, _viewport: &Viewport) {}

    fn render(&mut self, scene: &SceneState, _camera: &CameraRig) -> Result<()> {
        self.backgrounds.push(scene.background);
        self.model_counts.push(scene.models.len());
        Ok(())
    }
}

fn started_viewer() -> Viewer {
    let mut viewer = Viewer::new(Viewport::new(160, 96, 2.0));
    viewer.start(Duration::ZERO, None);
    viewer
}

mod intro {
    use super::*;

    #[test]
    fn position_tracks_eased_interpolation() {
        let mut viewer = started_viewer();
        let mut renderer = RecordingRenderer::default();
        let spec = IntroAnimationSpec::default();
        for t in (0..7500).step_by(250) {
            viewer.frame(ms(t), &mut renderer).unwrap();
            assert_eq!(viewer.phase(), Phase::IntroPlaying);
            let progress = ((t as f32 - 1000.0) / 6500.0).clamp(0.0, 1.0);
            let expected = spec.start.lerp(spec.end, quartic_in_out(progress));
            assert!(
                viewer.camera().position().distance(expected) < 1e-3,
                "t = {t}"
            );
            assert_eq!(viewer.camera().mode(), CameraMode::Scripted);
        }
    }

    #[test]
    fn fly_in_ends_with_orbit_enabled() {
        let mut viewer = started_viewer();
        let mut renderer = RecordingRenderer::default();
        viewer.frame(ms(1000), &mut renderer).unwrap();
        viewer.frame(ms(1000 + 6500), &mut renderer).unwrap();

        assert_eq!(viewer.phase(), Phase::Interactive);
        assert!(viewer.camera().position().distance(Vec3::new(16.0, 50.0, -0.1)) < 1e-3);
        assert!(viewer.orbit().is_enabled());
        assert_eq!(viewer.orbit().limits().min_distance, 35.0);
        assert_eq!(viewer.orbit().limits().max_distance, 60.0);
        assert_eq!(viewer.orbit().limits().damping_factor, 0.04);
    }

    #[test]
    fn uneven_frame_times_do_not_change_the_path() {
        let mut viewer = started_viewer();
        let mut renderer = RecordingRenderer::default();
        for t in [0, 3, 700, 1001, 1450, 4300, 4301, 7100] {
            viewer.frame(ms(t), &mut renderer).unwrap();
        }
        let expected = IntroAnimationSpec::default().position_at(ms(7100));
        assert!(viewer.camera().position().distance(expected) < 1e-3);
    }
}

mod orbit {
    use super::*;

    fn interactive_viewer() -> (Viewer, RecordingRenderer) {
        let mut viewer = started_viewer();
        let mut renderer = RecordingRenderer::default();
        viewer.frame(ms(7500), &mut renderer).unwrap();
        (viewer, renderer)
    }

    #[test]
    fn input_during_intro_has_no_effect() {
        let mut viewer = started_viewer();
        let mut renderer = RecordingRenderer::default();
        let mut reference = started_viewer();
        for (i, t) in (0..7000).step_by(100).enumerate() {
            viewer.pointer(PointerInput::Drag {
                dx: 30.0,
                dy: -20.0,
            });
            viewer.pointer(PointerInput::Scroll {
                steps: if i % 2 == 0 { 3.0 } else { -3.0 },
            });
            viewer.frame(ms(t), &mut renderer).unwrap();
            reference.frame(ms(t), &mut RecordingRenderer::default()).unwrap();
            assert_eq!(viewer.camera().position(), reference.camera().position());
        }
    }

    #[test]
    fn limits_hold_for_any_input_sequence() {
        let (mut viewer, mut renderer) = interactive_viewer();
        let inputs = [
            PointerInput::Drag { dx: 500.0, dy: 900.0 },
            PointerInput::Scroll { steps: 40.0 },
            PointerInput::Drag { dx: -80.0, dy: -900.0 },
            PointerInput::Scroll { steps: -60.0 },
            PointerInput::Drag { dx: 3.0, dy: 2000.0 },
        ];
        let mut t = 7500;
        for round in 0..40 {
            viewer.pointer(inputs[round % inputs.len()]);
            for _ in 0..5 {
                t += 16;
                viewer.frame(ms(t), &mut renderer).unwrap();
                let camera = viewer.camera();
                let distance = camera.distance();
                assert!((35.0 - 1e-3..=60.0 + 1e-3).contains(&distance), "{distance}");
                assert!(polar_angle(camera.position(), camera.target()) <= PI / 2.5 + 1e-4);
            }
        }
    }

    #[test]
    fn damping_keeps_moving_after_drag_ends() {
        let (mut viewer, mut renderer) = interactive_viewer();
        viewer.pointer(PointerInput::Drag { dx: 60.0, dy: 0.0 });
        viewer.frame(ms(7516), &mut renderer).unwrap();
        let a = viewer.camera().position();
        viewer.frame(ms(7532), &mut renderer).unwrap();
        let b = viewer.camera().position();
        assert!(b.distance(a) > 1e-3);
    }
}

mod lighting {
    use super::*;

    #[test]
    fn dark_mode_once_sets_dark_preset_and_panel() {
        let mut viewer = started_viewer();
        viewer.toggle_dark_mode();
        let scene = viewer.scene();
        assert_eq!(scene.background, Rgb::from_hex(0x000000));
        assert_eq!(scene.ambient.color, Rgb::from_hex(0x333333));
        assert_eq!(scene.sun.color, Rgb::from_hex(0x555555));
        for (index, binding) in BINDINGS.iter().enumerate() {
            assert_eq!(
                viewer.panel().displayed(index),
                viewer.panel().get(binding.key)
            );
        }
        assert_eq!(
            viewer.panel().get("bgColor"),
            Some(ParamValue::Color(Rgb::BLACK))
        );
    }

    #[test]
    fn dark_mode_twice_restores_everything() {
        let mut viewer = started_viewer();
        let before = LightParams::from_scene(viewer.scene());
        viewer.toggle_dark_mode();
        viewer.toggle_dark_mode();
        assert_eq!(LightParams::from_scene(viewer.scene()), before);
        assert!(!viewer.is_dark_mode());
    }

    #[test]
    fn edits_show_up_in_the_next_frame() {
        let mut viewer = started_viewer();
        let mut renderer = RecordingRenderer::default();
        viewer
            .set_parameter("bgColor", ParamValue::Color(Rgb::from_hex(0x102030)))
            .unwrap();
        viewer.frame(ms(16), &mut renderer).unwrap();
        assert_eq!(renderer.backgrounds, vec![Rgb::from_hex(0x102030)]);
    }

    #[test]
    fn each_binding_writes_only_its_field() {
        let values = [
            ("dirLightIntensity", ParamValue::Number(7.25)),
            ("dirLightColor", ParamValue::Color(Rgb::from_hex(0x111111))),
            ("ambLightIntensity", ParamValue::Number(0.125)),
            ("ambLightColor", ParamValue::Color(Rgb::from_hex(0x222222))),
            ("bgColor", ParamValue::Color(Rgb::from_hex(0x333333))),
        ];
        let mut viewer = started_viewer();
        for (key, value) in values {
            viewer.set_parameter(key, value).unwrap();
        }
        let scene = viewer.scene();
        assert_eq!(scene.sun.intensity, 7.25);
        assert_eq!(scene.sun.color.to_hex(), 0x111111);
        assert_eq!(scene.ambient.intensity, 0.125);
        assert_eq!(scene.ambient.color.to_hex(), 0x222222);
        assert_eq!(scene.background.to_hex(), 0x333333);
    }
}

mod surface {
    use super::*;

    #[test]
    fn resize_applies_before_next_frame() {
        let mut viewer = started_viewer();
        let mut renderer = SoftwareRenderer::new(*viewer.viewport());
        viewer.resize(800, 600, 2.0, &mut renderer);
        assert_eq!(viewer.camera().aspect(), 800.0 / 600.0);
        assert_eq!(renderer.viewport().width, 800);
        assert_eq!(renderer.viewport().height, 600);
        viewer.frame(ms(16), &mut renderer).unwrap();
        assert_eq!(renderer.surface_pixels().len(), 800 * 600);
    }
}

mod model_loading {
    use super::*;

    #[test]
    fn failed_load_leaves_lifecycle_running() {
        let mut viewer = Viewer::new(Viewport::new(160, 96, 1.0));
        viewer.start(Duration::ZERO, Some(loader::spawn("missing/model.glb")));
        let mut renderer = RecordingRenderer::default();

        let deadline = Instant::now() + Duration::from_secs(5);
        while viewer.is_loading_model() {
            assert!(Instant::now() < deadline, "loader never reported");
            viewer.frame(ms(10), &mut renderer).unwrap();
            thread::sleep(ms(5));
        }

        assert!(viewer.scene().models.is_empty());
        viewer.frame(ms(7500), &mut renderer).unwrap();
        assert_eq!(viewer.phase(), Phase::Interactive);
        assert!(renderer.model_counts.iter().all(|&n| n == 0));
    }

    #[test]
    fn loaded_model_is_inserted_once_while_intro_runs() {
        let dir = std::env::temp_dir().join(format!("flyby3d-viewer-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("triangle.gltf");
        std::fs::write(&path, TRIANGLE_GLTF).unwrap();

        let intro = IntroAnimationSpec {
            delay: Duration::ZERO,
            duration: ms(200),
            ..IntroAnimationSpec::default()
        };
        let mut viewer = Viewer::new(Viewport::new(160, 96, 1.0)).with_intro(intro);
        viewer.start(Duration::ZERO, Some(loader::spawn(&path)));
        let mut renderer = RecordingRenderer::default();

        let deadline = Instant::now() + Duration::from_secs(5);
        while viewer.is_loading_model() {
            assert!(Instant::now() < deadline, "loader never reported");
            viewer.frame(ms(10), &mut renderer).unwrap();
            thread::sleep(ms(5));
        }
        assert_eq!(viewer.scene().models.len(), 1);
        assert_eq!(viewer.scene().models[0].name, "triangle");
        assert_eq!(viewer.scene().triangle_count(), 1);
        assert_eq!(viewer.phase(), Phase::IntroPlaying);

        for t in [100, 200, 216, 232] {
            viewer.frame(ms(t), &mut renderer).unwrap();
        }
        assert_eq!(viewer.phase(), Phase::Interactive);
        assert!(viewer.camera().position().distance(intro.end) < 1e-3);
        assert_eq!(viewer.scene().models.len(), 1);
        assert_eq!(renderer.model_counts.last(), Some(&1));
        assert!(renderer.model_counts.windows(2).all(|w| w[1] >= w[0]));

        std::fs::remove_dir_all(&dir).ok();
    }

    // One triangle (0,0,0) (1,0,0) (0,1,0), no indices, no normals.
    const TRIANGLE_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "nodes": [0] } ],
        "nodes": [ { "mesh": 0 } ],
        "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0 } } ] } ],
        "buffers": [ {
            "byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
        } ],
        "bufferViews": [ { "buffer": 0, "byteLength": 36 } ],
        "accessors": [ {
            "bufferView": 0,
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": [0.0, 0.0, 0.0],
            "max": [1.0, 1.0, 0.0]
        } ]
    }"#;
}
