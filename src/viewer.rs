//! The viewer session: one instance per viewport, owning every store.

use std::time::Duration;

use crate::camera::CameraRig;
use crate::dark_mode::DarkModeToggle;
use crate::error::Result;
use crate::intro::IntroAnimationSpec;
use crate::lifecycle::{Lifecycle, Phase};
use crate::loader::PendingModel;
use crate::orbit::OrbitControls;
use crate::params::{LightParams, ParamValue, ParameterPanel};
use crate::renderer::Renderer;
use crate::state::SceneState;
use crate::viewport::Viewport;

/// Pointer events in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    /// Primary-button drag by `(dx, dy)`.
    Drag { dx: f32, dy: f32 },
    /// Wheel steps; positive moves towards the target.
    Scroll { steps: f32 },
    /// Plain movement; only used for diagnostics.
    Move { x: f32, y: f32 },
}

/// Scene, camera, lifecycle, and panel state for one viewport.
#[derive(Debug)]
pub struct Viewer {
    scene: SceneState,
    camera: CameraRig,
    orbit: OrbitControls,
    lifecycle: Lifecycle,
    intro: IntroAnimationSpec,
    panel: ParameterPanel,
    dark_mode: DarkModeToggle,
    model: Option<PendingModel>,
    viewport: Viewport,
}

impl Viewer {
    pub fn new(viewport: Viewport) -> Self {
        let mut scene = SceneState::default();
        let mut panel = ParameterPanel::new(LightParams::from_scene(&scene));
        let dark_mode = DarkModeToggle::default();
        dark_mode.sync(&mut panel, &mut scene);
        Viewer {
            scene,
            camera: CameraRig::new(viewport.aspect()),
            orbit: OrbitControls::new(),
            lifecycle: Lifecycle::default(),
            intro: IntroAnimationSpec::default(),
            panel,
            dark_mode,
            model: None,
            viewport,
        }
    }

    /// Replaces the fly-in used by [`Viewer::start`].
    pub fn with_intro(mut self, intro: IntroAnimationSpec) -> Self {
        self.intro = intro;
        self
    }

    /// Begins the session at time `now`: the model fetch runs alongside the intro.
    pub fn start(&mut self, now: Duration, model: Option<PendingModel>) {
        if self.lifecycle.phase() != Phase::Loading {
            log::warn!("Viewer already started");
            return;
        }
        self.model = model;
        self.lifecycle
            .begin_intro(self.intro, now, &mut self.camera, &mut self.orbit);
    }

    /// One render-loop tick at session time `now`.
    pub fn frame<R: Renderer + ?Sized>(&mut self, now: Duration, renderer: &mut R) -> Result<()> {
        self.poll_model();
        self.lifecycle
            .advance(now, &mut self.camera, &mut self.orbit);
        if self.lifecycle.phase() == Phase::Interactive {
            self.orbit.update(&mut self.camera);
        }
        renderer.render(&self.scene, &self.camera)
    }

    fn poll_model(&mut self) {
        let Some(pending) = self.model.as_mut() else {
            return;
        };
        match pending.poll() {
            None => {}
            Some(Ok(model)) => {
                self.scene.insert_model(model);
                self.model = None;
            }
            Some(Err(err)) => {
                log::error!("Model load failed, continuing without it: {err}");
                self.model = None;
            }
        }
    }

    pub fn pointer(&mut self, input: PointerInput) {
        match input {
            PointerInput::Drag { dx, dy } => {
                if self.lifecycle.phase() == Phase::Interactive {
                    self.orbit.rotate(dx, dy, self.viewport.height as f32);
                }
            }
            PointerInput::Scroll { steps } => {
                if self.lifecycle.phase() == Phase::Interactive {
                    self.orbit.dolly(steps);
                }
            }
            PointerInput::Move { x, y } => {
                let p = self.camera.position();
                log::debug!(
                    "pointer ({x:.0}, {y:.0}) camera ({:.2}, {:.2}, {:.2})",
                    p.x,
                    p.y,
                    p.z
                );
            }
        }
    }

    /// Applies a new surface size before the next frame is drawn.
    pub fn resize<R: Renderer + ?Sized>(
        &mut self,
        width: u32,
        height: u32,
        device_pixel_ratio: f32,
        renderer: &mut R,
    ) {
        self.viewport = Viewport::new(width, height, device_pixel_ratio);
        self.camera.set_aspect(self.viewport.aspect());
        renderer.resize(&self.viewport);
        log::debug!(
            "Resized to {width}x{height} @ {:.1}x",
            self.viewport.pixel_ratio
        );
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode.toggle(&mut self.panel, &mut self.scene);
    }

    /// Panel edit; rejected writes leave every value untouched.
    pub fn set_parameter(&mut self, key: &str, value: ParamValue) -> Result<()> {
        self.panel.set(key, value, &mut self.scene)
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    pub fn panel(&self) -> &ParameterPanel {
        &self.panel
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode.is_dark()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// True while the model fetch has not reported back.
    pub fn is_loading_model(&self) -> bool {
        self.model.as_ref().is_some_and(PendingModel::is_pending)
    }
}
