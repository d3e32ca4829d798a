//! Scene lifecycle: `Loading -> IntroPlaying -> Interactive`.

use std::time::Duration;

use crate::camera::{CameraMode, CameraRig};
use crate::intro::{IntroAnimationSpec, IntroAnimator, IntroStep};
use crate::orbit::{OrbitControls, OrbitLimits};

/// Lifecycle state. The intro animator lives only inside `IntroPlaying`.
#[derive(Debug, Default)]
pub enum Lifecycle {
    #[default]
    Loading,
    IntroPlaying(IntroAnimator),
    Interactive,
}

/// Payload-free view of [`Lifecycle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    IntroPlaying,
    Interactive,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::Loading => "loading",
            Phase::IntroPlaying => "intro",
            Phase::Interactive => "interactive",
        })
    }
}

impl Lifecycle {
    pub fn phase(&self) -> Phase {
        match self {
            Lifecycle::Loading => Phase::Loading,
            Lifecycle::IntroPlaying(_) => Phase::IntroPlaying,
            Lifecycle::Interactive => Phase::Interactive,
        }
    }

    /// Leaves `Loading` and starts the fly-in at session time `now`.
    ///
    /// Has no effect in any other state; the intro plays once per session.
    pub fn begin_intro(
        &mut self,
        spec: IntroAnimationSpec,
        now: Duration,
        camera: &mut CameraRig,
        orbit: &mut OrbitControls,
    ) {
        if !matches!(self, Lifecycle::Loading) {
            return;
        }
        orbit.set_enabled(false);
        camera.set_mode(CameraMode::Scripted);
        let animator = IntroAnimator::new(spec, now);
        camera.set_position(animator.spec().start);
        *self = Lifecycle::IntroPlaying(animator);
        log::info!("Intro animation started");
    }

    /// Advances the intro clock; hands control to the orbit controls on completion.
    pub fn advance(&mut self, now: Duration, camera: &mut CameraRig, orbit: &mut OrbitControls) {
        let Lifecycle::IntroPlaying(animator) = self else {
            return;
        };
        match animator.step(now) {
            IntroStep::Running(position) => camera.set_position(position),
            IntroStep::Finished(position) => {
                camera.set_position(position);
                camera.set_mode(CameraMode::Interactive);
                orbit.install_limits(OrbitLimits::interactive());
                orbit.set_enabled(true);
                *self = Lifecycle::Interactive;
                log::info!("Intro finished; orbit controls enabled");
            }
        }
    }
}
