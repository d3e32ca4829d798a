//! One-shot camera fly-in played before orbit control is handed over.

use glam::Vec3;
use std::time::Duration;

/// Easing curve mapping `0..=1` onto `0..=1`.
pub type Easing = fn(f32) -> f32;

/// Quartic ease-in-out.
pub fn quartic_in_out(t: f32) -> f32 {
    let k = t * 2.0;
    if k < 1.0 {
        0.5 * k * k * k * k
    } else {
        let k = k - 2.0;
        -0.5 * (k * k * k * k - 2.0)
    }
}

/// Fixed parameters of the fly-in.
#[derive(Clone, Copy, Debug)]
pub struct IntroAnimationSpec {
    pub start: Vec3,
    pub end: Vec3,
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
}

impl Default for IntroAnimationSpec {
    fn default() -> Self {
        IntroAnimationSpec {
            start: Vec3::new(26.0, 4.0, -35.0),
            end: Vec3::new(16.0, 50.0, -0.1),
            duration: Duration::from_millis(6500),
            delay: Duration::from_millis(1000),
            easing: quartic_in_out,
        }
    }
}

impl IntroAnimationSpec {
    /// Linear progress at `elapsed` since the animation started, clamped to `0..=1`.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let active = elapsed.saturating_sub(self.delay);
        if self.duration.is_zero() {
            return if elapsed >= self.delay { 1.0 } else { 0.0 };
        }
        (active.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0) as f32
    }

    /// Camera position at `elapsed`; exactly `end` once progress reaches 1.
    pub fn position_at(&self, elapsed: Duration) -> Vec3 {
        let t = self.progress(elapsed);
        if t >= 1.0 {
            self.end
        } else {
            self.start.lerp(self.end, (self.easing)(t))
        }
    }
}

/// Where the fly-in is after a clock step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IntroStep {
    Running(Vec3),
    Finished(Vec3),
}

/// Running instance of an [`IntroAnimationSpec`].
#[derive(Debug)]
pub struct IntroAnimator {
    spec: IntroAnimationSpec,
    started_at: Duration,
}

impl IntroAnimator {
    pub fn new(spec: IntroAnimationSpec, started_at: Duration) -> Self {
        IntroAnimator { spec, started_at }
    }

    pub fn spec(&self) -> &IntroAnimationSpec {
        &self.spec
    }

    /// Advances the animation clock to `now` (session time).
    pub fn step(&self, now: Duration) -> IntroStep {
        let elapsed = now.saturating_sub(self.started_at);
        let position = self.spec.position_at(elapsed);
        if self.spec.progress(elapsed) >= 1.0 {
            IntroStep::Finished(position)
        } else {
            IntroStep::Running(position)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert_eq!(quartic_in_out(0.0), 0.0);
        assert_eq!(quartic_in_out(1.0), 1.0);
        assert!((quartic_in_out(0.5) - 0.5).abs() < 1e-6);
        assert!((quartic_in_out(0.25) - 0.5 * 0.5f32.powi(4)).abs() < 1e-6);
    }

    #[test]
    fn easing_is_monotonic() {
        let mut last = 0.0;
        for i in 0..=100 {
            let v = quartic_in_out(i as f32 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn holds_start_during_delay() {
        let spec = IntroAnimationSpec::default();
        assert_eq!(spec.position_at(ms(0)), spec.start);
        assert_eq!(spec.position_at(ms(999)), spec.start);
        assert_eq!(spec.progress(ms(1000)), 0.0);
    }

    #[test]
    fn follows_eased_lerp() {
        let spec = IntroAnimationSpec::default();
        for t_ms in [1500u64, 3000, 4250, 6000, 7400] {
            let t = ((t_ms as f32 - 1000.0) / 6500.0).clamp(0.0, 1.0);
            let expected = spec.start.lerp(spec.end, quartic_in_out(t));
            assert!(spec.position_at(ms(t_ms)).distance(expected) < 1e-4);
        }
    }

    #[test]
    fn finishes_exactly_at_end() {
        let animator = IntroAnimator::new(IntroAnimationSpec::default(), ms(250));
        assert!(matches!(animator.step(ms(250 + 7499)), IntroStep::Running(_)));
        assert_eq!(
            animator.step(ms(250 + 7500)),
            IntroStep::Finished(Vec3::new(16.0, 50.0, -0.1))
        );
    }

    #[test]
    fn zero_duration_jumps_after_delay() {
        let spec = IntroAnimationSpec {
            duration: Duration::ZERO,
            ..IntroAnimationSpec::default()
        };
        assert_eq!(spec.position_at(ms(500)), spec.start);
        assert_eq!(spec.position_at(ms(1000)), spec.end);
    }
}
