//! Fixed-rate render loop with explicit start and stop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::Result;

/// Whether the loop keeps going after handling input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Work performed by the render loop.
pub trait FrameTask {
    /// Handles pending input, waiting at most `timeout` for the first event.
    fn pump_events(&mut self, timeout: Duration) -> Result<LoopControl>;

    /// Renders one frame at `elapsed` since the loop started.
    fn frame(&mut self, elapsed: Duration) -> Result<()>;
}

/// Cloneable switch that ends a running [`RenderLoop`] after the current tick.
#[derive(Clone, Debug)]
pub struct StopHandle {
    running: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Ticks a [`FrameTask`] once per refresh interval.
///
/// Input is drained between ticks. A tick that runs late is not followed by
/// catch-up ticks; the next one is scheduled one interval after it.
#[derive(Debug)]
pub struct RenderLoop {
    frame_interval: Duration,
    running: Arc<AtomicBool>,
    frames: u64,
}

impl RenderLoop {
    pub fn new(target_fps: u32) -> Self {
        RenderLoop {
            frame_interval: Duration::from_secs(1) / target_fps.max(1),
            running: Arc::new(AtomicBool::new(false)),
            frames: 0,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Frames produced since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Handle that can stop the loop from inside a task or from another thread.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            running: Arc::clone(&self.running),
        }
    }

    pub fn start(&mut self) {
        self.running.store(true, Ordering::Release);
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
    }

    /// Starts the loop and runs until it is stopped, the task returns
    /// [`LoopControl::Stop`], or an error occurs.
    pub fn run<T: FrameTask + ?Sized>(&mut self, task: &mut T) -> Result<()> {
        self.start();
        let origin = Instant::now();
        let result = self.drive(task, origin);
        self.stop();
        log::info!("Render loop stopped after {} frames", self.frames);
        result
    }

    fn drive<T: FrameTask + ?Sized>(&mut self, task: &mut T, origin: Instant) -> Result<()> {
        let mut next_frame = origin;
        while self.is_running() {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if task.pump_events(timeout)? == LoopControl::Stop {
                return Ok(());
            }
            if !self.is_running() {
                return Ok(());
            }

            let now = Instant::now();
            if now < next_frame {
                continue;
            }
            task.frame(now - origin)?;
            self.frames += 1;
            // Late ticks push the schedule back instead of bunching up
            next_frame = (next_frame + self.frame_interval).max(now + self.frame_interval);
        }
        Ok(())
    }
}
