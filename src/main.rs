use std::fs::File;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use flyby3d::config::{Args, ViewerConfig};
use flyby3d::loader;
use flyby3d::render_loop::RenderLoop;
use flyby3d::renderer::SoftwareRenderer;
use flyby3d::terminal::{surface_size, terminal_size, TerminalSurface};
use flyby3d::viewport::Viewport;
use flyby3d::widget::ViewerApp;
use flyby3d::Viewer;

/// Holds log output while the viewer owns the screen
#[derive(Clone, Default)]
struct DeferredLog {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl DeferredLog {
    /// Writes everything captured so far to stderr
    fn flush_to_stderr(&self) -> io::Result<()> {
        let buf = self
            .buf
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?;
        io::stderr().write_all(&buf)
    }
}

impl Write for DeferredLog {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sends logs to `--log-file`, or buffers them until the terminal is restored
fn init_logging(config: &ViewerConfig) -> anyhow::Result<Option<DeferredLog>> {
    let default_filter = if config.log_file.is_some() {
        "info"
    } else {
        "error"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    let deferred = match &config.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            None
        }
        None => {
            let deferred = DeferredLog::default();
            builder.target(env_logger::Target::Pipe(Box::new(deferred.clone())));
            Some(deferred)
        }
    };
    builder.init();
    Ok(deferred)
}

/// Main function
fn main() -> anyhow::Result<()> {
    let config = ViewerConfig::from(Args::parse());
    let deferred = init_logging(&config)?;

    let result = run(&config);

    // The surface is dropped by now, so buffered logs land on the normal screen
    if let Some(deferred) = deferred {
        deferred
            .flush_to_stderr()
            .context("Failed to write buffered logs")?;
    }
    result
}

fn run(config: &ViewerConfig) -> anyhow::Result<()> {
    let (cols, rows) = terminal_size().context("Failed to query terminal size")?;
    let (width, height) = surface_size(cols, rows);
    let viewport = Viewport::new(width, height, config.pixel_ratio);

    let mut viewer = Viewer::new(viewport);
    let renderer = SoftwareRenderer::new(viewport);
    let pending = loader::spawn(&config.model_path);
    viewer.start(Duration::ZERO, Some(pending));

    let surface = TerminalSurface::enter().context("Failed to set up terminal")?;
    let mut app = ViewerApp::new(viewer, renderer, surface, (cols, rows), config.pixel_ratio);
    RenderLoop::new(config.target_fps)
        .run(&mut app)
        .context("Render loop failed")?;

    Ok(())
}
