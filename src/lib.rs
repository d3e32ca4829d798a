//! Terminal 3D model viewer.
//!
//! A [`viewer::Viewer`] owns one scene: it fetches a model in the background,
//! flies the camera in, then hands control to orbit controls. A light panel and a
//! dark-mode switch edit the scene lighting. Everything except [`terminal`] and
//! [`widget`] runs without a terminal, so the whole lifecycle can be driven from tests.

pub mod camera;
pub mod color;
pub mod config;
pub mod dark_mode;
pub mod error;
pub mod graphics;
pub mod intro;
pub mod lifecycle;
pub mod loader;
pub mod math;
pub mod orbit;
pub mod params;
pub mod render_loop;
pub mod renderer;
pub mod state;
pub mod terminal;
pub mod vertex;
pub mod viewer;
pub mod viewport;
pub mod widget;

pub use error::{AssetLoadError, Result, ViewerError};
pub use viewer::{PointerInput, Viewer};
