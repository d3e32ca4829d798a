//! Model loader adapter.
//!
//! Decodes one glTF/GLB asset on a background thread and hands the flattened
//! [`ModelHandle`] back through a channel. The render loop polls the channel once
//! per frame, so the scene is only ever touched from the control thread.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use glam::{Mat3, Mat4, Vec3};

use crate::color::Rgb;
use crate::error::AssetLoadError;
use crate::state::{ModelHandle, Triangle};

/// Default asset location.
pub const DEFAULT_MODEL_PATH: &str = "models/gltf/sample-maisn.glb";

/// Starts fetching `path` in the background.
pub fn spawn(path: impl Into<PathBuf>) -> PendingModel {
    let path = path.into();
    let (tx, rx) = mpsc::channel();
    let thread_path = path.clone();
    log::info!("Loading model {}", path.display());
    let spawned = thread::Builder::new()
        .name("model-loader".to_string())
        .spawn(move || {
            let _ = tx.send(load_model(&thread_path));
        });
    if let Err(err) = spawned {
        log::error!("Failed to start model loader thread: {err}");
    }
    PendingModel {
        path,
        rx: Some(rx),
    }
}

/// A model fetch in flight; yields its result exactly once.
#[derive(Debug)]
pub struct PendingModel {
    path: PathBuf,
    rx: Option<Receiver<Result<ModelHandle, AssetLoadError>>>,
}

impl PendingModel {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True until the result has been taken.
    pub fn is_pending(&self) -> bool {
        self.rx.is_some()
    }

    /// Non-blocking check for the result.
    pub fn poll(&mut self) -> Option<Result<ModelHandle, AssetLoadError>> {
        let rx = self.rx.as_ref()?;
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                Err(AssetLoadError::Disconnected(self.path.clone()))
            }
        };
        self.rx = None;
        Some(result)
    }
}

/// Decodes `path` and flattens every mesh of the default scene to world space.
pub fn load_model(path: &Path) -> Result<ModelHandle, AssetLoadError> {
    let (document, buffers, _images) =
        gltf::import(path).map_err(|source| AssetLoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    let mut triangles = Vec::new();
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next());
    if let Some(scene) = scene {
        for node in scene.nodes() {
            process_node(path, &node, Mat4::IDENTITY, &buffers, &mut triangles)?;
        }
    }

    if triangles.is_empty() {
        return Err(AssetLoadError::Empty(path.to_path_buf()));
    }

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());
    Ok(ModelHandle { name, triangles })
}

fn process_node(
    path: &Path,
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<Triangle>,
) -> Result<(), AssetLoadError> {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
            let positions: Vec<Vec3> = reader
                .read_positions()
                .ok_or_else(|| AssetLoadError::MissingPositions {
                    path: path.to_path_buf(),
                    mesh: mesh.name().unwrap_or("unnamed").to_string(),
                })?
                .map(|p| world.transform_point3(Vec3::from(p)))
                .collect();
            let normals: Option<Vec<Vec3>> = reader.read_normals().map(|iter| {
                iter.map(|n| (normal_matrix * Vec3::from(n)).normalize_or_zero())
                    .collect()
            });
            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            let base = primitive
                .material()
                .pbr_metallic_roughness()
                .base_color_factor();
            let color = Rgb::from_vec3(Vec3::new(base[0], base[1], base[2]));

            for tri in indices.chunks_exact(3) {
                let idx = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
                if idx.iter().any(|&i| i >= positions.len()) {
                    continue;
                }
                let p = idx.map(|i| positions[i]);
                let face = (p[1] - p[0]).cross(p[2] - p[0]).normalize_or_zero();
                let n = match &normals {
                    Some(normals) if idx.iter().all(|&i| i < normals.len()) => {
                        idx.map(|i| normals[i])
                    }
                    _ => [face; 3],
                };
                out.push(Triangle {
                    positions: p,
                    normals: n,
                    color,
                });
            }
        }
    }

    for child in node.children() {
        process_node(path, &child, world, buffers, out)?;
    }
    Ok(())
}
