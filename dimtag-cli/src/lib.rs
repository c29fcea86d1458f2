/// Command-line host for the dimtag measurement core
///
/// Stands in for the viewer: STL files become fragments, a configured camera
/// provides the projection, and the results are reported instead of drawn.
use std::path::{Path, PathBuf};

use anyhow::Context;
use dimtag_core::{
    compute_tag_layout, element_endpoints, stl, FragmentGeometry, FragmentId, FragmentStore,
    MeasureError, Transform, VertexSource,
};
use tracing::{info, warn};

pub mod config;
pub mod report;

pub use config::{CameraConfig, Config, ConfigError};
pub use report::{EndpointsReport, PackReport, Report};

/// Initialize logging on stderr, honouring `RUST_LOG`
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}

/// Load each STL file as one fragment placed at the world origin
pub fn load_fragments(files: &[PathBuf]) -> anyhow::Result<FragmentStore> {
    let mut store = FragmentStore::new();
    for path in files {
        let geometry = load_stl(path)?;
        info!(path = %path.display(), vertices = geometry.vertex_count(), "loaded fragment");
        store.insert(geometry, Transform::translation_matrix(0.0, 0.0, 0.0));
    }
    Ok(store)
}

fn load_stl(path: &Path) -> anyhow::Result<FragmentGeometry> {
    let data = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    stl::parse_stl(&data).with_context(|| format!("failed to parse {}", path.display()))
}

/// Stand-in element used when no file is given
pub fn demo_store() -> FragmentStore {
    let mut store = FragmentStore::new();
    store.insert(
        FragmentGeometry::cube(2.0),
        Transform::translation_matrix(0.0, 0.0, 0.0),
    );
    store
}

/// Measure every fragment in `store` as a single element
pub fn measure(store: &FragmentStore, config: &Config) -> anyhow::Result<Report> {
    let fragments: Vec<FragmentId> = store.ids().collect();
    let triangles: usize = fragments
        .iter()
        .map(|id| store.world_vertices(*id).len() / 3)
        .sum();

    let endpoints = match element_endpoints(&fragments, store) {
        Ok(ends) => Some(ends),
        Err(MeasureError::InsufficientData) => {
            warn!("element has no usable vertices; skipping dimension tag");
            None
        }
        Err(e) => return Err(e).context("failed to extract element ends"),
    };

    let tag = match &endpoints {
        Some((one, two)) => {
            let viewport = config.camera.viewport();
            Some(compute_tag_layout(one, two, &viewport).context("failed to lay out dimension tag")?)
        }
        None => None,
    };

    let plan = config
        .pack
        .plan_for(&fragments, store)
        .context("failed to plan pack")?;

    Ok(Report {
        fragments: fragments.len(),
        triangles,
        endpoints: endpoints.map(|(one, two)| EndpointsReport {
            end_one: [one.x, one.y, one.z],
            end_two: [two.x, two.y, two.z],
            length: nalgebra::distance(&one, &two),
        }),
        tag,
        pack: PackReport {
            quantity: config.pack.quantity,
            axis: plan.axis,
            width: plan.width,
            buffer: config.pack.buffer,
            offsets: plan.offsets,
        },
    })
}
