use engine::{resolve_app_paths, LoopConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::catalog::load_scene_catalog;
use super::gameplay::{cue_preload_list, GameSession};

const WINDOW_TITLE: &str = "Backyard";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) session: GameSession,
}

/// Builds everything main needs: logging first, then the catalog, then the
/// session and window config.
pub(crate) fn build_app() -> Result<AppWiring, String> {
    init_tracing();
    info!("=== Backyard Startup ===");

    let app_paths =
        resolve_app_paths().map_err(|error| format!("resolve app paths: {error}"))?;
    let catalog_path = app_paths.base_assets_dir.join("scenes").join("scenes.json");
    let catalog = load_scene_catalog(&catalog_path)?;
    info!(
        path = %catalog_path.display(),
        scenes = catalog.scene_count(),
        initial_scene = %catalog.initial_scene(),
        "catalog_loaded"
    );

    let config = LoopConfig {
        window_title: WINDOW_TITLE.to_string(),
        preload_cues: cue_preload_list(),
        ..LoopConfig::default()
    };

    Ok(AppWiring {
        config,
        session: GameSession::new(catalog),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
