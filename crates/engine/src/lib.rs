use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod app;
pub mod audio;
mod asset_keys;

pub use app::{
    run_app, stage_to_screen_px, AppError, ControlLine, FrameView, Game, GameKey, HudView,
    KeyEvent, LoopConfig, MoveDirection, ObjectiveLine, Renderer, SpriteInstance, StagePlacement,
    StageView, Viewport, STAGE_SPAN,
};
pub use audio::{build_cue_player, CuePlayer, RodioCuePlayer, SilentCuePlayer, AUDIO_ENV_VAR};

pub const ROOT_ENV_VAR: &str = "BACKYARD_ROOT";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub root: PathBuf,
    pub base_assets_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to resolve current executable path: {0}")]
    CurrentExe(#[source] std::io::Error),
    #[error("current executable path has no parent directory: {0}")]
    ExeHasNoParent(PathBuf),
    #[error("failed to resolve current working directory: {0}")]
    CurrentDir(#[source] std::io::Error),
    #[error(
        "BACKYARD_ROOT is set but does not point to a valid asset root: {path}\n\
A valid root must contain an assets/base directory."
    )]
    InvalidEnvRoot { path: PathBuf },
    #[error(
        "Could not detect the asset root by walking upward from the executable directory \
({exe_dir}) or the working directory ({work_dir}).\n\
Expected a directory containing assets/base.\n\
Set {env_var} explicitly, for example:\n\
PowerShell: $env:{env_var}=\"C:\\path\\to\\backyard\"\n\
Bash/zsh: export {env_var}=\"/path/to/backyard\""
    )]
    RootNotFound {
        exe_dir: PathBuf,
        work_dir: PathBuf,
        env_var: &'static str,
    },
}

pub fn resolve_app_paths() -> Result<AppPaths, StartupError> {
    let root = resolve_root()?;
    let base_assets_dir = root.join("assets").join("base");

    Ok(AppPaths {
        root,
        base_assets_dir,
    })
}

fn resolve_root() -> Result<PathBuf, StartupError> {
    match env::var(ROOT_ENV_VAR) {
        Ok(value) => {
            let raw = PathBuf::from(value);
            let normalized = normalize_path(&raw);
            if is_asset_root(&normalized) {
                Ok(normalized)
            } else {
                Err(StartupError::InvalidEnvRoot { path: normalized })
            }
        }
        Err(env::VarError::NotPresent) => {
            let exe = env::current_exe().map_err(StartupError::CurrentExe)?;
            let exe_dir = exe
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| StartupError::ExeHasNoParent(exe.clone()))?;
            let work_dir = env::current_dir().map_err(StartupError::CurrentDir)?;

            for candidate in exe_dir.ancestors().chain(work_dir.ancestors()) {
                if is_asset_root(candidate) {
                    return Ok(normalize_path(candidate));
                }
            }

            Err(StartupError::RootNotFound {
                exe_dir: normalize_path(&exe_dir),
                work_dir: normalize_path(&work_dir),
                env_var: ROOT_ENV_VAR,
            })
        }
        Err(source) => Err(StartupError::EnvVar {
            var: ROOT_ENV_VAR,
            source,
        }),
    }
}

fn is_asset_root(path: &Path) -> bool {
    path.join("assets").join("base").is_dir()
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
