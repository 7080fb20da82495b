use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, info, warn};

use crate::asset_keys::validate_asset_key;

pub const AUDIO_ENV_VAR: &str = "BACKYARD_DISABLE_AUDIO";

/// Fire-and-forget playback of short cues. Playback problems are logged and
/// swallowed; a cue can never affect game state.
pub trait CuePlayer {
    fn play(&mut self, cue: &str);
}

/// Selected when audio is disabled or no output device can be opened.
pub struct SilentCuePlayer;

impl CuePlayer for SilentCuePlayer {
    fn play(&mut self, _cue: &str) {}
}

pub struct RodioCuePlayer {
    // Dropping the stream stops all playback, so it is held for the
    // player's lifetime even though only the handle is used.
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    audio_dir: PathBuf,
    cue_bytes: HashMap<String, Arc<[u8]>>,
    warned_cues: HashSet<String>,
}

impl RodioCuePlayer {
    pub fn new(audio_dir: PathBuf) -> Result<Self, rodio::StreamError> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            stream_handle,
            audio_dir,
            cue_bytes: HashMap::new(),
            warned_cues: HashSet::new(),
        })
    }

    /// Reads cue files up front so the first trigger does not pay the disk
    /// cost. Missing files warn once here instead of on first play.
    pub fn preload(&mut self, cues: &[String]) {
        for cue in cues {
            let _ = self.resolve_cue_bytes(cue);
        }
    }

    fn resolve_cue_bytes(&mut self, cue: &str) -> Option<Arc<[u8]>> {
        if let Some(bytes) = self.cue_bytes.get(cue) {
            return Some(Arc::clone(bytes));
        }

        let path = match resolve_cue_path(&self.audio_dir, cue) {
            Ok(path) => path,
            Err(reason) => {
                self.warn_cue_once(cue, None, &reason);
                return None;
            }
        };
        match fs::read(&path) {
            Ok(bytes) => {
                let bytes: Arc<[u8]> = Arc::from(bytes.into_boxed_slice());
                self.cue_bytes.insert(cue.to_string(), Arc::clone(&bytes));
                debug!(cue, path = %path.display(), byte_len = bytes.len(), "audio_cue_loaded");
                Some(bytes)
            }
            Err(error) => {
                self.warn_cue_once(cue, Some(&path), &error.to_string());
                None
            }
        }
    }

    fn warn_cue_once(&mut self, cue: &str, path: Option<&Path>, reason: &str) {
        if !self.warned_cues.insert(cue.to_string()) {
            return;
        }
        match path {
            Some(path) => {
                warn!(cue, path = %path.display(), reason, "audio_cue_unavailable")
            }
            None => warn!(cue, reason, "audio_cue_unavailable"),
        }
    }
}

impl CuePlayer for RodioCuePlayer {
    fn play(&mut self, cue: &str) {
        let Some(bytes) = self.resolve_cue_bytes(cue) else {
            return;
        };
        // A fresh decoder per trigger restarts the cue from the top.
        let source = match Decoder::new(Cursor::new(bytes)) {
            Ok(source) => source,
            Err(error) => {
                self.warn_cue_once(cue, None, &error.to_string());
                return;
            }
        };
        let sink = match Sink::try_new(&self.stream_handle) {
            Ok(sink) => sink,
            Err(error) => {
                self.warn_cue_once(cue, None, &error.to_string());
                return;
            }
        };
        sink.append(source.convert_samples::<f32>());
        sink.detach();
    }
}

pub fn build_cue_player(
    audio_dir: PathBuf,
    disable_audio: bool,
    preload_cues: &[String],
) -> Box<dyn CuePlayer> {
    if disable_audio || audio_disabled_by_env() {
        info!("audio_disabled");
        return Box::new(SilentCuePlayer);
    }
    match RodioCuePlayer::new(audio_dir) {
        Ok(mut player) => {
            player.preload(preload_cues);
            Box::new(player)
        }
        Err(error) => {
            warn!(error = %error, "audio_output_unavailable_using_silent_player");
            Box::new(SilentCuePlayer)
        }
    }
}

fn audio_disabled_by_env() -> bool {
    match env::var(AUDIO_ENV_VAR) {
        Ok(value) => parse_disable_flag(&value),
        Err(_) => false,
    }
}

fn parse_disable_flag(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "TRUE" | "True")
}

fn resolve_cue_path(audio_dir: &Path, cue: &str) -> Result<PathBuf, String> {
    validate_asset_key(cue).map_err(|error| error.to_string())?;
    Ok(audio_dir.join(format!("{cue}.mp3")))
}
