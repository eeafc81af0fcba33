//! Fire-and-forget speech output through a system TTS binary.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::sync::mpsc;

/// TTS binaries probed on PATH, in preference order.
const SYNTH_BINARIES: [&str; 4] = ["say", "espeak-ng", "espeak", "spd-say"];

/// Cheap clonable handle to the speech worker. `speak` never blocks and
/// never fails; when no synthesizer is available the text is dropped.
#[derive(Clone)]
pub struct SpeechHandle {
    inner: HandleInner,
}

#[derive(Clone)]
enum HandleInner {
    Engine(mpsc::UnboundedSender<String>),
    Disabled,
    #[cfg(test)]
    Capture(std::sync::Arc<std::sync::Mutex<Vec<String>>>),
}

impl SpeechHandle {
    pub fn disabled() -> Self {
        Self {
            inner: HandleInner::Disabled,
        }
    }

    pub fn available(&self) -> bool {
        !matches!(self.inner, HandleInner::Disabled)
    }

    pub fn speak(&self, text: impl Into<String>) {
        let text = text.into();
        match &self.inner {
            HandleInner::Engine(tx) => {
                let _ = tx.send(text);
            }
            HandleInner::Disabled => {
                log::debug!("speech output unavailable, dropping: {}", text);
            }
            #[cfg(test)]
            HandleInner::Capture(spoken) => {
                spoken.lock().expect("capture lock poisoned").push(text);
            }
        }
    }

    /// Handle that records spoken text instead of synthesizing it.
    #[cfg(test)]
    pub fn capture() -> (Self, std::sync::Arc<std::sync::Mutex<Vec<String>>>) {
        let spoken = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let handle = Self {
            inner: HandleInner::Capture(spoken.clone()),
        };
        (handle, spoken)
    }
}

pub struct SpeechEngine;

impl SpeechEngine {
    /// Discover a synthesizer on PATH and spawn the worker thread. Returns
    /// a disabled handle when no binary is installed.
    pub fn spawn(preferred_voice: Option<String>) -> SpeechHandle {
        let Some((name, path)) = find_synth_binary() else {
            log::info!("no speech synthesizer found on PATH, voice output disabled");
            return SpeechHandle::disabled();
        };
        log::info!("speech output via {:?}", path);

        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || worker(name, path, preferred_voice, rx));

        SpeechHandle {
            inner: HandleInner::Engine(tx),
        }
    }
}

fn find_synth_binary() -> Option<(String, PathBuf)> {
    SYNTH_BINARIES
        .iter()
        .find_map(|name| which::which(name).ok().map(|path| (name.to_string(), path)))
}

fn worker(
    name: String,
    path: PathBuf,
    voice: Option<String>,
    mut rx: mpsc::UnboundedReceiver<String>,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(err) => {
            log::error!("speech worker runtime failed: {}", err);
            return;
        }
    };

    runtime.block_on(async move {
        while let Some(text) = rx.recv().await {
            let mut cmd = tokio::process::Command::new(&path);
            // `say` and espeak take a voice flag; spd-say is left on defaults.
            if let Some(ref v) = voice {
                if matches!(name.as_str(), "say" | "espeak" | "espeak-ng") {
                    cmd.arg("-v").arg(v);
                }
            }
            cmd.arg(&text).stdout(Stdio::null()).stderr(Stdio::null());

            // Fire and forget: the utterance plays while the UI keeps running.
            match cmd.spawn() {
                Ok(mut child) => {
                    tokio::spawn(async move {
                        let _ = child.wait().await;
                    });
                }
                Err(err) => log::warn!("failed to spawn synthesizer: {}", err),
            }
        }
    });
}
