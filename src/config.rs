use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub voice: VoiceConfig,
}

#[derive(Debug, Deserialize)]
pub struct VoiceConfig {
    /// Preferred synthesis voice, passed to the TTS binary when it takes one.
    pub synth_voice: Option<String>,
    /// Speech input backend: "transcript" (default) or "off".
    #[serde(default = "default_input")]
    pub input: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            synth_voice: None,
            input: default_input(),
        }
    }
}

impl VoiceConfig {
    pub fn input_enabled(&self) -> bool {
        self.input != "off"
    }
}

fn default_input() -> String {
    "transcript".to_string()
}

/// Load config.toml from the platform config directory, falling back to
/// defaults when missing or malformed.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let Ok(content) = std::fs::read_to_string(&path) else {
        return Config::default();
    };
    toml::from_str(&content).unwrap_or_else(|err| {
        log::warn!("invalid config {:?}: {}", path, err);
        Config::default()
    })
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("jarvis-tui").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_transcript_input() {
        let config = Config::default();
        assert!(config.voice.input_enabled());
        assert_eq!(config.voice.synth_voice, None);
    }

    #[test]
    fn input_off_disables_capability() {
        let config: Config = toml::from_str("[voice]\ninput = \"off\"").unwrap();
        assert!(!config.voice.input_enabled());
    }

    #[test]
    fn voice_preference_parses() {
        let config: Config = toml::from_str("[voice]\nsynth_voice = \"Samantha\"").unwrap();
        assert_eq!(config.voice.synth_voice.as_deref(), Some("Samantha"));
    }
}
