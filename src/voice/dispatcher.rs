//! Keyword command classifier: one utterance in, one spoken line out.

use chrono::{DateTime, Local};

pub const FALLBACK_RESPONSE: &str = "I did not understand that. Please try again.";

/// Maps a finalized utterance to its response. First-match wins over a
/// fixed priority order; no ranking, no NLP. Only the time rule carries
/// dynamic content.
pub fn classify(utterance: &str, now: DateTime<Local>) -> String {
    let command = utterance.to_lowercase();

    if command.contains("weather") {
        "Today's forecast is sunny with clear skies. Highs near 75 degrees.".to_string()
    } else if command.contains("time") {
        format!("It is currently {}", now.format("%I:%M %p"))
    } else if command.contains("news") {
        "Latest headline: Stark Expo opens with breakthrough in clean energy.".to_string()
    } else if command.contains("hello") || command.contains("hi") {
        "Hello. I am always at your service.".to_string()
    } else if command.contains("task") || command.contains("calendar") {
        "You have multiple tasks scheduled. Open the sidebar to view them.".to_string()
    } else {
        FALLBACK_RESPONSE.to_string()
    }
}

/// Append-only record of recognized utterances. Not persisted; the
/// display shows only the tail.
#[derive(Default)]
pub struct VoiceLog {
    entries: Vec<String>,
}

impl VoiceLog {
    pub fn push(&mut self, entry: String) {
        self.entries.push(entry);
    }

    /// The most recent `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[String] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
