//! Speech recognition seam: a capability-gated backend that emits
//! transcription events, polled once per UI tick.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizerEvent {
    Started,
    Result { text: String, is_final: bool },
    Error(String),
    Ended,
}

/// Recognition backend contract. Continuous mode: once started, results
/// keep arriving until `stop` or a backend end/error.
pub trait SpeechInput {
    fn available(&self) -> bool;
    fn start(&mut self);
    fn stop(&mut self);
    fn poll(&mut self) -> Option<RecognizerEvent>;
}

struct Shared {
    enabled: bool,
    active: bool,
    queue: VecDeque<RecognizerEvent>,
}

/// Backend that treats lines typed in the UI as finalized transcriptions.
pub struct TranscriptInput {
    shared: Arc<Mutex<Shared>>,
}

/// Producer half held by the UI: feeds utterances into the backend.
#[derive(Clone)]
pub struct TranscriptFeed {
    shared: Arc<Mutex<Shared>>,
}

pub fn transcript_pair(enabled: bool) -> (TranscriptFeed, TranscriptInput) {
    let shared = Arc::new(Mutex::new(Shared {
        enabled,
        active: false,
        queue: VecDeque::new(),
    }));
    (
        TranscriptFeed {
            shared: shared.clone(),
        },
        TranscriptInput { shared },
    )
}

fn lock(shared: &Arc<Mutex<Shared>>) -> MutexGuard<'_, Shared> {
    shared.lock().expect("transcript state poisoned")
}

impl TranscriptFeed {
    /// One finalized utterance. Ignored unless a session is active; the
    /// backend serializes results, one at a time.
    pub fn push(&self, text: &str) {
        let mut shared = lock(&self.shared);
        if shared.active {
            shared.queue.push_back(RecognizerEvent::Result {
                text: text.to_string(),
                is_final: true,
            });
        }
    }

    /// An in-progress hypothesis. Real recognizers revise these until the
    /// final result lands; consumers are expected to skip them.
    #[cfg(test)]
    pub fn push_interim(&self, text: &str) {
        let mut shared = lock(&self.shared);
        if shared.active {
            shared.queue.push_back(RecognizerEvent::Result {
                text: text.to_string(),
                is_final: false,
            });
        }
    }

    /// Backend runtime failure, e.g. losing the input device.
    pub fn push_error(&self, detail: &str) {
        let mut shared = lock(&self.shared);
        if shared.active {
            shared.active = false;
            shared.queue.push_back(RecognizerEvent::Error(detail.to_string()));
        }
    }
}

impl SpeechInput for TranscriptInput {
    fn available(&self) -> bool {
        lock(&self.shared).enabled
    }

    fn start(&mut self) {
        let mut shared = lock(&self.shared);
        if !shared.active {
            shared.active = true;
            shared.queue.push_back(RecognizerEvent::Started);
        }
    }

    fn stop(&mut self) {
        let mut shared = lock(&self.shared);
        if shared.active {
            shared.active = false;
            shared.queue.push_back(RecognizerEvent::Ended);
        }
    }

    fn poll(&mut self) -> Option<RecognizerEvent> {
        lock(&self.shared).queue.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_emits_started_then_results() {
        let (feed, mut input) = transcript_pair(true);
        assert!(input.available());

        input.start();
        feed.push("what time is it");

        assert_eq!(input.poll(), Some(RecognizerEvent::Started));
        assert_eq!(
            input.poll(),
            Some(RecognizerEvent::Result {
                text: "what time is it".to_string(),
                is_final: true,
            })
        );
        assert_eq!(input.poll(), None);
    }

    #[test]
    fn results_ignored_while_idle() {
        let (feed, mut input) = transcript_pair(true);
        feed.push("hello");
        assert_eq!(input.poll(), None);

        input.start();
        input.stop();
        feed.push("hello again");

        assert_eq!(input.poll(), Some(RecognizerEvent::Started));
        assert_eq!(input.poll(), Some(RecognizerEvent::Ended));
        assert_eq!(input.poll(), None);
    }

    #[test]
    fn error_deactivates_session() {
        let (feed, mut input) = transcript_pair(true);
        input.start();
        feed.push_error("microphone lost");
        feed.push("too late");

        assert_eq!(input.poll(), Some(RecognizerEvent::Started));
        assert_eq!(
            input.poll(),
            Some(RecognizerEvent::Error("microphone lost".to_string()))
        );
        assert_eq!(input.poll(), None);
    }

    #[test]
    fn disabled_backend_reports_unavailable() {
        let (_feed, input) = transcript_pair(false);
        assert!(!input.available());
    }
}
