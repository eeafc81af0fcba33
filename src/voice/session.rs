//! Listening session: Idle <-> Listening, gated on backend availability.

use chrono::Local;

use crate::speech::{RecognizerEvent, SpeechHandle, SpeechInput};

use super::dispatcher::{classify, VoiceLog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenState {
    Idle,
    Listening,
}

pub struct VoiceSession {
    state: ListenState,
    input: Box<dyn SpeechInput>,
    speaker: SpeechHandle,
    log: VoiceLog,
}

impl VoiceSession {
    pub fn new(input: Box<dyn SpeechInput>, speaker: SpeechHandle) -> Self {
        Self {
            state: ListenState::Idle,
            input,
            speaker,
            log: VoiceLog::default(),
        }
    }

    pub fn state(&self) -> ListenState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == ListenState::Listening
    }

    pub fn log(&self) -> &VoiceLog {
        &self.log
    }

    /// Capability check first: without a recognition backend the session
    /// stays Idle and the failure is spoken, not thrown.
    pub fn start_listening(&mut self) {
        if self.is_listening() {
            return;
        }
        if !self.input.available() {
            self.speaker
                .speak("Speech recognition is not supported on this system.");
            return;
        }
        self.input.start();
    }

    pub fn stop_listening(&mut self) {
        self.input.stop();
        self.state = ListenState::Idle;
    }

    pub fn toggle(&mut self) {
        if self.is_listening() {
            self.stop_listening();
        } else {
            self.start_listening();
        }
    }

    /// Drains backend events; called once per UI tick. Interim results are
    /// ignored, final results are dispatched one at a time.
    pub fn pump(&mut self) {
        while let Some(event) = self.input.poll() {
            match event {
                RecognizerEvent::Started => {
                    self.state = ListenState::Listening;
                    self.speaker.speak("Voice command activated. You may speak.");
                }
                RecognizerEvent::Result { text, is_final } => {
                    if is_final && self.is_listening() {
                        self.handle_command(&text);
                    }
                }
                RecognizerEvent::Error(detail) => {
                    log::error!("speech recognition error: {}", detail);
                    self.speaker
                        .speak("There was an error accessing your microphone.");
                    self.input.stop();
                    self.state = ListenState::Idle;
                }
                RecognizerEvent::Ended => {
                    self.state = ListenState::Idle;
                }
            }
        }
    }

    fn handle_command(&mut self, text: &str) {
        self.log.push(format!("You said: \"{}\"", text));
        let response = classify(text, Local::now());
        self.speaker.speak(response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::transcript_pair;

    #[test]
    fn unavailable_backend_keeps_session_idle_and_speaks() {
        let (_feed, input) = transcript_pair(false);
        let (speaker, spoken) = SpeechHandle::capture();
        let mut session = VoiceSession::new(Box::new(input), speaker);

        session.start_listening();
        session.pump();

        assert_eq!(session.state(), ListenState::Idle);
        assert_eq!(
            *spoken.lock().unwrap(),
            vec!["Speech recognition is not supported on this system."]
        );
    }

    #[test]
    fn activation_speaks_and_enters_listening() {
        let (_feed, input) = transcript_pair(true);
        let (speaker, spoken) = SpeechHandle::capture();
        let mut session = VoiceSession::new(Box::new(input), speaker);

        session.start_listening();
        session.pump();

        assert!(session.is_listening());
        assert_eq!(
            *spoken.lock().unwrap(),
            vec!["Voice command activated. You may speak."]
        );
    }

    #[test]
    fn final_result_is_logged_and_answered() {
        let (feed, input) = transcript_pair(true);
        let (speaker, spoken) = SpeechHandle::capture();
        let mut session = VoiceSession::new(Box::new(input), speaker);

        session.start_listening();
        session.pump();
        feed.push("what's the weather like");
        session.pump();

        assert_eq!(session.log().recent(5), ["You said: \"what's the weather like\""]);
        let spoken = spoken.lock().unwrap();
        assert_eq!(spoken.len(), 2);
        assert!(spoken[1].starts_with("Today's forecast"));
    }

    #[test]
    fn interim_results_are_ignored() {
        let (feed, input) = transcript_pair(true);
        let (speaker, spoken) = SpeechHandle::capture();
        let mut session = VoiceSession::new(Box::new(input), speaker);

        session.start_listening();
        session.pump();
        feed.push_interim("what's the wea");
        feed.push_interim("what's the weather");
        session.pump();

        assert!(session.is_listening());
        assert!(session.log().is_empty());
        // Only the activation line was spoken.
        assert_eq!(spoken.lock().unwrap().len(), 1);

        feed.push("what's the weather like");
        session.pump();
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn backend_error_returns_to_idle_with_spoken_message() {
        let (feed, input) = transcript_pair(true);
        let (speaker, spoken) = SpeechHandle::capture();
        let mut session = VoiceSession::new(Box::new(input), speaker);

        session.start_listening();
        session.pump();
        feed.push_error("mic gone");
        session.pump();

        assert_eq!(session.state(), ListenState::Idle);
        assert_eq!(
            spoken.lock().unwrap().last().map(String::as_str),
            Some("There was an error accessing your microphone.")
        );
    }

    #[test]
    fn stop_returns_to_idle_and_ignores_later_results() {
        let (feed, input) = transcript_pair(true);
        let (speaker, spoken) = SpeechHandle::capture();
        let mut session = VoiceSession::new(Box::new(input), speaker);

        session.start_listening();
        session.pump();
        session.stop_listening();
        feed.push("hello");
        session.pump();

        assert_eq!(session.state(), ListenState::Idle);
        assert!(session.log().is_empty());
        assert_eq!(spoken.lock().unwrap().len(), 1);
    }
}
