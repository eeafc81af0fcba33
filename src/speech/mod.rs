pub mod input;
pub mod synth;

pub use input::{transcript_pair, RecognizerEvent, SpeechInput, TranscriptFeed};
pub use synth::{SpeechEngine, SpeechHandle};
