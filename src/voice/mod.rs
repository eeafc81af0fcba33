pub mod dispatcher;
pub mod session;

pub use dispatcher::{classify, VoiceLog, FALLBACK_RESPONSE};
pub use session::{ListenState, VoiceSession};
