//! Audio notification layer: resolves fired cues to voice-pack playback or
//! TTS utterances, per the user's cue settings.

mod dispatcher;
mod events;

pub use dispatcher::CueDispatcher;
pub use events::{cue_file_stem, cue_text};
