//! Fire-and-forget cue playback.
//!
//! Default mode plays voice-pack files via rodio on a detached thread;
//! custom mode speaks through the platform TTS engine (espeak subprocess on
//! Linux). Nothing here blocks the tick loop, nothing is queued or
//! cancelled, and every failure path is a silent no-op: a host with no
//! audio capability is a normal deployment condition.

use super::events::{cue_file_stem, cue_text};
use crate::domain::{CueMode, CueSettings, FiredCue, Voice};
use std::path::PathBuf;

pub struct CueDispatcher {
    /// Voice-pack root; one subdirectory per voice
    sounds_dir: PathBuf,

    /// TTS engine (None if initialization failed or unavailable)
    #[cfg(not(target_os = "linux"))]
    tts: Option<tts::Tts>,
}

impl CueDispatcher {
    pub fn new(sounds_dir: PathBuf) -> Self {
        #[cfg(not(target_os = "linux"))]
        let tts = match tts::Tts::default() {
            Ok(mut engine) => {
                let _ = engine.set_rate(engine.normal_rate());
                Some(engine)
            }
            Err(_) => None,
        };

        Self {
            sounds_dir,
            #[cfg(not(target_os = "linux"))]
            tts,
        }
    }

    /// Resolve and play one fired cue under the current settings
    pub fn dispatch(&mut self, cue: FiredCue, settings: &CueSettings) {
        if !settings.enabled {
            return;
        }

        match settings.mode {
            CueMode::Default => {
                if let Some(stem) = cue_file_stem(cue) {
                    self.play_voice_file(settings.voice, stem, settings.volume);
                }
            }
            CueMode::Custom => {
                self.speak(&cue_text(cue), settings.volume);
            }
        }
    }

    /// Play `<sounds_dir>/<voice>/<stem>.mp3` on a detached thread
    fn play_voice_file(&self, voice: Voice, stem: &str, volume: f32) {
        let path = self
            .sounds_dir
            .join(voice.name())
            .join(format!("{}.mp3", stem));
        if !path.exists() {
            return;
        }

        std::thread::spawn(move || {
            use rodio::{Decoder, OutputStream, Sink};
            use std::fs::File;
            use std::io::BufReader;

            let Ok((_stream, stream_handle)) = OutputStream::try_default() else {
                return;
            };
            let Ok(file) = File::open(&path) else { return };
            let Ok(source) = Decoder::new(BufReader::new(file)) else {
                return;
            };
            let Ok(sink) = Sink::try_new(&stream_handle) else {
                return;
            };

            sink.set_volume(volume);
            sink.append(source);
            sink.sleep_until_end();
        });
    }

    /// Speak text using the platform TTS engine
    #[cfg(not(target_os = "linux"))]
    fn speak(&mut self, text: &str, volume: f32) {
        if let Some(ref mut tts) = self.tts {
            let _ = tts.set_volume(tts.max_volume() * volume.clamp(0.0, 1.0));
            let _ = tts.speak(text, false);
        }
    }

    #[cfg(target_os = "linux")]
    fn speak(&mut self, text: &str, volume: f32) {
        use std::process::Command;
        // espeak amplitude range is 0-200
        let amplitude = (volume.clamp(0.0, 1.0) * 200.0) as u32;
        let text = text.to_string();
        std::thread::spawn(move || {
            let _ = Command::new("espeak")
                .arg("-a")
                .arg(amplitude.to_string())
                .arg(&text)
                .output();
        });
    }
}
