use crate::logger;
use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::sync::Mutex;

/// Answer feedback sounds. Implementations must never block or fail the
/// state transition that triggered them.
pub trait SoundEffects {
    fn play_correct(&self);
    fn play_incorrect(&self);
}

/// Platform speech synthesis. The session talks to this trait only; where
/// no synthesizer exists a no-op implementation stands in.
pub trait Speech {
    fn is_supported(&self) -> bool;
    fn speak_japanese(&self, text: &str);
    fn speak_english(&self, text: &str);
    fn stop(&self);
}

pub struct NullSound;

impl SoundEffects for NullSound {
    fn play_correct(&self) {}
    fn play_incorrect(&self) {}
}

/// Terminal bell on a wrong answer. Correct answers stay silent, so the
/// bell unambiguously means "look again".
pub struct TerminalBell;

impl SoundEffects for TerminalBell {
    fn play_correct(&self) {}

    fn play_incorrect(&self) {
        let mut stdout = std::io::stdout();
        if stdout
            .write_all(b"\x07")
            .and_then(|_| stdout.flush())
            .is_err()
        {
            logger::warn("terminal bell write failed, continuing without audio");
        }
    }
}

pub struct NullSpeech;

impl Speech for NullSpeech {
    fn is_supported(&self) -> bool {
        false
    }

    fn speak_japanese(&self, _text: &str) {}
    fn speak_english(&self, _text: &str) {}
    fn stop(&self) {}
}

/// Speech through a platform TTS command, spawned fire-and-forget. Spawn
/// errors are logged and swallowed.
pub struct CommandSpeech {
    program: &'static str,
    child: Mutex<Option<Child>>,
}

const TTS_PROGRAMS: [&str; 3] = ["say", "espeak-ng", "espeak"];

impl CommandSpeech {
    /// Probe PATH for a known synthesizer.
    pub fn detect() -> Option<CommandSpeech> {
        let path = std::env::var_os("PATH")?;
        for program in TTS_PROGRAMS {
            let found = std::env::split_paths(&path).any(|dir| dir.join(program).is_file());
            if found {
                logger::log(&format!("using '{}' for speech synthesis", program));
                return Some(CommandSpeech {
                    program,
                    child: Mutex::new(None),
                });
            }
        }
        None
    }

    fn voice_args(&self, japanese: bool) -> Vec<&'static str> {
        match (self.program, japanese) {
            ("say", true) => vec!["-v", "Kyoko"],
            ("say", false) => vec![],
            (_, true) => vec!["-v", "ja"],
            (_, false) => vec!["-v", "en"],
        }
    }

    fn speak(&self, text: &str, japanese: bool) {
        self.stop();
        let spawned = Command::new(self.program)
            .args(self.voice_args(japanese))
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => {
                *self.child.lock().unwrap() = Some(child);
            }
            Err(err) => {
                logger::warn(&format!("speech synthesis failed: {}", err));
            }
        }
    }
}

impl Speech for CommandSpeech {
    fn is_supported(&self) -> bool {
        true
    }

    fn speak_japanese(&self, text: &str) {
        self.speak(text, true);
    }

    fn speak_english(&self, text: &str) {
        self.speak(text, false);
    }

    fn stop(&self) {
        if let Some(mut child) = self.child.lock().unwrap().take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
