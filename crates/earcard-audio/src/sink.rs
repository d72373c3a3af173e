//! Audio sinks: where rendered notes go.
//!
//! Engines render a [`Clip`] and hand it to a sink. Handing it over is the
//! moment playback is triggered; sinks never wait for audio to finish.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use earcard_core::pitch::{pitch_to_name, NameOptions};
use tempfile::TempPath;

use crate::error::{AudioError, AudioResult};
use crate::wav;

/// A rendered note.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    /// Pitch the clip was rendered for.
    pub pitch: i32,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Mono samples in [-1.0, 1.0].
    pub samples: Vec<f64>,
}

impl Clip {
    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0, |peak, s| peak.max(s.abs()))
    }

    /// Encodes the clip as a mono 16-bit WAV file.
    pub fn to_wav(&self) -> Vec<u8> {
        wav::encode_mono(&self.samples, self.sample_rate)
    }
}

/// Destination for rendered clips.
pub trait AudioSink: Send + Sync {
    /// Starts playback of `clip` and returns without waiting for it to end.
    fn play(&self, clip: &Clip) -> AudioResult<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Discards every clip.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&self, _clip: &Clip) -> AudioResult<()> {
        Ok(())
    }
}

/// Keeps every clip in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    clips: Mutex<Vec<Clip>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clips played so far, oldest first.
    pub fn clips(&self) -> Vec<Clip> {
        lock(&self.clips).clone()
    }

    /// Pitches played so far, oldest first.
    pub fn pitches(&self) -> Vec<i32> {
        lock(&self.clips).iter().map(|clip| clip.pitch).collect()
    }
}

impl AudioSink for MemorySink {
    fn play(&self, clip: &Clip) -> AudioResult<()> {
        lock(&self.clips).push(clip.clone());
        Ok(())
    }
}

/// Writes each clip to a numbered WAV file in a directory.
#[derive(Debug)]
pub struct WavDirSink {
    dir: PathBuf,
    counter: AtomicUsize,
}

impl WavDirSink {
    /// Creates the sink, creating `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>) -> AudioResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            counter: AtomicUsize::new(0),
        })
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl AudioSink for WavDirSink {
    fn play(&self, clip: &Clip) -> AudioResult<()> {
        let index = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let name = pitch_to_name(clip.pitch, NameOptions::SINGLE);
        let path = self.dir.join(format!("{index:04}-{name}.wav"));
        std::fs::write(&path, clip.to_wav())?;
        tracing::debug!("wrote {}", path.display());
        Ok(())
    }
}

/// Command-line players tried in order, with the arguments placed before the file.
const PLAYERS: [(&str, &[&str]); 4] = [
    ("afplay", &[]),
    ("paplay", &[]),
    ("aplay", &["-q"]),
    ("ffplay", &["-nodisp", "-autoexit", "-loglevel", "quiet"]),
];

/// Plays clips by spawning a system audio player on a temporary WAV file.
#[derive(Debug)]
pub struct PlayerSink {
    program: PathBuf,
    args: Vec<String>,
    children: Mutex<Vec<(Child, TempPath)>>,
}

impl PlayerSink {
    /// Finds the first available player on `PATH`.
    pub fn detect() -> AudioResult<Self> {
        for (name, args) in PLAYERS {
            if let Ok(program) = which::which(name) {
                tracing::debug!("using audio player {}", program.display());
                return Ok(Self::with_program(
                    program,
                    args.iter().map(|a| a.to_string()).collect(),
                ));
            }
        }
        Err(AudioError::NoPlayer {
            tried: PLAYERS
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Uses a specific player program.
    pub fn with_program(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            children: Mutex::new(Vec::new()),
        }
    }

    /// Drops finished players along with their temporary files.
    fn reap(children: &mut Vec<(Child, TempPath)>) {
        children.retain_mut(|(child, _)| !matches!(child.try_wait(), Ok(Some(_))));
    }
}

impl AudioSink for PlayerSink {
    fn play(&self, clip: &Clip) -> AudioResult<()> {
        let mut children = lock(&self.children);
        Self::reap(&mut children);

        let file = tempfile::Builder::new()
            .prefix("earcard-")
            .suffix(".wav")
            .tempfile()?;
        std::fs::write(file.path(), clip.to_wav())?;
        let path = file.into_temp_path();

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(&*path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        children.push((child, path));
        Ok(())
    }
}

impl Drop for PlayerSink {
    fn drop(&mut self) {
        for (child, _) in lock(&self.children).iter_mut() {
            let _ = child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn clip(pitch: i32) -> Clip {
        Clip {
            pitch,
            sample_rate: 1000,
            samples: vec![0.0, 0.5, -0.25, 0.0],
        }
    }

    #[test]
    fn test_clip_metrics() {
        let clip = clip(60);
        assert!((clip.duration_secs() - 0.004).abs() < 1e-12);
        assert_eq!(clip.peak(), 0.5);
        assert_eq!(clip.to_wav().len(), 44 + 8);
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.play(&clip(60)).unwrap();
        sink.play(&clip(67)).unwrap();
        assert_eq!(sink.pitches(), vec![60, 67]);
        assert_eq!(sink.clips().len(), 2);
    }

    #[test]
    fn test_wav_dir_sink_numbers_files() {
        let tmp = TempDir::new().unwrap();
        let sink = WavDirSink::new(tmp.path().join("out")).unwrap();
        sink.play(&clip(61)).unwrap();
        sink.play(&clip(45)).unwrap();

        let first = sink.dir().join("0001-C#4.wav");
        let second = sink.dir().join("0002-A2.wav");
        assert!(first.exists(), "{}", first.display());
        assert!(second.exists(), "{}", second.display());
        assert_eq!(std::fs::read(first).unwrap(), clip(61).to_wav());
    }

    #[test]
    fn test_player_sink_missing_program_errors() {
        let sink = PlayerSink::with_program("/nonexistent/earcard-player", vec![]);
        assert!(matches!(sink.play(&clip(60)), Err(AudioError::Io(_))));
    }
}
