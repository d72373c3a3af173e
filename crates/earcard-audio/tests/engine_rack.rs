//! Engine selection and rendering through the rack.

use std::sync::Arc;

use earcard_audio::{
    EngineRack, EngineStatus, MemorySink, SoundEngine, SynthesizedLoader, WavDirSink,
};
use earcard_core::EngineId;
use pretty_assertions::assert_eq;

fn rack() -> (EngineRack, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let loader = SynthesizedLoader {
        sample_rate: 8000,
        length: 1.0,
    };
    (EngineRack::new(sink.clone(), Arc::new(loader)), sink)
}

#[test]
fn rack_resolves_each_engine() {
    let (rack, _) = rack();
    for id in EngineId::ALL {
        assert_eq!(rack.get(id).id(), id);
    }
    assert_eq!(rack.get(EngineId::Oscillator).default_duration_ms(), 600);
    assert_eq!(rack.get(EngineId::Synth).default_duration_ms(), 600);
    assert_eq!(rack.get(EngineId::Sampler).default_duration_ms(), 800);
}

#[tokio::test]
async fn every_engine_plays_into_the_sink() {
    let (rack, sink) = rack();
    for id in EngineId::ALL {
        let engine = rack.get(id);
        engine.play_note(64, None).await.unwrap();
        assert_eq!(engine.status(), EngineStatus::Ready);
    }

    let clips = sink.clips();
    assert_eq!(clips.len(), 3);
    for clip in &clips {
        assert_eq!(clip.pitch, 64);
        assert!(clip.peak() > 0.0);
        assert!(clip.peak() <= 1.0);
    }
}

#[tokio::test]
async fn dispose_all_returns_engines_to_idle() {
    let (rack, _) = rack();
    for id in EngineId::ALL {
        rack.get(id).init().await.unwrap();
    }
    rack.dispose_all();
    rack.dispose_all();
    for id in EngineId::ALL {
        assert_eq!(rack.get(id).status(), EngineStatus::Idle);
    }
}

#[tokio::test]
async fn sampler_renders_requested_duration() {
    let (rack, _) = rack();
    let clip = rack.sampler().render(57, Some(500)).await.unwrap();
    assert_eq!(clip.sample_rate, 8000);
    assert_eq!(clip.samples.len(), 4000);
}

#[tokio::test]
async fn wav_dir_sink_collects_played_notes() {
    let dir = tempfile::TempDir::new().unwrap();
    let sink = Arc::new(WavDirSink::new(dir.path()).unwrap());
    let rack = EngineRack::new(sink, Arc::new(SynthesizedLoader::default()));

    rack.get(EngineId::Synth).play_note(60, Some(100)).await.unwrap();
    rack.get(EngineId::Oscillator).play_note(67, Some(100)).await.unwrap();

    assert!(dir.path().join("0001-C4.wav").exists());
    assert!(dir.path().join("0002-G4.wav").exists());
}
