// Integration tests for clip export and cleanup
//
// These tests verify that finished recordings are written to disk as WAV
// files with unique paths, and that removal actually deletes them.

use anyhow::Result;
use hound::WavReader;
use ice_rdio::audio::{AudioSegment, ClipStore};
use tempfile::TempDir;

#[test]
fn test_export_writes_readable_wav() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = ClipStore::new(temp_dir.path().to_path_buf())?;

    let samples: Vec<i16> = (0..8000).map(|i| (i % 2000) as i16).collect();
    let segment = AudioSegment::new(samples.clone(), 8000, 1);

    let clip = store.export(&segment)?;

    assert!(clip.path.exists(), "Clip file should exist");
    assert!((clip.duration_seconds - 1.0).abs() < 1e-9);

    let reader = WavReader::open(&clip.path)?;
    let spec = reader.spec();
    assert_eq!(spec.sample_rate, 8000);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);

    let read_back: Vec<i16> = reader.into_samples::<i16>().collect::<Result<_, _>>()?;
    assert_eq!(read_back, samples, "Samples should round-trip unchanged");

    Ok(())
}

#[test]
fn test_export_allocates_unique_paths() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = ClipStore::new(temp_dir.path().to_path_buf())?;

    let segment = AudioSegment::new(vec![1000i16; 800], 8000, 1);

    let first = store.export(&segment)?;
    let second = store.export(&segment)?;

    assert_ne!(
        first.path, second.path,
        "Each export must get a fresh handle"
    );
    assert!(first.path.exists());
    assert!(second.path.exists());

    Ok(())
}

#[test]
fn test_export_preserves_stereo_format() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = ClipStore::new(temp_dir.path().to_path_buf())?;

    let segment = AudioSegment::new(vec![500i16; 88200], 44100, 2);
    let clip = store.export(&segment)?;

    let spec = WavReader::open(&clip.path)?.spec();
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.channels, 2);

    Ok(())
}

#[test]
fn test_remove_deletes_the_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = ClipStore::new(temp_dir.path().to_path_buf())?;

    let segment = AudioSegment::new(vec![1000i16; 800], 8000, 1);
    let clip = store.export(&segment)?;
    assert!(clip.path.exists());

    store.remove(&clip);
    assert!(!clip.path.exists(), "Removed clip file should be gone");

    Ok(())
}

#[test]
fn test_remove_missing_file_does_not_panic() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = ClipStore::new(temp_dir.path().to_path_buf())?;

    let segment = AudioSegment::new(vec![1000i16; 800], 8000, 1);
    let clip = store.export(&segment)?;

    store.remove(&clip);
    // Second removal is a no-op, logged but not fatal
    store.remove(&clip);

    Ok(())
}

#[test]
fn test_store_creates_missing_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let nested = temp_dir.path().join("clips").join("pending");

    let store = ClipStore::new(nested.clone())?;
    assert!(nested.exists(), "Store should create its directory");

    let segment = AudioSegment::new(vec![1000i16; 800], 8000, 1);
    let clip = store.export(&segment)?;
    assert!(clip.path.starts_with(&nested));

    Ok(())
}
