//! Frame cache behavior: disk-probe semantics, memory-tier reuse, fatal
//! preconditions, defensive copies, and LRU eviction.
//!
//! These tests drive the cache against PNG fixtures written into a
//! `TempDir`; none of them needs a Java runtime.

use std::fs;
use std::path::Path;

use image::{DynamicImage, Rgb, RgbImage};
use psxframes::{CacheOptions, FrameCache, PsxFramesError};
use tempfile::TempDir;

/// Write a small distinguishable PNG as cache file `{basename}_{index:04}.png`.
fn write_cache_frame(cache_dir: &Path, basename: &str, index: usize) {
    let image = RgbImage::from_fn(8, 4, |x, y| Rgb([index as u8, x as u8, y as u8]));
    let path = cache_dir.join(format!("{basename}_{index:04}.png"));
    image.save(path).expect("failed to write cache fixture");
}

fn pixels(image: &DynamicImage) -> Vec<u8> {
    image.to_rgb8().into_raw()
}

// ── Disk-probe path ──────────────────────────────────────────

#[test]
fn probe_returns_dense_prefix() {
    let cache_dir = TempDir::new().expect("tempdir");
    write_cache_frame(cache_dir.path(), "video", 0);
    write_cache_frame(cache_dir.path(), "video", 1);
    // Index 2 missing; index 3 must be invisible behind the gap.
    write_cache_frame(cache_dir.path(), "video", 3);

    let mut cache = FrameCache::new(CacheOptions::new(cache_dir.path()));
    let frames = cache.frames("video.bin").expect("probe failed");

    assert_eq!(frames.len(), 2);
}

#[test]
fn missing_frame_zero_means_nothing_cached() {
    let cache_dir = TempDir::new().expect("tempdir");
    write_cache_frame(cache_dir.path(), "video", 1);

    // A gap at index 0 hides everything, so the cache needs to decode and
    // fails on the unconfigured decoder.
    let mut cache = FrameCache::new(CacheOptions::new(cache_dir.path()));
    let error = cache.frames("video.bin").unwrap_err();
    assert!(matches!(error, PsxFramesError::DecoderNotConfigured));
}

#[test]
fn basename_strips_directories_and_extension() {
    let cache_dir = TempDir::new().expect("tempdir");
    write_cache_frame(cache_dir.path(), "MOVIE", 0);

    let mut cache = FrameCache::new(CacheOptions::new(cache_dir.path()));
    let frames = cache.frames("MOVIE.BIN").expect("probe failed");
    assert_eq!(frames.len(), 1);
}

#[test]
fn cached_frame_count_is_a_prefix_scan() {
    let cache_dir = TempDir::new().expect("tempdir");
    let cache = FrameCache::new(CacheOptions::new(cache_dir.path()));
    assert_eq!(cache.cached_frame_count("video.bin"), 0);

    write_cache_frame(cache_dir.path(), "video", 0);
    write_cache_frame(cache_dir.path(), "video", 1);
    write_cache_frame(cache_dir.path(), "video", 3);
    assert_eq!(cache.cached_frame_count("video.bin"), 2);
}

// ── Memory tier ──────────────────────────────────────────────

#[test]
fn second_request_is_served_from_memory() {
    let cache_dir = TempDir::new().expect("tempdir");
    write_cache_frame(cache_dir.path(), "video", 0);
    write_cache_frame(cache_dir.path(), "video", 1);

    let mut cache = FrameCache::new(CacheOptions::new(cache_dir.path()));
    let first = cache.frames("video.bin").expect("first request failed");
    assert_eq!(first.len(), 2);

    // Remove the disk tier entirely; the memory tier must still answer.
    for index in 0..2 {
        fs::remove_file(cache_dir.path().join(format!("video_{index:04}.png")))
            .expect("failed to delete cache file");
    }

    let second = cache.frames("video.bin").expect("second request failed");
    assert_eq!(second.len(), 2);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(pixels(a), pixels(b));
    }
}

#[test]
fn returned_frames_are_defensive_copies() {
    let cache_dir = TempDir::new().expect("tempdir");
    write_cache_frame(cache_dir.path(), "video", 0);

    let mut cache = FrameCache::new(CacheOptions::new(cache_dir.path()));
    let mut first = cache.frames("video.bin").expect("first request failed");
    let before = pixels(&first[0]);

    // Scribble over the returned image.
    match &mut first[0] {
        DynamicImage::ImageRgb8(buffer) => {
            for pixel in buffer.pixels_mut() {
                *pixel = Rgb([0xFF, 0xFF, 0xFF]);
            }
        }
        other => panic!("expected an RGB8 frame, got {other:?}"),
    }

    let second = cache.frames("video.bin").expect("second request failed");
    assert_eq!(pixels(&second[0]), before);
}

// ── Fatal preconditions ──────────────────────────────────────

#[test]
fn decode_without_jar_is_an_error() {
    let cache_dir = TempDir::new().expect("tempdir");
    let mut cache = FrameCache::new(CacheOptions::new(cache_dir.path()));

    let error = cache.frames("video.bin").unwrap_err();
    assert!(matches!(error, PsxFramesError::DecoderNotConfigured));
}

#[test]
fn missing_raw_source_fails_before_any_side_effect() {
    let cache_dir = TempDir::new().expect("tempdir");
    let raw_dir = TempDir::new().expect("tempdir");

    let options = CacheOptions::new(cache_dir.path())
        .with_raw_video_dir(raw_dir.path())
        .with_decoder_jar("jpsxdec.jar");
    let mut cache = FrameCache::new(options);

    let error = cache.frames("missing.bin").unwrap_err();
    match error {
        PsxFramesError::SourceNotFound { path } => {
            assert_eq!(path, raw_dir.path().join("missing.bin"));
        }
        other => panic!("expected SourceNotFound, got {other:?}"),
    }

    // No cache files may exist after the failed request.
    let leftover = fs::read_dir(cache_dir.path())
        .expect("cache dir should exist")
        .count();
    assert_eq!(leftover, 0);
}

// ── LRU bound ────────────────────────────────────────────────

#[test]
fn unbounded_by_default() {
    let cache_dir = TempDir::new().expect("tempdir");
    write_cache_frame(cache_dir.path(), "a", 0);
    write_cache_frame(cache_dir.path(), "b", 0);

    let mut cache = FrameCache::new(CacheOptions::new(cache_dir.path()));
    cache.frames("a.bin").expect("request for a failed");
    cache.frames("b.bin").expect("request for b failed");

    // Both survive in memory even with the disk tier gone.
    fs::remove_file(cache_dir.path().join("a_0000.png")).expect("delete");
    fs::remove_file(cache_dir.path().join("b_0000.png")).expect("delete");
    assert_eq!(cache.frames("a.bin").expect("a from memory").len(), 1);
    assert_eq!(cache.frames("b.bin").expect("b from memory").len(), 1);
}

#[test]
fn max_sources_evicts_least_recently_used() {
    let cache_dir = TempDir::new().expect("tempdir");
    write_cache_frame(cache_dir.path(), "a", 0);
    write_cache_frame(cache_dir.path(), "b", 0);

    let options = CacheOptions::new(cache_dir.path()).with_max_sources(1);
    let mut cache = FrameCache::new(options);

    cache.frames("a.bin").expect("request for a failed");
    cache.frames("b.bin").expect("request for b failed");
    fs::remove_file(cache_dir.path().join("a_0000.png")).expect("delete");
    fs::remove_file(cache_dir.path().join("b_0000.png")).expect("delete");

    // `b` is the resident source and survives without its disk files.
    assert_eq!(cache.frames("b.bin").expect("b from memory").len(), 1);

    // `a` was evicted when `b` came in. With its disk files gone too, the
    // new request falls through to the decode path and hits the
    // unconfigured decoder.
    let error = cache.frames("a.bin").unwrap_err();
    assert!(matches!(error, PsxFramesError::DecoderNotConfigured));
}
