//! The two-tier frame cache.
//!
//! [`FrameCache`] answers "give me all frames for source X" with minimal
//! recomputation. Decoded frames live in two tiers:
//!
//! - **Disk tier**: PNG files named `{basename}_{index:04}.png` inside the
//!   cache directory, durable across runs. The naming scheme (separator `_`,
//!   zero-pad width 4) is load-bearing: it is what makes caches produced by
//!   earlier runs reusable.
//! - **Memory tier**: decoded [`FrameRecord`]s keyed by cache file path, and
//!   fully materialized image sequences keyed by source filename. Populated
//!   lazily, never invalidated; unbounded by default, optionally bounded
//!   via [`CacheOptions::with_max_sources`].
//!
//! A request checks memory first, then probes the disk tier, and only then
//! falls back to splitting the raw source into chunks and invoking the
//! external decoder chunk by chunk.
//!
//! `FrameCache` is synchronous and not internally synchronized; methods take
//! `&mut self` and block until complete. Wrap it in a lock if it must be
//! shared across threads.

use std::{
    collections::HashMap,
    fmt::{Debug, Formatter, Result as FmtResult},
    fs,
    path::{Path, PathBuf},
};

use image::DynamicImage;
use lru::LruCache;

use crate::{
    chunk,
    config::CacheOptions,
    decoder::FrameDecoder,
    error::PsxFramesError,
    progress::{NoOpProgress, ProgressCallback, ProgressInfo},
    record::FrameRecord,
};

/// Two-tier cache mapping source video files to decoded frame sequences.
///
/// # Example
///
/// ```no_run
/// use psxframes::{CacheOptions, FrameCache, PsxFramesError};
///
/// let options = CacheOptions::new("cache")
///     .with_raw_video_dir("videos")
///     .with_decoder_jar("tools/jpsxdec.jar");
/// let mut cache = FrameCache::new(options);
///
/// let frames = cache.frames("MOVIE.BIN")?;
/// println!("{} frame(s)", frames.len());
/// # Ok::<(), PsxFramesError>(())
/// ```
pub struct FrameCache {
    options: CacheOptions,
    /// Decoded frame records, keyed by cache file path.
    records: HashMap<PathBuf, FrameRecord>,
    /// Materialized image sequences, keyed by source filename. LRU order is
    /// only consulted when a `max_sources` bound is configured.
    videos: LruCache<String, Vec<DynamicImage>>,
}

impl Debug for FrameCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FrameCache")
            .field("cache_dir", &self.options.cache_dir)
            .field("cached_sources", &self.videos.len())
            .field("cached_records", &self.records.len())
            .finish_non_exhaustive()
    }
}

impl FrameCache {
    /// Create a cache with the given options.
    ///
    /// No I/O happens here; the cache directory is created on the first
    /// frame request.
    pub fn new(options: CacheOptions) -> Self {
        let videos = match options.max_sources {
            Some(bound) => LruCache::new(bound),
            None => LruCache::unbounded(),
        };
        Self {
            options,
            records: HashMap::new(),
            videos,
        }
    }

    /// The options this cache was created with.
    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    /// Return all frames for `source`, in frame-index order.
    ///
    /// Serves from the memory tier when possible, then from disk cache
    /// files, and finally decodes the raw source chunk by chunk. The
    /// returned images are copies; mutating them does not affect the cache.
    ///
    /// # Errors
    ///
    /// Returns [`PsxFramesError::DecoderNotConfigured`] or
    /// [`PsxFramesError::SourceNotFound`] when a decode is required but its
    /// preconditions fail, and I/O, image, or decoder errors from the
    /// acquisition itself.
    pub fn frames(&mut self, source: &str) -> Result<Vec<DynamicImage>, PsxFramesError> {
        self.frames_with_progress(source, &NoOpProgress)
    }

    /// [`frames`](FrameCache::frames) with a progress callback, fired once
    /// per frame while the full-acquisition path runs.
    pub fn frames_with_progress(
        &mut self,
        source: &str,
        progress: &dyn ProgressCallback,
    ) -> Result<Vec<DynamicImage>, PsxFramesError> {
        fs::create_dir_all(&self.options.cache_dir)?;

        if self.videos.get(source).is_none() {
            self.probe_disk(source)?;
        }

        let satisfied = self
            .videos
            .get(source)
            .is_some_and(|frames| !frames.is_empty());
        if !satisfied {
            self.decode_source(source, progress)?;
        }

        Ok(self.videos.get(source).cloned().unwrap_or_default())
    }

    /// Count the contiguous cache files present on disk for `source`,
    /// starting at index 0.
    ///
    /// This is a dense prefix scan: a gap hides any later files, and a
    /// missing index 0 counts as no cached frames at all. Does not touch
    /// the memory tier.
    pub fn cached_frame_count(&self, source: &str) -> usize {
        let basename = source_basename(source);
        let mut index = 0;
        while self.cache_path(&basename, index).exists() {
            index += 1;
        }
        index
    }

    /// Cache file path for a given source basename and frame index.
    fn cache_path(&self, basename: &str, index: usize) -> PathBuf {
        self.options
            .cache_dir
            .join(format!("{basename}_{index:04}.png"))
    }

    /// Disk-probe path: load the dense prefix of cache files for `source`
    /// into both memory tiers. Stops at the first missing index.
    fn probe_disk(&mut self, source: &str) -> Result<(), PsxFramesError> {
        let basename = source_basename(source);
        let mut frames = Vec::new();
        let mut index = 0;

        loop {
            let path = self.cache_path(&basename, index);
            if !path.exists() {
                break;
            }

            let record = FrameRecord::from_file(&path)?;
            frames.push(record.to_image()?);
            self.records.insert(path, record);
            index += 1;
        }

        log::debug!("Found {index} cached frame(s) for {source}");
        self.insert_video(source.to_string(), frames);
        Ok(())
    }

    /// Full decode path: split the raw source into chunks and materialize
    /// one frame per chunk, invoking the decoder only for indices whose
    /// cache file does not already exist.
    fn decode_source(
        &mut self,
        source: &str,
        progress: &dyn ProgressCallback,
    ) -> Result<(), PsxFramesError> {
        let jar = self
            .options
            .decoder_jar
            .clone()
            .ok_or(PsxFramesError::DecoderNotConfigured)?;
        let mut decoder = FrameDecoder::new(jar);
        if let Some(launcher) = &self.options.launcher {
            decoder = decoder.with_launcher(launcher);
        }

        let input_path = match &self.options.raw_video_dir {
            Some(dir) => dir.join(source),
            None => PathBuf::from(source),
        };
        if !input_path.exists() {
            log::error!("Could not find {}", input_path.display());
            return Err(PsxFramesError::SourceNotFound { path: input_path });
        }

        log::debug!("Loading frames for {}", input_path.display());
        let data = fs::read(&input_path)?;
        let chunks = chunk::split(&data);
        let total = chunks.len() as u64;

        let basename = source_basename(source);
        let mut frames = Vec::with_capacity(chunks.len());

        for (index, chunk_bytes) in chunks.iter().enumerate() {
            let path = self.cache_path(&basename, index);

            let image = match self.records.get(&path) {
                Some(record) => record.to_image()?,
                None => {
                    // Disk before decode: only a missing cache file costs a
                    // decoder invocation.
                    if !path.exists() {
                        decoder.dump_frame(chunk_bytes, &path)?;
                    }
                    let record = FrameRecord::from_file(&path)?;
                    let image = record.to_image()?;
                    self.records.insert(path, record);
                    image
                }
            };

            frames.push(image);
            progress.on_progress(&ProgressInfo {
                current: index as u64 + 1,
                total,
            });
        }

        self.insert_video(source.to_string(), frames);
        Ok(())
    }

    /// Store a materialized sequence, purging the records of any source the
    /// LRU bound pushes out so the bound actually limits memory.
    fn insert_video(&mut self, source: String, frames: Vec<DynamicImage>) {
        if let Some((evicted_source, evicted_frames)) = self.videos.push(source, frames) {
            let basename = source_basename(&evicted_source);
            for index in 0..evicted_frames.len() {
                let path = self.cache_path(&basename, index);
                self.records.remove(&path);
            }
            if !evicted_frames.is_empty() {
                log::debug!(
                    "Evicted {} frame(s) for {evicted_source} from the memory tier",
                    evicted_frames.len(),
                );
            }
        }
    }
}

/// Basename of a source filename with directories and extension stripped:
/// `videos/MOVIE.BIN` becomes `MOVIE`. This is the `{basename}` half of the
/// cache file naming scheme.
fn source_basename(source: &str) -> String {
    Path::new(source)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
