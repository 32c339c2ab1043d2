//! Cache configuration.
//!
//! [`CacheOptions`] is a builder that collects the directories and decoder
//! settings a [`FrameCache`](crate::FrameCache) needs. Only the cache
//! directory is mandatory: the raw video directory and the jPSXdec jar are
//! consulted the first time a cache miss forces a decode, so a fully
//! populated disk cache can be served without either.
//!
//! # Example
//!
//! ```
//! use psxframes::CacheOptions;
//!
//! let options = CacheOptions::new("cache")
//!     .with_raw_video_dir("videos")
//!     .with_decoder_jar("tools/jpsxdec.jar")
//!     .with_max_sources(8);
//! ```

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Configuration for a [`FrameCache`](crate::FrameCache).
#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// Directory holding the decoded PNG cache files.
    pub(crate) cache_dir: PathBuf,
    /// Directory holding raw video sources. `None` resolves source names
    /// relative to the current directory.
    pub(crate) raw_video_dir: Option<PathBuf>,
    /// Path to the jPSXdec jar. Required only once decoding is triggered.
    pub(crate) decoder_jar: Option<PathBuf>,
    /// Launcher binary override for the decoder. `None` means `java`.
    pub(crate) launcher: Option<PathBuf>,
    /// Memory-tier bound: maximum number of sources kept materialized.
    /// `None` means unbounded, which is the reference behavior.
    pub(crate) max_sources: Option<NonZeroUsize>,
}

impl CacheOptions {
    /// Create options with the given cache directory.
    ///
    /// The directory does not need to exist yet; it is created on the first
    /// frame request.
    pub fn new<P: Into<PathBuf>>(cache_dir: P) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            raw_video_dir: None,
            decoder_jar: None,
            launcher: None,
            max_sources: None,
        }
    }

    /// Set the directory raw video sources are read from.
    #[must_use]
    pub fn with_raw_video_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.raw_video_dir = Some(dir.into());
        self
    }

    /// Set the path to the jPSXdec jar used for decoding.
    #[must_use]
    pub fn with_decoder_jar<P: Into<PathBuf>>(mut self, jar: P) -> Self {
        self.decoder_jar = Some(jar.into());
        self
    }

    /// Override the launcher binary used to run the jar (default `java`).
    #[must_use]
    pub fn with_launcher<P: Into<PathBuf>>(mut self, launcher: P) -> Self {
        self.launcher = Some(launcher.into());
        self
    }

    /// Bound the memory tier to at most `max_sources` materialized sources,
    /// evicted least-recently-used. `0` means unbounded (the default).
    ///
    /// The disk tier is never evicted; a source pushed out of memory is
    /// re-read from its cache files on the next request.
    #[must_use]
    pub fn with_max_sources(mut self, max_sources: usize) -> Self {
        self.max_sources = NonZeroUsize::new(max_sources);
        self
    }

    /// The configured cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// The configured raw video directory, if any.
    pub fn raw_video_dir(&self) -> Option<&Path> {
        self.raw_video_dir.as_deref()
    }

    /// The configured decoder jar, if any.
    pub fn decoder_jar(&self) -> Option<&Path> {
        self.decoder_jar.as_deref()
    }

    /// The memory-tier bound, if one was set.
    pub fn max_sources(&self) -> Option<NonZeroUsize> {
        self.max_sources
    }
}
