//! Progress reporting for frame acquisition.
//!
//! Decoding a full source invokes the external decoder once per chunk, which
//! can take a while on long movies. [`ProgressCallback`] lets callers observe
//! each frame as it is loaded or decoded; [`NoOpProgress`] is the default.
//!
//! # Example
//!
//! ```no_run
//! use psxframes::{
//!     CacheOptions, FrameCache, ProgressCallback, ProgressInfo, PsxFramesError,
//! };
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("frame {}/{}", info.current, info.total);
//!     }
//! }
//!
//! let options = CacheOptions::new("cache")
//!     .with_raw_video_dir("videos")
//!     .with_decoder_jar("tools/jpsxdec.jar");
//! let mut cache = FrameCache::new(options);
//! let frames = cache.frames_with_progress("MOVIE.BIN", &PrintProgress)?;
//! # Ok::<(), PsxFramesError>(())
//! ```

/// A snapshot of acquisition progress, delivered once per frame.
#[derive(Debug, Clone, Copy)]
pub struct ProgressInfo {
    /// Frames materialized so far (1-based; equals the frame index + 1).
    pub current: u64,
    /// Total frames this source will produce.
    pub total: u64,
}

impl ProgressInfo {
    /// Completion percentage in `0.0..=100.0`.
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            100.0
        } else {
            (self.current as f32 / self.total as f32) * 100.0
        }
    }
}

/// Callback for monitoring frame acquisition.
///
/// Fired once per frame during the full-acquisition path, whether the frame
/// came from a disk cache file or a fresh decoder invocation. Not fired for
/// requests served entirely from the memory tier.
pub trait ProgressCallback {
    /// Called after each frame is materialized.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Default callback that ignores all progress updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}
