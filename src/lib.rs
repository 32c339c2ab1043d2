//! # psxframes
//!
//! Decode and cache PlayStation motion-video frames via
//! [jPSXdec](https://github.com/m35/jpsxdec).
//!
//! PlayStation-era movies store one bitstream frame per fixed-size 0x2000
//! chunk of the raw file. `psxframes` splits a source into chunks, decodes
//! each chunk to a PNG through the external jPSXdec tool, and caches the
//! results in two tiers — PNG files on disk (durable across runs) and
//! decoded pixel buffers in memory — so repeated requests never re-invoke
//! the decoder.
//!
//! ## Quick Start
//!
//! ```no_run
//! use psxframes::{CacheOptions, FrameCache};
//!
//! let options = CacheOptions::new("cache")
//!     .with_raw_video_dir("videos")
//!     .with_decoder_jar("tools/jpsxdec.jar");
//! let mut cache = FrameCache::new(options);
//!
//! // Decodes on the first call, then serves from cache.
//! let frames = cache.frames("MOVIE.BIN").unwrap();
//! frames[0].save("first_frame.png").unwrap();
//! ```
//!
//! ### Serving a pre-populated cache
//!
//! A disk cache filled by an earlier run needs neither the raw source nor
//! the decoder:
//!
//! ```no_run
//! use psxframes::{CacheOptions, FrameCache};
//!
//! let mut cache = FrameCache::new(CacheOptions::new("cache"));
//! let frames = cache.frames("MOVIE.BIN").unwrap();
//! ```
//!
//! ## How lookups work
//!
//! 1. **Memory tier** — sequences already materialized this run are returned
//!    immediately (as copies; the cache cannot be corrupted through them).
//! 2. **Disk tier** — cache files `{basename}_{index:04}.png` are probed
//!    sequentially from index 0 and loaded until the first gap.
//! 3. **Decode** — if nothing was cached, the raw source is split into
//!    chunks and jPSXdec is invoked for every index whose cache file is
//!    missing, populating both tiers.
//!
//! ## Requirements
//!
//! Decoding needs a Java runtime and a jPSXdec jar; serving an existing
//! disk cache needs neither.

pub mod cache;
pub mod chunk;
pub mod config;
pub mod decoder;
pub mod error;
pub mod progress;
pub mod record;

pub use cache::FrameCache;
pub use chunk::CHUNK_SIZE;
pub use config::CacheOptions;
pub use decoder::{FRAME_HEIGHT, FRAME_WIDTH, FrameDecoder};
pub use error::PsxFramesError;
pub use progress::{NoOpProgress, ProgressCallback, ProgressInfo};
pub use record::{ColorMode, FrameRecord};
