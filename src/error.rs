//! Error types for the `psxframes` crate.
//!
//! This module defines [`PsxFramesError`], the unified error type returned by
//! all fallible operations in the crate. Variants carry the paths and
//! dimensions needed to diagnose a failure without extra logging at the call
//! site.

use std::{io::Error as IoError, path::PathBuf};

use image::ImageError;
use thiserror::Error;

/// The unified error type for all `psxframes` operations.
///
/// Every public method that can fail returns `Result<T, PsxFramesError>`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PsxFramesError {
    /// A decode from raw chunks was required, but no jPSXdec jar was
    /// configured.
    ///
    /// Serving frames from an already-populated disk cache never needs the
    /// decoder; this error only occurs once a cache miss forces a decode.
    #[error("Decoding required but no jPSXdec jar is configured")]
    DecoderNotConfigured,

    /// The raw video source file does not exist.
    ///
    /// Returned before any decoder invocation or cache file is created, so a
    /// failed request leaves the cache untouched.
    #[error("Could not find raw video source at {path}")]
    SourceNotFound {
        /// Resolved path that was probed for the raw source.
        path: PathBuf,
    },

    /// The decoder ran but the expected output image never appeared.
    ///
    /// jPSXdec's exit status is not consulted; a missing output file is the
    /// only failure signal the invocation contract provides.
    #[error("Decoder produced no output image at {expected}")]
    DecoderOutputMissing {
        /// Path where the decoded image was expected to appear.
        expected: PathBuf,
    },

    /// A cached frame record's byte buffer no longer matches its recorded
    /// dimensions and color mode.
    #[error("Frame record buffer does not match {width}x{height} dimensions")]
    CorruptFrameRecord {
        /// Recorded frame width in pixels.
        width: u32,
        /// Recorded frame height in pixels.
        height: u32,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while decoding or encoding a cache
    /// file.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}
