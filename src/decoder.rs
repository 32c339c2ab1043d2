//! External decoder invocation.
//!
//! [`FrameDecoder`] turns one raw frame chunk into one PNG on disk by
//! delegating to [jPSXdec](https://github.com/m35/jpsxdec), invoked as a
//! black-box `java -jar` subprocess. The chunk is staged into a uniquely
//! named temporary `.bin` file, decoded in static bitstream mode at the
//! fixed PSX movie dimensions, and the resulting image is relocated to the
//! caller's output path.
//!
//! jPSXdec offers no flag to choose an output directory; it writes a
//! same-basename `.png` next to its input, relative to its working
//! directory. The subprocess is therefore launched with its working
//! directory set to the temp file's directory, which scopes the output
//! location to the child process without touching any process-global state.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::error::PsxFramesError;

/// Width in pixels of a decoded movie frame.
pub const FRAME_WIDTH: u32 = 304;

/// Height in pixels of a decoded movie frame.
pub const FRAME_HEIGHT: u32 = 176;

/// Invoker for the external jPSXdec decoder.
///
/// # Example
///
/// ```no_run
/// use psxframes::{FrameDecoder, PsxFramesError};
///
/// let decoder = FrameDecoder::new("tools/jpsxdec.jar");
/// let chunk = std::fs::read("frame0.bin")?;
/// decoder.dump_frame(&chunk, "cache/video_0000.png".as_ref())?;
/// # Ok::<(), PsxFramesError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    /// Path to the jPSXdec jar artifact.
    jar_path: PathBuf,
    /// Program used to launch the jar. Defaults to `java` from `PATH`.
    launcher: PathBuf,
}

impl FrameDecoder {
    /// Create a decoder for the given jPSXdec jar.
    pub fn new<P: Into<PathBuf>>(jar_path: P) -> Self {
        Self {
            jar_path: jar_path.into(),
            launcher: PathBuf::from("java"),
        }
    }

    /// Override the launcher binary used to run the jar.
    ///
    /// Useful to pin a specific JRE instead of whatever `java` resolves to
    /// on `PATH`.
    #[must_use]
    pub fn with_launcher<P: Into<PathBuf>>(mut self, launcher: P) -> Self {
        self.launcher = launcher.into();
        self
    }

    /// Decode one raw chunk into an image file at `output_path`.
    ///
    /// Blocks until the decoder subprocess exits. The subprocess's exit
    /// status is logged but not inspected: the only recognised failure
    /// signal is the expected output image being absent afterwards. No
    /// retry is attempted.
    ///
    /// A failed decode can leave the staged temp image behind in the system
    /// temp directory; it is never passed off as output.
    ///
    /// # Errors
    ///
    /// Returns [`PsxFramesError::DecoderOutputMissing`] if the decoder did
    /// not produce the expected image, or [`PsxFramesError::IoError`] for
    /// staging/relocation failures (including a launcher that cannot be
    /// spawned).
    pub fn dump_frame(&self, chunk: &[u8], output_path: &Path) -> Result<(), PsxFramesError> {
        let mut staged = tempfile::Builder::new()
            .prefix("psxframe_")
            .suffix(".bin")
            .tempfile()?;
        staged.write_all(chunk)?;
        staged.flush()?;

        let staged_path = staged.path();
        let staged_dir = staged_path.parent().unwrap_or(Path::new("."));
        // jPSXdec writes `<input stem>.png` into its working directory.
        let produced = staged_path.with_extension("png");

        log::debug!(
            "Invoking jPSXdec on {} ({} bytes)",
            staged_path.display(),
            chunk.len(),
        );

        let output = Command::new(&self.launcher)
            .arg("-jar")
            .arg(&self.jar_path)
            .arg("-f")
            .arg(staged_path)
            .args(["-static", "bs"])
            .arg("-dim")
            .arg(format!("{FRAME_WIDTH}x{FRAME_HEIGHT}"))
            .args(["-fmt", "png", "-quality", "psx"])
            .current_dir(staged_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()?;

        // Exit status is informational only; a missing output file is the
        // contract's sole failure signal.
        log::debug!("jPSXdec exited with {}", output.status);
        if !output.stderr.is_empty() {
            log::debug!(
                "jPSXdec stderr: {}",
                String::from_utf8_lossy(&output.stderr).trim_end(),
            );
        }

        if !produced.exists() {
            return Err(PsxFramesError::DecoderOutputMissing { expected: produced });
        }

        relocate(&produced, output_path)?;
        Ok(())
    }
}

/// Move `from` to `to`, falling back to copy-and-delete when a plain rename
/// fails (the system temp directory is frequently on a different
/// filesystem than the cache directory).
fn relocate(from: &Path, to: &Path) -> std::io::Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)?;
    fs::remove_file(from)
}
