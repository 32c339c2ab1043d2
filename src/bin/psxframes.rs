use std::{io, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use image::GenericImageView;
use indicatif::{ProgressBar, ProgressStyle};
use psxframes::{CacheOptions, FrameCache, ProgressCallback, ProgressInfo};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  psxframes dump MOVIE.BIN --cache-dir cache --raw-dir videos --jar jpsxdec.jar --progress\n  psxframes status MOVIE.BIN --cache-dir cache --json\n  psxframes completions zsh > _psxframes";

#[derive(Debug, Parser)]
#[command(
    name = "psxframes",
    version,
    about = "Decode and cache PlayStation motion-video frames via jPSXdec",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional output.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar while decoding.
    #[arg(long)]
    progress: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Decode all frames for a source into the cache (alias: decode).
    #[command(
        about = "Decode and cache all frames for a source video",
        visible_alias = "decode",
        after_help = "Examples:\n  psxframes dump MOVIE.BIN --cache-dir cache --raw-dir videos --jar jpsxdec.jar\n  psxframes dump MOVIE.BIN --cache-dir cache"
    )]
    Dump {
        /// Source video filename (resolved inside --raw-dir when decoding).
        source: String,

        /// Directory holding the decoded PNG cache.
        #[arg(long, default_value = "cache")]
        cache_dir: PathBuf,

        /// Directory holding raw video sources.
        #[arg(long)]
        raw_dir: Option<PathBuf>,

        /// Path to the jPSXdec jar (required on a cache miss).
        #[arg(long)]
        jar: Option<PathBuf>,

        /// Launcher binary used to run the jar.
        #[arg(long, default_value = "java")]
        java: PathBuf,
    },

    /// Report how many frames are cached on disk for a source.
    #[command(
        about = "Show the cached frame count for a source",
        after_help = "Examples:\n  psxframes status MOVIE.BIN --cache-dir cache\n  psxframes status MOVIE.BIN --cache-dir cache --json"
    )]
    Status {
        /// Source video filename.
        source: String,

        /// Directory holding the decoded PNG cache.
        #[arg(long, default_value = "cache")]
        cache_dir: PathBuf,

        /// Print machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Drives an `indicatif` bar from the library's per-frame callbacks.
///
/// The frame total is only known once decoding starts, so the bar's length
/// is set from the first progress snapshot.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(0);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }

    fn finish(&self) {
        if self.bar.length().unwrap_or(0) > 0 {
            self.bar.finish_with_message("done");
        }
    }
}

impl ProgressCallback for BarProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if self.bar.length() != Some(info.total) {
            self.bar.set_length(info.total);
        }
        self.bar.set_position(info.current);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dump {
            source,
            cache_dir,
            raw_dir,
            jar,
            java,
        } => {
            let mut options = CacheOptions::new(&cache_dir).with_launcher(java);
            if let Some(raw_dir) = raw_dir {
                options = options.with_raw_video_dir(raw_dir);
            }
            if let Some(jar) = jar {
                options = options.with_decoder_jar(jar);
            }

            if cli.global.verbose {
                eprintln!("cache directory: {}", cache_dir.display());
            }

            let mut cache = FrameCache::new(options);
            let frames = if cli.global.progress {
                let bar = BarProgress::new()?;
                let frames = cache.frames_with_progress(&source, &bar)?;
                bar.finish();
                frames
            } else {
                cache.frames(&source)?
            };

            if cli.global.verbose {
                if let Some(frame) = frames.first() {
                    eprintln!("frame size: {}x{}", frame.width(), frame.height());
                }
            }

            println!(
                "{} {}",
                "success:".green().bold(),
                format!(
                    "{} frame(s) for {source} in {}",
                    frames.len(),
                    cache_dir.display()
                )
                .green()
            );
        }
        Commands::Status {
            source,
            cache_dir,
            json,
        } => {
            let cache = FrameCache::new(CacheOptions::new(&cache_dir));
            let cached = cache.cached_frame_count(&source);

            if json {
                let payload = json!({
                    "source": source,
                    "cache_dir": cache_dir.display().to_string(),
                    "cached_frames": cached,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else if cached == 0 {
                println!(
                    "{} {}",
                    "warning:".yellow().bold(),
                    format!("no cached frames for {source} in {}", cache_dir.display()).yellow()
                );
            } else {
                println!("Cached frames: {cached}");
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "psxframes", &mut io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
