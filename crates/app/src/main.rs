use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use frameplay_core::{
    render::BLACK, Canvas, FileLoader, MutedAudio, PlaybackClock, PlaybackController,
    PlayerConfig, Result,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.options.resolve()?;

    match cli.command {
        Commands::Play { linger } => run_play(&config, linger),
        Commands::Export { out, every } => run_export(&config, &out, every),
    }
}

#[cfg(feature = "audio")]
fn run_play(config: &PlayerConfig, linger: f32) -> Result<()> {
    use frameplay_core::{Pacer, RodioAudio};

    let fps = config.display.fps;
    tracing::info!(fps, pattern = %config.sequence.pattern, "starting playback");

    let audio = RodioAudio::new()?;
    let mut player = PlaybackController::from_config(config, FileLoader, audio)?;
    let mut canvas = Canvas::new(config.display.width, config.display.height);
    let mut pacer = Pacer::new(fps);
    let mut clock = PlaybackClock::new(fps);

    let linger_ticks = (linger.max(0.0) * fps as f32).ceil() as u64;
    let mut ended_ticks = 0;
    while ended_ticks <= linger_ticks {
        pacer.wait();
        canvas.clear(BLACK);
        player.tick(&mut canvas)?;
        clock.advance();

        if player.is_ended() {
            ended_ticks += 1;
        } else if clock.ticks() % u64::from(fps.max(1)) == 0 {
            tracing::debug!(elapsed = ?clock.elapsed(), ?player, "playing");
        }
    }

    tracing::info!(elapsed = ?clock.elapsed(), "playback finished");
    Ok(())
}

#[cfg(not(feature = "audio"))]
fn run_play(_config: &PlayerConfig, _linger: f32) -> Result<()> {
    Err(frameplay_core::FrameplayError::msg(
        "frameplay was built without audio output; rebuild with `--features audio`",
    ))
}

/// Drives the controller as fast as possible and writes canvas snapshots.
fn run_export(config: &PlayerConfig, out: &Path, every: u64) -> Result<()> {
    tracing::info!(?out, every, "exporting frames");
    std::fs::create_dir_all(out)?;

    let mut player = PlaybackController::from_config(config, FileLoader, MutedAudio::new())?;
    let mut canvas = Canvas::new(config.display.width, config.display.height);
    let mut clock = PlaybackClock::new(config.display.fps);
    let every = every.max(1);
    let mut written = 0usize;

    loop {
        canvas.clear(BLACK);
        player.tick(&mut canvas)?;
        clock.advance();

        let ended = player.is_ended();
        if ended || (clock.ticks() - 1) % every == 0 {
            let path = out.join(format!("tick{:06}.png", clock.ticks()));
            canvas.save_png(&path)?;
            written += 1;
            tracing::debug!(?path, "snapshot written");
        }
        if ended {
            break;
        }
    }

    tracing::info!(written, duration = ?clock.elapsed(), "export finished");
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Plays an image sequence in sync with an audio track", long_about = None)]
struct Cli {
    #[command(flatten)]
    options: ConfigOptions,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct ConfigOptions {
    /// JSON configuration file. Flags below override its values.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Frame path template, e.g. `assets/frame{}.png`.
    #[arg(long, global = true)]
    pattern: Option<String>,
    /// Number of frames in the sequence.
    #[arg(long, global = true)]
    frames: Option<usize>,
    /// Audio track played alongside the frames.
    #[arg(long, global = true)]
    audio: Option<PathBuf>,
    /// Ticks per second.
    #[arg(long, global = true)]
    fps: Option<u32>,
}

impl ConfigOptions {
    fn resolve(&self) -> Result<PlayerConfig> {
        let mut config = match &self.config {
            Some(path) => PlayerConfig::load(path)?,
            None => PlayerConfig::default(),
        };

        if let Some(pattern) = &self.pattern {
            config.sequence.pattern = pattern.clone();
        }
        if let Some(frames) = self.frames {
            config.sequence.frame_count = frames;
        }
        if let Some(audio) = &self.audio {
            config.audio.path = audio.clone();
        }
        if let Some(fps) = self.fps {
            config.display.fps = fps;
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play the sequence in real time with audio.
    Play {
        /// Seconds to keep showing the end message before exiting.
        #[arg(long, default_value_t = 3.0)]
        linger: f32,
    },
    /// Render every tick offline and write PNG snapshots.
    Export {
        /// Directory that receives the snapshots.
        #[arg(short, long)]
        out: PathBuf,
        /// Only keep every N-th tick. The end message is always written.
        #[arg(long, default_value_t = 1)]
        every: u64,
    },
}
