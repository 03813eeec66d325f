/// Tapedeck - headless player and capture screens
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tapedeck_capture::{CaptureError, CaptureSession, CaptureSource};
use tapedeck_console::{
    run_player, ArgumentPicker, ConfiguredGate, ConsoleConfig, SimulatedEngine,
};
use tapedeck_core::format_clock;
use tapedeck_playback::PlaybackSession;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tapedeck")]
#[command(about = "Headless Tapedeck player and capture screens", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./tapedeck.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the configured playlist
    Playlist,
    /// Open the player and read transport commands from stdin
    Play {
        /// Playlist index to start at (overrides playback.start_index)
        #[arg(short, long)]
        start: Option<usize>,
    },
    /// Run the capture flow
    Capture {
        /// Where the image comes from
        #[arg(value_enum)]
        source: SourceArg,
        /// Image the picker returns; omit to simulate a canceled picker
        #[arg(long)]
        uri: Option<String>,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Camera,
    Library,
}

impl From<SourceArg> for CaptureSource {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Camera => CaptureSource::Camera,
            SourceArg::Library => CaptureSource::Library,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tapedeck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ConsoleConfig::load(cli.config.as_deref())?;
    if let Commands::Play { start: Some(start) } = cli.command {
        config.playback.start_index = start;
    }
    config.validate()?;

    match cli.command {
        Commands::Playlist => list_playlist(&config),
        Commands::Play { .. } => play(config).await?,
        Commands::Capture { source, uri } => capture(&config, source.into(), uri).await?,
        Commands::Config => print!("{}", config.to_toml()?),
    }

    Ok(())
}

fn list_playlist(config: &ConsoleConfig) {
    for (index, track) in config.playlist.iter().enumerate() {
        println!("{:>3}  {}  {}", index + 1, track.title, track.audio_uri);
    }
}

async fn play(config: ConsoleConfig) -> anyhow::Result<()> {
    let engine = Arc::new(SimulatedEngine::new(&config.simulation));
    tracing::info!(
        "Simulated engine: {} per track, status every {}ms",
        format_clock(std::time::Duration::from_secs(config.simulation.track_duration_secs)),
        config.simulation.status_interval_ms
    );

    let mut session = PlaybackSession::new(engine, config.playlist, config.playback);

    // A failed first load still opens the screen; the user can retry with next/prev
    if let Err(e) = session.mount().await {
        tracing::warn!("Initial load failed: {}", e);
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_player(&mut session, stdin, &mut stdout).await?;

    Ok(())
}

async fn capture(
    config: &ConsoleConfig,
    source: CaptureSource,
    uri: Option<String>,
) -> anyhow::Result<()> {
    let gate = Arc::new(ConfiguredGate::new(config.permissions));
    let picker = Arc::new(ArgumentPicker::new(uri));
    let mut session = CaptureSession::new(gate, picker);

    match session.capture(source).await {
        Ok(Some(uri)) => println!("selected {}", uri),
        Ok(None) => println!("nothing selected"),
        Err(CaptureError::PermissionDenied) => {
            println!("Permission denied: please grant camera and photo library access to continue.");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
