/// Lollypop - headless playback sequencer
use clap::{Parser, Subcommand, ValueEnum};
use lollypop_cli::{
    commands::{self, PlayOptions},
    CliConfig,
};
use lollypop_core::{GenreId, PlayMode, TrackId};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lollypop")]
#[command(about = "Lollypop playback sequencer", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./lollypop.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and run migrations
    Init,
    /// Add an album with numbered tracks
    AddAlbum {
        /// Album name
        #[arg(short, long)]
        name: String,
        /// Number of tracks
        #[arg(short, long)]
        tracks: u32,
        /// Genre name to tag every track with
        #[arg(short, long)]
        genre: Option<String>,
    },
    /// Set the play mode
    SetMode {
        #[arg(value_enum)]
        mode: ModeArg,
    },
    /// Restrict party mode to these genre ids (none = whole library)
    SetPartyGenres { ids: Vec<i64> },
    /// Print the tracks the sequencer would play
    Play {
        /// Number of tracks (default from config)
        #[arg(long)]
        count: Option<usize>,
        /// Track ids to queue before sequencing
        #[arg(long, num_args = 1..)]
        queue: Vec<i64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Linear,
    ShuffleTracks,
    ShuffleAlbums,
    Party,
}

impl From<ModeArg> for PlayMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Linear => PlayMode::Linear,
            ModeArg::ShuffleTracks => PlayMode::ShuffleTracks,
            ModeArg::ShuffleAlbums => PlayMode::ShuffleAlbums,
            ModeArg::Party => PlayMode::Party,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "lollypop=info,lollypop_cli=info,lollypop_playback=info,lollypop_storage=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    let pool = lollypop_storage::create_pool(&config.database_url).await?;
    lollypop_storage::run_migrations(&pool).await?;

    match cli.command {
        Commands::Init => {
            tracing::info!(url = %config.database_url, "database ready");
        }
        Commands::AddAlbum {
            name,
            tracks,
            genre,
        } => {
            let album = commands::add_album(&pool, &name, tracks, genre.as_deref()).await?;
            println!("Added album {} ({}) with {} tracks", name, album, tracks);
        }
        Commands::SetMode { mode } => {
            commands::set_mode(&pool, mode.into()).await?;
        }
        Commands::SetPartyGenres { ids } => {
            let ids: Vec<GenreId> = ids.into_iter().map(GenreId::new).collect();
            commands::set_party_genres(&pool, &ids).await?;
        }
        Commands::Play { count, queue } => {
            let options = PlayOptions {
                count: count.unwrap_or(config.playback.count),
                queue: queue.into_iter().map(TrackId::new).collect(),
                seed: config.playback.seed,
            };

            let played = commands::play(pool, options).await?;
            if played.is_empty() {
                println!("Nothing to play");
            }
            for (n, track) in played.iter().enumerate() {
                println!("{:>3}. {} ({})", n + 1, track.title, track.id);
            }
        }
    }

    Ok(())
}
