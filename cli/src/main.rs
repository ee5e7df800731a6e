use std::path::PathBuf;

use clap::Parser;
use roster_index::config::{LeagueConfig, RunConfig};
use roster_index::error::BuildError;
use roster_index::normalize::DEFAULT_MIN_NAME_LEN;
use roster_index::sources::nflverse::{latest_started_season, FIRST_SEASON};
use roster_index::{fetch, logging, output, pipeline};

#[derive(Parser)]
#[command(name = "roster-index")]
#[command(about = "Compile MLB and NFL roster history into player and team-season indices")]
struct Cli {
    /// Directory holding the extracted Lahman CSV files
    #[arg(long, default_value = "lahman")]
    lahman_dir: PathBuf,

    /// Directory holding nflverse roster_<season>.csv files
    #[arg(long, default_value = "nfl")]
    nfl_dir: PathBuf,

    /// First NFL season to include
    #[arg(long, default_value_t = FIRST_SEASON)]
    nfl_first_season: u32,

    /// Last NFL season to include (defaults to the latest season that has started)
    #[arg(long)]
    nfl_last_season: Option<u32>,

    /// Directory the JSON artifacts are written to
    #[arg(short, long, default_value = "data")]
    out_dir: PathBuf,

    /// Shortest MLB name accepted, in characters
    #[arg(long, default_value_t = DEFAULT_MIN_NAME_LEN)]
    mlb_min_name_len: usize,

    /// Shortest NFL name accepted, in characters
    #[arg(long, default_value_t = DEFAULT_MIN_NAME_LEN)]
    nfl_min_name_len: usize,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Download missing NFL roster files before building
    #[arg(long)]
    fetch_nfl: bool,

    /// Delay between roster downloads in milliseconds
    #[arg(short, long, default_value = "100")]
    delay: u64,
}

impl Cli {
    fn into_config(self) -> RunConfig {
        let last_season = self
            .nfl_last_season
            .unwrap_or_else(|| latest_started_season(chrono::Utc::now().date_naive()));
        RunConfig {
            mlb: LeagueConfig {
                source_dir: self.lahman_dir,
                min_name_len: self.mlb_min_name_len,
            },
            nfl: LeagueConfig {
                source_dir: self.nfl_dir,
                min_name_len: self.nfl_min_name_len,
            },
            nfl_seasons: self.nfl_first_season..=last_season,
            out_dir: self.out_dir,
            pretty: self.pretty,
            fetch_nfl: self.fetch_nfl,
            fetch_delay_ms: self.delay,
        }
    }
}

async fn run(config: RunConfig) -> anyhow::Result<()> {
    config.validate().map_err(BuildError::from)?;

    println!("📚 Roster Index Builder");
    println!("MLB source: {}", config.mlb.source_dir.display());
    println!(
        "NFL source: {} (seasons {}-{})",
        config.nfl.source_dir.display(),
        config.nfl_seasons.start(),
        config.nfl_seasons.end()
    );

    if config.fetch_nfl {
        let client = fetch::build_client()?;
        let fetched = fetch::fetch_missing_rosters(
            &client,
            &config.nfl.source_dir,
            config.nfl_seasons.clone(),
            config.fetch_delay_ms,
        )
        .await?;
        if !fetched.is_empty() {
            println!("⬇️  Downloaded {} NFL roster file(s)", fetched.len());
        }
    }

    let runs = pipeline::run_all(config.adapters()).await?;
    let written = output::write_artifacts(&config.out_dir, &runs, config.pretty)?;

    println!("\n📊 Dataset Summary:");
    for (run, artifact) in runs.iter().zip(&written) {
        println!("   {}:", run.league);
        println!("      Players: {}", run.dataset.player_count());
        println!("      Team-seasons: {}", run.dataset.team_season_count());
        println!(
            "      Rows kept: {} (dropped {}, short names {})",
            run.report.kept,
            run.report.dropped(),
            run.report.short_names
        );
        println!(
            "      Saved to: {} ({:.2} KB)",
            artifact.path.display(),
            artifact.bytes as f64 / 1024.0
        );
    }
    println!("✅ Done!");
    Ok(())
}

#[tokio::main]
async fn main() {
    logging::init_logging();
    let config = Cli::parse().into_config();

    if let Err(err) = run(config).await {
        match err.downcast_ref::<BuildError>() {
            Some(BuildError::MissingSource(missing)) => {
                eprintln!("❌ Cannot build roster indices: {missing}");
            }
            _ => eprintln!("❌ {err:#}"),
        }
        std::process::exit(1);
    }
}
