use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use themedex::config::{AppConfig, ConfigError};
use themedex::core::catalog::load_catalog;
use themedex::core::team::{ElementType, EvolutionStage, GenerateTeamRequest, TeamGenerator};
use themedex::core::{api, logging};

#[derive(Parser)]
#[command(name = "themedex", version, about = "Theme-driven Pokémon team recommender")]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the catalog JSON files
    #[arg(long, global = true, env = "THEMEDEX_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve(ServeArgs),
    /// Generate one team and print it as JSON
    Generate(GenerateArgs),
}

#[derive(Args)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args)]
struct GenerateArgs {
    /// Free-text theme, e.g. "spooky dogs"
    theme: String,
    /// Team size (1-6)
    #[arg(long)]
    size: Option<i64>,
    /// any, fully-evolved or unevolved
    #[arg(long)]
    stage: Option<EvolutionStage>,
    /// Restrict to a generation; repeatable
    #[arg(long = "gen")]
    generations: Vec<u32>,
    #[arg(long)]
    exclude_legendaries: bool,
    #[arg(long)]
    allow_forms: bool,
    #[arg(long)]
    allow_mega: bool,
    #[arg(long)]
    allow_gmax: bool,
    #[arg(long)]
    allow_same_species: bool,
    #[arg(long)]
    allow_duplicates: bool,
    /// Require one of these types; repeatable
    #[arg(long)]
    include_type: Vec<ElementType>,
    /// Reject these types; repeatable
    #[arg(long)]
    exclude_type: Vec<ElementType>,
    /// Seed for reproducible selection
    #[arg(long)]
    seed: Option<u64>,
}

impl GenerateArgs {
    fn into_request(self) -> GenerateTeamRequest {
        let non_empty = |v: Vec<ElementType>| (!v.is_empty()).then_some(v);
        GenerateTeamRequest {
            theme_text: self.theme,
            team_size: self.size,
            evolution_stage: self.stage,
            generations: (!self.generations.is_empty()).then_some(self.generations),
            exclude_legendaries: Some(self.exclude_legendaries),
            allow_forms: Some(self.allow_forms),
            allow_mega: Some(self.allow_mega),
            allow_gmax: Some(self.allow_gmax),
            allow_same_species_multiple: Some(self.allow_same_species),
            allow_same_form_duplicates: Some(self.allow_duplicates),
            include_types: non_empty(self.include_type),
            exclude_types: non_empty(self.exclude_type),
        }
    }
}

fn warn_config_fallback(error: Option<&ConfigError>) {
    if let Some(e) = error {
        log::warn!("{e}; using defaults");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The default config file falls back to defaults; the warning waits
    // until logging is up.
    let (mut config, config_error) = match &cli.config {
        Some(path) => (AppConfig::load_from(path)?, None),
        None => match AppConfig::load() {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default().with_env_overrides(), Some(e)),
        },
    };
    if let Some(dir) = cli.data_dir {
        config.data.data_dir = Some(dir);
    }

    match cli.command {
        Commands::Serve(args) => {
            if let Some(host) = args.host {
                config.server.host = host;
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }

            let _log_guard = logging::init(&config.logging.level, &config.log_dir());
            warn_config_fallback(config_error.as_ref());
            log::info!("Themedex v{} starting", themedex::VERSION);

            let catalog = Arc::new(load_catalog(&config.data_dir())?);
            api::serve(&config.server, catalog).await?;
        }
        Commands::Generate(args) => {
            let _log_guard = logging::init_file_only(&config.logging.level, &config.log_dir());
            warn_config_fallback(config_error.as_ref());

            let seed = args.seed;
            let query = match args.into_request().into_query() {
                Ok(query) => query,
                Err(e) => {
                    for error in e.errors() {
                        eprintln!("{}: {}", error.field, error.message);
                    }
                    std::process::exit(2);
                }
            };

            let generator = TeamGenerator::new(Arc::new(load_catalog(&config.data_dir())?));
            let result = match seed {
                Some(seed) => generator.run_with_rng(&query, &mut StdRng::seed_from_u64(seed)),
                None => generator.run(&query),
            };

            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
