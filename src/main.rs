use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scenetext::assets::AssetLoader;
use scenetext::error::GenerateError;
use scenetext::models::{AppConfig, GenerationFilters};
use scenetext::server;
use scenetext::services::Generator;

#[derive(Parser)]
#[command(name = "scenetext")]
#[command(about = "Synthetic scene-text images with contrast-aware text color")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Render samples straight to disk
    Generate {
        /// Number of samples to render
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,

        /// Comma-separated scripts, e.g. "latin,korean"
        #[arg(long, value_delimiter = ',')]
        scripts: Vec<String>,

        /// Comma-separated languages
        #[arg(long, value_delimiter = ',')]
        languages: Vec<String>,

        /// Comma-separated font weights, e.g. "400,700"
        #[arg(long, value_delimiter = ',')]
        weights: Vec<u16>,

        /// Comma-separated font categories
        #[arg(long, value_delimiter = ',')]
        categories: Vec<String>,

        /// Comma-separated font styles ("normal", "italic")
        #[arg(long, value_delimiter = ',')]
        styles: Vec<String>,

        /// Output directory (default: output_dir from the config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Generate {
            count,
            scripts,
            languages,
            weights,
            categories,
            styles,
            output,
            seed,
        }) => {
            let filters = GenerationFilters {
                scripts: non_empty(scripts),
                languages: non_empty(languages),
                weights: non_empty(weights),
                categories: non_empty(categories),
                styles: non_empty(styles),
            };
            run_generate_command(count, filters, output, seed)
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn non_empty<T>(list: Vec<T>) -> Option<Vec<T>> {
    (!list.is_empty()).then_some(list)
}

/// Render samples to disk without starting the server
fn run_generate_command(
    count: u32,
    filters: GenerationFilters,
    output: Option<PathBuf>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scenetext=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut config = AppConfig::from_env()?;
    config.save_to_disk = true;
    if let Some(output) = output {
        config.output_dir = output;
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut catalog = AssetLoader::new(config.asset_paths()).load()?;
    if config.shuffle_on_start {
        catalog.shuffle(&mut rng);
    }
    let generator = Generator::new(Arc::new(catalog), &config);

    let mut generated = 0;
    for _ in 0..count {
        match generator.generate(&filters, &mut rng) {
            Ok(result) => {
                generated += 1;
                println!(
                    "Generated {} [{}/{}, {}, {}] {:?}",
                    result
                        .image_path
                        .as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default(),
                    result.script,
                    result.language,
                    result.font_face,
                    result.text_color,
                    result.text,
                );
            }
            Err(GenerateError::Filter(e)) => {
                anyhow::bail!("Please check your filters: {e}");
            }
            Err(e @ GenerateError::RetriesExhausted { .. }) => {
                eprintln!("Skipped: {e}");
            }
        }
    }

    println!(
        "{generated} of {count} samples written to {}",
        config.output_dir.display()
    );
    Ok(())
}

/// Show environment and configuration status
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let assets_dir = std::env::var("ASSETS_DIR").ok();

    println!("scenetext v{VERSION}");
    println!("Synthetic scene-text image generator\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:8000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("config.yaml (default)")
    );
    println!(
        "  ASSETS_DIR  = {}",
        assets_dir.as_deref().unwrap_or("(not set)")
    );

    println!("\nConfiguration:");
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("  error: {e}");
            return;
        }
    };
    println!("  save_to_disk = {}", config.save_to_disk);
    println!("  output_dir   = {}", config.output_dir.display());
    println!("  max_attempts = {}", config.max_attempts);
    println!("  scripts      = {}", config.default_scripts.join(", "));

    fn presence(path: &Path) -> &'static str {
        if path.exists() {
            "ok"
        } else {
            "missing"
        }
    }

    let paths = config.asset_paths();
    println!("\nAssets:");
    for (label, path) in [
        ("Backgrounds", &paths.backgrounds),
        ("Fonts", &paths.fonts_manifest),
        ("Words", &paths.words),
        ("Palettes", &paths.palettes),
    ] {
        println!("  {label:<12}{} ({})", path.display(), presence(path));
    }

    println!("\nCommands:");
    println!("  scenetext serve      Start the HTTP server");
    println!("  scenetext generate   Render samples to disk");
    println!("\nRun 'scenetext --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scenetext=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    tracing::info!(
        assets_dir = %config.assets_dir.display(),
        save_to_disk = config.save_to_disk,
        "Loading asset catalog"
    );
    let state = server::create_app_state(&config)?;
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "scenetext server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
