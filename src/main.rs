use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use feed_ranker::synthetic::{generate_request, SyntheticOptions};
use feed_ranker::{Feed, RankingConfig, RankingRequest, Ranker};
use std::io::{self, Read};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "feed-ranker", about = "Multi-feed ranking engine for events and posts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank a request read from a file or stdin
    Rank(RankArgs),
    /// Serve POST /feed/rank over HTTP
    Serve(ServeArgs),
    /// Print a reproducible synthetic request
    Synthetic(SyntheticArgs),
    /// Print or write the effective scoring config
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct RankArgs {
    #[arg(long)]
    input: Option<PathBuf>,
    /// Pin the ranking clock (RFC3339)
    #[arg(long)]
    now: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print per-feed scores instead of bare ids
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct SyntheticArgs {
    #[arg(long, default_value_t = 50)]
    events: usize,
    #[arg(long, default_value_t = 50)]
    posts: usize,
    #[arg(long, default_value_t = 7)]
    seed: u64,
    #[arg(long)]
    now: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    write: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Rank(args) => run_rank(args),
        Command::Serve(args) => run_serve(args).await,
        Command::Synthetic(args) => run_synthetic(args),
        Command::Config(args) => run_config(args),
    }
}

fn run_rank(args: RankArgs) -> Result<(), String> {
    let (config, config_path) = RankingConfig::load(args.config)?;
    debug!(config = ?config_path, "loaded scoring config");

    let payload = read_input(args.input.as_deref())?;
    let request: RankingRequest = serde_json::from_str(&payload)
        .map_err(|err| format!("invalid request body: {}", err))?;
    let now = parse_now(args.now.as_deref())?;

    let ranker = Ranker::new(&config);
    let serialized = if args.details {
        let detailed = ranker
            .rank_detailed(&request, now)
            .map_err(|err| err.to_string())?;
        for feed in Feed::ALL {
            debug!(feed = feed.key(), len = detailed.scores(feed).len(), "feed ranked");
        }
        serde_json::to_string_pretty(&detailed)
    } else {
        let response = ranker.rank_at(&request, now).map_err(|err| err.to_string())?;
        serde_json::to_string_pretty(&response)
    };
    let output =
        serialized.map_err(|err| format!("failed to serialize response: {}", err))?;

    println!("{}", output);
    Ok(())
}

async fn run_serve(args: ServeArgs) -> Result<(), String> {
    let (config, config_path) = RankingConfig::load(args.config)?;
    info!(config = ?config_path, "loaded scoring config");

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;
    feed_ranker::server::serve(addr, &config).await
}

fn run_synthetic(args: SyntheticArgs) -> Result<(), String> {
    let options = SyntheticOptions {
        seed: args.seed,
        events: args.events,
        posts: args.posts,
    };
    let request = generate_request(&options, parse_now(args.now.as_deref())?);
    let payload = serde_json::to_string_pretty(&request)
        .map_err(|err| format!("failed to serialize request: {}", err))?;
    println!("{}", payload);
    Ok(())
}

fn run_config(args: ConfigArgs) -> Result<(), String> {
    let (config, _) = RankingConfig::load(args.config)?;
    match args.write {
        Some(path) => {
            config.write(&path)?;
            info!(path = %path.display(), "wrote scoring config");
        }
        None => println!("{}", config.to_toml()?),
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String, String> {
    if let Some(path) = path {
        return std::fs::read_to_string(path)
            .map_err(|err| format!("failed reading {}: {}", path.display(), err));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    if buffer.trim().is_empty() {
        return Err("missing request: pass --input or pipe JSON on stdin".to_string());
    }
    Ok(buffer)
}

fn parse_now(value: Option<&str>) -> Result<DateTime<Utc>, String> {
    match value {
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(|instant| instant.with_timezone(&Utc))
            .map_err(|err| format!("invalid --now timestamp {}: {}", value, err)),
        None => Ok(Utc::now()),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
