use anyhow::{bail, Context, Result};
use chrono::DateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use history::{CandidateId, HistoryStore, JsonlHistoryStore, UserId, DEFAULT_MEMORY_KEY};
use pipeline::filters::{AlreadyServedFilter, Parity, ParityFilter};
use pipeline::sorters::{PreferredSorter, TierSorter};
use recommender::{RecommendBuilder, RecommendError, Recommender};
use sources::FixedRecaller;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// Pool recalled when `--recall` is not given
const DEMO_POOL: [CandidateId; 20] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 101, 201, 301, 401, 500, 601, 700, 800, 991, 1000,
];

/// recs - tiered candidate recommendation pipeline
#[derive(Parser)]
#[command(name = "recs")]
#[command(about = "Recall, filter, tier and shuffle candidates for one user", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch recommendations from the demo pipeline
    Fetch(FetchArgs),

    /// Show the served history recorded in a history file
    History {
        /// JSON-lines history file
        #[arg(long)]
        history: PathBuf,

        /// Key the history was recorded under
        #[arg(long, default_value = DEFAULT_MEMORY_KEY)]
        memory_key: String,
    },

    /// Run concurrent fetches against one shared stack
    Bench {
        /// Number of fetches to make
        #[arg(long, default_value = "1000")]
        requests: usize,

        /// Number of fetches in flight at once
        #[arg(long, default_value = "10")]
        concurrent: usize,

        /// Candidates requested per fetch
        #[arg(long, default_value = "20")]
        size: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ParityArg {
    Odd,
    Even,
    Any,
}

#[derive(Args)]
struct FetchArgs {
    /// User to recommend for
    #[arg(long, default_value = "0")]
    user_id: UserId,

    /// Maximum number of candidates to return
    #[arg(long, default_value = "100")]
    size: usize,

    /// Comma-separated candidate pool (defaults to the demo pool)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    recall: Vec<CandidateId>,

    /// Which candidate ids survive the parity filter
    #[arg(long, value_enum, default_value = "odd")]
    parity: ParityArg,

    /// Keep candidates matching no tier in a final catch-all tier
    #[arg(long)]
    catch_all: bool,

    /// Re-fetch the shortfall up to N times
    #[arg(long)]
    retry: Option<usize>,

    /// Fail instead of returning an empty result
    #[arg(long)]
    require_non_empty: bool,

    /// Record served candidates to this JSON-lines file
    #[arg(long)]
    history: Option<PathBuf>,

    /// Key served candidates are recorded under
    #[arg(long, default_value = DEFAULT_MEMORY_KEY)]
    memory_key: String,

    /// Skip candidates already recorded in --history
    #[arg(long, requires = "history")]
    exclude_served: bool,

    /// Seed the shuffle for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Comma-separated ids moved ahead of everything else after grouping
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    prefer: Vec<CandidateId>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Fetch(args) => handle_fetch(args)?,
        Commands::History {
            history,
            memory_key,
        } => handle_history(history, memory_key)?,
        Commands::Bench {
            requests,
            concurrent,
            size,
        } => handle_bench(requests, concurrent, size).await?,
    }

    Ok(())
}

/// The tiers from the demo: big ids first, then small positive ones,
/// then negative ones
fn bigger_group(catch_all: bool) -> TierSorter {
    let sorter = TierSorter::new("BiggerGroup")
        .tier("above_100", |id| *id > 100)
        .tier("below_50", |id| *id > 0 && *id < 50)
        .tier("negative", |id| *id < 0);
    if catch_all {
        sorter.catch_all()
    } else {
        sorter
    }
}

/// Wire the demo collaborators and decorator stack from the fetch flags
fn build_stack(args: &FetchArgs) -> Box<dyn Recommender> {
    let pool = if args.recall.is_empty() {
        DEMO_POOL.to_vec()
    } else {
        args.recall.clone()
    };
    let mut builder = RecommendBuilder::new(args.user_id, FixedRecaller::new("cli", pool));

    let store: Option<Arc<dyn HistoryStore>> = args
        .history
        .as_ref()
        .map(|path| Arc::new(JsonlHistoryStore::new(path)) as Arc<dyn HistoryStore>);

    if let (Some(store), true) = (&store, args.exclude_served) {
        builder = builder.filter_rule(AlreadyServedFilter::new(store.clone(), args.memory_key.clone()));
    }
    match args.parity {
        ParityArg::Odd => builder = builder.filter_rule(ParityFilter::new(Parity::Odd)),
        ParityArg::Even => builder = builder.filter_rule(ParityFilter::new(Parity::Even)),
        ParityArg::Any => {}
    }
    builder = builder.sorter(bigger_group(args.catch_all));
    if !args.prefer.is_empty() {
        builder = builder.post_sorter(PreferredSorter::new("preferred", args.prefer.iter().copied()));
    }

    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    if let Some(retry) = args.retry {
        builder = builder.retry(retry);
    }
    if args.require_non_empty {
        builder = builder.require_non_empty();
    }
    if let Some(store) = store {
        builder = builder.remember(store, args.memory_key.clone());
    }
    builder.build()
}

/// Handle the 'fetch' command
fn handle_fetch(args: FetchArgs) -> Result<()> {
    let stack = build_stack(&args);
    info!("Fetching {} candidates for user {}", args.size, args.user_id);

    match stack.fetch(args.size) {
        Ok(candidates) => {
            print_candidates(&candidates);
            Ok(())
        }
        Err(RecommendError::Persistence {
            key,
            served,
            source,
        }) => {
            // The result is valid; only recording it failed
            print_candidates(&served);
            println!(
                "{} served history was not recorded under {}",
                "!".yellow(),
                key
            );
            Err(source).context("Failed to record served history")
        }
        Err(e) => Err(e).context("Fetch failed"),
    }
}

/// Handle the 'history' command
fn handle_history(path: PathBuf, memory_key: String) -> Result<()> {
    let store = JsonlHistoryStore::new(&path);
    let served = store
        .served(&memory_key)
        .with_context(|| format!("Failed to read history from {}", path.display()))?;

    println!(
        "{}",
        format!("Served under '{}' ({} candidates):", memory_key, served.len())
            .bold()
            .blue()
    );
    for entry in served {
        let served_at = DateTime::from_timestamp(entry.score as i64, 0)
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| format!("{}", entry.score));
        println!("  {} {}", entry.member.to_string().green(), served_at);
    }
    Ok(())
}

/// Handle the 'bench' command
async fn handle_bench(requests: usize, concurrent: usize, size: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    let stack: Arc<dyn Recommender> = Arc::from(
        RecommendBuilder::new(0, FixedRecaller::new("bench", (1..=10_000).collect()))
            .filter_rule(ParityFilter::new(Parity::Odd))
            .sorter(bigger_group(true))
            .build(),
    );
    let permits = Arc::new(Semaphore::new(concurrent.max(1)));

    let wall = Instant::now();
    let mut handles = Vec::with_capacity(requests);
    for _ in 0..requests {
        let stack = Arc::clone(&stack);
        let permits = Arc::clone(&permits);
        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            // fetch is synchronous, keep it off the async workers
            let elapsed = tokio::task::spawn_blocking(move || -> Result<Duration> {
                let start = Instant::now();
                stack.fetch(size)?;
                Ok(start.elapsed())
            })
            .await??;
            Ok::<_, anyhow::Error>(elapsed)
        }));
    }

    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await??);
    }
    let wall_time = wall.elapsed();

    timings.sort();
    let total: Duration = timings.iter().sum();
    let avg_latency = total / timings.len() as u32;
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!(
        "Throughput: {:.2} requests/second",
        requests as f32 / wall_time.as_secs_f32()
    );

    Ok(())
}

/// Helper function to print fetched candidates
fn print_candidates(candidates: &[CandidateId]) {
    if candidates.is_empty() {
        println!("{}", "No candidates".yellow());
        return;
    }
    println!("{}", format!("Recommendations ({}):", candidates.len()).bold().blue());
    for (i, id) in candidates.iter().enumerate() {
        println!("{}. {}", (i + 1).to_string().green(), id);
    }
}
