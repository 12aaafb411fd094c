use anyhow::{Context, Result};
use clap::Parser;
use dataprep::{data, prep, tracking::Tracker};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "dataprep")]
#[command(about = "Prepare raw tabular data into train/test partitions")]
struct Args {
    /// Path to the raw dataset file
    #[arg(long)]
    raw_data: PathBuf,

    /// Output directory for the train partition (written as data.csv)
    #[arg(long)]
    train_data: PathBuf,

    /// Output directory for the test partition (written as data.csv)
    #[arg(long)]
    test_data: PathBuf,

    /// Fraction of rows routed to the TEST partition. Despite the name,
    /// this is the test size: the default 0.8 reserves 80% of rows for
    /// testing.
    #[arg(long, default_value_t = 0.8)]
    test_train_ratio: f64,

    /// Categorical column to label-encode
    #[arg(long, default_value = "Segment")]
    label_column: String,

    /// Seed for the partition shuffle
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Root directory for experiment-run artifacts
    #[arg(long, default_value = "runs")]
    runs_dir: PathBuf,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    info!(
        raw = %args.raw_data.display(),
        train = %args.train_data.display(),
        test = %args.test_data.display(),
        ratio = args.test_train_ratio,
        seed = args.seed,
        "startup"
    );

    // ─── 2) open the tracking run ────────────────────────────────────
    // Held for the whole preparation; an early return closes it as Failed.
    let tracker = Tracker::new(&args.runs_dir)?;
    let mut run = tracker.start_run()?;

    // ─── 3) load, encode, split ──────────────────────────────────────
    let split = prep::encode_and_split(
        &args.raw_data,
        &args.label_column,
        args.test_train_ratio,
        args.seed,
    )?;

    // ─── 4) write partitions ─────────────────────────────────────────
    data::write_csv(&split.train, &args.train_data)?;
    data::write_csv(&split.test, &args.test_data)?;

    // ─── 5) log metrics and close the run ────────────────────────────
    run.log_metric("train_size", split.train.len() as f64);
    run.log_metric("test_size", split.test.len() as f64);
    run.finish().context("closing tracking run")?;

    info!(
        train_rows = split.train.len(),
        test_rows = split.test.len(),
        "data preparation complete"
    );
    Ok(())
}
