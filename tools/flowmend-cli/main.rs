use clap::{Args, Parser, Subcommand};
use flowmend::batch::timestamped_backup_dir;
use flowmend::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

/// Repairs connections and re-lays out node-based workflow files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize `connections` to name-keyed, deduplicated canonical form
    Repair {
        #[command(flatten)]
        batch: BatchArgs,
        /// Create a simple left-to-right chain when no connection survives
        #[arg(long)]
        infer: bool,
    },
    /// Recompute node positions in layers from trigger nodes
    Layout {
        #[command(flatten)]
        batch: BatchArgs,
    },
    /// Remove duplicate documentation notes and empty nodes, then repair connections
    Clean {
        #[command(flatten)]
        batch: BatchArgs,
    },
    /// Clean, repair and lay out in one pass
    All {
        #[command(flatten)]
        batch: BatchArgs,
        /// Create a simple left-to-right chain when no connection survives
        #[arg(long)]
        infer: bool,
    },
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Root directory containing workflow .json files
    #[arg(long)]
    workflows_dir: Option<PathBuf>,

    /// Only process the first N files
    #[arg(long)]
    limit: Option<usize>,

    /// Report changes without writing (default)
    #[arg(long, conflicts_with = "apply")]
    dry_run: bool,

    /// Write changes back, backing up originals first
    #[arg(long)]
    apply: bool,

    /// Backup directory; defaults to a timestamped folder under the configured backup root
    #[arg(long)]
    backup_dir: Option<PathBuf>,

    /// Process files one at a time
    #[arg(long)]
    sequential: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", default_filter))
        .init();

    let mut config = load_config(cli.config.as_deref())
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load configuration: {}", e)));

    match cli.command {
        Command::Repair { batch, infer } => {
            config.repair.infer_chain |= infer;
            let pass = ConnectionNormalizer::from_config(&config.repair);
            run_batch("repair_connections", &batch, &config, &pass);
        }
        Command::Layout { batch } => {
            let pass = LayoutEngine::new(config.layout.clone());
            run_batch("auto_layout", &batch, &config, &pass);
        }
        Command::Clean { batch } => {
            let pass = Pipeline::new()
                .with_pass(DocumentCleaner::new(config.cleanup.clone()))
                .with_pass(ConnectionNormalizer::from_config(&config.repair));
            run_batch("cleanup", &batch, &config, &pass);
        }
        Command::All { batch, infer } => {
            config.repair.infer_chain |= infer;
            let pass = Pipeline::new()
                .with_pass(DocumentCleaner::new(config.cleanup.clone()))
                .with_pass(ConnectionNormalizer::from_config(&config.repair))
                .with_pass(LayoutEngine::new(config.layout.clone()));
            run_batch("all", &batch, &config, &pass);
        }
    }
}

fn run_batch(task: &str, args: &BatchArgs, config: &FlowmendConfig, pass: &dyn DocumentPass) {
    let start = Instant::now();

    let workflows_dir = args
        .workflows_dir
        .clone()
        .unwrap_or_else(|| config.batch.workflows_dir.clone());
    let backup_dir = args
        .backup_dir
        .clone()
        .unwrap_or_else(|| timestamped_backup_dir(&config.batch.backup_root, task));
    let mode = if args.apply && !args.dry_run {
        RunMode::Apply
    } else {
        RunMode::DryRun
    };
    let limit = args.limit.or(config.batch.limit);

    println!(
        "START {} | dir={} | dry_run={} | infer={} | limit={}",
        task,
        workflows_dir.display(),
        mode == RunMode::DryRun,
        config.repair.infer_chain,
        limit.map_or("all".to_string(), |l| l.to_string())
    );

    let runner = BatchRunner::new(workflows_dir, backup_dir)
        .with_mode(mode)
        .with_limit(limit)
        .with_parallel(config.batch.parallel && !args.sequential);

    let summary = runner
        .run(pass)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    println!();
    print!("{}", summary);
    if mode == RunMode::Apply && summary.files_modified > 0 {
        println!("\nBackups in: {}", runner.backup_dir().display());
    }
    println!("\nFinished in {:?}", start.elapsed());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
