//! Galcat: catalog resolution and split assembly for galaxy survey datasets.
//!
//! Galcat turns a split request (`train`, `test`, `labelled`, `unlabelled`,
//! `train+unlabelled`) into one shuffled in-memory catalog table: it decides
//! which presplit partition files the request needs, optionally downloads
//! and checksum-verifies them, loads and concatenates the Parquet
//! partitions, and hands the table plus the fixed all-campaigns label column
//! set to a small dataset wrapper.
//!
//! # Modules
//!
//! - [`split`]: split keywords and the partition membership table
//! - [`store`]: storage roots, partition descriptors, download/verification
//! - [`catalog`]: the in-memory table, Parquet loading, concat and shuffle
//! - [`schema`]: the fixed all-campaigns label column set
//! - [`dataset`]: indexable wrapper handed to training pipelines
//! - [`legs`]: prepared end-to-end entry points
//! - [`error`]: error types for galcat operations

pub mod catalog;
pub mod dataset;
pub mod error;
pub mod legs;
pub mod schema;
pub mod split;
pub mod store;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::GalcatError;
pub use split::{PartitionKind, Split};

use store::resolve::SplitResolver;
use store::StorageRoot;

/// The galcat CLI application.
#[derive(Parser)]
#[command(name = "galcat")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show which partition files a split resolves to.
    Resolve(ResolveArgs),
    /// Load, merge, and summarize a split.
    Assemble(AssembleArgs),
}

/// Arguments for the resolve subcommand.
#[derive(clap::Args)]
struct ResolveArgs {
    /// Split keyword ('train', 'test', 'labelled', 'unlabelled' or
    /// 'train+unlabelled').
    #[arg(long)]
    split: String,

    /// Download and checksum-verify the catalog set first.
    #[arg(long)]
    download: bool,

    /// Use this directory instead of the probe-then-fallback roots.
    #[arg(long)]
    storage_root: Option<PathBuf>,
}

/// Arguments for the assemble subcommand.
#[derive(clap::Args)]
struct AssembleArgs {
    /// Split keyword ('train', 'test', 'labelled', 'unlabelled' or
    /// 'train+unlabelled').
    #[arg(long)]
    split: String,

    /// Download and checksum-verify the catalog set first.
    #[arg(long)]
    download: bool,

    /// Use this directory instead of the probe-then-fallback roots.
    #[arg(long)]
    storage_root: Option<PathBuf>,

    /// Shuffle seed (fresh entropy when omitted).
    #[arg(long)]
    seed: Option<u64>,
}

/// Run the galcat CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), GalcatError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Resolve(args)) => run_resolve(args),
        Some(Commands::Assemble(args)) => run_assemble(args),
        None => {
            println!("galcat {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Catalog resolution and split assembly for galaxy survey datasets.");
            println!();
            println!("Run 'galcat --help' for usage information.");
            Ok(())
        }
    }
}

fn resolver_for(storage_root: Option<PathBuf>) -> SplitResolver {
    let Some(path) = storage_root else {
        return SplitResolver::legs();
    };
    let resolver = SplitResolver::new(StorageRoot::fixed(path));
    #[cfg(feature = "remote")]
    let resolver = resolver.with_transport(Box::new(store::download::HttpTransport));
    resolver
}

/// Execute the resolve subcommand.
fn run_resolve(args: ResolveArgs) -> Result<(), GalcatError> {
    let split: Split = args.split.parse()?;
    let resolver = resolver_for(args.storage_root);
    let resolution = resolver.resolve(None, split, args.download, None)?;

    println!("storage root: {}", resolution.root.display());
    for partition in &resolution.partitions {
        println!(
            "  {:<10} {}  sha256:{}",
            partition.kind, partition.file_name, partition.sha256
        );
    }
    Ok(())
}

/// Execute the assemble subcommand.
fn run_assemble(args: AssembleArgs) -> Result<(), GalcatError> {
    let split: Split = args.split.parse()?;
    let resolver = resolver_for(args.storage_root);
    let resolution = resolver.resolve(None, split, args.download, None)?;
    let table = catalog::assemble(&resolution.root, &resolution.partitions, args.seed)?;

    println!(
        "assembled {} rows x {} columns from {} partition(s) for split '{}'",
        table.len(),
        table.columns().len(),
        resolution.partitions.len(),
        split
    );

    let label_cols = schema::all_campaigns_label_cols();
    let present = label_cols
        .iter()
        .filter(|column| table.column_index(column).is_some())
        .count();
    println!(
        "label schema: {}/{} all-campaigns columns present",
        present,
        label_cols.len()
    );
    Ok(())
}
