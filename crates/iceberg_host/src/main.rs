mod parallel;
mod report;
mod throughput;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use iceberg_core::{CountsSource, IcebergDecoder};
use iceberg_io::job::{CountsFile, ShotRecordFile};
use iceberg_io::loader::RegisterLayout;
use std::time::Instant;

#[derive(Parser)]
#[command(about = "Decode iceberg error-detection outcomes into logical results")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and decode one set of outcome counts.
    Decode {
        /// Number of logical qubits.
        #[arg(short, long)]
        k: usize,
        /// Counts text file (dictionary literal or `outcome: count` lines).
        #[arg(short, long, conflicts_with = "b8")]
        counts: Option<String>,
        /// Packed shot-record file.
        #[arg(short, long, requires = "registers")]
        b8: Option<String>,
        /// Register widths of each .b8 record, data register last (e.g. `1,1,4`).
        #[arg(short, long)]
        registers: Option<RegisterLayout>,
        /// Number of logical bitstrings to list.
        #[arg(long, default_value_t = 8)]
        top: usize,
        /// Split the decode pass across worker threads.
        #[arg(long)]
        parallel: bool,
    },
    /// Measure decode throughput on a counts file.
    Bench {
        #[arg(short, long)]
        k: usize,
        #[arg(short, long)]
        counts: String,
        #[arg(long, default_value_t = 100)]
        iterations: usize,
    },
}

fn open_source(
    counts: Option<String>,
    b8: Option<String>,
    registers: Option<RegisterLayout>,
) -> Result<Box<dyn CountsSource>> {
    match (counts, b8, registers) {
        (Some(path), None, _) => Ok(Box::new(CountsFile::new(path))),
        (None, Some(path), Some(layout)) => Ok(Box::new(ShotRecordFile::new(path, layout))),
        _ => bail!("pass either --counts <FILE> or --b8 <FILE> --registers <WIDTHS>"),
    }
}

fn run_decode(
    k: usize,
    source: &dyn CountsSource,
    top: usize,
    parallel: bool,
) -> Result<()> {
    let decoder = IcebergDecoder::new(k)?;

    let start_load = Instant::now();
    let counts = source.retrieve_counts()?;
    println!(
        "Loaded {} distinct outcomes in {:?}.",
        counts.len(),
        start_load.elapsed()
    );

    let start_decode = Instant::now();
    let result = if parallel {
        parallel::decode_parallel(&decoder, &counts, parallel::DEFAULT_CHUNK)?
    } else {
        decoder.decode(&counts)?
    };
    println!("Decoded in {:?}.", start_decode.elapsed());

    report::print_report(&decoder, &result, top);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Decode {
            k,
            counts,
            b8,
            registers,
            top,
            parallel,
        } => {
            let source = open_source(counts, b8, registers)?;
            run_decode(k, source.as_ref(), top, parallel)?;
        }
        Commands::Bench {
            k,
            counts,
            iterations,
        } => {
            throughput::run_benchmark(k, &counts, iterations)?;
        }
    }
    Ok(())
}
