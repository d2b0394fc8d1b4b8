use crate::parallel;
use anyhow::Result;
use iceberg_core::IcebergDecoder;
use iceberg_io::parser;
use std::time::Instant;

pub fn run_benchmark(k: usize, counts_path: &str, iterations: usize) -> Result<()> {
    println!("Loading Counts from {}...", counts_path);
    let start_load = Instant::now();
    let counts = parser::load_counts_file(counts_path)?;
    let shots: u64 = counts.values().sum();
    println!(
        "Counts loaded in {:?}. Distinct outcomes: {}, Shots: {}",
        start_load.elapsed(),
        counts.len(),
        shots
    );

    let decoder = IcebergDecoder::new(k)?;
    let iterations = iterations.max(1);

    println!("Starting Benchmark (Sequential)...");
    let start_seq = Instant::now();
    for _ in 0..iterations {
        decoder.decode(&counts)?;
    }
    let seq_secs = start_seq.elapsed().as_secs_f64();

    println!("Starting Benchmark (Parallel - Rayon)...");
    let start_par = Instant::now();
    let mut survival_rate = 0.0;
    for _ in 0..iterations {
        survival_rate = parallel::decode_parallel(&decoder, &counts, parallel::DEFAULT_CHUNK)?
            .survival_rate();
    }
    let par_secs = start_par.elapsed().as_secs_f64();

    let outcomes = (counts.len() * iterations) as f64;
    println!("Results");
    println!("Iterations: {}", iterations);
    println!("Sequential: {:.4} s ({:.2} outcomes/s)", seq_secs, outcomes / seq_secs);
    println!("Parallel:   {:.4} s ({:.2} outcomes/s)", par_secs, outcomes / par_secs);
    println!("Survival rate: {:.6}", survival_rate);

    Ok(())
}
