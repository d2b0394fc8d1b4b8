//! Console report for decoded results.

use iceberg_core::{DecodingResult, IcebergDecoder};

/// Prints shot statistics and the most frequent logical bitstrings.
pub fn print_report(decoder: &IcebergDecoder, result: &DecodingResult, top: usize) {
    let params = decoder.params();
    let rejections = result.rejections();

    println!("\nIceberg Decode (k={}, n={})", params.k, params.n);
    println!("-------------------------------");
    println!("Shots:         {}", result.shots());
    println!("Valid:         {}", result.valid_count());
    println!(
        "Invalid:       {} (flagged {}, odd parity {})",
        result.invalid(),
        rejections.flagged,
        rejections.odd_parity
    );
    println!("Survival rate: {:.6}", result.survival_rate());
    if let Some((bits, count)) = result.most_likely() {
        println!("Most likely:   {} ({} shots)", bits, count);
    }

    let mut ranked: Vec<(&str, u64)> = result.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    println!("Logical outcomes (top {} of {}):", top.min(ranked.len()), ranked.len());
    for (bits, count) in ranked.into_iter().take(top) {
        println!(
            "  {}: {:>10}  p={:.6}",
            bits,
            count,
            result.probability(bits)
        );
    }
    println!("{}", result);
}
