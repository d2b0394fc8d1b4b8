use iceberg_core::{Counts, DecodingResult, IcebergDecoder, IcebergError, Tally};
use rayon::prelude::*;

/// Distinct outcomes handed to one worker at a time.
pub const DEFAULT_CHUNK: usize = 4096;

/// Decodes `counts` with each chunk of distinct outcomes tallied on a rayon
/// worker. Partial tallies are merged before the result is built, so the
/// output is identical to `IcebergDecoder::decode`.
pub fn decode_parallel(
    decoder: &IcebergDecoder,
    counts: &Counts,
    chunk_size: usize,
) -> Result<DecodingResult, IcebergError> {
    let outcomes: Vec<(&String, &u64)> = counts.iter().collect();

    outcomes
        .par_chunks(chunk_size.max(1))
        .map(|chunk| decoder.tally(chunk.iter().copied()))
        .try_reduce(Tally::new, |a, b| Ok(a.merge(b)))?
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_counts(rng: &mut StdRng, n: usize, distinct: usize) -> Counts {
        let mut counts = Counts::new();
        for _ in 0..distinct {
            let flag = if rng.gen_bool(0.2) { '1' } else { '0' };
            let data: String = (0..n)
                .map(|_| if rng.gen_bool(0.5) { '1' } else { '0' })
                .collect();
            *counts.entry(format!("{flag} {data}")).or_insert(0) += rng.gen_range(1..100);
        }
        counts.insert(format!("0 {}", "0".repeat(n)), 1);
        counts
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(11);
        let decoder = IcebergDecoder::new(8).unwrap();
        let counts = random_counts(&mut rng, 10, 2000);
        let sequential = decoder.decode(&counts).unwrap();
        for chunk in [0, 1, 13, 512, 10_000] {
            assert_eq!(decode_parallel(&decoder, &counts, chunk).unwrap(), sequential);
        }
    }

    #[test]
    fn malformed_outcome_fails_parallel_pass() {
        let decoder = IcebergDecoder::new(2).unwrap();
        let mut counts = Counts::new();
        counts.insert("0 0011".to_string(), 3);
        counts.insert("0 001".to_string(), 1);
        assert!(matches!(
            decode_parallel(&decoder, &counts, 1),
            Err(IcebergError::MalformedOutcome { .. })
        ));
    }

    #[test]
    fn all_rejected_fails_parallel_pass() {
        let decoder = IcebergDecoder::new(2).unwrap();
        let mut counts = Counts::new();
        counts.insert("1 0011".to_string(), 3);
        counts.insert("0 0001".to_string(), 2);
        assert!(matches!(
            decode_parallel(&decoder, &counts, 1),
            Err(IcebergError::Decoding { shots: 5, .. })
        ));
    }
}
