//! Decoded result statistics.
//!
//! A `DecodingResult` is computed once from the final aggregated counts and
//! never changes afterwards. All derived figures (valid count, shot total,
//! survival rate, probabilities) are fixed at construction.

use crate::IcebergError;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;

/// Number of buckets previewed by the `Display` impl.
const PREVIEW_LEN: usize = 3;

/// Breakdown of shots discarded by syndrome validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rejections {
    /// Shots where at least one flag register bit was set.
    pub flagged: u64,
    /// Shots with clean flags but an odd-weight data register.
    pub odd_parity: u64,
}

impl Rejections {
    pub fn total(&self) -> u64 {
        self.flagged + self.odd_parity
    }
}

/// Aggregated logical counts and the statistics derived from them.
///
/// Invariants, all established by [`DecodingResult::new`]:
/// `valid_count == counts.values().sum()`, `shots == invalid + valid_count`,
/// `survival_rate == valid_count / shots` and every probability is
/// `count / valid_count`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodingResult {
    counts: BTreeMap<String, u64>,
    rejections: Rejections,
    invalid: u64,
    valid_count: u64,
    shots: u64,
    survival_rate: f64,
    probabilities: BTreeMap<String, f64>,
}

impl DecodingResult {
    /// Builds a result from decoded buckets and the rejection breakdown.
    ///
    /// # Errors
    ///
    /// Returns `IcebergError::Decoding` if no shot survived, either because
    /// `counts` is empty or because its counts sum to zero. Survival rate and
    /// probabilities are undefined in that case.
    pub fn new(counts: BTreeMap<String, u64>, rejections: Rejections) -> Result<Self, IcebergError> {
        let invalid = rejections.total();
        let valid_count: u64 = counts.values().sum();
        let shots = invalid + valid_count;

        if valid_count == 0 {
            return Err(IcebergError::Decoding { shots, rejections });
        }

        let survival_rate = valid_count as f64 / shots as f64;
        let probabilities = counts
            .iter()
            .map(|(bits, &c)| (bits.clone(), c as f64 / valid_count as f64))
            .collect();

        Ok(Self {
            counts,
            rejections,
            invalid,
            valid_count,
            shots,
            survival_rate,
            probabilities,
        })
    }

    /// Decoded logical bitstrings and their aggregated counts.
    pub fn counts(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }

    /// Total number of shots discarded by validation.
    pub fn invalid(&self) -> u64 {
        self.invalid
    }

    pub fn rejections(&self) -> Rejections {
        self.rejections
    }

    /// Total number of shots that passed validation.
    pub fn valid_count(&self) -> u64 {
        self.valid_count
    }

    /// `invalid + valid_count`.
    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// Fraction of shots that passed validation.
    pub fn survival_rate(&self) -> f64 {
        self.survival_rate
    }

    /// Probability of each decoded bitstring among surviving shots.
    pub fn probabilities(&self) -> &BTreeMap<String, f64> {
        &self.probabilities
    }

    /// Probability of one bitstring, zero if it was never observed.
    pub fn probability(&self, bits: &str) -> f64 {
        self.probabilities.get(bits).copied().unwrap_or(0.0)
    }

    /// Bitstring with the highest count.
    ///
    /// Ties resolve to the lexicographically smallest bitstring.
    pub fn most_likely(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(bits, &c)| (bits.as_str(), c))
    }

    /// Iterates `(bitstring, count)` pairs in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(bits, &c)| (bits.as_str(), c))
    }
}

impl fmt::Display for DecodingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DecodingResult(shots={}, survival_rate={}, invalid={}, counts={{",
            self.shots, self.survival_rate, self.invalid
        )?;
        for (i, (bits, c)) in self.iter().take(PREVIEW_LEN).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", bits, c)?;
        }
        if self.counts.len() > PREVIEW_LEN {
            f.write_str(", ...")?;
        }
        f.write_str("})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;

    fn counts(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs.iter().map(|&(b, c)| (b.to_string(), c)).collect()
    }

    #[test]
    fn statistics_follow_counts() {
        let r = DecodingResult::new(
            counts(&[("01", 10), ("10", 5)]),
            Rejections {
                flagged: 2,
                odd_parity: 1,
            },
        )
        .unwrap();
        assert_eq!(r.invalid(), 3);
        assert_eq!(r.valid_count(), 15);
        assert_eq!(r.shots(), 18);
        assert_eq!(r.survival_rate(), 15.0 / 18.0);
        assert_eq!(r.probability("01"), 10.0 / 15.0);
        assert_eq!(r.probability("11"), 0.0);
        let total: f64 = r.probabilities().values().sum();
        let drift = total - 1.0;
        assert!(drift < 1e-12 && drift > -1e-12);
    }

    #[test]
    fn empty_counts_fail_with_shot_total() {
        let rejections = Rejections {
            flagged: 4,
            odd_parity: 3,
        };
        assert_eq!(
            DecodingResult::new(BTreeMap::new(), rejections),
            Err(IcebergError::Decoding {
                shots: 7,
                rejections
            })
        );
    }

    #[test]
    fn zero_valued_buckets_still_fail() {
        let err = DecodingResult::new(counts(&[("00", 0)]), Rejections::default()).unwrap_err();
        assert!(matches!(err, IcebergError::Decoding { shots: 0, .. }));
    }

    #[test]
    fn most_likely_breaks_ties_lexicographically() {
        let r = DecodingResult::new(
            counts(&[("11", 4), ("01", 4), ("00", 1)]),
            Rejections::default(),
        )
        .unwrap();
        assert_eq!(r.most_likely(), Some(("01", 4)));
    }

    #[test]
    fn display_previews_first_buckets() {
        let r = DecodingResult::new(
            counts(&[("00", 1), ("01", 2), ("10", 3), ("11", 4)]),
            Rejections::default(),
        )
        .unwrap();
        assert_eq!(
            format!("{r}"),
            "DecodingResult(shots=10, survival_rate=1, invalid=0, counts={00: 1, 01: 2, 10: 3, ...})"
        );

        let short = DecodingResult::new(counts(&[("1", 2)]), Rejections::default()).unwrap();
        assert_eq!(
            short.to_string(),
            "DecodingResult(shots=2, survival_rate=1, invalid=0, counts={1: 2})"
        );
    }
}
