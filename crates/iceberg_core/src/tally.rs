use crate::IcebergError;
use crate::outcome::Rejection;
use crate::result::{DecodingResult, Rejections};
use alloc::collections::BTreeMap;
use alloc::string::String;

/// Running aggregate of one decode pass, or of one slice of it.
///
/// Aggregation is commutative and associative, so tallies built over
/// disjoint batches of outcomes can be merged in any order and finish into
/// the same result as a single sequential pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    buckets: BTreeMap<String, u64>,
    rejections: Rejections,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` shots to the bucket of a decoded bitstring.
    pub fn record_decoded(&mut self, bits: String, count: u64) {
        *self.buckets.entry(bits).or_insert(0) += count;
    }

    /// Adds `count` shots to the rejection breakdown.
    pub fn record_rejected(&mut self, rejection: Rejection, count: u64) {
        match rejection {
            Rejection::Flagged => self.rejections.flagged += count,
            Rejection::OddParity => self.rejections.odd_parity += count,
        }
    }

    /// Folds `other` into `self`, summing buckets that share a bitstring.
    pub fn merge(mut self, other: Tally) -> Self {
        // fold the smaller map into the larger one
        let (mut into, from) = if self.buckets.len() >= other.buckets.len() {
            (core::mem::take(&mut self.buckets), other.buckets)
        } else {
            (other.buckets, core::mem::take(&mut self.buckets))
        };
        for (bits, c) in from {
            *into.entry(bits).or_insert(0) += c;
        }
        Self {
            buckets: into,
            rejections: Rejections {
                flagged: self.rejections.flagged + other.rejections.flagged,
                odd_parity: self.rejections.odd_parity + other.rejections.odd_parity,
            },
        }
    }

    pub fn buckets(&self) -> &BTreeMap<String, u64> {
        &self.buckets
    }

    pub fn rejections(&self) -> Rejections {
        self.rejections
    }

    /// Total shots seen so far, accepted or not.
    pub fn shots(&self) -> u64 {
        self.buckets.values().sum::<u64>() + self.rejections.total()
    }

    /// Turns the aggregate into a final result.
    ///
    /// # Errors
    ///
    /// Returns `IcebergError::Decoding` if no shot survived validation.
    pub fn finish(self) -> Result<DecodingResult, IcebergError> {
        DecodingResult::new(self.buckets, self.rejections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn record_accumulates_per_bucket() {
        let mut t = Tally::new();
        t.record_decoded("01".to_string(), 3);
        t.record_decoded("01".to_string(), 4);
        t.record_rejected(Rejection::Flagged, 2);
        t.record_rejected(Rejection::OddParity, 1);
        assert_eq!(t.buckets().get("01"), Some(&7));
        assert_eq!(t.shots(), 10);
    }

    #[test]
    fn merge_is_order_independent() {
        let mut a = Tally::new();
        a.record_decoded("00".to_string(), 1);
        a.record_decoded("11".to_string(), 2);
        a.record_rejected(Rejection::Flagged, 5);

        let mut b = Tally::new();
        b.record_decoded("11".to_string(), 3);
        b.record_rejected(Rejection::OddParity, 7);

        let ab = a.clone().merge(b.clone());
        let ba = b.merge(a);
        assert_eq!(ab, ba);
        assert_eq!(ab.buckets().get("11"), Some(&5));
        assert_eq!(
            ab.rejections(),
            Rejections {
                flagged: 5,
                odd_parity: 7
            }
        );
    }

    #[test]
    fn finishing_an_empty_tally_fails() {
        assert!(matches!(
            Tally::new().finish(),
            Err(IcebergError::Decoding { shots: 0, .. })
        ));
    }
}
