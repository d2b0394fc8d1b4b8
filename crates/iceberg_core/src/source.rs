use crate::IcebergError;
use crate::decoder::IcebergDecoder;
use crate::result::DecodingResult;
use alloc::collections::BTreeMap;
use alloc::string::String;

/// Mapping from raw outcome strings to occurrence counts.
pub type Counts = BTreeMap<String, u64>;

/// Anything that can hand back the final outcome counts of an execution.
///
/// Plain count maps implement this directly. Handles to submitted or
/// completed executions implement it by fetching their result, and map
/// their own failures onto `IcebergError::Retrieval`.
pub trait CountsSource {
    fn retrieve_counts(&self) -> Result<Counts, IcebergError>;
}

impl CountsSource for Counts {
    fn retrieve_counts(&self) -> Result<Counts, IcebergError> {
        Ok(self.clone())
    }
}

impl<T: CountsSource + ?Sized> CountsSource for &T {
    fn retrieve_counts(&self) -> Result<Counts, IcebergError> {
        (**self).retrieve_counts()
    }
}

/// Builds a decoder for `k` logical qubits and decodes the counts of
/// `source` with it.
///
/// The decoder is built first, so an invalid `k` is reported without
/// touching the source.
pub fn decode<S: CountsSource + ?Sized>(source: &S, k: usize) -> Result<DecodingResult, IcebergError> {
    let decoder = IcebergDecoder::new(k)?;
    let counts = source.retrieve_counts()?;
    decoder.decode(&counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use core::cell::Cell;

    struct FinishedJob {
        counts: Counts,
        fetches: Cell<usize>,
    }

    impl CountsSource for FinishedJob {
        fn retrieve_counts(&self) -> Result<Counts, IcebergError> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(self.counts.clone())
        }
    }

    struct FailedJob;

    impl CountsSource for FailedJob {
        fn retrieve_counts(&self) -> Result<Counts, IcebergError> {
            Err(IcebergError::Retrieval {
                reason: "job was cancelled".to_string(),
            })
        }
    }

    fn sample() -> Counts {
        [("0 0 0011", 10), ("0 0 1001", 5), ("1 0 0000", 3)]
            .into_iter()
            .map(|(o, c)| (o.to_string(), c))
            .collect()
    }

    #[test]
    fn plain_counts_decode_directly() {
        let r = decode(&sample(), 2).unwrap();
        assert_eq!(r.counts().get("01"), Some(&10));
        assert_eq!(r.counts().get("11"), Some(&5));
        assert_eq!(r.shots(), 18);
    }

    #[test]
    fn job_handle_is_fetched_once() {
        let job = FinishedJob {
            counts: sample(),
            fetches: Cell::new(0),
        };
        let r = decode(&job, 2).unwrap();
        assert_eq!(job.fetches.get(), 1);
        assert_eq!(r.invalid(), 3);
    }

    #[test]
    fn invalid_k_skips_retrieval() {
        let job = FinishedJob {
            counts: sample(),
            fetches: Cell::new(0),
        };
        assert_eq!(
            decode(&job, 0).unwrap_err(),
            IcebergError::InvalidParameter { k: 0 }
        );
        assert_eq!(job.fetches.get(), 0);
    }

    #[test]
    fn retrieval_failure_is_propagated() {
        assert!(matches!(
            decode(&FailedJob, 2),
            Err(IcebergError::Retrieval { .. })
        ));
    }
}
