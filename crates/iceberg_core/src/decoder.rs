use crate::IcebergError;
use crate::outcome::{self, Rejection, Verdict};
use crate::result::DecodingResult;
use crate::tally::Tally;
use crate::transform::DecodingTransform;
use alloc::string::String;
use core::borrow::Borrow;
use iceberg_common::code::CodeParameters;

/// Outcome of decoding a single raw outcome string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Passed validation and decoded to this logical bitstring.
    Decoded(String),
    Rejected(Rejection),
}

/// Decoder for one logical width.
///
/// Holds the code parameters and the decoding transform. Immutable after
/// construction, so a single instance can serve any number of decode calls,
/// including concurrent ones.
#[derive(Debug, Clone)]
pub struct IcebergDecoder {
    params: CodeParameters,
    transform: DecodingTransform,
}

impl IcebergDecoder {
    /// Creates a decoder for `k` logical qubits.
    ///
    /// # Errors
    ///
    /// Returns `IcebergError::InvalidParameter` if `k` is zero.
    pub fn new(k: usize) -> Result<Self, IcebergError> {
        let transform = DecodingTransform::build(k)?;
        Ok(Self {
            params: CodeParameters::new(k),
            transform,
        })
    }

    pub fn k(&self) -> usize {
        self.params.k
    }

    /// Expected data register width, `k + 2`.
    pub fn n(&self) -> usize {
        self.params.n
    }

    pub fn params(&self) -> CodeParameters {
        self.params
    }

    pub fn transform(&self) -> &DecodingTransform {
        &self.transform
    }

    /// Validates one raw outcome and decodes it if it survives.
    ///
    /// # Errors
    ///
    /// Returns `IcebergError::MalformedOutcome` if the outcome does not have
    /// the register shape of this code.
    pub fn classify(&self, raw: &str) -> Result<Classification, IcebergError> {
        Ok(match outcome::validate(raw, self.params.n)? {
            Verdict::Accepted(data) => Classification::Decoded(self.transform.apply(&data)),
            Verdict::Rejected(rejection) => Classification::Rejected(rejection),
        })
    }

    /// Validates and decodes a batch of `(outcome, count)` pairs into a
    /// partial aggregate.
    ///
    /// Accepts anything that iterates over outcome/count pairs, such as a
    /// reference to a `BTreeMap<String, u64>` or `HashMap<String, u64>`.
    /// Stops at the first malformed outcome.
    pub fn tally<I, K, V>(&self, outcomes: I) -> Result<Tally, IcebergError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Borrow<u64>,
    {
        let mut tally = Tally::new();
        for (raw, count) in outcomes {
            let count = *count.borrow();
            match self.classify(raw.as_ref())? {
                Classification::Decoded(bits) => tally.record_decoded(bits, count),
                Classification::Rejected(rejection) => tally.record_rejected(rejection, count),
            }
        }
        Ok(tally)
    }

    /// Runs the full decode pass over an outcome-count mapping.
    ///
    /// # Errors
    ///
    /// * `IcebergError::MalformedOutcome` if any outcome has the wrong shape.
    /// * `IcebergError::Decoding` if no shot passes the syndrome check.
    pub fn decode<I, K, V>(&self, counts: I) -> Result<DecodingResult, IcebergError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Borrow<u64>,
    {
        self.tally(counts)?.finish()
    }
}
