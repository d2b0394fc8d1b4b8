//! Core decoding engine for iceberg quantum error-detecting codes.
//!
//! This crate turns raw measurement outcomes into validated logical results:
//! it builds the fixed decoding transform for a logical qubit count, checks
//! every outcome against the code's flag and parity rules, maps surviving
//! data registers onto logical bitstrings and aggregates the counts into a
//! statistics-bearing result. Everything here is pure computation and runs
//! in `no_std` environments with an allocator.

#![no_std]

extern crate alloc;

use alloc::string::String;

/// Bit manipulation utilities for packed registers.
///
/// Provides word-level helpers for storing data registers and transform rows
/// as packed u64 words and for computing the parity of their overlap.
pub mod bit_utils;

/// Iceberg decoder engine.
///
/// Holds the code parameters and the decoding transform for one logical
/// width, and runs the validate/decode/aggregate pass over outcome counts.
pub mod decoder;

/// Raw outcome parsing and syndrome validation.
///
/// Splits an outcome string into flag registers and a data register, rejects
/// malformed input and classifies well-formed shots as accepted, flagged or
/// odd-parity.
pub mod outcome;

/// Aggregated decoding result and its derived statistics.
pub mod result;

/// Counts sources and the single-call `decode` entry point.
///
/// Abstracts over anything that can hand back a final outcome-count mapping,
/// such as a plain map or a handle to a finished execution.
pub mod source;

/// Partial aggregates of decoded and rejected shots.
///
/// A tally is built per batch of outcomes and can be merged with other
/// tallies before being turned into a final result, which lets callers split
/// the decode pass across workers.
pub mod tally;

/// Decoding transform construction.
///
/// Builds the `k × (k+2)` boolean matrix that maps a validated data register
/// onto its logical bitstring.
pub mod transform;

pub use decoder::IcebergDecoder;
pub use outcome::MalformedReason;
pub use result::{DecodingResult, Rejections};
pub use source::{Counts, CountsSource, decode};
pub use tally::Tally;
pub use transform::DecodingTransform;

/// Error types returned by decoding operations.
///
/// Malformed input and invalid parameters signal a mismatch between the
/// caller and the upstream circuit; `Decoding` is the one failure expected
/// under normal operation, when noise rejects every shot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IcebergError {
    /// The logical qubit count is not a positive integer.
    ///
    /// Raised when constructing a transform or a decoder; nothing is built.
    #[error("invalid logical qubit count {k}: must be at least 1")]
    InvalidParameter { k: usize },

    /// An outcome string does not have the expected register shape.
    ///
    /// The decode pass stops at the first malformed outcome rather than
    /// skipping it, because a malformed outcome means the counts were not
    /// produced for this code width.
    #[error("malformed outcome {outcome:?}: {reason}")]
    MalformedOutcome {
        outcome: String,
        reason: MalformedReason,
    },

    /// Every shot failed syndrome validation.
    ///
    /// Carries the total number of shots seen and how they were rejected.
    /// Callers usually respond by simplifying the circuit or sampling more
    /// shots.
    #[error(
        "syndrome checks failed for all {shots} shots ({} flagged, {} odd parity); \
         consider reducing circuit complexity or increasing the number of samples",
        .rejections.flagged,
        .rejections.odd_parity
    )]
    Decoding { shots: u64, rejections: Rejections },

    /// A counts source could not produce its outcome counts.
    #[error("failed to retrieve outcome counts: {reason}")]
    Retrieval { reason: String },
}
