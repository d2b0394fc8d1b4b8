//! I/O utilities for feeding outcome counts to the iceberg decoder.
//!
//! Provides parsers for outcome-count text files, a loader for packed
//! per-shot measurement records (.b8 files), and file-backed handles that
//! expose either format through the decoder's counts-source interface.

/// File-backed handles implementing `CountsSource`.
///
/// Wraps a path (and, for shot records, the register layout) and reads the
/// file lazily when counts are retrieved. Read and parse failures surface
/// as retrieval errors from the decode call.
pub mod job;

/// Loader for packed shot records.
///
/// Reads binary .b8 files, slices them into per-shot records according to a
/// register layout and histograms the rendered outcome strings into counts.
pub mod loader;

/// Parser for outcome-count text files.
///
/// Accepts dictionary literals and line-oriented `outcome: count` files and
/// builds a counts mapping from either.
pub mod parser;
