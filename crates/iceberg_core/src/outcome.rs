//! Raw outcome parsing and syndrome validation.
//!
//! An outcome string holds zero or more flag registers followed by exactly
//! one data register, separated by whitespace. A shot survives validation
//! when every flag bit is zero and the data register has even weight.

use crate::IcebergError;
use crate::bit_utils::BitPack;
use alloc::string::ToString;
use alloc::vec::Vec;
use iceberg_common::format;

/// Why an outcome string could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    /// The outcome has no registers at all.
    #[error("outcome contains no registers")]
    Empty,

    /// A register contains something other than '0' or '1'.
    ///
    /// `register` is the 0-based position of the register in the outcome;
    /// the data register is the last one.
    #[error("register {register} contains non-binary character {character:?}")]
    NonBinary { register: usize, character: char },

    /// The data register does not have `k + 2` bits.
    #[error("data register has {found} bits, expected {expected}")]
    DataWidth { expected: usize, found: usize },
}

/// Why a well-formed shot was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// At least one flag register bit was set.
    Flagged,
    /// The data register had odd weight.
    OddParity,
}

/// Validation verdict for one well-formed outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Passed both checks; carries the packed data register.
    Accepted(Vec<u64>),
    Rejected(Rejection),
}

/// Parses `raw` and runs the syndrome check against a data register of
/// width `n`.
///
/// Every register is checked for shape before any verdict is returned, so a
/// malformed outcome is reported even when a flag has already fired. A
/// flagged shot is reported as `Flagged` whatever its parity.
///
/// # Errors
///
/// Returns `IcebergError::MalformedOutcome` for empty outcomes, non-binary
/// characters or a data register of the wrong width.
pub fn validate(raw: &str, n: usize) -> Result<Verdict, IcebergError> {
    let malformed = |reason| IcebergError::MalformedOutcome {
        outcome: raw.to_string(),
        reason,
    };

    let mut registers = raw.split_ascii_whitespace();
    let data = registers
        .next_back()
        .ok_or_else(|| malformed(MalformedReason::Empty))?;

    let mut flagged = false;
    let mut num_flags = 0;
    for (register, flags) in registers.enumerate() {
        for character in flags.chars() {
            match format::char_value(character) {
                Some(bit) => flagged |= bit,
                None => {
                    return Err(malformed(MalformedReason::NonBinary {
                        register,
                        character,
                    }));
                }
            }
        }
        num_flags += 1;
    }

    if let Some(character) = data.chars().find(|&c| format::char_value(c).is_none()) {
        return Err(malformed(MalformedReason::NonBinary {
            register: num_flags,
            character,
        }));
    }

    if data.len() != n {
        return Err(malformed(MalformedReason::DataWidth {
            expected: n,
            found: data.len(),
        }));
    }

    let mut words = BitPack::zeroed(n);
    for (i, c) in data.bytes().enumerate() {
        BitPack::set(&mut words, i, c == format::ONE);
    }

    if flagged {
        Ok(Verdict::Rejected(Rejection::Flagged))
    } else if BitPack::weight(&words) % 2 == 1 {
        Ok(Verdict::Rejected(Rejection::OddParity))
    } else {
        Ok(Verdict::Accepted(words))
    }
}
