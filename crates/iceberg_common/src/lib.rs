//! Common definitions shared across the iceberg decoding workspace.
//!
//! This crate provides the derived parameters of an iceberg error-detecting
//! code and the character alphabet of raw measurement outcome strings. Both
//! the decoding core and the host-side I/O layer depend on these so that the
//! register shape is defined in exactly one place.

#![no_std]

/// Outcome-string alphabet used by the execution backend.
///
/// A raw outcome is a run of classical registers separated by a single
/// space, most-significant register first. Every register is a contiguous
/// run of '0'/'1' characters. The last register is always the data register.
pub mod format {
    /// Character for a measured zero.
    pub const ZERO: u8 = b'0';

    /// Character for a measured one.
    pub const ONE: u8 = b'1';

    /// Separator placed between registers when an outcome string is rendered.
    ///
    /// Parsing accepts any run of ASCII whitespace between registers; only
    /// rendering is tied to this exact character.
    pub const REGISTER_SEPARATOR: char = ' ';

    /// Returns the bit value of an outcome character, or `None` if the
    /// character is not part of the binary alphabet.
    #[inline(always)]
    pub fn bit_value(c: u8) -> Option<bool> {
        match c {
            ZERO => Some(false),
            ONE => Some(true),
            _ => None,
        }
    }

    /// Same as [`bit_value`] for a decoded `char`.
    #[inline(always)]
    pub fn char_value(c: char) -> Option<bool> {
        u8::try_from(c).ok().and_then(bit_value)
    }
}

/// Derived parameters of an iceberg code.
pub mod code {
    /// Number of physical qubits added on top of the logical ones.
    ///
    /// The data register carries the logical qubits plus two extra qubits
    /// that hold the code's global parity structure.
    pub const EXTRA_PHYSICAL_QUBITS: usize = 2;

    /// Code parameters derived from the logical qubit count.
    ///
    /// Construction is infallible; the caller is responsible for rejecting
    /// `k == 0` before deriving parameters from it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CodeParameters {
        /// Number of logical bits recovered per shot.
        pub k: usize,

        /// Even-padded logical width, `k + (k mod 2)`.
        ///
        /// Kept for reference only. Neither the decoding transform nor
        /// syndrome validation reads it: the transform is built from `k`
        /// and the data register is `k + 2` wide regardless of parity.
        pub k_eff: usize,

        /// Width of the data register, `k + 2`.
        pub n: usize,
    }

    impl CodeParameters {
        pub const fn new(k: usize) -> Self {
            Self {
                k,
                k_eff: k + (k % 2),
                n: k + EXTRA_PHYSICAL_QUBITS,
            }
        }
    }

}
