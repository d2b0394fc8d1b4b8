//! Decoding transform for the iceberg code.
//!
//! The transform is a `k × n` boolean matrix with `n = k + 2`. It is built
//! from an intermediate matrix `M` whose row `i` is
//!
//! ```text
//! [0 | 1 1 .. 0 .. 1 1 | 1]
//!        ^ position i of the middle block
//! ```
//!
//! i.e. a zero column, the complement of the `k × k` identity and a column of
//! ones. The final transform keeps row 0 of `M` and stores rows `1..k` in
//! reverse order (`k-1, k-2, .., 1`), which matches the bit order of the
//! classical register the execution backend writes. Logical bit `i` of a
//! data register `d` is the parity of `d AND row_i`.

use crate::IcebergError;
use crate::bit_utils::BitPack;
use alloc::string::String;
use alloc::vec::Vec;
use iceberg_common::code::CodeParameters;
use iceberg_common::format;

/// Fixed GF(2) matrix mapping a data register onto a logical bitstring.
///
/// Rows are stored packed, `words_per_row` u64 words each, in a single flat
/// vector. Immutable once built and safe to share between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodingTransform {
    k: usize,
    n: usize,
    words_per_row: usize,
    rows: Vec<u64>,
}

impl DecodingTransform {
    /// Builds the transform for `k` logical qubits.
    ///
    /// Deterministic and pure; the same `k` always yields the same matrix.
    ///
    /// # Errors
    ///
    /// Returns `IcebergError::InvalidParameter` if `k` is zero.
    pub fn build(k: usize) -> Result<Self, IcebergError> {
        if k == 0 {
            return Err(IcebergError::InvalidParameter { k });
        }

        let n = CodeParameters::new(k).n;
        let words_per_row = BitPack::words_for(n);
        let mut rows = Vec::with_capacity(k * words_per_row);

        for r in 0..k {
            let source = if r == 0 { 0 } else { k - r };
            rows.extend(Self::complement_row(source, k, n));
        }

        Ok(Self {
            k,
            n,
            words_per_row,
            rows,
        })
    }

    /// Row `i` of the unreversed matrix `M`.
    fn complement_row(i: usize, k: usize, n: usize) -> Vec<u64> {
        let mut row = BitPack::zeroed(n);
        for j in 0..k {
            if j != i {
                BitPack::set(&mut row, 1 + j, true);
            }
        }
        BitPack::set(&mut row, n - 1, true);
        row
    }

    /// Number of rows, i.e. logical bits produced per shot.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of columns, i.e. the expected data register width.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Packed words of one transform row.
    pub fn row(&self, r: usize) -> &[u64] {
        let start = r * self.words_per_row;
        &self.rows[start..start + self.words_per_row]
    }

    /// Single matrix entry.
    pub fn get(&self, r: usize, c: usize) -> bool {
        BitPack::get(self.row(r), c)
    }

    /// Expands the matrix into nested boolean rows.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.k)
            .map(|r| (0..self.n).map(|c| self.get(r, c)).collect())
            .collect()
    }

    /// Applies the transform to a packed data register and appends the
    /// logical bits to `out` in row order.
    ///
    /// `data` must hold at least `n` bits packed the same way as the rows.
    pub fn apply_into(&self, data: &[u64], out: &mut String) {
        for r in 0..self.k {
            let bit = BitPack::and_parity(self.row(r), &data[..self.words_per_row]);
            let c = if bit { format::ONE } else { format::ZERO };
            out.push(c as char);
        }
    }

    /// Applies the transform and returns the logical bitstring.
    pub fn apply(&self, data: &[u64]) -> String {
        let mut out = String::with_capacity(self.k);
        self.apply_into(data, &mut out);
        out
    }
}
