use anyhow::{Context, Result, bail};
use bitvec::prelude::*;
use iceberg_common::format::{ONE, REGISTER_SEPARATOR, ZERO};
use iceberg_core::Counts;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Widths of the classical registers in one shot record.
///
/// Registers appear in record order; the last one is the data register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterLayout {
    widths: Vec<usize>,
}

impl RegisterLayout {
    pub fn new(widths: Vec<usize>) -> Result<Self> {
        if widths.is_empty() {
            bail!("register layout needs at least the data register");
        }
        if let Some(i) = widths.iter().position(|&w| w == 0) {
            bail!("register {} has zero width", i);
        }
        Ok(Self { widths })
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Total bits per shot.
    pub fn bits_per_shot(&self) -> usize {
        self.widths.iter().sum()
    }
}

impl FromStr for RegisterLayout {
    type Err = anyhow::Error;

    /// Parses a comma-separated width list such as `1,1,4`.
    fn from_str(s: &str) -> Result<Self> {
        let widths = s
            .split(',')
            .map(|w| {
                w.trim()
                    .parse::<usize>()
                    .with_context(|| format!("invalid register width {:?}", w))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(widths)
    }
}

/// Loads a packed shot-record file (.b8).
pub fn load_b8_file<P: AsRef<Path>>(path: P) -> Result<BitVec<u8, Lsb0>> {
    let mut file = File::open(path).context("Failed to open .b8 file")?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    // records are little-endian within each byte
    Ok(BitVec::<u8, Lsb0>::from_vec(buffer))
}

/// Renders one shot record as an outcome string.
fn render_shot(shot: &BitSlice<u8, Lsb0>, layout: &RegisterLayout, out: &mut String) {
    out.clear();
    let mut offset = 0;
    for (i, &width) in layout.widths().iter().enumerate() {
        if i > 0 {
            out.push(REGISTER_SEPARATOR);
        }
        for bit in shot[offset..offset + width].iter().by_vals() {
            let c = if bit { ONE } else { ZERO };
            out.push(c as char);
        }
        offset += width;
    }
}

/// Splits packed records into shots and histograms them into outcome counts.
///
/// Each record occupies `bits_per_shot` bits padded up to a whole byte. A
/// trailing partial record is ignored.
pub fn histogram_shots(raw_bits: &BitSlice<u8, Lsb0>, layout: &RegisterLayout) -> Counts {
    let bits_per_shot = layout.bits_per_shot();
    let stride_bits = bits_per_shot.div_ceil(8) * 8;
    let num_shots = raw_bits.len() / stride_bits;

    let mut counts = Counts::new();
    let mut outcome = String::with_capacity(bits_per_shot + layout.widths().len());
    for i in 0..num_shots {
        let start = i * stride_bits;
        render_shot(&raw_bits[start..start + bits_per_shot], layout, &mut outcome);
        match counts.get_mut(&outcome) {
            Some(c) => *c += 1,
            None => {
                counts.insert(outcome.clone(), 1);
            }
        }
    }
    counts
}

/// Loads a .b8 file and histograms its shots.
pub fn load_shot_counts<P: AsRef<Path>>(path: P, layout: &RegisterLayout) -> Result<Counts> {
    let raw_bits = load_b8_file(path)?;
    Ok(histogram_shots(&raw_bits, layout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_parses_and_validates() {
        let layout: RegisterLayout = "1, 2,4".parse().unwrap();
        assert_eq!(layout.widths(), &[1, 2, 4]);
        assert_eq!(layout.bits_per_shot(), 7);
        assert!("".parse::<RegisterLayout>().is_err());
        assert!("1,0,4".parse::<RegisterLayout>().is_err());
        assert!("1,x".parse::<RegisterLayout>().is_err());
    }

    #[test]
    fn records_are_sliced_per_register() {
        let layout = RegisterLayout::new(vec![1, 4]).unwrap();
        // record 0: flag 0, data 0011 -> bits 0b0001_1000 (lsb first: 0,0,0,1,1)
        // record 1: flag 1, data 0000 -> bit 0 set
        // record 2: same as record 0
        let raw = BitVec::<u8, Lsb0>::from_vec(vec![0b0001_1000, 0b0000_0001, 0b0001_1000]);
        let counts = histogram_shots(&raw, &layout);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["0 0011"], 2);
        assert_eq!(counts["1 0000"], 1);
    }

    #[test]
    fn records_spanning_bytes_use_padded_stride() {
        let layout = RegisterLayout::new(vec![10]).unwrap();
        let mut raw = BitVec::<u8, Lsb0>::repeat(false, 32);
        raw.set(0, true);
        raw.set(9, true);
        raw.set(16 + 1, true);
        raw.set(16 + 2, true);
        let counts = histogram_shots(&raw, &layout);
        assert_eq!(counts["1000000001"], 1);
        assert_eq!(counts["0110000000"], 1);
    }

    #[test]
    fn trailing_partial_record_is_ignored() {
        let layout = RegisterLayout::new(vec![2, 10]).unwrap();
        let raw = BitVec::<u8, Lsb0>::from_vec(vec![0, 0, 0]);
        let counts = histogram_shots(&raw, &layout);
        assert_eq!(counts.values().sum::<u64>(), 1);
    }
}
