//! Parser for outcome-count text files.
//!
//! Two layouts are accepted and told apart by the first non-blank character:
//!
//! ```text
//! {'0 0 0011': 10, "0 0 1100": 5}
//! ```
//!
//! a dictionary literal as printed by common execution toolkits (either
//! quote style, optional trailing comma, free whitespace), and
//!
//! ```text
//! # outcome: count
//! 0 0 0011: 10
//! 0 0 1100: 5
//! ```
//!
//! one `<outcome>: <count>` entry per line with blank lines and `#` comments
//! ignored. Outcome strings are not validated here; shape errors are left to
//! the decoder so they are reported the same way for every input source.
//! Repeated outcomes are summed.

use anyhow::{Context, Result, anyhow};
use iceberg_core::Counts;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{take_while, take_while1};
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{all_consuming, map_res, opt};
use nom::multi::separated_list0;
use nom::sequence::{delimited, separated_pair, terminated};
use std::fs;
use std::path::Path;

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn count(input: &str) -> IResult<&str, u64> {
    map_res(digit1, |s: &str| s.parse::<u64>())(input)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
    ))(input)
}

fn dict_entry(input: &str) -> IResult<&str, (&str, u64)> {
    separated_pair(ws(quoted), char(':'), ws(count))(input)
}

fn dict(input: &str) -> IResult<&str, Vec<(&str, u64)>> {
    delimited(
        ws(char('{')),
        terminated(separated_list0(char(','), dict_entry), opt(ws(char(',')))),
        ws(char('}')),
    )(input)
}

fn line_entry(input: &str) -> IResult<&str, (&str, u64)> {
    separated_pair(take_while1(|c: char| c != ':'), char(':'), ws(count))(input)
}

fn insert(counts: &mut Counts, outcome: &str, count: u64) {
    *counts.entry(outcome.trim().to_string()).or_insert(0) += count;
}

/// Parses counts text in either accepted layout.
pub fn parse_counts(input: &str) -> Result<Counts> {
    let mut counts = Counts::new();

    if input.trim_start().starts_with('{') {
        let (_, entries) =
            all_consuming(dict)(input).map_err(|e| anyhow!("invalid counts dictionary: {}", e))?;
        for (outcome, c) in entries {
            insert(&mut counts, outcome, c);
        }
        return Ok(counts);
    }

    for (line_no, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (_, (outcome, c)) = all_consuming(line_entry)(trimmed)
            .map_err(|e| anyhow!("line {}: invalid counts entry: {}", line_no + 1, e))?;
        insert(&mut counts, outcome, c);
    }

    Ok(counts)
}

/// Reads and parses a counts file.
pub fn load_counts_file<P: AsRef<Path>>(path: P) -> Result<Counts> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open counts file {}", path.display()))?;
    parse_counts(&text).with_context(|| format!("Failed to parse {}", path.display()))
}
