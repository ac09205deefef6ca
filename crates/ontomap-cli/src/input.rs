//! Trait list reader.
//!
//! One trait per line, tab-separated: name, optional frequency (default 1),
//! optional high-priority flag. Files ending in `.gz` are decompressed.

use crate::error::{CliError, Result};
use flate2::read::MultiGzDecoder;
use ontomap_domain::ClinicalTrait;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Name used by upstream extracts for records without a trait
const PLACEHOLDER_NAME: &str = "-";

/// Read and merge a trait list from disk
pub fn read_traits(path: &Path) -> Result<Vec<ClinicalTrait>> {
    let file = File::open(path)?;
    let is_gzip = path.extension().is_some_and(|ext| ext == "gz");

    if is_gzip {
        parse_traits(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        parse_traits(BufReader::new(file))
    }
}

/// Parse a trait list, merging duplicate names
///
/// Returned traits are in name order.
pub fn parse_traits<R: BufRead>(reader: R) -> Result<Vec<ClinicalTrait>> {
    let mut merged: BTreeMap<String, (u64, bool)> = BTreeMap::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let mut fields = line.split('\t');
        let name = fields.next().unwrap_or_default().trim().to_lowercase();
        if name.is_empty() {
            warn!("Skipping line {} with an empty trait name", number);
            continue;
        }
        if name == PLACEHOLDER_NAME {
            info!("Skipping placeholder trait name on line {}", number);
            continue;
        }

        let frequency = match fields.next().map(str::trim) {
            None | Some("") => 1,
            Some(value) => value.parse::<u64>().map_err(|_| CliError::InvalidInput {
                line: number,
                message: format!("frequency '{}' is not a non-negative integer", value),
            })?,
        };
        let high_priority = match fields.next().map(str::trim) {
            None | Some("") => false,
            Some(value) => parse_flag(value).ok_or_else(|| CliError::InvalidInput {
                line: number,
                message: format!("high-priority flag '{}' is not true/false/1/0", value),
            })?,
        };

        let entry = merged.entry(name).or_insert((0, false));
        entry.0 = entry.0.checked_add(frequency).ok_or_else(|| CliError::InvalidInput {
            line: number,
            message: "merged frequency overflows a 64-bit counter".to_string(),
        })?;
        entry.1 |= high_priority;
    }

    Ok(merged
        .into_iter()
        .map(|(name, (frequency, high_priority))| {
            ClinicalTrait::new(name, frequency).with_high_priority(high_priority)
        })
        .collect())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
