//! TSV writers for the mappings and curation files.

use crate::error::Result;
use ontomap_domain::ClinicalTrait;
use ontomap_resolver::{TraitOutput, MAPPINGS_HEADER};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Rows written by [`write_outputs`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputSummary {
    /// Rows in the mappings file, header excluded
    pub mapping_rows: usize,
    /// Rows in the curation file
    pub curation_rows: usize,
}

/// Write every trait to exactly one of the two outputs
pub fn write_outputs<M: Write, C: Write>(
    traits: &[ClinicalTrait],
    mut mappings: M,
    mut curation: C,
) -> Result<OutputSummary> {
    let mut summary = OutputSummary::default();
    writeln!(mappings, "{}", MAPPINGS_HEADER)?;

    for t in traits {
        match TraitOutput::from(t) {
            TraitOutput::Finished(rows) => {
                for row in rows {
                    writeln!(mappings, "{}", row.to_tsv())?;
                    summary.mapping_rows += 1;
                }
            }
            TraitOutput::Curation(row) => {
                writeln!(curation, "{}", row.to_tsv())?;
                summary.curation_rows += 1;
            }
        }
    }

    mappings.flush()?;
    curation.flush()?;
    Ok(summary)
}

/// Create both output files and write the traits to them
pub fn write_output_files(
    traits: &[ClinicalTrait],
    mappings_path: &Path,
    curation_path: &Path,
) -> Result<OutputSummary> {
    let mappings = BufWriter::new(File::create(mappings_path)?);
    let curation = BufWriter::new(File::create(curation_path)?);
    write_outputs(traits, mappings, curation)
}
