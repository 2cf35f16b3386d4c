//! Demographics normalizer pipeline: wide ACS place-level table → fixed
//! 26-column table of population-relative fractions.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::DemographicsConfig;
use crate::demographics::normalize::{normalize, NormalizedPlace};
use crate::demographics::row::PlaceRow;
use crate::numeric::DecimalFormat;
use crate::table::{open_table, TableWriter};

pub mod normalize;
pub mod row;

/// The ACS export carries a machine-readable and a human-readable header.
const HEADER_ROWS: usize = 2;

/// Row counts of a completed run, for the caller's logs.
#[derive(Debug, Clone, Copy)]
pub struct Summary {
    pub read: usize,
    pub emitted: usize,
    pub skipped_zero_population: usize,
}

/// Run the whole pipeline: parse each source row, normalize it, write the
/// output table. Rows reporting zero population are dropped; input order is
/// preserved for the rest. The output appears only after the last row.
#[tracing::instrument(level = "info", skip(cfg, decimal))]
pub fn run(cfg: &DemographicsConfig, decimal: &DecimalFormat) -> Result<Summary> {
    let mut rdr = open_table(&cfg.source, HEADER_ROWS)?;
    let mut out = TableWriter::create(&cfg.output)?;
    out.write_record(NormalizedPlace::HEADER)?;

    let mut summary = Summary {
        read: 0,
        emitted: 0,
        skipped_zero_population: 0,
    };

    for (idx, result) in rdr.records().enumerate() {
        let row_no = idx + HEADER_ROWS + 1;
        let record = result
            .with_context(|| format!("reading {} row {}", cfg.source.display(), row_no))?;
        summary.read += 1;

        let place = PlaceRow::parse(row_no, &record, decimal)?;
        match normalize(&place)? {
            Some(normalized) => {
                out.write_record(normalized.to_record())?;
                summary.emitted += 1;
            }
            None => {
                debug!(row = row_no, "zero population, dropped");
                summary.skipped_zero_population += 1;
            }
        }
    }

    out.commit()?;
    info!(
        read = summary.read,
        emitted = summary.emitted,
        skipped = summary.skipped_zero_population,
        "demographics normalized"
    );
    Ok(summary)
}
