//! ZIP adjustment-factor pipeline: reimbursement table → per-HRR cost-of-care
//! ratios → one ratio per ZIP via the ZIP→HRR crosswalk.

use anyhow::{Context, Result};
use tracing::info;

use crate::config::ZipFactorsConfig;
use crate::numeric::DecimalFormat;
use crate::table::TableWriter;

pub mod crosswalk;
pub mod hrr;

/// Header of the emitted factor table.
pub const OUTPUT_HEADER: [&str; 2] = ["ZIP", "ADJ_FACTOR"];

/// Row counts of a completed run, for the caller's logs.
#[derive(Debug, Clone, Copy)]
pub struct Summary {
    pub regions: usize,
    pub zips: usize,
}

/// Run the whole pipeline: load ratios, join the crosswalk, write the output
/// table. The output appears only after every row has been written.
#[tracing::instrument(level = "info", skip(cfg, decimal))]
pub fn run(cfg: &ZipFactorsConfig, decimal: &DecimalFormat) -> Result<Summary> {
    let factors = hrr::load_region_factors(&cfg.reimbursements, decimal)
        .with_context(|| format!("loading {}", cfg.reimbursements.display()))?;
    info!(regions = factors.len(), "region ratios loaded");

    let zip_factors = crosswalk::join_zip_factors(&cfg.crosswalk, &factors)
        .with_context(|| format!("joining {}", cfg.crosswalk.display()))?;
    info!(zips = zip_factors.len(), "crosswalk joined");

    let mut out = TableWriter::create(&cfg.output)?;
    out.write_record(OUTPUT_HEADER)?;
    for (zip, ratio) in &zip_factors {
        out.write_record([zip.clone(), ratio.to_string()])?;
    }
    out.commit()?;

    Ok(Summary {
        regions: factors.len(),
        zips: zip_factors.len(),
    })
}
