use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::TransformError;
use crate::table::open_table;

/// Minimum fields per crosswalk row: the HRR number sits in column 4.
const MIN_FIELDS: usize = 5;

/// Join the ZIP → HRR crosswalk against the per-HRR ratios.
///
/// Layout (0-indexed): column 0 is the ZIP, column 4 the HRR number it maps
/// to, with one header row. Every HRR referenced by the crosswalk must exist
/// in `factors`; a miss aborts the join rather than defaulting or skipping.
/// A ZIP listed twice keeps the ratio of its last row.
pub fn join_zip_factors(
    path: &Path,
    factors: &BTreeMap<String, f64>,
) -> Result<BTreeMap<String, f64>> {
    let mut rdr = open_table(path, 1)?;
    let mut zip_factors = BTreeMap::new();

    for (idx, result) in rdr.records().enumerate() {
        let row_no = idx + 2;
        let record =
            result.with_context(|| format!("reading {} row {}", path.display(), row_no))?;

        if record.len() < MIN_FIELDS {
            return Err(TransformError::malformed(
                row_no,
                format!("expected at least {} fields, got {}", MIN_FIELDS, record.len()),
            )
            .into());
        }

        let zip = record[0].trim().to_string();
        let hrr = record[4].trim();
        let ratio = factors.get(hrr).ok_or_else(|| TransformError::MissingKey {
            table: "region factors",
            key: hrr.to_string(),
        })?;

        zip_factors.insert(zip, *ratio);
    }

    Ok(zip_factors)
}
