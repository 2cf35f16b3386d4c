use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

use crate::error::TransformError;
use crate::numeric::DecimalFormat;
use crate::table::open_table;

/// Minimum fields per reimbursement row: the adjusted price sits in column 5.
const MIN_FIELDS: usize = 6;

/// Load the reimbursement table and compute one adjustment ratio per HRR.
///
/// Layout (0-indexed): column 0 is the HRR number, column 4 the unadjusted
/// price, column 5 the price adjusted for regional cost of care. One header
/// row. The ratio is `adjusted / unadjusted`; a repeated HRR keeps the ratio
/// of its last row.
pub fn load_region_factors(
    path: &Path,
    decimal: &DecimalFormat,
) -> Result<BTreeMap<String, f64>> {
    let mut rdr = open_table(path, 1)?;
    let mut factors = BTreeMap::new();

    for (idx, result) in rdr.records().enumerate() {
        // 1-based line number, counting the header
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

        let hrr = record[0].trim().to_string();
        let unadjusted = decimal
            .parse(&record[4])
            .map_err(|e| TransformError::malformed(row_no, e))?;
        let adjusted = decimal
            .parse(&record[5])
            .map_err(|e| TransformError::malformed(row_no, e))?;

        if unadjusted == 0.0 {
            return Err(TransformError::ZeroDenominator {
                row: row_no,
                what: "adjustment ratio",
            }
            .into());
        }

        if factors.insert(hrr.clone(), adjusted / unadjusted).is_some() {
            warn!(hrr = %hrr, row = row_no, "repeated HRR, keeping later ratio");
        }
    }

    Ok(factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use std::fs;
    use tempfile::TempDir;

    fn write_table(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn computes_adjusted_over_unadjusted() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_table(
            &dir,
            "reimb.csv",
            "HRR,NAME,BENE,PCT,UNADJ,ADJ\n\
             R1,x,y,z,100,120\n\
             R2,x,y,z,\"32,441.55\",\"16,220.775\"\n",
        );

        let factors = load_region_factors(&path, &DecimalFormat::default())?;
        assert_eq!(factors["R1"], 1.2);
        assert!((factors["R2"] - 0.5).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn later_row_overwrites_repeated_hrr() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_table(
            &dir,
            "reimb.csv",
            "HRR,NAME,BENE,PCT,UNADJ,ADJ\nR1,x,y,z,100,110\nR1,x,y,z,100,150\n",
        );

        let factors = load_region_factors(&path, &DecimalFormat::default())?;
        assert_eq!(factors.len(), 1);
        assert_eq!(factors["R1"], 1.5);
        Ok(())
    }

    #[test]
    fn zero_unadjusted_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_table(
            &dir,
            "reimb.csv",
            "HRR,NAME,BENE,PCT,UNADJ,ADJ\nR1,x,y,z,0,120\n",
        );

        let err = load_region_factors(&path, &DecimalFormat::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TransformError>(),
            Some(TransformError::ZeroDenominator { row: 2, .. })
        ));
    }

    #[test]
    fn short_row_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_table(&dir, "reimb.csv", "HRR,NAME,BENE,PCT,UNADJ,ADJ\nR1,x,y\n");

        let err = load_region_factors(&path, &DecimalFormat::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TransformError>(),
            Some(TransformError::MalformedRow { row: 2, .. })
        ));
    }

    #[test]
    fn unparsable_price_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_table(
            &dir,
            "reimb.csv",
            "HRR,NAME,BENE,PCT,UNADJ,ADJ\nR1,x,y,z,abc,120\n",
        );

        let err = load_region_factors(&path, &DecimalFormat::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TransformError>(),
            Some(TransformError::MalformedRow { row: 2, .. })
        ));
    }
}
