use csv::StringRecord;

use crate::error::TransformError;
use crate::numeric::DecimalFormat;

/// The ACS source table is wide; the last column we touch is 38.
pub const MIN_FIELDS: usize = 39;

/// One place-level row of the ACS source table, restricted to the fields the
/// normalizer consumes and validated up front.
#[derive(Debug, Clone)]
pub struct PlaceRow {
    /// 1-based source line, for error reporting.
    pub row: usize,
    pub geo_id: String,
    pub county_id: String,
    /// e.g. `"Abbeville city, Alabama"`
    pub place_name: String,
    pub population: f64,
    pub male: f64,
    /// Five age-bracket fields, passed through untouched.
    pub age_brackets: [String; 5],
    pub white: f64,
    pub black: f64,
    pub native: f64,
    pub asian: f64,
    pub pacific: f64,
    pub other_single: f64,
    pub multiracial: f64,
    pub hispanic: f64,
    pub no_diploma: f64,
    pub high_school: f64,
    pub some_college: f64,
    pub bachelors: f64,
    pub poverty_determined: f64,
    pub below_poverty: f64,
}

impl PlaceRow {
    /// Parse and validate one record. Short rows and unparsable numerals are
    /// rejected here so the normalizer only ever sees well-formed input.
    pub fn parse(
        row: usize,
        record: &StringRecord,
        decimal: &DecimalFormat,
    ) -> Result<Self, TransformError> {
        if record.len() < MIN_FIELDS {
            return Err(TransformError::malformed(
                row,
                format!("expected at least {} fields, got {}", MIN_FIELDS, record.len()),
            ));
        }

        let num = |col: usize| {
            decimal
                .parse(&record[col])
                .map_err(|e| TransformError::malformed(row, format!("column {}: {}", col, e)))
        };

        Ok(PlaceRow {
            row,
            geo_id: record[0].to_string(),
            county_id: record[1].to_string(),
            place_name: record[2].to_string(),
            population: num(3)?,
            male: num(9)?,
            age_brackets: [
                record[11].to_string(),
                record[12].to_string(),
                record[13].to_string(),
                record[14].to_string(),
                record[15].to_string(),
            ],
            white: num(16)?,
            black: num(17)?,
            native: num(18)?,
            asian: num(19)?,
            pacific: num(20)?,
            other_single: num(21)?,
            multiracial: num(22)?,
            hispanic: num(23)?,
            no_diploma: num(29)?,
            high_school: num(30)?,
            some_college: num(31)?,
            bachelors: num(32)?,
            poverty_determined: num(37)?,
            below_poverty: num(38)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(overrides: &[(usize, &str)]) -> StringRecord {
        let mut fields = vec!["0".to_string(); MIN_FIELDS];
        for (col, value) in overrides {
            fields[*col] = value.to_string();
        }
        StringRecord::from(fields)
    }

    #[test]
    fn picks_out_the_consumed_columns() {
        let record = record_with(&[
            (0, "1600000US0100124"),
            (1, "0100124"),
            (2, "Abbeville city, Alabama"),
            (3, "2603"),
            (9, "1220"),
            (11, "355"),
            (15, "512"),
            (19, "10"),
            (20, "3"),
            (38, "600"),
        ]);

        let row = PlaceRow::parse(3, &record, &DecimalFormat::default()).unwrap();
        assert_eq!(row.geo_id, "1600000US0100124");
        assert_eq!(row.place_name, "Abbeville city, Alabama");
        assert_eq!(row.population, 2603.0);
        assert_eq!(row.male, 1220.0);
        assert_eq!(row.age_brackets[0], "355");
        assert_eq!(row.age_brackets[4], "512");
        assert_eq!(row.asian, 10.0);
        assert_eq!(row.pacific, 3.0);
        assert_eq!(row.below_poverty, 600.0);
    }

    #[test]
    fn short_record_is_malformed() {
        let record = StringRecord::from(vec!["a"; 10]);
        let err = PlaceRow::parse(5, &record, &DecimalFormat::default()).unwrap_err();
        assert!(matches!(err, TransformError::MalformedRow { row: 5, .. }));
    }

    #[test]
    fn unparsable_count_is_malformed() {
        let record = record_with(&[(3, "(X)")]);
        let err = PlaceRow::parse(4, &record, &DecimalFormat::default()).unwrap_err();
        match err {
            TransformError::MalformedRow { row, reason } => {
                assert_eq!(row, 4);
                assert!(reason.contains("column 3"));
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }
}
