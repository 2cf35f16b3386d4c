use thiserror::Error;

/// A field that could not be read as a decimal number.
#[derive(Error, Debug)]
#[error("invalid decimal {value:?}")]
pub struct InvalidDecimal {
    pub value: String,
}

/// Grouping-aware decimal parsing.
///
/// The reimbursement tables carry grouped numerals like `"32,441.55"` inside
/// quoted fields. Rather than depending on the process locale, the grouping
/// character is carried explicitly and stripped before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalFormat {
    grouping: char,
}

impl DecimalFormat {
    pub fn new(grouping: char) -> Self {
        DecimalFormat { grouping }
    }

    /// Trim whitespace, drop grouping separators, parse as `f64`.
    pub fn parse(&self, raw: &str) -> Result<f64, InvalidDecimal> {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| *c != self.grouping)
            .collect();
        cleaned.parse::<f64>().map_err(|_| InvalidDecimal {
            value: raw.to_string(),
        })
    }
}

impl Default for DecimalFormat {
    fn default() -> Self {
        DecimalFormat { grouping: ',' }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_grouped() {
        let fmt = DecimalFormat::default();
        assert_eq!(fmt.parse("120").unwrap(), 120.0);
        assert_eq!(fmt.parse(" 32,441.55 ").unwrap(), 32441.55);
        assert_eq!(fmt.parse("1,234,567.8").unwrap(), 1234567.8);
    }

    #[test]
    fn alternate_grouping_character() {
        let fmt = DecimalFormat::new('_');
        assert_eq!(fmt.parse("1_000.5").unwrap(), 1000.5);
        // ',' is not grouping under this format, so it stays malformed
        assert!(fmt.parse("1,000").is_err());
    }

    #[test]
    fn rejects_garbage_and_empty() {
        let fmt = DecimalFormat::default();
        assert!(fmt.parse("").is_err());
        assert!(fmt.parse("   ").is_err());
        let err = fmt.parse("n/a").unwrap_err();
        assert_eq!(err.value, "n/a");
    }
}
