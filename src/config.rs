// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::numeric::DecimalFormat;

/// Optional config file looked up in the working directory. When absent, the
/// defaults below (the filenames the conversion has always used) apply.
pub const CONFIG_FILE: &str = "censusprep.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Grouping separator found in the source numerals, e.g. `1,234.5`.
    pub grouping_separator: char,
    pub zip_factors: ZipFactorsConfig,
    pub demographics: DemographicsConfig,
}

/// Inputs and output of the ZIP adjustment-factor pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZipFactorsConfig {
    /// Reimbursement table keyed by HRR, one header row.
    pub reimbursements: PathBuf,
    /// ZIP → HSA → HRR crosswalk, one header row.
    pub crosswalk: PathBuf,
    pub output: PathBuf,
}

/// Input and output of the demographics normalizer pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemographicsConfig {
    /// ACS place-level source table, two header rows.
    pub source: PathBuf,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grouping_separator: ',',
            zip_factors: ZipFactorsConfig::default(),
            demographics: DemographicsConfig::default(),
        }
    }
}

impl Default for ZipFactorsConfig {
    fn default() -> Self {
        ZipFactorsConfig {
            reimbursements: "pa_reimb_hrr_2015.csv".into(),
            crosswalk: "zip_hsa_hrr_15.csv".into(),
            output: "zipAdjustmentFactors.csv".into(),
        }
    }
}

impl Default for DemographicsConfig {
    fn default() -> Self {
        DemographicsConfig {
            source: "ACS_15_5YR_S2101_with_ann_synthea.csv".into(),
            output: "demographics_v.csv".into(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))
    }

    /// Read `censusprep.yaml` if it exists, otherwise use the defaults.
    pub fn load_or_default() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            info!(path = CONFIG_FILE, "loading config");
            Config::load(path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn decimal_format(&self) -> DecimalFormat {
        DecimalFormat::new(self.grouping_separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_historical_filenames() {
        let cfg = Config::default();
        assert_eq!(
            cfg.zip_factors.reimbursements,
            PathBuf::from("pa_reimb_hrr_2015.csv")
        );
        assert_eq!(cfg.zip_factors.crosswalk, PathBuf::from("zip_hsa_hrr_15.csv"));
        assert_eq!(
            cfg.zip_factors.output,
            PathBuf::from("zipAdjustmentFactors.csv")
        );
        assert_eq!(
            cfg.demographics.source,
            PathBuf::from("ACS_15_5YR_S2101_with_ann_synthea.csv")
        );
        assert_eq!(cfg.demographics.output, PathBuf::from("demographics_v.csv"));
        assert_eq!(cfg.grouping_separator, ',');
    }

    #[test]
    fn partial_yaml_fills_in_defaults() -> Result<()> {
        let cfg: Config = serde_yaml::from_str(
            r#"
demographics:
  output: out/demo.csv
"#,
        )?;
        assert_eq!(cfg.demographics.output, PathBuf::from("out/demo.csv"));
        // untouched sections keep their defaults
        assert_eq!(
            cfg.demographics.source,
            PathBuf::from("ACS_15_5YR_S2101_with_ann_synthea.csv")
        );
        assert_eq!(
            cfg.zip_factors.reimbursements,
            PathBuf::from("pa_reimb_hrr_2015.csv")
        );
        Ok(())
    }
}
