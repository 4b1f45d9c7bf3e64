//! CSV campaign-scenario loader.
//!
//! Parses scenario CSV files into `ScenarioRecord` structs for batch
//! evaluation. Expected CSV columns:
//!   campaign, ad_spend, product_price, number_of_sales, unit_cogs, roas_mode
//!
//! Numeric fields may be left empty, meaning "not entered": the same
//! absent-is-zero semantics the form gives an untouched field.

use serde::Deserialize;
use std::io::Read;

use crate::inputs::CampaignInputs;

/// One named scenario row: a campaign label plus the five inputs.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioRecord {
    pub campaign: String,
    pub ad_spend: Option<f64>,
    pub product_price: Option<f64>,
    pub number_of_sales: Option<u64>,
    pub unit_cogs: Option<f64>,
    #[serde(deserialize_with = "deserialize_bool")]
    pub roas_mode: bool,
}

impl ScenarioRecord {
    /// Convert to calculator inputs (drops the campaign label).
    pub fn to_inputs(&self) -> CampaignInputs {
        CampaignInputs {
            ad_spend: self.ad_spend,
            product_price: self.product_price,
            number_of_sales: self.number_of_sales,
            unit_cogs: self.unit_cogs,
            roas_mode: self.roas_mode,
        }
    }
}

/// Load scenario records from a CSV reader.
pub fn load_scenarios<R: Read>(reader: R) -> Result<Vec<ScenarioRecord>, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let record: ScenarioRecord = result
            .map_err(|e| format!("CSV parse error at line {}: {}", line_num + 2, e))?;
        validate_record(&record)
            .map_err(|e| format!("Invalid scenario at line {}: {}", line_num + 2, e))?;
        records.push(record);
    }

    log::debug!("parsed {} campaign scenarios", records.len());
    Ok(records)
}

/// Load scenario records from a CSV file path.
pub fn load_scenarios_file(path: &str) -> Result<Vec<ScenarioRecord>, String> {
    let file = std::fs::File::open(path)
        .map_err(|e| format!("Failed to open '{}': {}", path, e))?;
    load_scenarios(file)
}

/// Amounts must be non-negative before they reach the calculator.
fn validate_record(record: &ScenarioRecord) -> Result<(), String> {
    for (field, value) in [
        ("ad_spend", record.ad_spend),
        ("product_price", record.product_price),
        ("unit_cogs", record.unit_cogs),
    ] {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(format!("{} must be non-negative, got {}", field, v));
            }
        }
    }
    Ok(())
}

/// Tolerant bool deserializer for the mode column. Campaign sheets
/// arrive in both English and Portuguese, so "sim"/"nao" count too.
fn deserialize_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.to_lowercase().trim() {
        "true" | "1" | "yes" | "y" | "sim" | "s" => Ok(true),
        "false" | "0" | "no" | "n" | "nao" | "n\u{e3}o" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "unrecognized roas_mode value '{}'",
            other
        ))),
    }
}
