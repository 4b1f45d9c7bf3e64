use serde::{Deserialize, Serialize};

/// The five inputs the calculator is a pure function of.
///
/// Each numeric field is optional: an empty form field means "absent",
/// and absent is treated as zero by every formula downstream. The COGS
/// value is retained even while `roas_mode` is off, so toggling the
/// mode never loses what the user typed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignInputs {
    /// Total ad spend for the campaign.
    pub ad_spend: Option<f64>,
    /// Price of the product or service sold.
    pub product_price: Option<f64>,
    /// Number of sales closed.
    pub number_of_sales: Option<u64>,
    /// Cost of goods sold per unit (CMV). Read only by the ROAS-mode formulas.
    pub unit_cogs: Option<f64>,
    /// Profit-formula variant: subtract COGS and report ROAS.
    pub roas_mode: bool,
}

impl CampaignInputs {
    /// Cost of goods across all sales: `unit_cogs × number_of_sales`.
    pub fn total_cogs(&self) -> f64 {
        self.unit_cogs.unwrap_or(0.0) * self.number_of_sales.unwrap_or(0) as f64
    }

    /// Everything spent to generate the revenue: ad spend plus total COGS.
    /// This is the ROAS denominator.
    pub fn total_spend(&self) -> f64 {
        self.ad_spend.unwrap_or(0.0) + self.total_cogs()
    }

    /// True when no field has been entered yet.
    pub fn is_empty(&self) -> bool {
        self.ad_spend.is_none()
            && self.product_price.is_none()
            && self.number_of_sales.is_none()
            && self.unit_cogs.is_none()
    }
}
