//! Human-readable interpretation of derived metrics.
//!
//! The calculator renders a short prose block under the output panel
//! telling the reader what each ratio means in money terms. These
//! builders produce those lines, plus the one-word verdict the digest
//! prints per campaign.

use std::fmt;

use crate::format::{format_brl, format_multiple};
use crate::inputs::CampaignInputs;
use crate::metrics::DerivedMetrics;
use crate::thresholds::{BREAKEVEN_ROAS, PROFIT_EPSILON, STRONG_ROAS};

/// Where the campaign landed after all spend is accounted for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CampaignVerdict {
    Profitable,
    BreakEven,
    Losing,
}

impl fmt::Display for CampaignVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampaignVerdict::Profitable => write!(f, "profitable"),
            CampaignVerdict::BreakEven => write!(f, "break-even"),
            CampaignVerdict::Losing => write!(f, "losing"),
        }
    }
}

/// Classify the campaign by its gross profit.
pub fn verdict(metrics: &DerivedMetrics) -> CampaignVerdict {
    if metrics.gross_profit > PROFIT_EPSILON {
        CampaignVerdict::Profitable
    } else if metrics.gross_profit < -PROFIT_EPSILON {
        CampaignVerdict::Losing
    } else {
        CampaignVerdict::BreakEven
    }
}

/// One-phrase reading of the ROAS figure against the benchmarks.
pub fn roas_reading(roas: f64) -> &'static str {
    if roas >= STRONG_ROAS {
        "strong"
    } else if roas >= BREAKEVEN_ROAS {
        "above break-even"
    } else {
        "below break-even"
    }
}

/// Build the interpretation block shown under the outputs.
///
/// One line each for ROI and CPA, and one for ROAS when the mode flag
/// is set. Every money figure renders in BRL.
pub fn interpretation_lines(inputs: &CampaignInputs, metrics: &DerivedMetrics) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "ROI of {}: every {} invested in ads returned {} in profit.",
        format_multiple(metrics.roi),
        format_brl(1.0),
        format_brl(metrics.roi),
    ));

    lines.push(format!(
        "CPA of {}: each new customer of the {} product cost {} in ads.",
        format_brl(metrics.cpa),
        format_brl(inputs.product_price.unwrap_or(0.0)),
        format_brl(metrics.cpa),
    ));

    if inputs.roas_mode {
        lines.push(format!(
            "ROAS of {} ({}): every {} spent on ads and goods came back as {} in revenue.",
            format_multiple(metrics.roas),
            roas_reading(metrics.roas),
            format_brl(1.0),
            format_brl(metrics.roas),
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derive_metrics;

    fn reference_inputs(roas_mode: bool) -> CampaignInputs {
        CampaignInputs {
            ad_spend: Some(500.0),
            product_price: Some(2000.0),
            number_of_sales: Some(3),
            unit_cogs: Some(100.0),
            roas_mode,
        }
    }

    #[test]
    fn verdict_tracks_gross_profit() {
        let profitable = derive_metrics(&reference_inputs(false));
        assert_eq!(verdict(&profitable), CampaignVerdict::Profitable);

        let losing = derive_metrics(&CampaignInputs {
            ad_spend: Some(500.0),
            ..Default::default()
        });
        assert_eq!(verdict(&losing), CampaignVerdict::Losing);

        let untouched = derive_metrics(&CampaignInputs::default());
        assert_eq!(verdict(&untouched), CampaignVerdict::BreakEven);
    }

    #[test]
    fn roas_reading_uses_the_benchmarks() {
        assert_eq!(roas_reading(7.5), "strong");
        assert_eq!(roas_reading(4.0), "strong");
        assert_eq!(roas_reading(1.2), "above break-even");
        assert_eq!(roas_reading(0.8), "below break-even");
    }

    #[test]
    fn plain_mode_omits_the_roas_line() {
        let inputs = reference_inputs(false);
        let lines = interpretation_lines(&inputs, &derive_metrics(&inputs));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("ROI of 11.00x"));
        assert!(lines[0].contains("R$ 11,00"));
        assert!(lines[1].contains("CPA of R$ 166,67"));
        assert!(lines[1].contains("R$ 2.000,00"));
    }

    #[test]
    fn roas_mode_adds_the_roas_line() {
        let inputs = reference_inputs(true);
        let lines = interpretation_lines(&inputs, &derive_metrics(&inputs));
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("ROAS of 7.50x"));
        assert!(lines[2].contains("strong"));
        assert!(lines[2].contains("R$ 7,50"));
    }
}
