//! Derived-metric computation.
//!
//! Five inputs in, five figures out. Every metric is recomputed from
//! scratch on each call; nothing is cached or accumulated.
//!
//! Each figure comes from the underlying data:
//! - Total revenue: product_price × number_of_sales
//! - Gross profit: revenue − ad spend (− total COGS in ROAS mode)
//! - ROI: (revenue − ad spend) / ad spend
//! - CPA: ad spend / number_of_sales
//! - ROAS: revenue / (ad spend + total COGS)
//!
//! The ratios guard their denominators by returning zero, so the
//! function is total over the whole non-negative input domain.

use serde::{Deserialize, Serialize};

use crate::inputs::CampaignInputs;

/// The five derived figures, recomputed on every input change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Gross receipts: price times sales count.
    pub total_revenue: f64,
    /// Revenue minus ad spend; minus total COGS as well in ROAS mode.
    pub gross_profit: f64,
    /// Profit returned per ad dollar. Zero when nothing was spent.
    pub roi: f64,
    /// Ad cost of acquiring one customer. Zero when nothing was sold.
    pub cpa: f64,
    /// Revenue returned per dollar of ads plus goods. Zero when neither
    /// was spent.
    pub roas: f64,
}

/// Derive all five metrics from the current inputs.
///
/// Absent inputs count as zero. The ROAS figure is always computed;
/// whether it is shown is a rendering decision, not a calculation one.
pub fn derive_metrics(inputs: &CampaignInputs) -> DerivedMetrics {
    let ad_spend = inputs.ad_spend.unwrap_or(0.0);
    let product_price = inputs.product_price.unwrap_or(0.0);
    let number_of_sales = inputs.number_of_sales.unwrap_or(0) as f64;
    let total_cogs = inputs.total_cogs();

    let total_revenue = product_price * number_of_sales;

    // Plain mode answers "what did the ads leave me"; ROAS mode answers
    // "what did the campaign leave me after goods were paid for".
    let gross_profit = if inputs.roas_mode {
        total_revenue - ad_spend - total_cogs
    } else {
        total_revenue - ad_spend
    };

    let roi = if ad_spend > 0.0 {
        (total_revenue - ad_spend) / ad_spend
    } else {
        0.0
    };

    let cpa = if number_of_sales > 0.0 {
        ad_spend / number_of_sales
    } else {
        0.0
    };

    let full_spend = ad_spend + total_cogs;
    let roas = if full_spend > 0.0 {
        total_revenue / full_spend
    } else {
        0.0
    };

    DerivedMetrics {
        total_revenue,
        gross_profit,
        roi,
        cpa,
        roas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(
        ad_spend: f64,
        product_price: f64,
        number_of_sales: u64,
        unit_cogs: Option<f64>,
        roas_mode: bool,
    ) -> CampaignInputs {
        CampaignInputs {
            ad_spend: Some(ad_spend),
            product_price: Some(product_price),
            number_of_sales: Some(number_of_sales),
            unit_cogs,
            roas_mode,
        }
    }

    #[test]
    fn plain_mode_reference_campaign() {
        // R$500 of ads selling a R$2,000 product 3 times.
        let m = derive_metrics(&inputs(500.0, 2000.0, 3, None, false));
        assert!((m.total_revenue - 6000.0).abs() < 0.01);
        assert!((m.gross_profit - 5500.0).abs() < 0.01);
        assert!((m.roi - 11.0).abs() < 0.01);
        assert!((m.cpa - 166.67).abs() < 0.01);
    }

    #[test]
    fn roas_mode_subtracts_goods_cost() {
        let m = derive_metrics(&inputs(500.0, 2000.0, 3, Some(100.0), true));
        // 6000 − 500 − 3×100 = 5200
        assert!((m.gross_profit - 5200.0).abs() < 0.01);
        // 6000 / (500 + 300) = 7.5
        assert!((m.roas - 7.5).abs() < 0.01);
    }

    #[test]
    fn toggling_mode_only_moves_gross_profit() {
        let plain = derive_metrics(&inputs(500.0, 2000.0, 3, Some(100.0), false));
        let roas = derive_metrics(&inputs(500.0, 2000.0, 3, Some(100.0), true));
        assert_eq!(plain.total_revenue, roas.total_revenue);
        assert_eq!(plain.roi, roas.roi);
        assert_eq!(plain.cpa, roas.cpa);
        assert_eq!(plain.roas, roas.roas);
        assert!((plain.gross_profit - roas.gross_profit - 300.0).abs() < 0.01);
    }

    #[test]
    fn zero_spend_zeroes_the_spend_ratios() {
        let m = derive_metrics(&inputs(0.0, 2000.0, 3, None, false));
        assert_eq!(m.roi, 0.0);
        assert_eq!(m.cpa, 0.0);
        assert!((m.total_revenue - 6000.0).abs() < 0.01);
    }

    #[test]
    fn zero_sales_zeroes_revenue_and_cpa() {
        let m = derive_metrics(&inputs(500.0, 2000.0, 0, None, false));
        assert_eq!(m.total_revenue, 0.0);
        assert_eq!(m.cpa, 0.0);
        // All spend, no return: the ads lost their full value.
        assert!((m.gross_profit - -500.0).abs() < 0.01);
        assert!((m.roi - -1.0).abs() < 0.01);
    }

    #[test]
    fn empty_form_derives_all_zeros() {
        let m = derive_metrics(&CampaignInputs::default());
        assert_eq!(m, DerivedMetrics::default());
    }

    #[test]
    fn revenue_is_exact_for_integer_amounts() {
        let m = derive_metrics(&inputs(0.0, 249.0, 4, None, false));
        assert_eq!(m.total_revenue, 996.0);
    }

    #[test]
    fn roas_denominator_counts_cogs_even_in_plain_mode() {
        // The COGS field keeps its value while the toggle is off, and
        // the ROAS denominator always includes it.
        let m = derive_metrics(&inputs(500.0, 2000.0, 3, Some(100.0), false));
        assert!((m.roas - 7.5).abs() < 0.01);
    }

    #[test]
    fn cogs_only_campaign_still_has_a_roas() {
        // No ads at all, but goods were paid for: denominator is 300.
        let m = derive_metrics(&inputs(0.0, 150.0, 3, Some(100.0), true));
        assert!((m.roas - 1.5).abs() < 0.01);
        assert_eq!(m.roi, 0.0);
    }
}
