//! Form state and snapshots.
//!
//! The state owns exactly the five inputs. Outputs never live here:
//! every snapshot re-derives them, so a snapshot can never disagree
//! with the inputs that produced it.

use serde::{Deserialize, Serialize};

use roimetro_metrics::format::{format_brl, format_multiple, format_percent};
use roimetro_metrics::{derive_metrics, CampaignInputs, DerivedMetrics};

use crate::error::{FormError, FormResult};
use crate::ops::{Field, FormOperation};

/// A point-in-time view of the form: the inputs plus the outputs they
/// derive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSnapshot {
    /// Revision of the state that produced this snapshot.
    pub revision: u64,
    /// The five inputs as currently entered.
    pub inputs: CampaignInputs,
    /// Metrics derived from those inputs.
    pub metrics: DerivedMetrics,
}

impl FormSnapshot {
    /// Render the snapshot as the terminal output panel.
    ///
    /// The COGS input and the ROAS output only appear in ROAS mode.
    pub fn to_panel(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("[ROIMETRO \u{2014} revision {}]", self.revision));
        lines.push(format!(
            "Mode: {}",
            if self.inputs.roas_mode {
                "ROAS (COGS included)"
            } else {
                "plain profit"
            }
        ));

        lines.push(String::new());
        lines.push("Inputs:".into());
        lines.push(format!(
            "  ad spend         {}",
            amount_cell(self.inputs.ad_spend)
        ));
        lines.push(format!(
            "  product price    {}",
            amount_cell(self.inputs.product_price)
        ));
        lines.push(format!(
            "  sales            {}",
            match self.inputs.number_of_sales {
                Some(n) => n.to_string(),
                None => "-".into(),
            }
        ));
        if self.inputs.roas_mode {
            lines.push(format!(
                "  unit COGS        {}",
                amount_cell(self.inputs.unit_cogs)
            ));
        }

        lines.push(String::new());
        lines.push("Outputs:".into());
        lines.push(format!(
            "  total revenue    {}",
            format_brl(self.metrics.total_revenue)
        ));
        lines.push(format!(
            "  gross profit     {}",
            format_brl(self.metrics.gross_profit)
        ));
        lines.push(format!(
            "  ROI              {} ({})",
            format_multiple(self.metrics.roi),
            format_percent(self.metrics.roi)
        ));
        lines.push(format!("  CPA              {}", format_brl(self.metrics.cpa)));
        if self.inputs.roas_mode {
            lines.push(format!(
                "  ROAS             {}",
                format_multiple(self.metrics.roas)
            ));
        }

        lines.join("\n")
    }
}

/// An entered amount, or a dash for an untouched field.
fn amount_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format_brl(v),
        None => "-".into(),
    }
}

/// The form's mutable state. Owns the inputs; nothing else.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    inputs: CampaignInputs,
    revision: u64,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current inputs.
    pub fn inputs(&self) -> &CampaignInputs {
        &self.inputs
    }

    /// Monotonic edit counter. Bumped by mutations only.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Re-derive the outputs from the current inputs.
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            revision: self.revision,
            inputs: self.inputs.clone(),
            metrics: derive_metrics(&self.inputs),
        }
    }

    /// Apply one operation and return the resulting snapshot.
    ///
    /// Mutations validate first; a rejected edit leaves both the inputs
    /// and the revision untouched.
    pub fn apply(&mut self, op: &FormOperation) -> FormResult<FormSnapshot> {
        match op {
            FormOperation::SetAdSpend { amount } => {
                self.inputs.ad_spend = Some(validate_amount(Field::AdSpend, *amount)?);
                self.revision += 1;
            }
            FormOperation::SetProductPrice { amount } => {
                self.inputs.product_price = Some(validate_amount(Field::ProductPrice, *amount)?);
                self.revision += 1;
            }
            FormOperation::SetSalesCount { count } => {
                self.inputs.number_of_sales = Some(*count);
                self.revision += 1;
            }
            FormOperation::SetUnitCogs { amount } => {
                self.inputs.unit_cogs = Some(validate_amount(Field::UnitCogs, *amount)?);
                self.revision += 1;
            }
            FormOperation::ClearField { field } => {
                match field {
                    Field::AdSpend => self.inputs.ad_spend = None,
                    Field::ProductPrice => self.inputs.product_price = None,
                    Field::SalesCount => self.inputs.number_of_sales = None,
                    Field::UnitCogs => self.inputs.unit_cogs = None,
                }
                self.revision += 1;
            }
            FormOperation::SetRoasMode { enabled } => {
                self.inputs.roas_mode = *enabled;
                self.revision += 1;
            }
            FormOperation::Reset => {
                self.inputs = CampaignInputs::default();
                self.revision += 1;
            }
            FormOperation::Snapshot => {}
        }

        Ok(self.snapshot())
    }
}

/// Amounts must be finite and non-negative before they reach the
/// calculator (the calculator itself is total and never checks).
pub(crate) fn validate_amount(field: Field, amount: f64) -> FormResult<f64> {
    if !amount.is_finite() {
        return Err(FormError::InvalidAmount {
            field: field.to_string(),
            reason: "must be a finite number".into(),
        });
    }
    if amount < 0.0 {
        return Err(FormError::NegativeAmount {
            field: field.to_string(),
            value: amount,
        });
    }
    Ok(amount)
}
