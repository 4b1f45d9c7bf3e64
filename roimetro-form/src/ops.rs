//! Form operations — the complete vocabulary of valid edits.
//!
//! Every change the form can make to the calculator inputs is one of
//! these variants. A request that doesn't parse into one is rejected
//! before any state is touched: no partial edits, no malformed values
//! reaching the calculator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A form field holding one calculator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    AdSpend,
    ProductPrice,
    SalesCount,
    UnitCogs,
}

impl Field {
    /// The snake_case name the field goes by in CSV headers and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Field::AdSpend => "ad_spend",
            Field::ProductPrice => "product_price",
            Field::SalesCount => "number_of_sales",
            Field::UnitCogs => "unit_cogs",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Every valid operation a caller can request of the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "params")]
pub enum FormOperation {
    // ========================================
    // EDITS (mutate the inputs)
    // ========================================

    /// Set the total ad spend.
    SetAdSpend { amount: f64 },

    /// Set the product price.
    SetProductPrice { amount: f64 },

    /// Set the number of sales closed.
    SetSalesCount { count: u64 },

    /// Set the per-unit cost of goods (CMV).
    SetUnitCogs { amount: f64 },

    /// Clear one input field back to absent.
    ClearField { field: Field },

    /// Switch the profit formula between plain and COGS-inclusive.
    SetRoasMode { enabled: bool },

    /// Clear every field and drop back to plain mode.
    Reset,

    // ========================================
    // QUERIES (read-only, always safe)
    // ========================================

    /// Return the current inputs and freshly derived outputs.
    Snapshot,
}

impl FormOperation {
    /// Is this operation read-only? Read-only operations never mutate state.
    pub fn is_read_only(&self) -> bool {
        matches!(self, FormOperation::Snapshot)
    }

    /// Does this operation change the inputs?
    pub fn is_mutation(&self) -> bool {
        !self.is_read_only()
    }

    /// Human-readable description of what this operation does.
    pub fn describe(&self) -> String {
        match self {
            FormOperation::SetAdSpend { amount } => format!("Set ad_spend = {amount}"),
            FormOperation::SetProductPrice { amount } => {
                format!("Set product_price = {amount}")
            }
            FormOperation::SetSalesCount { count } => {
                format!("Set number_of_sales = {count}")
            }
            FormOperation::SetUnitCogs { amount } => format!("Set unit_cogs = {amount}"),
            FormOperation::ClearField { field } => format!("Clear {field}"),
            FormOperation::SetRoasMode { enabled } => {
                format!("ROAS mode {}", if *enabled { "on" } else { "off" })
            }
            FormOperation::Reset => "Reset the form".into(),
            FormOperation::Snapshot => "Snapshot current state".into(),
        }
    }
}
