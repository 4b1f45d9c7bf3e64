//! Centralized benchmarks for campaign verdicts.
//!
//! These values drive both the interpretation lines and the digest
//! verdict column. Changing a value here changes every surface that
//! renders a verdict.

/// ROAS at which total spend (ads plus goods) is exactly recovered.
pub const BREAKEVEN_ROAS: f64 = 1.0;

/// ROAS at or above which a campaign is called strong. The common
/// agency benchmark of 4:1 return on ad spend.
pub const STRONG_ROAS: f64 = 4.0;

/// Gross-profit amounts within half a cent of zero are treated as
/// break-even rather than profit or loss.
pub const PROFIT_EPSILON: f64 = 0.005;
