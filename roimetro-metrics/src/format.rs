//! Output rendering for the pt-BR locale.
//!
//! Currency renders the way the product ships: BRL with dot thousands
//! grouping and a comma decimal separator (`R$ 1.234,56`). Ratios keep
//! a dot decimal because they read as multiples (`7.50x`), not money.

/// Format an amount as Brazilian real: `R$ 1.234,56`.
///
/// The amount is rounded to whole cents first, so `166.666…` renders
/// as `R$ 166,67`. Negative amounts carry a leading minus.
pub fn format_brl(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    // -0.001 rounds to zero cents; don't print "-R$ 0,00".
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, group_thousands(whole), frac)
}

/// Format a ratio as a multiple: `11.00x`.
pub fn format_multiple(value: f64) -> String {
    format!("{:.2}x", value)
}

/// Format a ratio as a percentage: `0.11` becomes `11.00%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Insert dot thousands separators into a whole number.
fn group_thousands(whole: u64) -> String {
    if whole < 1_000 {
        return whole.to_string();
    }

    let s = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped.chars().rev().collect()
}
