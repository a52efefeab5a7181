use crate::domain::model::{round_display, EstimateResult};
use rust_decimal::Decimal;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Formats an amount as whole currency units with thousands separators,
/// e.g. `1600.4` -> `$1,600`.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = round_display(amount);
    let digits = rounded.abs().trunc().to_string();
    let grouped = group_thousands(&digits);

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{}", symbol, grouped)
    } else {
        format!("{}{}", symbol, grouped)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_breakdown(result: &EstimateResult, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "  Administrative savings: {}\n",
        format_currency(result.admin_savings, symbol)
    ));
    output.push_str(&format!(
        "  Product savings:        {}\n",
        format_currency(result.product_savings, symbol)
    ));
    output.push_str(&format!(
        "  Total annual savings:   {}\n",
        format_currency(result.total_savings, symbol)
    ));
    output
}
