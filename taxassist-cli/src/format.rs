//! Display formatting for estimates.
//!
//! The engine keeps full precision; rounding happens only here, at the
//! display boundary: dollar amounts to whole dollars, the effective rate
//! to one decimal place, the marginal rate as an integer percent.

use rust_decimal::Decimal;
use taxassist_core::TaxEstimate;
use taxassist_core::calculations::common::round_half_up;

/// Formats a dollar amount: whole dollars, half-away-from-zero, with
/// thousands separators ("$9,641"; negatives render as "-$42").
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value, 0);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };

    format!("{}${}", sign, group_thousands(&rounded.abs().to_string()))
}

/// Formats a percentage to one decimal place ("11.3%").
pub fn format_percent1(value: Decimal) -> String {
    format!("{:.1}%", round_half_up(value, 1))
}

/// Renders the human-readable estimate report.
pub fn render_text(estimate: &TaxEstimate) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Estimated Tax Liability: {}\n",
        format_currency(estimate.tax_liability)
    ));
    out.push_str(&format!(
        "Estimated Refund:        {}\n",
        format_currency(estimate.refund_estimate)
    ));
    out.push_str(&format!(
        "Effective Tax Rate:      {}\n",
        format_percent1(estimate.effective_tax_rate)
    ));
    out.push_str(&format!(
        "Marginal Tax Rate:       {}%\n",
        estimate.marginal_tax_rate
    ));

    out.push_str("\nRecommendations:\n");
    for recommendation in &estimate.recommendations {
        out.push_str(&format!("  - {recommendation}\n"));
    }

    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
