use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of a liability estimate.
///
/// Values are full precision; display rounding is the presentation
/// layer's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxEstimate {
    /// Total tax after credits, never negative.
    pub tax_liability: Decimal,

    /// Liability over gross income as a percentage.
    /// Reported as 0 when gross income is zero or negative.
    pub effective_tax_rate: Decimal,

    /// Whole-percent rate of the bracket tier reached by taxable income.
    pub marginal_tax_rate: u32,

    /// Assumed withholding (liability x 1.10) minus liability.
    /// The withholding factor is a fixed heuristic, not a withholding model.
    pub refund_estimate: Decimal,

    /// Advisory messages in rule order; never empty.
    pub recommendations: Vec<String>,
}
