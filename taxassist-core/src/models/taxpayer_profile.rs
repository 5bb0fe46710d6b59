use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::FilingStatus;

/// One taxpayer's inputs for a liability estimate.
///
/// Monetary fields are expected to be non-negative; the engine does not
/// validate them (the host boundary does).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxpayerProfile {
    pub gross_income: Decimal,
    pub filing_status: FilingStatus,
    pub dependent_count: u32,

    // Itemizable deduction components
    pub mortgage_interest: Decimal,
    pub charitable_donations: Decimal,
    pub medical_expenses: Decimal,

    // Above-the-line reductions
    pub retirement_contributions: Decimal,
    pub student_loan_interest: Decimal,

    pub investment_income: Decimal,
    pub self_employed: bool,
}
