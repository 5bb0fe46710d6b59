//! Boundary validation for taxpayer profiles.
//!
//! The engine itself never validates: it is a total function that
//! propagates whatever numbers it is given. Rejecting nonsense inputs
//! is this host's job, before the engine ever sees them.

use rust_decimal::Decimal;
use taxassist_core::TaxpayerProfile;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount {
        field: &'static str,
        value: Decimal,
    },
}

/// Checks every monetary field for a negative value.
///
/// Zero gross income is accepted; the engine defines the effective rate
/// as 0 for that case.
pub fn validate(profile: &TaxpayerProfile) -> Result<(), InputError> {
    let fields = [
        ("gross income", profile.gross_income),
        ("mortgage interest", profile.mortgage_interest),
        ("charitable donations", profile.charitable_donations),
        ("medical expenses", profile.medical_expenses),
        ("retirement contributions", profile.retirement_contributions),
        ("student loan interest", profile.student_loan_interest),
        ("investment income", profile.investment_income),
    ];

    for (field, value) in fields {
        if value < Decimal::ZERO {
            return Err(InputError::NegativeAmount { field, value });
        }
    }

    Ok(())
}
