use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{BracketSchedule, BracketTier, FilingStatus};

/// All constants the estimator needs for one tax year: bracket schedules,
/// standard deductions, credit amounts, caps, and advisory thresholds.
///
/// Only two schedules exist. Head-of-household filers are resolved to the
/// joint schedule and joint standard deduction -- a deliberate
/// simplification. Correcting it later means adding a third schedule and
/// reassigning one match arm in [`schedule_for`](Self::schedule_for).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearRules {
    pub tax_year: i32,

    pub single_schedule: BracketSchedule,
    pub joint_schedule: BracketSchedule,

    pub single_standard_deduction: Decimal,
    pub joint_standard_deduction: Decimal,

    /// Credit per dependent, no phase-out.
    pub dependent_credit: Decimal,
    /// Maximum deductible student loan interest.
    pub student_loan_interest_cap: Decimal,
    /// Assumed withholding as a multiple of liability.
    pub assumed_withholding_factor: Decimal,

    /// Retirement contributions below this trigger the contribution advisory.
    pub retirement_contribution_target: Decimal,
    /// Gross income above this (with any investment income) triggers the
    /// net investment income tax advisory.
    pub niit_income_threshold: Decimal,
}

impl TaxYearRules {
    /// The bracket schedule for `status`.
    pub fn schedule_for(&self, status: FilingStatus) -> &BracketSchedule {
        match status {
            FilingStatus::Single => &self.single_schedule,
            FilingStatus::MarriedJoint => &self.joint_schedule,
            // Simplification: head-of-household files on the joint schedule.
            FilingStatus::HeadOfHousehold => &self.joint_schedule,
        }
    }

    /// The standard deduction for `status`.
    pub fn standard_deduction_for(&self, status: FilingStatus) -> Decimal {
        match status {
            FilingStatus::Single => self.single_standard_deduction,
            FilingStatus::MarriedJoint => self.joint_standard_deduction,
            FilingStatus::HeadOfHousehold => self.joint_standard_deduction,
        }
    }

    /// Built-in rule set with the 2023 federal schedules.
    pub fn year_2023() -> Self {
        Self {
            tax_year: 2023,
            single_schedule: BracketSchedule {
                tiers: vec![
                    tier(dec!(578125), dec!(174238.25), dec!(0.37)),
                    tier(dec!(231250), dec!(52832), dec!(0.35)),
                    tier(dec!(182100), dec!(37104), dec!(0.32)),
                    tier(dec!(95375), dec!(16290), dec!(0.24)),
                    tier(dec!(44725), dec!(5147), dec!(0.22)),
                    tier(dec!(11000), dec!(1100), dec!(0.12)),
                ],
                base_rate: dec!(0.10),
            },
            joint_schedule: BracketSchedule {
                tiers: vec![
                    tier(dec!(693750), dec!(186601.50), dec!(0.37)),
                    tier(dec!(462500), dec!(105664), dec!(0.35)),
                    tier(dec!(364200), dec!(74208), dec!(0.32)),
                    tier(dec!(190750), dec!(32580), dec!(0.24)),
                    tier(dec!(89450), dec!(10294), dec!(0.22)),
                    tier(dec!(22000), dec!(2200), dec!(0.12)),
                ],
                base_rate: dec!(0.10),
            },
            single_standard_deduction: dec!(13850),
            joint_standard_deduction: dec!(27700),
            dependent_credit: dec!(2000),
            student_loan_interest_cap: dec!(2500),
            assumed_withholding_factor: dec!(1.10),
            retirement_contribution_target: dec!(6000),
            niit_income_threshold: dec!(200000),
        }
    }
}

fn tier(
    threshold: Decimal,
    base_tax: Decimal,
    rate: Decimal,
) -> BracketTier {
    BracketTier {
        threshold,
        base_tax,
        rate,
    }
}
