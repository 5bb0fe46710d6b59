//! Progressive income-tax liability estimation.
//!
//! The estimator turns a [`TaxpayerProfile`] into a [`TaxEstimate`] in
//! seven steps:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Deduction resolution: larger of standard and itemized |
//! | 2    | Taxable income: gross minus deduction, retirement, capped student loan interest |
//! | 3    | Bracket tax from the filing status' marginal schedule |
//! | 4    | Dependent credit, then clamp at zero |
//! | 5    | Effective and marginal rates |
//! | 6    | Refund estimate from the assumed-withholding heuristic |
//! | 7    | Advisory recommendations |
//!
//! The computation is pure and total: no I/O, no validation, no failure
//! path. Negative inputs flow through the arithmetic unchanged (the host
//! boundary is responsible for rejecting them), and taxable income is
//! deliberately not floored before the bracket lookup.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxassist_core::{FilingStatus, LiabilityEstimator, TaxYearRules, TaxpayerProfile};
//!
//! let rules = TaxYearRules::year_2023();
//! let estimator = LiabilityEstimator::new(&rules);
//!
//! let profile = TaxpayerProfile {
//!     gross_income: dec!(85000),
//!     filing_status: FilingStatus::Single,
//!     dependent_count: 0,
//!     mortgage_interest: dec!(0),
//!     charitable_donations: dec!(1000),
//!     medical_expenses: dec!(0),
//!     retirement_contributions: dec!(6000),
//!     student_loan_interest: dec!(0),
//!     investment_income: dec!(2000),
//!     self_employed: false,
//! };
//!
//! let estimate = estimator.estimate(&profile);
//!
//! // Taxable income 65150 lands in the 22% tier: 5147 + 20425 * 0.22
//! assert_eq!(estimate.tax_liability, dec!(9640.50));
//! assert_eq!(estimate.marginal_tax_rate, 22);
//! assert_eq!(estimate.refund_estimate, dec!(964.05));
//! ```

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::advice::{self, AdviceContext};
use crate::calculations::common::{max, rate_as_percent};
use crate::models::{TaxEstimate, TaxYearRules, TaxpayerProfile};

/// Calculator for income-tax liability estimates.
///
/// Borrows the rule set for the tax year; each call to
/// [`estimate`](Self::estimate) is independent, so a single estimator can
/// serve concurrent callers without coordination.
#[derive(Debug, Clone)]
pub struct LiabilityEstimator<'a> {
    rules: &'a TaxYearRules,
}

impl<'a> LiabilityEstimator<'a> {
    /// Creates an estimator over the given rule set.
    pub fn new(rules: &'a TaxYearRules) -> Self {
        Self { rules }
    }

    /// Computes the full estimate for one profile.
    pub fn estimate(
        &self,
        profile: &TaxpayerProfile,
    ) -> TaxEstimate {
        let standard_deduction = self.rules.standard_deduction_for(profile.filing_status);
        let itemized_deductions = self.itemized_deductions(profile);
        let deduction = max(standard_deduction, itemized_deductions);

        let taxable_income = self.taxable_income(profile, deduction);
        if taxable_income < Decimal::ZERO {
            warn!(
                %taxable_income,
                "deductions exceed gross income; bracket lookup proceeds on a negative amount"
            );
        }

        let schedule = self.rules.schedule_for(profile.filing_status);
        let bracket_tax = schedule.tax_for(taxable_income);
        let tax_liability = self.apply_dependent_credit(bracket_tax, profile.dependent_count);

        let effective_tax_rate = self.effective_rate(tax_liability, profile.gross_income);
        // Recomputed from the schedule, not derived from the tax amount,
        // so a credit-clamped liability still reports the tier reached.
        let marginal_tax_rate = rate_as_percent(schedule.marginal_rate(taxable_income));

        let refund_estimate = self.refund_estimate(tax_liability);

        let recommendations = advice::recommendations(&AdviceContext {
            profile,
            rules: self.rules,
            itemized_deductions,
            standard_deduction,
        });

        TaxEstimate {
            tax_liability,
            effective_tax_rate,
            marginal_tax_rate,
            refund_estimate,
            recommendations,
        }
    }

    /// Sum of the itemizable deduction components.
    fn itemized_deductions(
        &self,
        profile: &TaxpayerProfile,
    ) -> Decimal {
        profile.mortgage_interest + profile.charitable_donations + profile.medical_expenses
    }

    /// Gross income less the deduction, retirement contributions, and
    /// capped student loan interest. Not floored at zero.
    fn taxable_income(
        &self,
        profile: &TaxpayerProfile,
        deduction: Decimal,
    ) -> Decimal {
        let student_loan_interest = profile
            .student_loan_interest
            .min(self.rules.student_loan_interest_cap);

        profile.gross_income - deduction - profile.retirement_contributions - student_loan_interest
    }

    /// Subtracts the per-dependent credit and clamps at zero.
    fn apply_dependent_credit(
        &self,
        tax: Decimal,
        dependent_count: u32,
    ) -> Decimal {
        let credit = Decimal::from(dependent_count) * self.rules.dependent_credit;
        max(tax - credit, Decimal::ZERO)
    }

    /// Liability over gross income as a percentage; 0 when gross income
    /// is zero or negative (the division would otherwise be undefined).
    fn effective_rate(
        &self,
        tax: Decimal,
        gross_income: Decimal,
    ) -> Decimal {
        if gross_income > Decimal::ZERO {
            tax / gross_income * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }

    /// Assumed withholding minus liability.
    fn refund_estimate(
        &self,
        tax: Decimal,
    ) -> Decimal {
        let withholding = tax * self.rules.assumed_withholding_factor;
        withholding - tax
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::FilingStatus;

    fn base_profile() -> TaxpayerProfile {
        TaxpayerProfile {
            gross_income: dec!(85000),
            filing_status: FilingStatus::Single,
            dependent_count: 0,
            mortgage_interest: dec!(0),
            charitable_donations: dec!(0),
            medical_expenses: dec!(0),
            retirement_contributions: dec!(0),
            student_loan_interest: dec!(0),
            investment_income: dec!(0),
            self_employed: false,
        }
    }

    fn estimate(profile: &TaxpayerProfile) -> TaxEstimate {
        let rules = TaxYearRules::year_2023();
        LiabilityEstimator::new(&rules).estimate(profile)
    }

    // =========================================================================
    // estimate integration tests
    // =========================================================================

    #[test]
    fn single_filer_standard_case() {
        let mut profile = base_profile();
        profile.charitable_donations = dec!(1000);
        profile.retirement_contributions = dec!(6000);
        profile.investment_income = dec!(2000);

        let result = estimate(&profile);

        // Deduction max(13850, 1000) = 13850; taxable 85000 - 13850 - 6000 = 65150
        // Tax: 5147 + (65150 - 44725) * 0.22 = 9640.50
        assert_eq!(result.tax_liability, dec!(9640.50));
        assert_eq!(result.marginal_tax_rate, 22);
        assert_eq!(result.refund_estimate, dec!(964.05));
        assert_eq!(result.effective_tax_rate.round_dp(2), dec!(11.34));
        // Itemized 1000 < standard with donations present: bunching advice
        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendations[0].contains("bunching charitable donations"));
    }

    #[test]
    fn married_filer_with_dependents_clamps_to_zero() {
        let mut profile = base_profile();
        profile.gross_income = dec!(50000);
        profile.filing_status = FilingStatus::MarriedJoint;
        profile.dependent_count = 2;

        let result = estimate(&profile);

        // Taxable 50000 - 27700 = 22300; tax 2200 + 300 * 0.12 = 2236
        // Credit 4000 exceeds the tax: clamp to zero
        assert_eq!(result.tax_liability, dec!(0));
        assert_eq!(result.effective_tax_rate, dec!(0));
        assert_eq!(result.refund_estimate, dec!(0));
        // Marginal rate reflects the tier reached, not the clamped liability
        assert_eq!(result.marginal_tax_rate, 12);
    }

    #[test]
    fn head_of_household_uses_joint_schedule() {
        let mut profile = base_profile();
        profile.gross_income = dec!(50000);
        profile.filing_status = FilingStatus::HeadOfHousehold;

        let married = {
            let mut p = profile.clone();
            p.filing_status = FilingStatus::MarriedJoint;
            estimate(&p)
        };
        let head = estimate(&profile);

        assert_eq!(head.tax_liability, married.tax_liability);
        assert_eq!(head.marginal_tax_rate, married.marginal_tax_rate);
    }

    #[test]
    fn zero_income_has_zero_effective_rate() {
        let mut profile = base_profile();
        profile.gross_income = dec!(0);

        let result = estimate(&profile);

        assert_eq!(result.tax_liability, dec!(0));
        assert_eq!(result.effective_tax_rate, dec!(0));
        assert_eq!(result.refund_estimate, dec!(0));
    }

    #[test]
    fn negative_taxable_income_clamps_to_zero_liability() {
        let mut profile = base_profile();
        profile.gross_income = dec!(10000);
        profile.retirement_contributions = dec!(5000);

        // Taxable 10000 - 13850 - 5000 = -8850; base tier yields -885
        let result = estimate(&profile);

        assert_eq!(result.tax_liability, dec!(0));
        assert_eq!(result.marginal_tax_rate, 10);
    }

    #[test]
    fn student_loan_interest_deduction_is_capped() {
        let mut profile = base_profile();
        profile.student_loan_interest = dec!(4000);

        let capped = estimate(&profile);

        let mut at_cap = base_profile();
        at_cap.student_loan_interest = dec!(2500);

        assert_eq!(capped.tax_liability, estimate(&at_cap).tax_liability);
    }

    #[test]
    fn itemized_deductions_used_when_larger_than_standard() {
        let mut profile = base_profile();
        profile.mortgage_interest = dec!(12000);
        profile.charitable_donations = dec!(2000);
        profile.medical_expenses = dec!(1000);

        let result = estimate(&profile);

        // Itemized 15000 > standard 13850; taxable 70000
        // Tax: 5147 + (70000 - 44725) * 0.22 = 10707.50
        assert_eq!(result.tax_liability, dec!(10707.50));
    }

    // =========================================================================
    // bracket boundary tests
    // =========================================================================

    #[test]
    fn taxable_income_at_threshold_stays_in_lower_segment() {
        // Gross chosen so taxable income is exactly 11000
        let mut profile = base_profile();
        profile.gross_income = dec!(24850);

        let result = estimate(&profile);

        assert_eq!(result.tax_liability, dec!(1100.00));
        assert_eq!(result.marginal_tax_rate, 10);
    }

    #[test]
    fn taxable_income_just_above_threshold_steps_up() {
        let mut profile = base_profile();
        profile.gross_income = dec!(24851);

        let result = estimate(&profile);

        assert_eq!(result.tax_liability, dec!(1100.12));
        assert_eq!(result.marginal_tax_rate, 12);
    }

    #[test]
    fn tax_is_continuous_at_the_22_percent_boundary() {
        let liability_at = |gross: Decimal| {
            let mut profile = base_profile();
            profile.gross_income = gross;
            estimate(&profile).tax_liability
        };

        // Taxable income 44724, 44725, 44726
        let below = liability_at(dec!(58574));
        let at = liability_at(dec!(58575));
        let above = liability_at(dec!(58576));

        assert_eq!(at - below, dec!(0.12));
        assert_eq!(above - at, dec!(0.22));
    }

    // =========================================================================
    // property tests
    // =========================================================================

    #[test]
    fn liability_is_monotonic_in_gross_income() {
        let incomes = [
            dec!(0),
            dec!(10000),
            dec!(24850),
            dec!(50000),
            dec!(100000),
            dec!(200000),
            dec!(400000),
            dec!(700000),
        ];

        let mut previous = Decimal::MIN;
        for income in incomes {
            let mut profile = base_profile();
            profile.gross_income = income;

            let liability = estimate(&profile).tax_liability;
            assert!(
                liability >= previous,
                "liability decreased at income {income}: {liability} < {previous}"
            );
            previous = liability;
        }
    }

    #[test]
    fn liability_is_never_negative() {
        for gross in [dec!(0), dec!(1), dec!(5000), dec!(13850), dec!(20000)] {
            let mut profile = base_profile();
            profile.gross_income = gross;
            profile.dependent_count = 3;
            profile.retirement_contributions = dec!(10000);

            let result = estimate(&profile);
            assert!(
                result.tax_liability >= Decimal::ZERO,
                "negative liability for gross {gross}"
            );
        }
    }

    #[test]
    fn recommendations_are_never_empty() {
        for (retirement, donations, self_employed) in [
            (dec!(0), dec!(0), false),
            (dec!(6000), dec!(0), false),
            (dec!(6000), dec!(1000), true),
        ] {
            let mut profile = base_profile();
            profile.retirement_contributions = retirement;
            profile.charitable_donations = donations;
            profile.self_employed = self_employed;

            assert!(!estimate(&profile).recommendations.is_empty());
        }
    }

    #[test]
    fn estimate_is_idempotent() {
        let mut profile = base_profile();
        profile.charitable_donations = dec!(1000);
        profile.retirement_contributions = dec!(6000);
        profile.investment_income = dec!(2000);

        let rules = TaxYearRules::year_2023();
        let estimator = LiabilityEstimator::new(&rules);

        assert_eq!(estimator.estimate(&profile), estimator.estimate(&profile));
    }
}
