use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural problems in a bracket schedule.
///
/// Schedules are validated when they are loaded or assembled, not on
/// every lookup; the built-in rule sets are well formed by construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// Tier thresholds must be strictly descending.
    #[error("tier thresholds must be strictly descending: {0} follows {1}")]
    UnorderedThresholds(Decimal, Decimal),

    /// A marginal rate outside [0, 1].
    #[error("marginal rate must be between 0 and 1, got {0}")]
    RateOutOfRange(Decimal),

    /// A negative base tax amount.
    #[error("base tax must be non-negative, got {0}")]
    NegativeBaseTax(Decimal),
}

/// One segment of a progressive tax schedule.
///
/// A tier applies when taxable income strictly exceeds `threshold`;
/// the tax is then `base_tax` plus the excess over the threshold at
/// the tier's marginal `rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTier {
    pub threshold: Decimal,
    pub base_tax: Decimal,
    pub rate: Decimal,
}

/// A complete marginal-rate schedule for one filing status.
///
/// `tiers` is ordered by descending threshold and evaluated top-down:
/// the first tier whose threshold is strictly exceeded applies. When no
/// tier matches, `base_rate` applies to the full taxable amount -- also
/// when that amount is negative, which produces a negative tax that the
/// engine's post-credit clamp later restores to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSchedule {
    pub tiers: Vec<BracketTier>,
    pub base_rate: Decimal,
}

impl BracketSchedule {
    /// Tax owed on `taxable_income` under this schedule.
    pub fn tax_for(&self, taxable_income: Decimal) -> Decimal {
        match self.tier_for(taxable_income) {
            Some(tier) => tier.base_tax + (taxable_income - tier.threshold) * tier.rate,
            None => taxable_income * self.base_rate,
        }
    }

    /// Marginal rate applied to the last dollar of `taxable_income`.
    ///
    /// Uses the same tier selection as [`tax_for`](Self::tax_for), so the
    /// reported rate always matches the tier the tax came from.
    pub fn marginal_rate(&self, taxable_income: Decimal) -> Decimal {
        match self.tier_for(taxable_income) {
            Some(tier) => tier.rate,
            None => self.base_rate,
        }
    }

    /// Checks tier ordering and value ranges.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.base_rate < Decimal::ZERO || self.base_rate > Decimal::ONE {
            return Err(ScheduleError::RateOutOfRange(self.base_rate));
        }
        for pair in self.tiers.windows(2) {
            if pair[1].threshold >= pair[0].threshold {
                return Err(ScheduleError::UnorderedThresholds(
                    pair[1].threshold,
                    pair[0].threshold,
                ));
            }
        }
        for tier in &self.tiers {
            if tier.rate < Decimal::ZERO || tier.rate > Decimal::ONE {
                return Err(ScheduleError::RateOutOfRange(tier.rate));
            }
            if tier.base_tax < Decimal::ZERO {
                return Err(ScheduleError::NegativeBaseTax(tier.base_tax));
            }
        }
        Ok(())
    }

    fn tier_for(&self, taxable_income: Decimal) -> Option<&BracketTier> {
        self.tiers.iter().find(|t| taxable_income > t.threshold)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn two_tier_schedule() -> BracketSchedule {
        BracketSchedule {
            tiers: vec![
                BracketTier {
                    threshold: dec!(44725),
                    base_tax: dec!(5147),
                    rate: dec!(0.22),
                },
                BracketTier {
                    threshold: dec!(11000),
                    base_tax: dec!(1100),
                    rate: dec!(0.12),
                },
            ],
            base_rate: dec!(0.10),
        }
    }

    // =========================================================================
    // tax_for tests
    // =========================================================================

    #[test]
    fn tax_for_uses_first_exceeded_tier() {
        let schedule = two_tier_schedule();

        // 5147 + (65150 - 44725) * 0.22 = 5147 + 4493.50
        assert_eq!(schedule.tax_for(dec!(65150)), dec!(9640.50));
    }

    #[test]
    fn tax_for_threshold_is_strict() {
        let schedule = two_tier_schedule();

        // Exactly at a threshold the lower segment still applies.
        assert_eq!(schedule.tax_for(dec!(11000)), dec!(1100.00));
        assert_eq!(schedule.tax_for(dec!(44725)), dec!(1100) + dec!(33725) * dec!(0.12));
    }

    #[test]
    fn tax_for_continuous_across_threshold() {
        let schedule = two_tier_schedule();

        let below = schedule.tax_for(dec!(10999));
        let at = schedule.tax_for(dec!(11000));
        let above = schedule.tax_for(dec!(11001));

        assert_eq!(at - below, dec!(0.10));
        assert_eq!(above - at, dec!(0.12));
    }

    #[test]
    fn tax_for_base_rate_below_lowest_threshold() {
        let schedule = two_tier_schedule();

        assert_eq!(schedule.tax_for(dec!(5000)), dec!(500.00));
    }

    #[test]
    fn tax_for_negative_income_goes_negative() {
        let schedule = two_tier_schedule();

        // No floor here; the caller clamps after credits.
        assert_eq!(schedule.tax_for(dec!(-1000)), dec!(-100.00));
    }

    // =========================================================================
    // marginal_rate tests
    // =========================================================================

    #[test]
    fn marginal_rate_matches_tier_selection() {
        let schedule = two_tier_schedule();

        assert_eq!(schedule.marginal_rate(dec!(65150)), dec!(0.22));
        assert_eq!(schedule.marginal_rate(dec!(20000)), dec!(0.12));
        assert_eq!(schedule.marginal_rate(dec!(11000)), dec!(0.10));
        assert_eq!(schedule.marginal_rate(dec!(-50)), dec!(0.10));
    }

    // =========================================================================
    // validate tests
    // =========================================================================

    #[test]
    fn validate_accepts_well_formed_schedule() {
        assert_eq!(two_tier_schedule().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_unordered_thresholds() {
        let mut schedule = two_tier_schedule();
        schedule.tiers.reverse();

        assert_eq!(
            schedule.validate(),
            Err(ScheduleError::UnorderedThresholds(dec!(44725), dec!(11000)))
        );
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let mut schedule = two_tier_schedule();
        schedule.tiers[0].rate = dec!(1.5);

        assert_eq!(schedule.validate(), Err(ScheduleError::RateOutOfRange(dec!(1.5))));
    }

    #[test]
    fn validate_rejects_negative_base_rate() {
        let mut schedule = two_tier_schedule();
        schedule.base_rate = dec!(-0.10);

        assert_eq!(
            schedule.validate(),
            Err(ScheduleError::RateOutOfRange(dec!(-0.10)))
        );
    }

    #[test]
    fn validate_rejects_negative_base_tax() {
        let mut schedule = two_tier_schedule();
        schedule.tiers[1].base_tax = dec!(-1);

        assert_eq!(schedule.validate(), Err(ScheduleError::NegativeBaseTax(dec!(-1))));
    }

    #[test]
    fn validate_accepts_empty_tier_list() {
        let schedule = BracketSchedule {
            tiers: vec![],
            base_rate: dec!(0.10),
        };

        // A flat tax is a degenerate but valid schedule.
        assert_eq!(schedule.validate(), Ok(()));
        assert_eq!(schedule.tax_for(dec!(1000)), dec!(100.00));
    }
}
