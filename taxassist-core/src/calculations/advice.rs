//! Rule-based optimization recommendations.
//!
//! Each advisory is an independent predicate/message pair. Rules are
//! evaluated in a fixed order and every matching message is included;
//! the generic fallback is appended only when no rule fired, so the
//! resulting list is never empty.

use rust_decimal::Decimal;

use crate::models::{TaxYearRules, TaxpayerProfile};

/// Everything the advisory rules can look at: the raw profile, the
/// active rule set, and the deduction amounts the estimator resolved.
#[derive(Debug, Clone, Copy)]
pub struct AdviceContext<'a> {
    pub profile: &'a TaxpayerProfile,
    pub rules: &'a TaxYearRules,
    pub itemized_deductions: Decimal,
    pub standard_deduction: Decimal,
}

struct AdviceRule {
    message: &'static str,
    applies: fn(&AdviceContext) -> bool,
}

const ADVICE_RULES: &[AdviceRule] = &[
    AdviceRule {
        message: "Increase retirement contributions to reduce taxable income",
        applies: |ctx| {
            ctx.profile.retirement_contributions < ctx.rules.retirement_contribution_target
        },
    },
    AdviceRule {
        message: "Your itemized deductions are less than the standard deduction. \
                  Consider bunching charitable donations in alternate years.",
        applies: |ctx| {
            ctx.itemized_deductions < ctx.standard_deduction
                && ctx.profile.charitable_donations > Decimal::ZERO
        },
    },
    AdviceRule {
        message: "As a self-employed individual, consider setting up a SEP IRA or \
                  Solo 401(k) for higher retirement contribution limits.",
        applies: |ctx| ctx.profile.self_employed,
    },
    AdviceRule {
        message: "Your income may subject you to the Net Investment Income Tax. \
                  Consider tax-loss harvesting strategies.",
        applies: |ctx| {
            ctx.profile.gross_income > ctx.rules.niit_income_threshold
                && ctx.profile.investment_income > Decimal::ZERO
        },
    },
];

const FALLBACK_MESSAGE: &str =
    "Your tax strategy appears optimized based on the provided information.";

/// Evaluates every rule against `ctx`, in order.
pub fn recommendations(ctx: &AdviceContext) -> Vec<String> {
    let mut messages: Vec<String> = ADVICE_RULES
        .iter()
        .filter(|rule| (rule.applies)(ctx))
        .map(|rule| rule.message.to_string())
        .collect();

    if messages.is_empty() {
        messages.push(FALLBACK_MESSAGE.to_string());
    }

    messages
}
