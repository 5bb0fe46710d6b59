use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use taxassist_core::{FilingStatus, LiabilityEstimator, TaxYearRules, TaxpayerProfile};
use taxassist_data::ScheduleLoader;
use tracing::{debug, info};

use crate::{format, validate};

/// Estimate income-tax liability from a taxpayer profile.
///
/// Applies the built-in 2023 bracket schedules (replaceable via
/// --brackets), prints a report with display rounding, and emits
/// rule-based optimization recommendations. Defaults mirror the
/// assistant's tax prediction form.
#[derive(Parser, Debug)]
#[command(name = "taxassist")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Annual gross income in dollars
    #[arg(long, default_value = "85000")]
    pub income: Decimal,

    /// Filing status: single, married, or head
    #[arg(long, default_value = "single", value_parser = parse_filing_status)]
    pub filing_status: FilingStatus,

    /// Number of dependents
    #[arg(long, default_value_t = 0)]
    pub dependents: u32,

    /// Mortgage interest paid (itemizable)
    #[arg(long, default_value = "0")]
    pub mortgage_interest: Decimal,

    /// Charitable donations (itemizable)
    #[arg(long, default_value = "1000")]
    pub charitable_donations: Decimal,

    /// Medical expenses (itemizable)
    #[arg(long, default_value = "0")]
    pub medical_expenses: Decimal,

    /// Retirement contributions (reduce taxable income)
    #[arg(long, default_value = "6000")]
    pub retirement_contributions: Decimal,

    /// Student loan interest paid (deductible up to the cap)
    #[arg(long, default_value = "0")]
    pub student_loan_interest: Decimal,

    /// Investment income
    #[arg(long, default_value = "2000")]
    pub investment_income: Decimal,

    /// Treat the filer as self-employed
    #[arg(long, default_value_t = false)]
    pub self_employed: bool,

    /// Replace the built-in bracket tables with a CSV schedule file
    #[arg(long)]
    pub brackets: Option<PathBuf>,

    /// Emit the full-precision estimate as JSON instead of the report
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

fn parse_filing_status(s: &str) -> Result<FilingStatus, String> {
    FilingStatus::parse(s)
        .ok_or_else(|| format!("expected one of: single, married, head (got '{s}')"))
}

impl Args {
    pub fn profile(&self) -> TaxpayerProfile {
        TaxpayerProfile {
            gross_income: self.income,
            filing_status: self.filing_status,
            dependent_count: self.dependents,
            mortgage_interest: self.mortgage_interest,
            charitable_donations: self.charitable_donations,
            medical_expenses: self.medical_expenses,
            retirement_contributions: self.retirement_contributions,
            student_loan_interest: self.student_loan_interest,
            investment_income: self.investment_income,
            self_employed: self.self_employed,
        }
    }
}

pub fn run(args: Args) -> Result<()> {
    let profile = args.profile();
    validate::validate(&profile).context("invalid taxpayer profile")?;

    let mut rules = TaxYearRules::year_2023();
    if let Some(path) = &args.brackets {
        let file = File::open(path)
            .with_context(|| format!("cannot open bracket file '{}'", path.display()))?;
        let records = ScheduleLoader::parse(file).context("cannot parse bracket file")?;
        let pair = ScheduleLoader::build(&records).context("cannot assemble bracket schedules")?;

        debug!(
            single_tiers = pair.single.tiers.len(),
            joint_tiers = pair.joint.tiers.len(),
            "bracket schedules loaded from file"
        );
        rules.single_schedule = pair.single;
        rules.joint_schedule = pair.joint;
    }

    info!(
        tax_year = rules.tax_year,
        status = profile.filing_status.as_str(),
        "estimating liability"
    );
    let estimate = LiabilityEstimator::new(&rules).estimate(&profile);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        print!("{}", format::render_text(&estimate));
    }

    Ok(())
}
