use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use taxassist_core::{BracketSchedule, BracketTier, ScheduleError};
use thiserror::Error;

/// Schedule code for single filers (IRS Schedule X).
const SCHEDULE_SINGLE: &str = "X";
/// Schedule code for joint filers (IRS Schedule Y-1). Head-of-household
/// profiles also resolve here; see `TaxYearRules::schedule_for`.
const SCHEDULE_JOINT: &str = "Y-1";

/// Errors that can occur when loading bracket schedule data.
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleLoadError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown schedule code '{0}' (expected X or Y-1)")]
    InvalidSchedule(String),

    #[error("Schedule {0} missing from the bracket file")]
    MissingSchedule(&'static str),

    #[error("Schedule {0} has no base row (threshold 0)")]
    MissingBaseTier(String),

    #[error("Schedule {schedule} lists threshold {threshold} more than once")]
    DuplicateThreshold {
        schedule: String,
        threshold: Decimal,
    },

    #[error("Schedule {0} base row must carry zero base tax, got {1}")]
    BaseTierTax(String, Decimal),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

impl From<csv::Error> for ScheduleLoadError {
    fn from(err: csv::Error) -> Self {
        ScheduleLoadError::CsvParse(err.to_string())
    }
}

/// A single record from the bracket schedule CSV file.
///
/// Columns:
/// - `schedule`: the IRS schedule code (X or Y-1)
/// - `threshold`: the income this tier starts strictly above; the
///   threshold-0 row defines the schedule's base rate
/// - `base_tax`: tax owed at the threshold (must be 0 on the base row)
/// - `rate`: the marginal rate as a decimal (e.g., 0.22 for 22%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub schedule: String,
    pub threshold: Decimal,
    pub base_tax: Decimal,
    pub rate: Decimal,
}

/// The two schedules a rule set needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulePair {
    pub single: BracketSchedule,
    pub joint: BracketSchedule,
}

/// Loader for bracket schedules from CSV data.
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file
    /// or a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, ScheduleLoadError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Assemble parsed records into the single and joint schedules.
    ///
    /// Records are grouped by schedule code; within each group the
    /// threshold-0 row becomes the base rate and the remaining rows
    /// become tiers ordered by descending threshold. Both schedules must
    /// be present and structurally valid.
    pub fn build(records: &[BracketRecord]) -> Result<SchedulePair, ScheduleLoadError> {
        for record in records {
            if record.schedule != SCHEDULE_SINGLE && record.schedule != SCHEDULE_JOINT {
                return Err(ScheduleLoadError::InvalidSchedule(record.schedule.clone()));
            }
        }

        Ok(SchedulePair {
            single: Self::build_schedule(records, SCHEDULE_SINGLE)?,
            joint: Self::build_schedule(records, SCHEDULE_JOINT)?,
        })
    }

    fn build_schedule(
        records: &[BracketRecord],
        code: &'static str,
    ) -> Result<BracketSchedule, ScheduleLoadError> {
        let group: Vec<&BracketRecord> =
            records.iter().filter(|r| r.schedule == code).collect();
        if group.is_empty() {
            return Err(ScheduleLoadError::MissingSchedule(code));
        }

        let mut base_rate = None;
        let mut tiers = Vec::new();

        for record in group {
            if record.threshold == Decimal::ZERO {
                if base_rate.is_some() {
                    return Err(ScheduleLoadError::DuplicateThreshold {
                        schedule: code.to_string(),
                        threshold: Decimal::ZERO,
                    });
                }
                if record.base_tax != Decimal::ZERO {
                    return Err(ScheduleLoadError::BaseTierTax(
                        code.to_string(),
                        record.base_tax,
                    ));
                }
                base_rate = Some(record.rate);
            } else {
                tiers.push(BracketTier {
                    threshold: record.threshold,
                    base_tax: record.base_tax,
                    rate: record.rate,
                });
            }
        }

        let base_rate =
            base_rate.ok_or_else(|| ScheduleLoadError::MissingBaseTier(code.to_string()))?;

        tiers.sort_by(|a, b| b.threshold.cmp(&a.threshold));
        for pair in tiers.windows(2) {
            if pair[0].threshold == pair[1].threshold {
                return Err(ScheduleLoadError::DuplicateThreshold {
                    schedule: code.to_string(),
                    threshold: pair[0].threshold,
                });
            }
        }

        let schedule = BracketSchedule { tiers, base_rate };
        schedule.validate()?;

        Ok(schedule)
    }
}
