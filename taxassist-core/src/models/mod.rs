mod bracket;
mod filing_status;
mod tax_estimate;
mod tax_year_rules;
mod taxpayer_profile;

pub use bracket::{BracketSchedule, BracketTier, ScheduleError};
pub use filing_status::FilingStatus;
pub use tax_estimate::TaxEstimate;
pub use tax_year_rules::TaxYearRules;
pub use taxpayer_profile::TaxpayerProfile;
