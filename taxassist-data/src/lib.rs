pub mod loader;

pub use loader::{BracketRecord, ScheduleLoadError, ScheduleLoader, SchedulePair};
