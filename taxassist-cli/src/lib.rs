pub mod cli;
pub mod format;
pub mod logging;
pub mod validate;
