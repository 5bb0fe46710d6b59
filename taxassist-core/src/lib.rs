pub mod calculations;
pub mod models;

pub use calculations::{AdviceContext, LiabilityEstimator};
pub use models::*;
