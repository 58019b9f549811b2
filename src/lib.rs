pub mod catalog;
pub mod cli;
pub mod error;
pub mod insights;
pub mod interface;
pub mod logging;
pub mod models;
pub mod planner;
pub mod sweep;

pub use error::{OrderError, Result};
pub use models::{CalculationTarget, OrderRequest, OrderResult, SandwichKind, SandwichOrder};
pub use planner::{OrderPlan, plan_order};
