pub mod calculations;
pub mod constants;
pub mod optimizer;
pub mod plan;
pub mod verifier;

pub use calculations::{
    compute_order, compute_sandwich_order, derive_yield, order_yields, package_yield,
    packages_needed, whole_sandwiches,
};
pub use constants::*;
pub use optimizer::{gcd, lcm, suggest_quantities};
pub use plan::{OrderPlan, plan_order};
pub use verifier::verify;
