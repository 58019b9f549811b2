pub mod evaluation;
pub mod output;
pub mod search;

pub use evaluation::{EvaluationResult, ProductCombo, TargetResult, evaluate_combo};
pub use output::{print_topk, write_best_json, write_csv};
pub use search::{SweepConfig, SweepResults, run_sweep};
