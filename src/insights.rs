//! Deterministic commentary on a finished order.

use serde::{Deserialize, Serialize};

use crate::models::{
    Ingredient, OrderResult, SandwichKind, Suggestion, VerificationReport, VerificationStatus,
};
use crate::planner::constants::{
    BREAD_EXTRA_TIP_THRESHOLD, DELI_COST_ASSESSMENT, LARGE_ORDER_THRESHOLD,
    PBJ_COST_ASSESSMENT, SANDWICHES_PER_VOLUNTEER_FAST, SANDWICHES_PER_VOLUNTEER_SLOW,
    VOLUNTEER_ESTIMATE_THRESHOLD,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostAssessment {
    Great,
    Good,
    High,
}

impl CostAssessment {
    pub fn for_cost(kind: SandwichKind, cost_per_sandwich: f64) -> Self {
        let (great_below, high_above) = match kind {
            SandwichKind::Deli => DELI_COST_ASSESSMENT,
            SandwichKind::Pbj => PBJ_COST_ASSESSMENT,
        };
        if cost_per_sandwich < great_below {
            CostAssessment::Great
        } else if cost_per_sandwich > high_above {
            CostAssessment::High
        } else {
            CostAssessment::Good
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CostAssessment::Great => "great",
            CostAssessment::Good => "good",
            CostAssessment::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    /// False only when verification ran and found a discrepancy.
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub math_check_summary: Option<String>,
    pub summary: String,
    pub cost_assessment: CostAssessment,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waste_reduction: Option<String>,
    pub shopping_tip: String,
    pub volunteer_estimate: String,
}

/// Volunteers needed to assemble `sandwiches` in one session.
pub fn volunteer_estimate(sandwiches: u32) -> String {
    if sandwiches > VOLUNTEER_ESTIMATE_THRESHOLD {
        format!(
            "{}-{} volunteers for 1.5-2 hours",
            sandwiches.div_ceil(SANDWICHES_PER_VOLUNTEER_FAST),
            sandwiches.div_ceil(SANDWICHES_PER_VOLUNTEER_SLOW)
        )
    } else {
        "2-3 volunteers for about 1 hour".to_string()
    }
}

fn recommendation(best: &Suggestion, sandwiches: u32, bread_extra: f64) -> Option<String> {
    if best.is_zero_waste {
        Some(format!(
            "Consider making {} instead of {}: this uses full packages of all ingredients with zero waste ({} sandwiches)",
            best.quantity,
            sandwiches,
            best.diff_label()
        ))
    } else if (best.total_waste as f64) < bread_extra {
        Some(format!(
            "Making {} sandwiches would reduce ingredient waste ({} from your target)",
            best.quantity,
            best.diff_label()
        ))
    } else {
        None
    }
}

/// Build insights from the calculator, optimizer and verifier outputs.
pub fn generate_insights(
    kind: SandwichKind,
    result: &OrderResult,
    suggestions: &[Suggestion],
    verification: &VerificationReport,
) -> Insights {
    let sandwiches = result.sandwich_count;
    let mut warnings = Vec::new();
    let mut is_valid = true;
    let mut math_check_summary = None;

    if verification.status != VerificationStatus::Skipped {
        let mut summary = format!(
            "{}/{} math checks passed",
            verification.passed_checks, verification.total_checks
        );
        if verification.failed_checks > 0 {
            is_valid = false;
            let failed: Vec<&str> = verification
                .discrepancies
                .iter()
                .map(|d| d.label.as_str())
                .collect();
            summary.push_str(&format!(": {} failed", failed.join(", ")));
            for d in &verification.discrepancies {
                warnings.push(format!("Math check failed: {}: {}", d.label, d.message));
            }
        }
        math_check_summary = Some(summary);
    }

    if sandwiches > LARGE_ORDER_THRESHOLD {
        warnings.push("Large order - consider splitting into multiple shopping trips".to_string());
    }
    for warning in &result.warnings {
        warnings.push(warning.to_string());
    }

    let bread_extra = result
        .extra_sandwiches(Ingredient::Bread)
        .unwrap_or(0.0)
        .floor();

    let recommendations: Vec<String> = suggestions
        .first()
        .and_then(|best| recommendation(best, sandwiches, bread_extra))
        .into_iter()
        .collect();

    let waste_reduction = (bread_extra > BREAD_EXTRA_TIP_THRESHOLD).then(|| {
        format!(
            "You have capacity for {} extra sandwiches - consider making them to reduce waste!",
            bread_extra
        )
    });

    Insights {
        is_valid,
        math_check_summary,
        summary: format!(
            "Order for {} {} sandwiches at ${:.2} each",
            sandwiches,
            kind.label(),
            result.cost_per_sandwich
        ),
        cost_assessment: CostAssessment::for_cost(kind, result.cost_per_sandwich),
        warnings,
        recommendations,
        waste_reduction,
        shopping_tip: "Check store apps for digital coupons before shopping".to_string(),
        volunteer_estimate: volunteer_estimate(sandwiches),
    }
}
