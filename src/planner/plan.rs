use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::insights::{Insights, generate_insights};
use crate::models::{
    CalculationTarget, OrderRequest, OrderResult, PackageFacts, PriorResult, Suggestion,
    VerificationReport,
};
use crate::planner::calculations::compute_sandwich_order;
use crate::planner::constants::RecipeConstants;
use crate::planner::optimizer::suggest_quantities;
use crate::planner::verifier::verify;

/// Everything produced for one order request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlan {
    pub calculations: OrderResult,
    pub suggestions: Vec<Suggestion>,
    pub verification: VerificationReport,
    pub insights: Insights,
}

/// Calculate an order, propose alternative quantities, cross-check a prior
/// result if one is given, and summarize.
///
/// Suggestions are centred on the target count, or on the count a budget
/// reached. The verifier prefers the yields the prior result reported and
/// falls back to the ones just derived.
pub fn plan_order(
    request: &OrderRequest,
    recipe: &RecipeConstants,
    prior: Option<&PriorResult>,
) -> Result<OrderPlan> {
    let kind = request.order.kind();
    let calculations = compute_sandwich_order(&request.order, request.target, recipe)?;

    let center = match request.target {
        CalculationTarget::Count(n) => n,
        CalculationTarget::Budget(_) => calculations.sandwich_count,
    };
    let suggestions = suggest_quantities(center, &calculations.packaging());

    let verification = match prior {
        Some(p) => {
            let facts = PackageFacts::from_math_details(kind, &p.math_details)
                .or_from(&PackageFacts::from_order(&calculations));
            verify(Some(p), &facts, kind)
        }
        None => verify(None, &PackageFacts::new(), kind),
    };

    let insights = generate_insights(kind, &calculations, &suggestions, &verification);
    info!(
        kind = %kind,
        sandwiches = calculations.sandwich_count,
        total = calculations.total_cost,
        suggestions = suggestions.len(),
        verification = ?verification.status,
        "planned order"
    );

    Ok(OrderPlan {
        calculations,
        suggestions,
        verification,
        insights,
    })
}
