use crate::catalog::Product;
use crate::insights::Insights;
use crate::models::verification::format_amount;
use crate::models::{OrderResult, SandwichKind, Suggestion, VerificationReport, VerificationStatus};
use crate::planner::OrderPlan;

/// Display an order as a shopping table.
pub fn display_order(kind: SandwichKind, result: &OrderResult) {
    println!();
    println!("=== {} Order: {} ===", kind.label(), result.target);
    println!();

    let max_name_len = result
        .lines
        .iter()
        .map(|l| l.product.len())
        .max()
        .unwrap_or(10);

    for line in &result.lines {
        println!(
            "  {:<14} {:<width$}  {:>3} {:<8} x ${:>6.2} = ${:>8.2}  ({} per pkg, +{:.1} extra)",
            line.ingredient.title(),
            line.product,
            line.packages,
            line.ingredient.unit_noun(),
            line.price,
            line.cost,
            format_amount(line.yield_per_package),
            line.extra_sandwiches,
            width = max_name_len
        );
    }

    println!();
    println!("--- Summary ---");
    println!("Sandwiches: {}", result.sandwich_count);
    println!("Total cost: ${:.2}", result.total_cost);
    println!("Cost per sandwich: ${:.2}", result.cost_per_sandwich);
    println!("Packages can make: {} sandwiches", result.achievable_sandwiches);
    if let Some(remaining) = result.remaining_budget {
        println!("Remaining budget: ${:.2}", remaining);
    }

    for leftover in &result.leftovers {
        println!(
            "Leftover {}: {:.1} {}",
            leftover.ingredient, leftover.amount, leftover.unit
        );
    }
    for warning in &result.warnings {
        println!("Warning: {}", warning);
    }
    println!();
}

/// Display waste-minimizing alternatives.
pub fn display_suggestions(target: u32, suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("No better quantities near {}.", target);
        return;
    }

    println!("=== Suggested Quantities (near {}) ===", target);
    println!();
    for s in suggestions {
        let tag = if s.is_zero_waste {
            "ZERO WASTE".to_string()
        } else {
            format!("{} leftover sandwich-equivalents", s.total_waste)
        };
        println!("  {:>5} sandwiches ({:>4})  {}", s.quantity, s.diff_label(), tag);

        let details: Vec<String> = s
            .waste_details
            .iter()
            .map(|w| format!("{} {} pkgs/{} spare", w.ingredient, w.packages, w.waste))
            .collect();
        println!("        {}", details.join(", "));
    }
    println!();
}

/// Display a verification report, one line per check.
pub fn display_verification(report: &VerificationReport) {
    match report.status {
        VerificationStatus::Skipped => {
            println!(
                "Verification skipped: {}",
                report.reason.as_deref().unwrap_or("nothing to check")
            );
            return;
        }
        VerificationStatus::Pass => println!("=== Verification: PASS ==="),
        VerificationStatus::Fail => println!("=== Verification: FAIL ==="),
    }
    println!();

    for check in &report.checks {
        println!(
            "  [{}] {:<30} {}",
            if check.pass { "PASS" } else { "FAIL" },
            check.label,
            check.formula
        );
    }

    println!();
    println!(
        "{}/{} checks passed",
        report.passed_checks, report.total_checks
    );
    for d in &report.discrepancies {
        println!("  {}: {}", d.label, d.message);
    }
    println!();
}

pub fn display_insights(insights: &Insights) {
    println!("=== Insights ===");
    println!();
    println!("{} (cost: {})", insights.summary, insights.cost_assessment.label());
    if let Some(summary) = &insights.math_check_summary {
        println!("Math: {}", summary);
    }
    for warning in &insights.warnings {
        println!("  ! {}", warning);
    }
    for rec in &insights.recommendations {
        println!("  * {}", rec);
    }
    if let Some(tip) = &insights.waste_reduction {
        println!("  * {}", tip);
    }
    println!("Volunteers: {}", insights.volunteer_estimate);
    println!("Tip: {}", insights.shopping_tip);
    println!();
}

/// Display a full plan.
pub fn display_plan(plan: &OrderPlan, kind: SandwichKind) {
    display_order(kind, &plan.calculations);
    display_suggestions(plan.calculations.sandwich_count, &plan.suggestions);
    if plan.verification.status != VerificationStatus::Skipped {
        display_verification(&plan.verification);
    }
    display_insights(&plan.insights);
}

/// Display catalog products with their package details.
pub fn display_product_list(products: &[&Product], title: &str) {
    if products.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, products.len());
    println!();

    let max_id_len = products.iter().map(|p| p.id.len()).max().unwrap_or(10);
    for product in products {
        let size = product
            .package
            .capacity
            .map(|c| c.to_string())
            .unwrap_or_else(|| "default size".to_string());
        let price = product
            .package
            .price
            .map(|p| format!("${:.2}", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<width$}  {:>7}  {:<14} {} [{}]",
            product.id,
            price,
            size,
            product.name(),
            product.store.as_deref().unwrap_or("any store"),
            width = max_id_len
        );
    }

    println!();
}
