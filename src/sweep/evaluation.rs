use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{CalculationTarget, Package, SandwichKind, SandwichOrder};
use crate::planner::calculations::compute_sandwich_order;

/// One product id per recipe ingredient, in `SandwichKind::ingredients` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCombo {
    pub kind: SandwichKind,
    pub ids: [String; 3],
}

impl ProductCombo {
    pub fn to_order(&self, catalog: &Catalog) -> Result<SandwichOrder> {
        let [first, second, bread] = self.kind.ingredients();
        let packages: [Package; 3] = [
            catalog.package(first, &self.ids[0])?,
            catalog.package(second, &self.ids[1])?,
            catalog.package(bread, &self.ids[2])?,
        ];
        Ok(SandwichOrder::from_packages(self.kind, packages))
    }

    pub fn display(&self) -> String {
        self.ids.join(" + ")
    }
}

/// Outcome of a combo at one target count.
#[derive(Debug, Clone, Serialize)]
pub struct TargetResult {
    pub target: u32,
    pub total_cost: f64,
    pub cost_per_sandwich: f64,
    /// Extra sandwich-equivalents summed across ingredients.
    pub waste: f64,
}

/// Aggregated result of a combo across every target.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub combo: ProductCombo,
    pub avg_cost_per_sandwich: f64,
    pub avg_waste: f64,
    pub per_target: Vec<TargetResult>,
}

impl EvaluationResult {
    /// Cheaper first, then less waste. `Less` means `self` ranks higher.
    pub fn cmp_score(&self, other: &Self) -> std::cmp::Ordering {
        match self
            .avg_cost_per_sandwich
            .partial_cmp(&other.avg_cost_per_sandwich)
        {
            Some(std::cmp::Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }
        self.avg_waste
            .partial_cmp(&other.avg_waste)
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

/// Price one combo at every target count.
pub fn evaluate_combo(
    combo: &ProductCombo,
    catalog: &Catalog,
    targets: &[u32],
) -> Result<EvaluationResult> {
    let order = combo.to_order(catalog)?;
    let mut per_target = Vec::with_capacity(targets.len());

    for &target in targets {
        let result =
            compute_sandwich_order(&order, CalculationTarget::Count(target), &catalog.recipe)?;
        per_target.push(TargetResult {
            target,
            total_cost: result.total_cost,
            cost_per_sandwich: result.cost_per_sandwich,
            waste: result.lines.iter().map(|l| l.extra_sandwiches).sum(),
        });
    }

    let n = per_target.len().max(1) as f64;
    Ok(EvaluationResult {
        combo: combo.clone(),
        avg_cost_per_sandwich: per_target.iter().map(|r| r.cost_per_sandwich).sum::<f64>() / n,
        avg_waste: per_target.iter().map(|r| r.waste).sum::<f64>() / n,
        per_target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo(kind: SandwichKind, ids: [&str; 3]) -> ProductCombo {
        ProductCombo {
            kind,
            ids: ids.map(str::to_string),
        }
    }

    #[test]
    fn test_evaluate_pbj_combo() {
        let catalog = Catalog::builtin();
        let c = combo(
            SandwichKind::Pbj,
            ["store-brand-peanut-butter", "store-brand-jelly", "store-brand-white"],
        );
        let result = evaluate_combo(&c, &catalog, &[150]).unwrap();

        // 6 x 3.50 + 5 x 2.50 + 15 x 2.00 with no leftovers
        assert!((result.per_target[0].total_cost - 63.5).abs() < 1e-9);
        assert_eq!(result.avg_waste, 0.0);
    }

    #[test]
    fn test_wrong_category_rejected() {
        let catalog = Catalog::builtin();
        let c = combo(
            SandwichKind::Deli,
            ["kroger-american", "kroger-ham", "kroger-white"],
        );
        assert!(evaluate_combo(&c, &catalog, &[100]).is_err());
    }

    #[test]
    fn test_cmp_score_prefers_cheaper_then_less_waste() {
        let base = EvaluationResult {
            combo: combo(SandwichKind::Pbj, ["a", "b", "c"]),
            avg_cost_per_sandwich: 0.5,
            avg_waste: 4.0,
            per_target: Vec::new(),
        };
        let cheaper = EvaluationResult {
            avg_cost_per_sandwich: 0.4,
            avg_waste: 9.0,
            ..base.clone()
        };
        let leaner = EvaluationResult {
            avg_waste: 1.0,
            ..base.clone()
        };
        assert_eq!(cheaper.cmp_score(&base), std::cmp::Ordering::Less);
        assert_eq!(leaner.cmp_score(&base), std::cmp::Ordering::Less);
    }
}
