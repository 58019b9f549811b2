use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use tracing::{info, warn};

use crate::catalog::{Catalog, Product};
use crate::error::{OrderError, Result};
use crate::models::SandwichKind;
use crate::sweep::evaluation::{EvaluationResult, ProductCombo, evaluate_combo};

/// Configuration for a sweep.
pub struct SweepConfig {
    pub kind: SandwichKind,
    /// Sandwich counts every combo is priced at.
    pub targets: Vec<u32>,
    /// Most combos to evaluate; larger spaces are sampled.
    pub iterations: usize,
    pub seed: u64,
    pub topk: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            kind: SandwichKind::Deli,
            targets: vec![50, 100, 200, 400],
            iterations: 500,
            seed: 123,
            topk: 10,
        }
    }
}

/// Results from a sweep.
pub struct SweepResults {
    /// Evaluated combos, best first.
    pub results: Vec<EvaluationResult>,
    /// Size of the full combination space.
    pub space: usize,
    /// Whether every combination was evaluated.
    pub exhaustive: bool,
}

/// Candidate products per recipe slot.
struct ComboSpace<'a> {
    kind: SandwichKind,
    slots: [Vec<&'a Product>; 3],
}

impl<'a> ComboSpace<'a> {
    fn new(kind: SandwichKind, catalog: &'a Catalog) -> Self {
        Self {
            kind,
            slots: kind.ingredients().map(|i| catalog.by_category(i)),
        }
    }

    fn len(&self) -> usize {
        self.slots.iter().map(Vec::len).product()
    }

    /// Decode a mixed-radix index into one product per slot.
    fn combo(&self, mut index: usize) -> ProductCombo {
        let ids = self.slots.each_ref().map(|slot| {
            let id = slot[index % slot.len()].id.clone();
            index /= slot.len();
            id
        });
        ProductCombo {
            kind: self.kind,
            ids,
        }
    }
}

/// Price product combinations from the catalog and rank them.
pub fn run_sweep(config: &SweepConfig, catalog: &Catalog) -> Result<SweepResults> {
    if config.targets.iter().any(|&t| t == 0) || config.targets.is_empty() {
        return Err(OrderError::InvalidTarget(
            "sweep targets must be positive sandwich counts".to_string(),
        ));
    }

    let space = ComboSpace::new(config.kind, catalog);
    let total = space.len();
    if total == 0 {
        return Err(OrderError::InvalidInput(format!(
            "catalog has no products for every {} ingredient",
            config.kind.label()
        )));
    }

    let exhaustive = total <= config.iterations;
    let indices: Vec<usize> = if exhaustive {
        (0..total).collect()
    } else {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut sampled = index::sample(&mut rng, total, config.iterations).into_vec();
        sampled.sort_unstable();
        sampled
    };
    info!(
        kind = %config.kind,
        space = total,
        evaluating = indices.len(),
        exhaustive,
        "starting sweep"
    );

    let mut results = Vec::with_capacity(indices.len());
    for (i, idx) in indices.iter().enumerate() {
        let combo = space.combo(*idx);
        match evaluate_combo(&combo, catalog, &config.targets) {
            Ok(result) => results.push(result),
            Err(e) => warn!(combo = %combo.display(), error = %e, "skipping combo"),
        }

        // Progress indicator every 10%
        if (i + 1) % (indices.len() / 10).max(1) == 0 {
            let pct = ((i + 1) as f64 / indices.len() as f64) * 100.0;
            eprint!("\r{:.0}% complete", pct);
        }
    }
    eprintln!();

    results.sort_by(|a, b| a.cmp_score(b));

    Ok(SweepResults {
        results,
        space: total,
        exhaustive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_space_is_exhaustive() {
        let catalog = Catalog::builtin();
        let config = SweepConfig {
            kind: SandwichKind::Pbj,
            targets: vec![100],
            ..Default::default()
        };
        let sweep = run_sweep(&config, &catalog).unwrap();

        let breads = catalog.by_category(crate::models::Ingredient::Bread).len();
        assert!(sweep.exhaustive);
        assert_eq!(sweep.space, breads);
        assert_eq!(sweep.results.len(), breads);
        // Cheapest loaf per sandwich wins
        assert_eq!(sweep.results[0].combo.ids[2], "great-value-white");
    }

    #[test]
    fn test_sampling_is_seeded() {
        let catalog = Catalog::builtin();
        let config = SweepConfig {
            kind: SandwichKind::Deli,
            targets: vec![100],
            iterations: 20,
            ..Default::default()
        };
        let a = run_sweep(&config, &catalog).unwrap();
        let b = run_sweep(&config, &catalog).unwrap();

        assert!(!a.exhaustive);
        assert_eq!(a.results.len(), 20);
        let ids = |r: &SweepResults| r.results.iter().map(|e| e.combo.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn test_results_sorted_best_first() {
        let catalog = Catalog::builtin();
        let config = SweepConfig {
            kind: SandwichKind::Deli,
            targets: vec![60, 120],
            iterations: 50,
            ..Default::default()
        };
        let sweep = run_sweep(&config, &catalog).unwrap();
        for pair in sweep.results.windows(2) {
            assert!(pair[0].avg_cost_per_sandwich <= pair[1].avg_cost_per_sandwich);
        }
    }

    #[test]
    fn test_zero_target_rejected() {
        let config = SweepConfig {
            targets: vec![0],
            ..Default::default()
        };
        assert!(run_sweep(&config, &Catalog::builtin()).is_err());
    }
}
