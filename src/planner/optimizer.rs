use tracing::debug;

use crate::models::{PackageSize, Suggestion, WasteDetail};
use crate::planner::constants::{MAX_SUGGESTIONS, SUGGESTION_RANGE_FACTOR};

/// Greatest common divisor (Euclid). `gcd(a, 0) == a`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple; zero if either side is zero.
pub fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    a / gcd(a, b) * b
}

/// Push the multiples of `step` just below and just above `target`.
fn push_straddling(candidates: &mut Vec<u64>, target: u64, step: u64) {
    if step == 0 {
        return;
    }
    let lower = target / step * step;
    let upper = lower + step;
    for candidate in [lower, upper] {
        if candidate > 0 && !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
}

/// Waste for one candidate count across every package.
fn score_candidate(count: u64, target: u32, packages: &[&PackageSize]) -> Suggestion {
    let waste_details: Vec<WasteDetail> = packages
        .iter()
        .map(|p| {
            let size = p.yield_per_package as u64;
            let needed = count.div_ceil(size);
            WasteDetail {
                ingredient: p.name.clone(),
                packages: needed,
                waste: needed * size - count,
            }
        })
        .collect();
    let total_waste: u64 = waste_details.iter().map(|w| w.waste).sum();

    Suggestion {
        quantity: count as u32,
        total_waste,
        waste_details,
        diff: count as i64 - target as i64,
        is_zero_waste: total_waste == 0,
    }
}

/// Propose up to three nearby sandwich counts that waste fewer package units.
///
/// Candidates are the multiples of the largest yield straddling the target,
/// plus the multiples of the LCM of the two largest distinct yields. Zero-waste
/// candidates rank first, then closeness to the target. The target itself is
/// never suggested, and candidates above twice the target are dropped.
pub fn suggest_quantities(target: u32, packages: &[PackageSize]) -> Vec<Suggestion> {
    let usable: Vec<&PackageSize> = packages
        .iter()
        .filter(|p| p.yield_per_package > 0)
        .collect();
    if usable.is_empty() || target == 0 {
        return Vec::new();
    }

    let mut sizes: Vec<u64> = usable.iter().map(|p| p.yield_per_package as u64).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes.dedup();

    let target_wide = target as u64;
    let mut candidates = Vec::new();
    push_straddling(&mut candidates, target_wide, sizes[0]);
    if sizes.len() >= 2 {
        push_straddling(&mut candidates, target_wide, lcm(sizes[0], sizes[1]));
    }

    let limit = target_wide * SUGGESTION_RANGE_FACTOR;
    let mut suggestions: Vec<Suggestion> = candidates
        .into_iter()
        .filter(|&c| c > 0 && c <= limit && c <= u32::MAX as u64)
        .map(|c| score_candidate(c, target, &usable))
        .collect();

    suggestions.sort_by(|a, b| {
        b.is_zero_waste
            .cmp(&a.is_zero_waste)
            .then_with(|| a.diff.unsigned_abs().cmp(&b.diff.unsigned_abs()))
    });

    let suggestions: Vec<Suggestion> = suggestions
        .into_iter()
        .filter(|s| s.quantity != target)
        .take(MAX_SUGGESTIONS)
        .collect();

    debug!(
        target,
        largest = sizes[0],
        count = suggestions.len(),
        "suggested alternative quantities"
    );
    suggestions
}
