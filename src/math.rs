//! Percentage arithmetic: normalization and derived-value helpers.
//!
//! Everything here is pure and stateless. The engine and the store call in;
//! each function is independently testable.

use crate::state::{CapTable, FundingRound};

// ─── Constants ────────────────────────────────────────────────────────────────

/// Drift tolerance before normalization rescales a cap table.
pub const NORMALIZE_EPSILON: f64 = 0.05;

/// Post-money valuation at which a company counts as a unicorn (€1B).
pub const UNICORN_THRESHOLD: f64 = 1_000_000_000.0;

// ─── Normalization ────────────────────────────────────────────────────────────

/// Scale a cap table's buckets so they sum to exactly 100.
///
/// No-op when the sum is already within [`NORMALIZE_EPSILON`] of 100, and
/// when the sum is 0 (the caller picks a sane fallback for that case).
/// Investor groups are rescaled by the same factor so their sum keeps
/// tracking the `investors` bucket.
///
/// Runs on full-precision values; rounding to one decimal is a display
/// concern. Normalizing already-rounded values would compound the error.
pub fn normalize(table: &mut CapTable) {
    let total = table.total();
    if total == 0.0 || (total - 100.0).abs() <= NORMALIZE_EPSILON {
        return;
    }
    tracing::trace!(total, "normalizing cap-table drift");

    let factor = 100.0 / total;
    table.founders    *= factor;
    table.investors   *= factor;
    table.option_pool *= factor;
    for group in &mut table.investor_groups {
        group.ownership *= factor;
    }
}

// ─── Valuation identities ─────────────────────────────────────────────────────

/// Post-money valuation: pre-money plus the amount raised. The one identity
/// that holds exactly, everywhere, always.
pub fn post_money_valuation(pre_money: f64, amount_raised: f64) -> f64 {
    pre_money + amount_raised
}

/// Ownership percentage a given investment buys at a given pre-money
/// valuation. 0 when the implied post-money is not positive.
pub fn ownership_for_investment(amount_raised: f64, pre_money: f64) -> f64 {
    let post_money = pre_money + amount_raised;
    if post_money <= 0.0 {
        return 0.0;
    }
    amount_raised / post_money * 100.0
}

/// Pre-money valuation implied by selling `ownership` percent of the
/// company for `amount_raised`. 0 when `ownership` is not positive.
pub fn pre_money_for_target_ownership(amount_raised: f64, ownership: f64) -> f64 {
    if ownership <= 0.0 {
        return 0.0;
    }
    amount_raised * (100.0 - ownership) / ownership
}

// ─── Derived display values ───────────────────────────────────────────────────

/// A founder's paper net worth at a given round.
///
/// * `relative_ownership` – the founder's share of the founder pool (0–100)
/// * `founder_pool`       – the pool's slice of the whole company (0–100)
/// * `post_money_valuation` – that round's post-money valuation
pub fn founder_net_worth(
    relative_ownership: f64,
    founder_pool: f64,
    post_money_valuation: f64,
) -> f64 {
    relative_ownership / 100.0 * founder_pool / 100.0 * post_money_valuation
}

/// Whether a post-money valuation crosses the €1B unicorn line.
pub fn is_unicorn(post_money_valuation: f64) -> bool {
    post_money_valuation >= UNICORN_THRESHOLD
}

/// Sum of every round's `target_dilution`.
///
/// A straight sum, not the compounded `1 − Π(1 − dᵢ)`: the figure matches
/// the per-round numbers the host displays next to it. Treat it as an
/// indicative total, not an exact cumulative loss.
pub fn cumulative_dilution(rounds: &[FundingRound]) -> f64 {
    rounds.iter().map(|round| round.target_dilution).sum()
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InvestorGroup;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn table(founders: f64, investors: f64, option_pool: f64) -> CapTable {
        CapTable { founders, investors, option_pool, investor_groups: Vec::new() }
    }

    #[test]
    fn normalize_rescales_drifted_table() {
        let mut t = table(60.0, 30.0, 20.0); // sums to 110
        normalize(&mut t);
        assert!(close(t.total(), 100.0));
        assert!(close(t.founders, 60.0 * 100.0 / 110.0));
        assert!(close(t.investors, 30.0 * 100.0 / 110.0));
    }

    #[test]
    fn normalize_scales_up_too() {
        let mut t = table(40.0, 20.0, 20.0); // sums to 80
        normalize(&mut t);
        assert!(close(t.total(), 100.0));
        assert!(close(t.founders, 50.0));
    }

    #[test]
    fn normalize_leaves_small_drift_alone() {
        let mut t = table(80.0, 10.0, 10.01);
        normalize(&mut t);
        assert!(close(t.option_pool, 10.01));
    }

    #[test]
    fn normalize_zero_sum_is_noop() {
        let mut t = table(0.0, 0.0, 0.0);
        normalize(&mut t);
        assert!(close(t.total(), 0.0));
    }

    #[test]
    fn normalize_rescales_investor_groups_with_investors() {
        let mut t = table(100.0, 40.0, 10.0);
        t.investor_groups = vec![
            InvestorGroup { name: "Angels".into(), ownership: 10.0, amount_invested: 500_000.0 },
            InvestorGroup { name: "Fund I".into(), ownership: 30.0, amount_invested: 2_000_000.0 },
        ];
        normalize(&mut t);
        let group_sum: f64 = t.investor_groups.iter().map(|g| g.ownership).sum();
        assert!(close(group_sum, t.investors));
    }

    #[test]
    fn ownership_round_trips_through_pre_money() {
        let ownership = ownership_for_investment(1_000_000.0, 9_000_000.0);
        assert!(close(ownership, 10.0));
        let pre_money = pre_money_for_target_ownership(1_000_000.0, ownership);
        assert!(close(pre_money, 9_000_000.0));
    }

    #[test]
    fn ownership_guards_degenerate_inputs() {
        assert!(close(ownership_for_investment(0.0, 0.0), 0.0));
        assert!(close(pre_money_for_target_ownership(1_000_000.0, 0.0), 0.0));
    }

    #[test]
    fn founder_net_worth_multiplies_through() {
        // 40% of an 80% founder pool at €10M post-money.
        let worth = founder_net_worth(40.0, 80.0, 10_000_000.0);
        assert!(close(worth, 3_200_000.0));
    }

    #[test]
    fn unicorn_boundary_is_inclusive() {
        assert!(!is_unicorn(999_999_999.0));
        assert!(is_unicorn(1_000_000_000.0));
        assert!(is_unicorn(1_500_000_000.0));
    }
}
