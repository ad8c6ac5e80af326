//! Round-metrics derivation and series recalculation.
//!
//! [`derive_round`] is the single authoritative formula for one round —
//! there is exactly one copy of it. [`recalculate_all`] threads it across
//! the series, left to right, feeding each round's resulting cap table into
//! the next round's baseline.

use crate::error::{Error, Result};
use crate::format::round_summary;
use crate::math;
use crate::state::{CapTable, FundingRound, InvestorGroup, OptionPoolRefresh};

// ─── Single round ─────────────────────────────────────────────────────────────

/// Derive one round's post-money valuation, target dilution and normalized
/// cap table from its editable fields and the previous round's resulting
/// cap table ([`CapTable::baseline`] for the first round).
///
/// * `round`    – raw inputs; never mutated, a fresh record is returned
/// * `previous` – ownership immediately after the prior round closed
///
/// A post-money valuation of zero is not an error: user input is
/// transiently invalid mid-edit (a cleared field), so the round falls back
/// to the baseline split instead of failing. Negative inputs are rejected
/// with [`Error::InvalidInput`]; an option pool above 100% is clamped and
/// the result normalized.
pub fn derive_round(round: &FundingRound, previous: &CapTable) -> Result<FundingRound> {
    if round.pre_money_valuation < 0.0 {
        return Err(Error::InvalidInput {
            field: "preMoneyValuation",
            value: round.pre_money_valuation,
        });
    }
    if round.amount_raised < 0.0 {
        return Err(Error::InvalidInput { field: "amountRaised", value: round.amount_raised });
    }
    if round.option_pool_size < 0.0 {
        return Err(Error::InvalidInput {
            field: "optionPoolSize",
            value: round.option_pool_size,
        });
    }

    let post_money = round.pre_money_valuation + round.amount_raised;
    if post_money <= 0.0 {
        tracing::warn!(round = %round.id, "degenerate round (post-money = 0), using baseline split");
        return Ok(finish(round, post_money, 0.0, CapTable::baseline()));
    }

    let new_investor = round.amount_raised / post_money * 100.0;
    let pool = round.option_pool_size.min(100.0);

    let table = match round.option_pool_refresh {
        OptionPoolRefresh::PostMoney => dilute_post_money(previous, new_investor, pool),
        OptionPoolRefresh::PreMoney  => dilute_pre_money(previous, new_investor, pool),
    };

    Ok(finish(round, post_money, new_investor, table))
}

/// Post-money refresh: the pool is set aside at its full target size after
/// the new investment; founders and prior investors split what remains in
/// proportion to their weights in the previous cap table.
fn dilute_post_money(previous: &CapTable, new_investor: f64, pool: f64) -> CapTable {
    let remaining = (100.0 - new_investor - pool).max(0.0);
    let (founders, prior_investors) =
        split_remaining(remaining, previous.founders, previous.investors);

    CapTable {
        founders,
        investors:   new_investor + prior_investors,
        option_pool: pool,
        investor_groups: Vec::new(),
    }
}

/// Pre-money refresh: the pool is carved from existing holders before the
/// round closes, then the incoming investor dilutes all three buckets —
/// the refreshed pool included — by the same factor. This is what makes a
/// pre-money refresh cheaper for the investor and worse for the pool than
/// a post-money one.
fn dilute_pre_money(previous: &CapTable, new_investor: f64, pool: f64) -> CapTable {
    let total_before = previous.founders + previous.investors;
    let (founders_mid, investors_mid) = if total_before <= 0.0 {
        // Guard: founders absorb the whole carve-out.
        (100.0 - pool, 0.0)
    } else {
        (
            previous.founders / total_before * (100.0 - pool),
            previous.investors / total_before * (100.0 - pool),
        )
    };

    let scale = (100.0 - new_investor) / 100.0;
    CapTable {
        founders:    founders_mid * scale,
        investors:   investors_mid * scale + new_investor,
        option_pool: pool * scale,
        investor_groups: Vec::new(),
    }
}

/// Split `remaining` between founders and prior investors in proportion to
/// their previous weights. Both weights zero cannot happen after round 1,
/// but the guard hands founders the whole remainder.
fn split_remaining(remaining: f64, founder_weight: f64, investor_weight: f64) -> (f64, f64) {
    let total = founder_weight + investor_weight;
    if total <= 0.0 {
        return (remaining, 0.0);
    }
    (
        remaining * founder_weight / total,
        remaining * investor_weight / total,
    )
}

/// Clamp, normalize, carry the input round's investor groups through, and
/// assemble the immutable output record.
fn finish(
    round: &FundingRound,
    post_money: f64,
    new_investor: f64,
    mut table: CapTable,
) -> FundingRound {
    table.founders    = table.founders.max(0.0);
    table.investors   = table.investors.max(0.0);
    table.option_pool = table.option_pool.max(0.0);
    table.investor_groups = rescale_groups(&round.cap_table.investor_groups, table.investors);
    math::normalize(&mut table);

    let mut derived = round.clone();
    derived.post_money_valuation = post_money;
    derived.target_dilution = new_investor;
    derived.cap_table = table;
    derived.summary = round_summary(&derived);
    derived
}

/// Carry investor groups across a re-derivation, rescaled so their sum
/// keeps tracking the freshly computed `investors` bucket (relative cohort
/// weights are preserved). Groups that never held anything pass through
/// untouched.
fn rescale_groups(groups: &[InvestorGroup], investors: f64) -> Vec<InvestorGroup> {
    let sum: f64 = groups.iter().map(|g| g.ownership).sum();
    if sum <= 0.0 {
        return groups.to_vec();
    }
    let factor = investors / sum;
    groups
        .iter()
        .map(|g| InvestorGroup { ownership: g.ownership * factor, ..g.clone() })
        .collect()
}

// ─── Series ───────────────────────────────────────────────────────────────────

/// Re-derive every round in order. Idempotent: running it on an already
/// derived list changes nothing.
pub fn recalculate_all(rounds: &[FundingRound]) -> Vec<FundingRound> {
    recalculate_from(rounds, 0)
}

/// Re-derive rounds `from..`, keeping everything before `from` untouched.
///
/// The baseline for round `from` is round `from − 1`'s stored cap table
/// (the series baseline when `from == 0`), so a single forward pass
/// suffices — the dependency chain only points left to right. A round that
/// fails validation is substituted with the baseline split and the pass
/// continues; one bad round never poisons the rest of the series.
pub fn recalculate_from(rounds: &[FundingRound], from: usize) -> Vec<FundingRound> {
    let from = from.min(rounds.len());
    let mut out: Vec<FundingRound> = rounds[..from].to_vec();
    let mut previous = match out.last() {
        Some(round) => round.cap_table.clone(),
        None => CapTable::baseline(),
    };

    tracing::debug!(total = rounds.len(), from, "recalculating round series");
    for round in &rounds[from..] {
        let derived = match derive_round(round, &previous) {
            Ok(derived) => derived,
            Err(err) => {
                tracing::warn!(round = %round.id, %err, "substituting baseline split");
                let post_money = (round.pre_money_valuation + round.amount_raised).max(0.0);
                finish(round, post_money, 0.0, CapTable::baseline())
            }
        };
        previous = derived.cap_table.clone();
        out.push(derived);
    }
    out
}

// ─── Tests ────────────────────────────────────────────────────────────────────
