//! Display formatting: compact currency strings and generated round
//! summaries. Output here is never fed back into any calculation.

use crate::state::FundingRound;

/// Compact euro formatting: `€1.5B`, `€10M`, `€500K`, `€950`.
pub fn format_currency(amount: f64) -> String {
    if amount >= 1_000_000_000.0 {
        format!("€{:.1}B", amount / 1_000_000_000.0)
    } else if amount >= 1_000_000.0 {
        format!("€{:.0}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("€{:.0}K", amount / 1_000.0)
    } else {
        format!("€{:.0}", amount)
    }
}

/// One-sentence narrative for a derived round. Regenerated on every
/// recalculation so it never goes stale against the numbers.
pub fn round_summary(round: &FundingRound) -> String {
    let pre_money  = round.pre_money_valuation / 1_000_000.0;
    let amount     = round.amount_raised / 1_000_000.0;
    let post_money = round.post_money_valuation / 1_000_000.0;

    format!(
        "Raising €{amount}M at €{pre_money}M pre-money valuation. \
         This gives investors {dilution:.1}% ownership and establishes a \
         €{post_money}M post-money valuation. Founders retain {founders:.1}% \
         after accounting for the {pool}% option pool.",
        dilution = round.target_dilution,
        founders = round.cap_table.founders,
        pool     = round.option_pool_size,
    )
}
