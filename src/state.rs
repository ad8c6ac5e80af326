//! Funding data model.
//!
//! The shapes here mirror the JSON seed record one-for-one: `camelCase`
//! fields, kebab-case enum values. Everything is a plain value type; the
//! recalculation path replaces round lists wholesale instead of mutating
//! records in place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

// ─── Company & founders ───────────────────────────────────────────────────────

/// Company metadata from the seed record. Display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name:    String,
    /// Founding date as free text (e.g. `"2023"`).
    pub founded: String,
}

/// One founder's relative weight among co-founders.
///
/// `ownership` is the founder's share of the founder *pool*, not of the
/// whole company — it sums to 100 across all founders. Absolute company
/// ownership at any round is `ownership / 100 × cap_table.founders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Founder {
    pub name:      String,
    pub ownership: f64,
}

// ─── Cap table ────────────────────────────────────────────────────────────────

/// Ownership held by a single investor cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorGroup {
    pub name:            String,
    pub ownership:       f64,
    pub amount_invested: f64,
}

/// Ownership snapshot immediately after a round closes.
///
/// `investors` is cumulative across every cohort from all prior and current
/// rounds, not just the round's new money. When `investor_groups` is
/// non-empty its ownerships sum to `investors`. After normalization the
/// three buckets always sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapTable {
    pub founders:    f64,
    pub investors:   f64,
    pub option_pool: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub investor_groups: Vec<InvestorGroup>,
}

impl CapTable {
    /// Pre-round-1 baseline: founders own everything.
    ///
    /// Also the defined fallback for degenerate rounds (post-money ≤ 0).
    pub fn baseline() -> Self {
        Self {
            founders:    100.0,
            investors:   0.0,
            option_pool: 0.0,
            investor_groups: Vec::new(),
        }
    }

    /// Bucket sum before any normalization.
    pub fn total(&self) -> f64 {
        self.founders + self.investors + self.option_pool
    }
}

// ─── Rounds ───────────────────────────────────────────────────────────────────

/// When the option-pool top-up is carved out, relative to the new money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionPoolRefresh {
    /// Pool carved from existing holders before the round closes; the
    /// refreshed pool is then diluted by the incoming investor like
    /// everyone else.
    #[serde(rename = "pre-money")]
    PreMoney,
    /// Pool topped up to its full target size after the new investment.
    #[serde(rename = "post-money")]
    PostMoney,
}

/// Round lifecycle tag. Informational only — never affects calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundStatus {
    Planned,
    InProgress,
    Completed,
}

/// One funding round: raw editable inputs plus derived outputs.
///
/// `post_money_valuation`, `target_dilution`, `cap_table` and `summary` are
/// always recomputed by the engine from the raw fields and the previous
/// round's cap table; they are never hand-edited independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRound {
    /// Stable id, unique within the series. Array order is authoritative.
    pub id:   String,
    pub name: String,
    pub pre_money_valuation: f64,
    pub amount_raised:       f64,
    /// Derived: always `pre_money_valuation + amount_raised`.
    pub post_money_valuation: f64,
    /// Derived: the ownership the round's incoming investor bought — not
    /// the founders' cumulative loss.
    pub target_dilution: f64,
    /// Percentage of post-dilution equity reserved for the option pool.
    pub option_pool_size:    f64,
    pub option_pool_refresh: OptionPoolRefresh,
    pub status: RoundStatus,
    pub cap_table: CapTable,
    /// Generated display text; not authoritative.
    pub summary: String,
}

impl FundingRound {
    /// A round with raw inputs set and derived fields zeroed. Run it
    /// through the engine before displaying anything derived.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        pre_money_valuation: f64,
        amount_raised: f64,
        option_pool_size: f64,
        option_pool_refresh: OptionPoolRefresh,
        status: RoundStatus,
    ) -> Self {
        Self {
            id:   id.into(),
            name: name.into(),
            pre_money_valuation,
            amount_raised,
            post_money_valuation: 0.0,
            target_dilution:      0.0,
            option_pool_size,
            option_pool_refresh,
            status,
            cap_table: CapTable::baseline(),
            summary:   String::new(),
        }
    }
}

// ─── Top-level record ─────────────────────────────────────────────────────────

/// The full funding model: loaded once at startup, recalculated after
/// every edit, re-emitted to the host with all derived fields populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingData {
    pub company:  Company,
    /// Keyed by a short founder handle; values carry the display name.
    pub founders: BTreeMap<String, Founder>,
    /// Ordered earliest-first. Each round's baseline is its predecessor's
    /// resulting cap table.
    pub rounds:   Vec<FundingRound>,
}

impl FundingData {
    /// Parse a seed record from JSON (the same shape `to_json` emits).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the model, derived fields included.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
