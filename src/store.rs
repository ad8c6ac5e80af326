//! The funding-model state container.
//!
//! [`FundingStore`] is the exclusive owner of the [`FundingData`] value
//! between edits — no ambient global state. Every edit is validated at this
//! boundary, applied, and followed by one synchronous recalculation of the
//! edited round and everything after it; the round list is replaced
//! wholesale each time, so callers holding an old snapshot never observe a
//! half-updated series.

use crate::engine::{recalculate_all, recalculate_from};
use crate::error::{Error, Result};
use crate::math;
use crate::state::{CapTable, FundingData, FundingRound, OptionPoolRefresh};

// ─── Edit operations ──────────────────────────────────────────────────────────

/// Edit operations accepted from the host UI layer.
///
/// Each targets a single round (addressed by id in [`FundingStore::apply`])
/// and triggers recalculation of that round and all subsequent ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    SetPreMoneyValuation(f64),
    SetAmountRaised(f64),
    SetOptionPoolSize(f64),
    SetOptionPoolRefresh(OptionPoolRefresh),
    /// Manual cap-table override. Normalized immediately — unnormalized
    /// values are never stored — and downstream rounds are re-derived on
    /// top of it. The overridden round itself is left as given until the
    /// next edit or full recalculation touches it.
    SetCapTable(CapTable),
}

// ─── Store ────────────────────────────────────────────────────────────────────

/// State container for one company's funding model.
#[derive(Debug, Clone)]
pub struct FundingStore {
    data:     FundingData,
    selected: String,
}

impl FundingStore {
    /// Wrap a seed record, recalculating every round up front so all
    /// derived fields are consistent before the first edit. Selection
    /// starts on the first round.
    pub fn new(mut data: FundingData) -> Self {
        data.rounds = recalculate_all(&data.rounds);
        let selected = data.rounds.first().map(|r| r.id.clone()).unwrap_or_default();
        Self { data, selected }
    }

    /// The current model with all derived fields populated.
    pub fn data(&self) -> &FundingData {
        &self.data
    }

    /// Id of the round the host UI is focused on. Display state only.
    pub fn selected_round_id(&self) -> &str {
        &self.selected
    }

    /// The focused round, if the series is non-empty.
    pub fn selected_round(&self) -> Option<&FundingRound> {
        self.data.rounds.iter().find(|r| r.id == self.selected)
    }

    /// Focus a round. Never affects any calculation.
    pub fn select_round(&mut self, id: &str) -> Result<()> {
        self.index_of(id)?;
        self.selected = id.to_owned();
        Ok(())
    }

    /// Apply one edit to the round with the given id, then re-derive that
    /// round and every round after it (their baselines shifted). Rounds
    /// before the edited one are untouched. Invalid values are rejected
    /// before any state changes.
    pub fn apply(&mut self, id: &str, edit: Edit) -> Result<()> {
        let index = self.index_of(id)?;
        validate(&edit)?;

        let mut rounds = self.data.rounds.clone();
        let recalc_from = match edit {
            Edit::SetPreMoneyValuation(value) => {
                rounds[index].pre_money_valuation = value;
                index
            }
            Edit::SetAmountRaised(value) => {
                rounds[index].amount_raised = value;
                index
            }
            Edit::SetOptionPoolSize(value) => {
                rounds[index].option_pool_size = value;
                index
            }
            Edit::SetOptionPoolRefresh(policy) => {
                rounds[index].option_pool_refresh = policy;
                index
            }
            Edit::SetCapTable(mut table) => {
                math::normalize(&mut table);
                rounds[index].cap_table = table;
                // The override stands; only rounds built on it re-derive.
                index + 1
            }
        };

        self.data.rounds = recalculate_from(&rounds, recalc_from);
        Ok(())
    }

    /// Full forward pass over the whole series. Used after the host swaps
    /// in a new seed record; manual cap-table overrides do not survive it.
    pub fn recalculate(&mut self) {
        self.data.rounds = recalculate_all(&self.data.rounds);
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.data
            .rounds
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::UnknownRound(id.to_owned()))
    }
}

/// Fail fast on values the engine must never see stored.
fn validate(edit: &Edit) -> Result<()> {
    match edit {
        Edit::SetPreMoneyValuation(v) if *v < 0.0 => {
            Err(Error::InvalidInput { field: "preMoneyValuation", value: *v })
        }
        Edit::SetAmountRaised(v) if *v < 0.0 => {
            Err(Error::InvalidInput { field: "amountRaised", value: *v })
        }
        Edit::SetOptionPoolSize(v) if *v < 0.0 => {
            Err(Error::InvalidInput { field: "optionPoolSize", value: *v })
        }
        Edit::SetCapTable(t)
            if t.founders < 0.0 || t.investors < 0.0 || t.option_pool < 0.0 =>
        {
            Err(Error::InvalidInput {
                field: "capTable",
                value: t.founders.min(t.investors).min(t.option_pool),
            })
        }
        _ => Ok(()),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_data;
    use crate::state::{InvestorGroup, RoundStatus};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn four_round_store() -> FundingStore {
        let data = seed_data();
        assert_eq!(data.rounds.len(), 4);
        FundingStore::new(data)
    }

    #[test]
    fn construction_derives_every_round() {
        let store = four_round_store();
        for round in &store.data().rounds {
            assert!(close(
                round.post_money_valuation,
                round.pre_money_valuation + round.amount_raised
            ));
            let total = round.cap_table.total();
            assert!((99.95..=100.05).contains(&total), "total = {total}");
        }
    }

    #[test]
    fn edit_propagates_to_the_final_round() {
        let mut store = four_round_store();
        let first_id = store.data().rounds[0].id.clone();
        let before_last = store.data().rounds[3].cap_table.founders;

        store
            .apply(&first_id, Edit::SetAmountRaised(8_000_000.0))
            .unwrap();

        let after_last = store.data().rounds[3].cap_table.founders;
        assert!(!close(before_last, after_last), "round 0 edit must reach round 3");
    }

    #[test]
    fn edit_leaves_earlier_rounds_untouched() {
        let mut store = four_round_store();
        let third_id = store.data().rounds[2].id.clone();
        let earlier: Vec<_> = store.data().rounds[..2].to_vec();

        store
            .apply(&third_id, Edit::SetPreMoneyValuation(55_000_000.0))
            .unwrap();

        assert_eq!(earlier.as_slice(), &store.data().rounds[..2]);
    }

    #[test]
    fn negative_edit_is_rejected_and_nothing_changes() {
        let mut store = four_round_store();
        let snapshot = store.data().clone();
        let id = snapshot.rounds[1].id.clone();

        let err = store.apply(&id, Edit::SetAmountRaised(-1.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { field: "amountRaised", .. }));
        assert_eq!(&snapshot, store.data());
    }

    #[test]
    fn unknown_round_id_is_an_error() {
        let mut store = four_round_store();
        assert!(matches!(
            store.apply("series-z", Edit::SetAmountRaised(1.0)),
            Err(Error::UnknownRound(_))
        ));
        assert!(matches!(store.select_round("series-z"), Err(Error::UnknownRound(_))));
    }

    #[test]
    fn cap_table_override_is_normalized_and_feeds_downstream() {
        let mut store = four_round_store();
        let id = store.data().rounds[0].id.clone();

        // Sums to 120 — must be stored rescaled to 100.
        let override_table = CapTable {
            founders:    70.0,
            investors:   40.0,
            option_pool: 10.0,
            investor_groups: Vec::new(),
        };
        store.apply(&id, Edit::SetCapTable(override_table)).unwrap();

        let stored = &store.data().rounds[0].cap_table;
        assert!(close(stored.total(), 100.0));
        assert!(close(stored.founders, 70.0 * 100.0 / 120.0));

        // Round 1's founders/investors split follows the override's ratio.
        let next = &store.data().rounds[1];
        let remaining = next.cap_table.founders + next.cap_table.investors - next.target_dilution;
        assert!(close(
            next.cap_table.founders / remaining,
            stored.founders / (stored.founders + stored.investors)
        ));
    }

    #[test]
    fn investor_groups_keep_summing_to_investors_after_a_followup_edit() {
        let mut store = four_round_store();
        let id = store.data().rounds[0].id.clone();

        let mut table = store.data().rounds[0].cap_table.clone();
        table.investor_groups = vec![InvestorGroup {
            name: "Angels".into(),
            ownership: table.investors,
            amount_invested: 1_000_000.0,
        }];
        store.apply(&id, Edit::SetCapTable(table)).unwrap();

        // Re-deriving the overridden round must rescale the carried groups
        // to the freshly computed investors bucket, not copy them verbatim.
        store.apply(&id, Edit::SetAmountRaised(4_000_000.0)).unwrap();

        let round = &store.data().rounds[0];
        let group_sum: f64 = round
            .cap_table
            .investor_groups
            .iter()
            .map(|g| g.ownership)
            .sum();
        assert!(
            close(group_sum, round.cap_table.investors),
            "groups sum {group_sum} but investors = {}",
            round.cap_table.investors
        );
    }

    #[test]
    fn selection_is_display_state_only() {
        let mut store = four_round_store();
        let snapshot = store.data().clone();
        let last_id = snapshot.rounds[3].id.clone();

        store.select_round(&last_id).unwrap();
        assert_eq!(store.selected_round_id(), last_id);
        assert_eq!(store.selected_round().unwrap().id, last_id);
        assert_eq!(&snapshot, store.data());
    }

    #[test]
    fn refresh_policy_edit_recalculates() {
        let mut store = four_round_store();
        let id = store.data().rounds[0].id.clone();
        let before = store.data().rounds[0].cap_table.clone();

        store
            .apply(&id, Edit::SetOptionPoolRefresh(OptionPoolRefresh::PreMoney))
            .unwrap();
        let after = &store.data().rounds[0].cap_table;
        assert!(!close(before.option_pool, after.option_pool));
    }

    #[test]
    fn empty_store_has_no_selection() {
        let store = FundingStore::new(FundingData {
            company: crate::state::Company { name: "Empty".into(), founded: "2026".into() },
            founders: Default::default(),
            rounds: Vec::new(),
        });
        assert_eq!(store.selected_round_id(), "");
        assert!(store.selected_round().is_none());
    }

    #[test]
    fn status_never_affects_the_numbers() {
        let mut data = seed_data();
        let base = FundingStore::new(data.clone());
        for round in &mut data.rounds {
            round.status = RoundStatus::Completed;
        }
        let flagged = FundingStore::new(data);
        for (a, b) in base.data().rounds.iter().zip(&flagged.data().rounds) {
            assert_eq!(a.cap_table, b.cap_table);
            assert!(close(a.target_dilution, b.target_dilution));
        }
    }
}
