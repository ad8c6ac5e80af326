//! Funding-round cap-table engine.
//!
//! Pure percentage arithmetic for startup equity modeling: derive each
//! round's post-money valuation and a normalized founders / investors /
//! option-pool ownership split, thread the result through every following
//! round, and keep each cap table summing to exactly 100 — with pre-money
//! vs. post-money option-pool refresh semantics handled correctly.
//!
//! Single-threaded and synchronous by design. No I/O, no persistence, no
//! network: the host UI owns one [`FundingStore`], sends it edit
//! operations, and re-renders from the returned model.
//!
//! # Quick Start
//!
//! ```rust
//! use captable_engine::{seed_data, Edit, FundingStore};
//!
//! let mut store = FundingStore::new(seed_data());
//!
//! // Bump the seed round to a €12M pre-money valuation. That round and
//! // every round after it are re-derived in one synchronous pass.
//! store.apply("seed", Edit::SetPreMoneyValuation(12_000_000.0))?;
//!
//! let seed = store.data().rounds.iter().find(|r| r.id == "seed").unwrap();
//! assert_eq!(
//!     seed.post_money_valuation,
//!     seed.pre_money_valuation + seed.amount_raised
//! );
//! let total = seed.cap_table.total();
//! assert!((99.95..=100.05).contains(&total));
//! # Ok::<(), captable_engine::Error>(())
//! ```
//!
//! # Feature Overview
//!
//! | Item | Description |
//! |------|-------------|
//! | [`engine::derive_round`] | One round's valuation + normalized cap table |
//! | [`engine::recalculate_all`] | Forward pass threading cap tables through the series |
//! | [`math::normalize`] | Proportional rescale of a cap table to exactly 100 |
//! | [`math::founder_net_worth`] | Per-founder paper value at a round |
//! | [`FundingStore`] | State container accepting the UI edit operations |
//! | [`seed_data`] | Compiled-in starting record |

pub mod engine;
pub mod error;
pub mod format;
pub mod math;
pub mod seed;
pub mod state;
pub mod store;

pub use error::{Error, Result};
pub use seed::seed_data;
pub use state::{
    CapTable, Company, Founder, FundingData, FundingRound, InvestorGroup, OptionPoolRefresh,
    RoundStatus,
};
pub use store::{Edit, FundingStore};
