//! The compiled-in seed record.
//!
//! There is no persistence anywhere in this crate: hosts either start from
//! this record or hand [`FundingData::from_json`] their own JSON of the
//! same shape. Derived fields here are zeroed — [`crate::FundingStore::new`]
//! runs the full recalculation immediately on load.

use std::collections::BTreeMap;

use crate::state::{
    Company, Founder, FundingData, FundingRound, OptionPoolRefresh, RoundStatus,
};

/// Three founders, four planned rounds, pre-seed through Series B.
pub fn seed_data() -> FundingData {
    let mut founders = BTreeMap::new();
    founders.insert(
        "jordi".to_owned(),
        Founder { name: "Jordi".to_owned(), ownership: 40.0 },
    );
    founders.insert(
        "mike".to_owned(),
        Founder { name: "Mike".to_owned(), ownership: 30.0 },
    );
    founders.insert(
        "robin".to_owned(),
        Founder { name: "Robin".to_owned(), ownership: 30.0 },
    );

    FundingData {
        company: Company {
            name:    "Meridian Robotics".to_owned(),
            founded: "2023".to_owned(),
        },
        founders,
        rounds: vec![
            FundingRound::new(
                "pre-seed",
                "Pre-Seed",
                4_000_000.0,
                1_000_000.0,
                10.0,
                OptionPoolRefresh::PostMoney,
                RoundStatus::Completed,
            ),
            FundingRound::new(
                "seed",
                "Seed",
                9_000_000.0,
                3_000_000.0,
                10.0,
                OptionPoolRefresh::PostMoney,
                RoundStatus::InProgress,
            ),
            FundingRound::new(
                "series-a",
                "Series A",
                40_000_000.0,
                10_000_000.0,
                5.0,
                OptionPoolRefresh::PreMoney,
                RoundStatus::Planned,
            ),
            FundingRound::new(
                "series-b",
                "Series B",
                120_000_000.0,
                30_000_000.0,
                5.0,
                OptionPoolRefresh::PostMoney,
                RoundStatus::Planned,
            ),
        ],
    }
}
