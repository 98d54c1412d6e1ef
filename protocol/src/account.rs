use beserial::{Deserialize, Serialize};

use crate::primitives::Addr64;

/// A closed (globally agreed) account record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: Addr64,
    pub balance: u64,
    pub tx_cnt: u32,
    pub is_staking: bool,
}

impl Account {
    pub fn new(address: Addr64) -> Self {
        Account {
            address,
            balance: 0,
            tx_cnt: 0,
            is_staking: false,
        }
    }
}

/// A per-shard delta against an account's closed balance, accumulated from
/// the funds transactions admitted into one bucket (see
/// [`crate::tx_bucket::TxBucket`]). `relative_balance` may go negative
/// mid-epoch; it is only ever applied to the closed account at epoch
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeAccount {
    pub address: Addr64,
    pub relative_balance: i64,
    pub relative_tx_cnt: u32,
}

impl RelativeAccount {
    pub fn new(address: Addr64) -> Self {
        RelativeAccount {
            address,
            relative_balance: 0,
            relative_tx_cnt: 0,
        }
    }
}
