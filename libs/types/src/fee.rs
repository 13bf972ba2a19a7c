//! Fee schedule and fill-fee computation
//!
//! The protocol charges the filler a percentage of the order's `amount_get`
//! side, paid in the same token. Both the receiving account and the percent
//! are fixed when the engine is constructed.

use crate::ids::AccountId;
use serde::{Deserialize, Serialize};

/// Immutable fee configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Account credited with every fill fee
    pub fee_account: AccountId,
    /// Percentage of `amount_get` charged to the filler
    pub fee_percent: u64,
}

impl FeeSchedule {
    pub fn new(fee_account: AccountId, fee_percent: u64) -> Self {
        Self {
            fee_account,
            fee_percent,
        }
    }

    /// Fee owed by the filler for a given `amount_get`.
    ///
    /// Integer division truncates toward zero: small amounts at low
    /// percentages yield a zero fee. Returns `None` on multiplication
    /// overflow.
    pub fn fill_fee(&self, amount_get: u128) -> Option<u128> {
        amount_get
            .checked_mul(self.fee_percent as u128)
            .map(|scaled| scaled / 100)
    }
}
