//! Escrow accounting
//!
//! Custodial balances the engine holds on behalf of users, keyed by
//! (token symbol, owner). The sum of all entries for a token never exceeds
//! the engine's balance of that token in its ledger: escrow is only mutated
//! by deposit, withdraw, and fill settlement, each of which preserves that
//! bound.

use std::collections::HashMap;
use types::ids::AccountId;

use crate::errors::ExchangeError;

/// One leg of a settlement applied by [`Escrow::settle`].
#[derive(Debug, Clone, Copy)]
pub enum Movement<'a> {
    Credit {
        token: &'a str,
        owner: AccountId,
        amount: u128,
    },
    Debit {
        token: &'a str,
        owner: AccountId,
        amount: u128,
    },
}

/// Engine-owned custodial balance store.
///
/// Balances are stored as `HashMap<String, HashMap<AccountId, u128>>` where
/// the outer keys are token symbol strings (e.g. "DAPP", "mETH").
#[derive(Debug, Default)]
pub struct Escrow {
    /// Balances: token -> (owner -> amount)
    balances: HashMap<String, HashMap<AccountId, u128>>,
}

impl Escrow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance for a (token, owner) pair, 0 if absent.
    pub fn balance_of(&self, token: &str, owner: &AccountId) -> u128 {
        self.balances
            .get(token)
            .and_then(|owners| owners.get(owner))
            .copied()
            .unwrap_or(0)
    }

    /// Check that `amount` can be credited without overflow.
    ///
    /// Lets callers validate before an external ledger call so the credit
    /// afterwards cannot fail.
    pub fn check_credit(
        &self,
        token: &str,
        owner: &AccountId,
        amount: u128,
    ) -> Result<(), ExchangeError> {
        self.balance_of(token, owner)
            .checked_add(amount)
            .map(|_| ())
            .ok_or(ExchangeError::Overflow)
    }

    /// Add `amount` to (token, owner) with overflow protection.
    ///
    /// Returns the new balance.
    pub fn credit(
        &mut self,
        token: &str,
        owner: AccountId,
        amount: u128,
    ) -> Result<u128, ExchangeError> {
        let current = self
            .balances
            .entry(token.to_string())
            .or_default()
            .entry(owner)
            .or_insert(0);

        let new_balance = current.checked_add(amount).ok_or(ExchangeError::Overflow)?;
        *current = new_balance;
        Ok(new_balance)
    }

    /// Subtract `amount` from (token, owner) with underflow protection.
    ///
    /// Returns the new balance.
    pub fn debit(
        &mut self,
        token: &str,
        owner: &AccountId,
        amount: u128,
    ) -> Result<u128, ExchangeError> {
        let available = self.balance_of(token, owner);
        if available < amount {
            return Err(ExchangeError::InsufficientEscrow {
                token: token.to_string(),
                required: amount,
                available,
            });
        }

        let new_balance = available - amount;
        self.balances
            .entry(token.to_string())
            .or_default()
            .insert(*owner, new_balance);
        Ok(new_balance)
    }

    /// Apply a sequence of credits and debits as one unit.
    ///
    /// Legs are replayed in order against scratch balances; a leg that would
    /// overdraw or overflow rejects the whole batch and nothing is written.
    /// Order matters when legs share a (token, owner) cell: each debit must
    /// be covered by the balance at its position in the sequence.
    pub fn settle(&mut self, legs: &[Movement<'_>]) -> Result<(), ExchangeError> {
        let mut scratch: HashMap<(&str, AccountId), u128> = HashMap::new();
        for leg in legs.iter().copied() {
            match leg {
                Movement::Credit {
                    token,
                    owner,
                    amount,
                } => {
                    let cell = scratch
                        .entry((token, owner))
                        .or_insert_with(|| self.balance_of(token, &owner));
                    *cell = cell.checked_add(amount).ok_or(ExchangeError::Overflow)?;
                }
                Movement::Debit {
                    token,
                    owner,
                    amount,
                } => {
                    let cell = scratch
                        .entry((token, owner))
                        .or_insert_with(|| self.balance_of(token, &owner));
                    if *cell < amount {
                        return Err(ExchangeError::InsufficientEscrow {
                            token: token.to_string(),
                            required: amount,
                            available: *cell,
                        });
                    }
                    *cell -= amount;
                }
            }
        }

        for ((token, owner), balance) in scratch {
            self.balances
                .entry(token.to_string())
                .or_default()
                .insert(owner, balance);
        }
        Ok(())
    }

    /// Sum of all escrowed balances for a token, across all owners.
    pub fn total(&self, token: &str) -> u128 {
        self.balances
            .get(token)
            .map(|owners| owners.values().fold(0u128, |acc, b| acc.saturating_add(*b)))
            .unwrap_or(0)
    }
}
