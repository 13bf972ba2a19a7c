//! Fungible token ledger
//!
//! A standard balance/allowance store: transfer, approve + transfer_from,
//! balance_of. The exchange engine calls into it to move real assets in and
//! out of its custodial account but does not own its state.
//!
//! The full supply is minted to the deployer at construction. All failures
//! leave balances, allowances, and the event log unchanged.

use std::collections::HashMap;
use types::ids::AccountId;

use crate::errors::TokenError;
use crate::events::TokenEvent;

/// In-memory fungible token ledger.
///
/// Amounts are expressed in the token's smallest indivisible unit
/// (`10^decimals` units per whole token).
#[derive(Debug)]
pub struct Token {
    name: String,
    symbol: String,
    decimals: u8,
    total_supply: u128,
    /// Balances: owner -> amount
    balances: HashMap<AccountId, u128>,
    /// Allowances: owner -> (spender -> amount)
    allowances: HashMap<AccountId, HashMap<AccountId, u128>>,
    /// Emitted events log (append-only)
    events: Vec<TokenEvent>,
}

impl Token {
    /// Create a new token, minting the full supply to `deployer`.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        total_supply: u128,
        deployer: AccountId,
    ) -> Self {
        let mut balances = HashMap::new();
        balances.insert(deployer, total_supply);
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            total_supply,
            balances,
            allowances: HashMap::new(),
            events: Vec::new(),
        }
    }

    // ───────────────────────── Metadata ─────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    // ───────────────────────── Reads ─────────────────────────

    /// Balance of an owner, 0 if the account has never held this token.
    pub fn balance_of(&self, owner: &AccountId) -> u128 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    /// Remaining amount `spender` may move out of `owner`'s balance.
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    // ───────────────────────── Mutations ─────────────────────────

    /// Move `amount` from `from` to `to`.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<TokenEvent, TokenError> {
        self.move_balance(from, to, amount)?;

        let event = TokenEvent::Transfer { from, to, amount };
        self.events.push(event.clone());
        Ok(event)
    }

    /// Authorize `spender` to move up to `amount` out of `owner`'s balance.
    ///
    /// Sets the allowance outright rather than incrementing it.
    pub fn approve(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        amount: u128,
    ) -> Result<TokenEvent, TokenError> {
        self.allowances
            .entry(owner)
            .or_default()
            .insert(spender, amount);

        let event = TokenEvent::Approval {
            owner,
            spender,
            amount,
        };
        self.events.push(event.clone());
        Ok(event)
    }

    /// Move `amount` from `from` to `to` on behalf of `spender`, consuming
    /// allowance.
    ///
    /// Requires a prior `approve` by `from` covering `amount`. The allowance
    /// check happens before the balance check; neither is consumed unless
    /// the whole operation succeeds.
    pub fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<TokenEvent, TokenError> {
        let approved = self.allowance(&from, &spender);
        if approved < amount {
            return Err(TokenError::InsufficientAllowance {
                required: amount,
                approved,
            });
        }

        self.move_balance(from, to, amount)?;

        // Balance moved; consume the allowance.
        if let Some(spenders) = self.allowances.get_mut(&from) {
            spenders.insert(spender, approved - amount);
        }

        let event = TokenEvent::Transfer { from, to, amount };
        self.events.push(event.clone());
        Ok(event)
    }

    /// Debit `from` and credit `to` with underflow/overflow protection.
    fn move_balance(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<(), TokenError> {
        let from_balance = self.balance_of(&from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance {
                required: amount,
                available: from_balance,
            });
        }

        let to_balance = self.balance_of(&to);
        let new_to = to_balance.checked_add(amount).ok_or(TokenError::Overflow)?;

        self.balances.insert(from, from_balance - amount);
        self.balances.insert(to, new_to);
        Ok(())
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[TokenEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<TokenEvent> {
        std::mem::take(&mut self.events)
    }
}
