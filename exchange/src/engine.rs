//! Exchange engine core
//!
//! Owns custodial per-token-per-user balances, the order book, and the fee
//! policy. Operations run one at a time to completion (`&mut self`); each
//! validates its preconditions before any mutation, so a failed operation
//! leaves no partial effect.

use std::collections::BTreeMap;

use tracing::debug;
use types::fee::FeeSchedule;
use types::ids::{AccountId, OrderId};
use types::order::Order;

use crate::errors::ExchangeError;
use crate::escrow::{Escrow, Movement};
use crate::events::{
    Deposit, ExchangeEvent, OrderCancelled, OrderCreated, Trade, Withdrawal,
};
use crate::token::Token;

/// Custodial token-exchange engine.
///
/// The engine holds deposits under its own custodial account in each token
/// ledger; the escrow store records who owns what within that pool. Orders
/// are retained indefinitely after reaching a terminal state.
#[derive(Debug)]
pub struct Exchange {
    /// Custodial identity under which the engine holds ledger balances
    account: AccountId,
    /// Fee policy, fixed at construction
    fees: FeeSchedule,
    /// Custodial balances: token -> owner -> amount
    escrow: Escrow,
    /// Full order book, keyed by id, all lifecycle states
    orders: BTreeMap<OrderId, Order>,
    /// Number of orders ever created; the next id is `order_count + 1`
    order_count: u64,
    /// High-water mark keeping order timestamps non-decreasing
    last_timestamp: i64,
    /// Emitted events log (append-only)
    events: Vec<ExchangeEvent>,
}

impl Exchange {
    /// Create a new engine with the given fee policy.
    pub fn new(fee_account: AccountId, fee_percent: u64) -> Self {
        Self {
            account: AccountId::new(),
            fees: FeeSchedule::new(fee_account, fee_percent),
            escrow: Escrow::new(),
            orders: BTreeMap::new(),
            order_count: 0,
            last_timestamp: 0,
            events: Vec::new(),
        }
    }

    // ───────────────────────── Reads ─────────────────────────

    /// The engine's custodial account in every token ledger. Depositors
    /// approve this identity as spender before calling `deposit`.
    pub fn account(&self) -> AccountId {
        self.account
    }

    pub fn fee_account(&self) -> AccountId {
        self.fees.fee_account
    }

    pub fn fee_percent(&self) -> u64 {
        self.fees.fee_percent
    }

    /// Escrow balance for a (token, owner) pair, 0 if absent.
    pub fn balance_of(&self, token: &str, owner: &AccountId) -> u128 {
        self.escrow.balance_of(token, owner)
    }

    /// Total escrowed across all owners for a token.
    pub fn escrowed(&self, token: &str) -> u128 {
        self.escrow.total(token)
    }

    /// Number of orders ever created (terminal orders included).
    pub fn order_count(&self) -> u64 {
        self.order_count
    }

    /// Look up an order by id.
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    /// All orders in id (creation) order.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    // ───────────────────────── Escrow Accounting ─────────────────────────

    /// Deposit tokens into escrow.
    ///
    /// Pulls `amount` from `caller` into the engine's custodial account via
    /// `transfer_from`; the caller must have approved the engine beforehand.
    /// The external call runs first and escrow is credited only after it
    /// succeeds, so a rejected pull leaves no trace.
    pub fn deposit(
        &mut self,
        ledger: &mut Token,
        caller: AccountId,
        amount: u128,
    ) -> Result<ExchangeEvent, ExchangeError> {
        if amount == 0 {
            return Err(ExchangeError::InvalidAmount);
        }
        let token = ledger.symbol().to_string();
        self.escrow.check_credit(&token, &caller, amount)?;

        ledger.transfer_from(self.account, caller, self.account, amount)?;
        // Cannot fail: credit was checked above.
        let balance = self.escrow.credit(&token, caller, amount)?;

        debug!(user = %caller, token = %token, amount = %amount, balance = %balance, "deposit");
        let event = ExchangeEvent::Deposit(Deposit {
            token,
            user: caller,
            amount,
            balance,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    /// Withdraw tokens from escrow back to the caller.
    ///
    /// The escrow precondition is checked first and the ledger transfer runs
    /// before the debit; once the transfer succeeds the debit cannot fail,
    /// so the two mutations settle as one unit.
    pub fn withdraw(
        &mut self,
        ledger: &mut Token,
        caller: AccountId,
        amount: u128,
    ) -> Result<ExchangeEvent, ExchangeError> {
        if amount == 0 {
            return Err(ExchangeError::InvalidAmount);
        }
        let token = ledger.symbol().to_string();
        let available = self.escrow.balance_of(&token, &caller);
        if available < amount {
            return Err(ExchangeError::InsufficientEscrow {
                token,
                required: amount,
                available,
            });
        }

        ledger.transfer(self.account, caller, amount)?;
        let balance = self.escrow.debit(&token, &caller, amount)?;

        debug!(user = %caller, token = %token, amount = %amount, balance = %balance, "withdraw");
        let event = ExchangeEvent::Withdrawal(Withdrawal {
            token,
            user: caller,
            amount,
            balance,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    // ───────────────────────── Order Lifecycle ─────────────────────────

    /// Place a new limit order.
    ///
    /// The creator must already have escrowed at least `amount_give` of
    /// `token_give`; the engine never trusts a future deposit. Escrow is
    /// checked, not locked — the balance stays free until a fill settles.
    pub fn make_order(
        &mut self,
        token_get: &str,
        amount_get: u128,
        token_give: &str,
        amount_give: u128,
        caller: AccountId,
        current_time: i64,
    ) -> Result<ExchangeEvent, ExchangeError> {
        if amount_get == 0 || amount_give == 0 {
            return Err(ExchangeError::InvalidAmount);
        }
        let available = self.escrow.balance_of(token_give, &caller);
        if available < amount_give {
            return Err(ExchangeError::InsufficientEscrow {
                token: token_give.to_string(),
                required: amount_give,
                available,
            });
        }

        let id = OrderId::new(self.order_count + 1);
        let timestamp = self.touch(current_time);
        let order = Order::new(
            id,
            caller,
            token_get,
            amount_get,
            token_give,
            amount_give,
            timestamp,
        );
        self.orders.insert(id, order);
        self.order_count += 1;

        debug!(%id, creator = %caller, token_get, amount_get = %amount_get, token_give, amount_give = %amount_give, "order created");
        let event = ExchangeEvent::OrderCreated(OrderCreated {
            id,
            user: caller,
            token_get: token_get.to_string(),
            amount_get,
            token_give: token_give.to_string(),
            amount_give,
            timestamp,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    /// Cancel an open order.
    ///
    /// Only the creator may cancel, and only while the order is open. No
    /// balances move: placing the order never debited the creator, so there
    /// is nothing to return.
    pub fn cancel_order(
        &mut self,
        id: OrderId,
        caller: AccountId,
        current_time: i64,
    ) -> Result<ExchangeEvent, ExchangeError> {
        let order = self
            .orders
            .get(&id)
            .ok_or(ExchangeError::OrderNotFound { id })?;
        if order.creator != caller {
            return Err(ExchangeError::NotCreator { id });
        }
        if !order.is_open() {
            return Err(ExchangeError::OrderNotOpen { id });
        }

        let timestamp = self.touch(current_time);
        // Checked open above; the transition cannot panic.
        let order = self.orders.get_mut(&id).ok_or(ExchangeError::OrderNotFound { id })?;
        order.cancel();
        let order = order.clone();

        debug!(%id, user = %caller, "order cancelled");
        let event = ExchangeEvent::OrderCancelled(OrderCancelled {
            id,
            user: caller,
            token_get: order.token_get,
            amount_get: order.amount_get,
            token_give: order.token_give,
            amount_give: order.amount_give,
            timestamp,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    /// Fill an open order, settling both legs and the fee atomically.
    ///
    /// The filler pays `amount_get + fee` in `token_get` (the fee goes to
    /// the fee account) and receives `amount_give` in `token_give` from the
    /// creator's escrow. The five settlement legs apply as one unit: a
    /// failure in any leg leaves every (token, account) cell untouched,
    /// including when the two sides share a token or an account.
    pub fn fill_order(
        &mut self,
        id: OrderId,
        caller: AccountId,
        current_time: i64,
    ) -> Result<ExchangeEvent, ExchangeError> {
        let order = self
            .orders
            .get(&id)
            .ok_or(ExchangeError::OrderNotFound { id })?;
        if !order.is_open() {
            return Err(ExchangeError::OrderNotOpen { id });
        }
        let order = order.clone();

        let fee = self
            .fees
            .fill_fee(order.amount_get)
            .ok_or(ExchangeError::Overflow)?;
        let filler_cost = order
            .amount_get
            .checked_add(fee)
            .ok_or(ExchangeError::Overflow)?;

        // The creator's give-side was checked at placement but never
        // locked; it may have been withdrawn since. Both debits are
        // re-validated here, leg by leg against scratch balances, before
        // anything is written.
        let get_total = self.escrow.total(&order.token_get);
        let give_total = self.escrow.total(&order.token_give);
        self.escrow.settle(&[
            Movement::Debit {
                token: &order.token_get,
                owner: caller,
                amount: filler_cost,
            },
            Movement::Credit {
                token: &order.token_get,
                owner: order.creator,
                amount: order.amount_get,
            },
            Movement::Credit {
                token: &order.token_get,
                owner: self.fees.fee_account,
                amount: fee,
            },
            Movement::Debit {
                token: &order.token_give,
                owner: order.creator,
                amount: order.amount_give,
            },
            Movement::Credit {
                token: &order.token_give,
                owner: caller,
                amount: order.amount_give,
            },
        ])?;
        // Settlement reassigns ownership within a token, never value
        debug_assert_eq!(self.escrow.total(&order.token_get), get_total);
        debug_assert_eq!(self.escrow.total(&order.token_give), give_total);

        let timestamp = self.touch(current_time);
        // Checked open above; the transition cannot panic.
        let stored = self
            .orders
            .get_mut(&id)
            .ok_or(ExchangeError::OrderNotFound { id })?;
        stored.fill();

        debug!(%id, filler = %caller, creator = %order.creator, fee = %fee, "order filled");
        let event = ExchangeEvent::Trade(Trade {
            id,
            user: caller,
            token_get: order.token_get,
            amount_get: order.amount_get,
            token_give: order.token_give,
            amount_give: order.amount_give,
            creator: order.creator,
            fee,
            timestamp,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ExchangeEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ExchangeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Clamp a caller-supplied clock reading so recorded timestamps never
    /// step backwards.
    fn touch(&mut self, current_time: i64) -> i64 {
        let timestamp = current_time.max(self.last_timestamp);
        self.last_timestamp = timestamp;
        timestamp
    }
}
