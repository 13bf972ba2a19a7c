//! Typed notification records
//!
//! Events are immutable records appended to a per-component log and also
//! returned by the emitting operation. Each carries enough fields for a
//! subscriber to reconstruct the resulting balance/order state without a
//! further query.

use serde::{Deserialize, Serialize};
use types::ids::{AccountId, OrderId};

/// Tokens pulled into escrow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub token: String,
    pub user: AccountId,
    pub amount: u128,
    /// Escrow balance for (token, user) after the deposit
    pub balance: u128,
}

/// Tokens released from escrow back to the owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub token: String,
    pub user: AccountId,
    pub amount: u128,
    /// Escrow balance for (token, user) after the withdrawal
    pub balance: u128,
}

/// New standing offer recorded on the order book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreated {
    pub id: OrderId,
    pub user: AccountId,
    pub token_get: String,
    pub amount_get: u128,
    pub token_give: String,
    pub amount_give: u128,
    pub timestamp: i64,
}

/// Standing offer revoked by its creator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelled {
    pub id: OrderId,
    pub user: AccountId,
    pub token_get: String,
    pub amount_get: u128,
    pub token_give: String,
    pub amount_give: u128,
    /// Time of cancellation, not of creation
    pub timestamp: i64,
}

/// Order settled between creator and filler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub id: OrderId,
    /// The filler
    pub user: AccountId,
    pub token_get: String,
    pub amount_get: u128,
    pub token_give: String,
    pub amount_give: u128,
    pub creator: AccountId,
    /// Fee charged to the filler, in `token_get` units
    pub fee: u128,
    pub timestamp: i64,
}

/// Enum wrapper for all engine events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangeEvent {
    Deposit(Deposit),
    Withdrawal(Withdrawal),
    OrderCreated(OrderCreated),
    OrderCancelled(OrderCancelled),
    Trade(Trade),
}

/// Token ledger events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenEvent {
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: u128,
    },
    Approval {
        owner: AccountId,
        spender: AccountId,
        amount: u128,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_serialization() {
        let event = Deposit {
            token: "DAPP".to_string(),
            user: AccountId::new(),
            amount: 10,
            balance: 10,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deser: Deposit = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }

    #[test]
    fn test_trade_serialization() {
        let event = ExchangeEvent::Trade(Trade {
            id: OrderId::first(),
            user: AccountId::new(),
            token_get: "mETH".to_string(),
            amount_get: 100,
            token_give: "DAPP".to_string(),
            amount_give: 5,
            creator: AccountId::new(),
            fee: 10,
            timestamp: 1_708_123_456,
        });
        let json = serde_json::to_string(&event).unwrap();
        let deser: ExchangeEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }

    #[test]
    fn test_exchange_event_enum_variant() {
        let event = ExchangeEvent::OrderCancelled(OrderCancelled {
            id: OrderId::new(3),
            user: AccountId::new(),
            token_get: "mETH".to_string(),
            amount_get: 1,
            token_give: "DAPP".to_string(),
            amount_give: 1,
            timestamp: 1_708_123_457,
        });
        assert!(matches!(event, ExchangeEvent::OrderCancelled(_)));
    }

    #[test]
    fn test_token_event_serialization() {
        let event = TokenEvent::Approval {
            owner: AccountId::new(),
            spender: AccountId::new(),
            amount: 500,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deser: TokenEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }
}
