//! Order lifecycle types
//!
//! An order is a standing offer: the creator wants to receive `amount_get`
//! of `token_get` in exchange for `amount_give` of `token_give`. Amounts are
//! expressed in the token's smallest indivisible unit.

use crate::ids::{AccountId, OrderId};
use serde::{Deserialize, Serialize};

/// Order status enum
///
/// `Cancelled` and `Filled` are terminal and mutually exclusive: an order
/// that has reached either state can never transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Standing offer, eligible for cancel or fill
    Open,
    /// Revoked by its creator (terminal)
    Cancelled,
    /// Settled against a filler (terminal)
    Filled,
}

impl OrderStatus {
    /// Check if status is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::Filled)
    }
}

/// Complete order structure
///
/// Orders are retained indefinitely after reaching a terminal state so the
/// full history stays available for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub creator: AccountId,
    pub token_get: String,
    pub amount_get: u128,
    pub token_give: String,
    pub amount_give: u128,
    /// Creation time, unix seconds. Non-decreasing across orders created
    /// in sequence.
    pub created_at: i64,
    pub status: OrderStatus,
}

impl Order {
    /// Create a new open order
    pub fn new(
        id: OrderId,
        creator: AccountId,
        token_get: impl Into<String>,
        amount_get: u128,
        token_give: impl Into<String>,
        amount_give: u128,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            creator,
            token_get: token_get.into(),
            amount_get,
            token_give: token_give.into(),
            amount_give,
            created_at,
            status: OrderStatus::Open,
        }
    }

    /// Check if the order is still open
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }

    /// Cancel the order
    ///
    /// # Panics
    /// Panics if the order is already in a terminal state. Callers check
    /// the status before transitioning.
    pub fn cancel(&mut self) {
        assert!(!self.status.is_terminal(), "Cannot cancel terminal order");
        self.status = OrderStatus::Cancelled;
    }

    /// Mark the order as filled
    ///
    /// # Panics
    /// Panics if the order is already in a terminal state. Callers check
    /// the status before transitioning.
    pub fn fill(&mut self) {
        assert!(!self.status.is_terminal(), "Cannot fill terminal order");
        self.status = OrderStatus::Filled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        Order::new(
            OrderId::first(),
            AccountId::new(),
            "mETH",
            100,
            "DAPP",
            5,
            1_708_123_456,
        )
    }

    #[test]
    fn test_order_creation_is_open() {
        let order = sample_order();
        assert_eq!(order.status, OrderStatus::Open);
        assert!(order.is_open());
        assert!(!order.status.is_terminal());
    }

    #[test]
    fn test_order_cancel() {
        let mut order = sample_order();
        order.cancel();
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert!(order.status.is_terminal());
    }

    #[test]
    fn test_order_fill() {
        let mut order = sample_order();
        order.fill();
        assert_eq!(order.status, OrderStatus::Filled);
        assert!(order.status.is_terminal());
    }

    #[test]
    #[should_panic(expected = "Cannot cancel terminal order")]
    fn test_cancel_filled_panics() {
        let mut order = sample_order();
        order.fill();
        order.cancel();
    }

    #[test]
    #[should_panic(expected = "Cannot fill terminal order")]
    fn test_fill_cancelled_panics() {
        let mut order = sample_order();
        order.cancel();
        order.fill();
    }

    #[test]
    fn test_order_serialization() {
        let order = sample_order();
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, deserialized);
    }
}
