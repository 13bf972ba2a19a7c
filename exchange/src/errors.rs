//! Error taxonomy for the token ledger and the exchange engine
//!
//! Every failure aborts the operation in progress with zero partial state
//! change; the variant tells the caller which precondition was violated.

use thiserror::Error;
use types::ids::OrderId;

/// Token ledger errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: u128, available: u128 },

    #[error("Insufficient allowance: required {required}, approved {approved}")]
    InsufficientAllowance { required: u128, approved: u128 },

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,
}

/// Exchange engine errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Insufficient escrow for {token}: required {required}, available {available}")]
    InsufficientEscrow {
        token: String,
        required: u128,
        available: u128,
    },

    #[error("Order not found: {id}")]
    OrderNotFound { id: OrderId },

    #[error("Order {id} is no longer open")]
    OrderNotOpen { id: OrderId },

    #[error("Only the creator of order {id} may cancel it")]
    NotCreator { id: OrderId },

    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Arithmetic overflow in settlement calculation")]
    Overflow,

    #[error("Token ledger error: {0}")]
    Token(#[from] TokenError),
}
