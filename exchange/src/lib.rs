//! Custodial Token-Exchange Engine
//!
//! Users deposit fungible tokens into escrow, place limit orders against the
//! order book, and have orders filled atomically with a protocol fee
//! deducted. Every operation validates its preconditions before mutating
//! state: an operation either fully applies or fully rejects.
//!
//! # Modules
//! - `token`: fungible token ledger the engine deposits into and withdraws from
//! - `escrow`: engine-owned custodial balances, keyed (token, owner)
//! - `engine`: order lifecycle state machine and fill/settlement
//! - `events`: typed notification records emitted by every operation
//! - `errors`: error taxonomy

pub mod engine;
pub mod errors;
pub mod escrow;
pub mod events;
pub mod token;

pub use engine::Exchange;
pub use token::Token;
