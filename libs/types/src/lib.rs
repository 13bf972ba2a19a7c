//! Types library for the custodial token exchange
//!
//! This library provides the core type definitions shared by the exchange
//! engine, ensuring type safety and backward compatibility.
//!
//! # Modules
//! - `ids`: Unique identifiers (AccountId, OrderId)
//! - `order`: Order lifecycle types
//! - `fee`: Fee schedule and fill-fee computation

pub mod fee;
pub mod ids;
pub mod order;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fee::*;
    pub use crate::ids::*;
    pub use crate::order::*;
}
