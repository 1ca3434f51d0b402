//! Order lifecycle and exposure tracking
//!
//! This crate reconstructs the state of every order from the client's
//! requests and the market's confirmations, and keeps running exposure
//! aggregates up to date as orders move through their lifecycle.
//!
//! # Events
//!
//! - Insert and replace requests sent by the client
//! - Acknowledgments, rejections and fills reported by the market
//!
//! # Aggregates
//!
//! - Net filled quantity (bids positive)
//! - Confirmed order value per side
//! - Pending order value per side, with the range it can settle into
//!
//! # Example
//!
//! ```
//! use common::{OrderId, Side};
//! use oms::OrderManager;
//! use rust_decimal::Decimal;
//!
//! let mut manager = OrderManager::new();
//! manager.on_insert_order_request(OrderId::new(1), Side::Bid, Decimal::from(200), 10)?;
//! manager.on_request_acknowledged(OrderId::new(1))?;
//!
//! assert_eq!(manager.confirmed_order_value(Side::Bid), Decimal::from(2000));
//! # Ok::<(), oms::TrackerError>(())
//! ```

pub mod aggregates;
pub mod error;
pub mod event;
pub mod manager;
pub mod metrics;
pub mod types;

// Re-export commonly used types
pub use aggregates::{AggregateSnapshot, PendingValueBounds, SideValues};
pub use error::{Result, TrackerError};
pub use event::OrderEvent;
pub use manager::OrderManager;
pub use types::{Order, OrderState, PendingReplace};
