//! Events driving the order tracker
//!
//! Client requests and market confirmations arrive as one tagged union so
//! a driver can feed them through a single entry point.

use common::{OrderId, Price, Quantity, Side};
use serde::{Deserialize, Serialize};

/// Event consumed by [`OrderManager::apply`](crate::OrderManager::apply)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderEvent {
    /// Client sent a new order to the market
    InsertOrderRequest {
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    },

    /// Client asked to change an order's quantity
    ReplaceOrderRequest {
        /// Order to modify
        old_id: OrderId,
        /// Id the order takes if the change is accepted
        new_id: OrderId,
        /// Signed quantity change
        delta_quantity: Quantity,
    },

    /// Market accepted the outstanding insert or replace
    RequestAcknowledged { id: OrderId },

    /// Market refused the outstanding insert or replace
    RequestRejected { id: OrderId },

    /// Market executed part of the order
    OrderFilled {
        id: OrderId,
        quantity_filled: Quantity,
    },
}

impl OrderEvent {
    /// Id the event is addressed to
    pub fn order_id(&self) -> OrderId {
        match self {
            OrderEvent::InsertOrderRequest { id, .. } => *id,
            OrderEvent::ReplaceOrderRequest { old_id, .. } => *old_id,
            OrderEvent::RequestAcknowledged { id } => *id,
            OrderEvent::RequestRejected { id } => *id,
            OrderEvent::OrderFilled { id, .. } => *id,
        }
    }

    /// Short label used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            OrderEvent::InsertOrderRequest { .. } => "insert",
            OrderEvent::ReplaceOrderRequest { .. } => "replace",
            OrderEvent::RequestAcknowledged { .. } => "acknowledge",
            OrderEvent::RequestRejected { .. } => "reject",
            OrderEvent::OrderFilled { .. } => "fill",
        }
    }
}
