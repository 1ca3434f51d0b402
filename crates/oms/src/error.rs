//! Order tracker error types

use common::OrderId;
use thiserror::Error;

use crate::types::OrderState;

/// Errors raised by the order manager's event handlers
///
/// Every variant is detected before any mutation, so a failed event leaves
/// the manager exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// Insert (or replace target) reuses an id that is already tracked
    #[error("Duplicate order id: {0}")]
    DuplicateOrderId(OrderId),

    /// No order is tracked under this id
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Replace requested while the order cannot accept one
    #[error("Order {id} cannot accept a replace request in state {state}")]
    InvalidStateForRequest { id: OrderId, state: OrderState },

    /// Acknowledgment or rejection for an order with nothing outstanding
    #[error("Order {id} has no outstanding request to confirm (state {state})")]
    InvalidStateForConfirmation { id: OrderId, state: OrderState },

    /// Fill reported against a rejected order
    #[error("Fill received for rejected order {0}")]
    FillOnRejectedOrder(OrderId),

    /// Event failed strict validation
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// Internal bookkeeping out of sync
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TrackerError {
    /// Short label used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            TrackerError::DuplicateOrderId(_) => "duplicate_order_id",
            TrackerError::OrderNotFound(_) => "order_not_found",
            TrackerError::InvalidStateForRequest { .. } => "invalid_state_for_request",
            TrackerError::InvalidStateForConfirmation { .. } => "invalid_state_for_confirmation",
            TrackerError::FillOnRejectedOrder(_) => "fill_on_rejected_order",
            TrackerError::InvalidOrder(_) => "invalid_order",
            TrackerError::Internal(_) => "internal",
        }
    }
}

/// Result type for order tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
