//! Order tracker domain types
//!
//! This module defines the per-order state machine. Orders only ever
//! change through the manager's event handlers.

use common::{notional, OrderId, Price, Quantity, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a tracked order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    /// Insert sent, awaiting acknowledgment or rejection
    NewPending,
    /// Acknowledged with nothing filled
    Active,
    /// Insert rejected by the market; the order is dead
    Rejected,
    /// Replace sent, awaiting acknowledgment or rejection
    ReplacePending,
    /// Some quantity filled, some remaining
    PartiallyFilled,
    /// Nothing remaining (further fills are still tolerated)
    Completed,
}

impl Default for OrderState {
    fn default() -> Self {
        Self::NewPending
    }
}

impl OrderState {
    /// Awaiting exactly one market confirmation
    pub fn is_pending(&self) -> bool {
        matches!(self, OrderState::NewPending | OrderState::ReplacePending)
    }

    /// No further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Rejected)
    }

    /// Whether a replace request may be issued from this state
    pub fn accepts_replace(&self) -> bool {
        matches!(
            self,
            OrderState::Active | OrderState::PartiallyFilled | OrderState::Completed
        )
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderState::NewPending => write!(f, "new_pending"),
            OrderState::Active => write!(f, "active"),
            OrderState::Rejected => write!(f, "rejected"),
            OrderState::ReplacePending => write!(f, "replace_pending"),
            OrderState::PartiallyFilled => write!(f, "partially_filled"),
            OrderState::Completed => write!(f, "completed"),
        }
    }
}

/// A single tracked order
///
/// `remaining_quantity + filled_quantity` can drift from `total_quantity`
/// while a replace is pending, since fills keep arriving against the
/// pre-replace quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    side: Side,
    price: Price,
    total_quantity: Quantity,
    remaining_quantity: Quantity,
    filled_quantity: Quantity,
    state: OrderState,
}

impl Order {
    /// Create a new order awaiting acknowledgment
    pub fn new(id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            id,
            side,
            price,
            total_quantity: quantity,
            remaining_quantity: quantity,
            filled_quantity: 0,
            state: OrderState::NewPending,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    pub fn filled_quantity(&self) -> Quantity {
        self.filled_quantity
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    /// Notional value of the remaining quantity
    pub fn remaining_value(&self) -> Decimal {
        notional(self.price, self.remaining_quantity)
    }

    /// Move the order to its new id and adjust quantity by `delta_quantity`
    ///
    /// The caller has already validated the replace; this never fails.
    pub fn apply_replace(&mut self, new_id: OrderId, delta_quantity: Quantity) {
        self.id = new_id;
        self.total_quantity += delta_quantity;
        self.remaining_quantity += delta_quantity;
    }

    /// Derive the state from the current quantities
    ///
    /// Without `is_pending_resolution`, pending and rejected orders keep their
    /// state: only an acknowledgment or rejection ends a pending state.
    pub fn recompute_state(&mut self, is_pending_resolution: bool) {
        if !is_pending_resolution
            && matches!(
                self.state,
                OrderState::NewPending | OrderState::ReplacePending | OrderState::Rejected
            )
        {
            return;
        }

        self.state = if self.filled_quantity == 0 {
            OrderState::Active
        } else if self.filled_quantity > 0 && self.remaining_quantity > 0 {
            OrderState::PartiallyFilled
        } else {
            OrderState::Completed
        };
    }

    /// Record `quantity` as executed. Over-fills are accepted.
    pub fn apply_fill(&mut self, quantity: Quantity) {
        self.filled_quantity += quantity;
        self.remaining_quantity -= quantity;
        self.recompute_state(false);
    }

    /// Kill the order after its insert was rejected
    pub fn reject(&mut self) {
        self.remaining_quantity = 0;
        self.state = OrderState::Rejected;
    }

    pub fn mark_replace_pending(&mut self) {
        self.state = OrderState::ReplacePending;
    }
}

/// Outstanding replace, keyed in the manager by the order's pre-replace id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReplace {
    /// Id the order takes once the replace is acknowledged
    pub new_id: OrderId,
    /// Signed change to total and remaining quantity
    pub delta_quantity: Quantity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn create_test_order() -> Order {
        Order::new(OrderId::new(100), Side::Bid, dec!(200), 10)
    }

    #[test]
    fn test_order_new() {
        let order = create_test_order();

        assert_eq!(order.state(), OrderState::NewPending);
        assert_eq!(order.total_quantity(), 10);
        assert_eq!(order.remaining_quantity(), 10);
        assert_eq!(order.filled_quantity(), 0);
        assert_eq!(order.remaining_value(), dec!(2000));
    }

    #[test]
    fn test_recompute_state_without_resolution_keeps_pending() {
        let mut order = create_test_order();

        order.apply_fill(4);

        assert_eq!(order.state(), OrderState::NewPending);
        assert_eq!(order.filled_quantity(), 4);
        assert_eq!(order.remaining_quantity(), 6);

        order.recompute_state(true);
        assert_eq!(order.state(), OrderState::PartiallyFilled);
    }

    #[test]
    fn test_recompute_state_derivation() {
        let mut order = create_test_order();

        order.recompute_state(true);
        assert_eq!(order.state(), OrderState::Active);

        order.apply_fill(3);
        assert_eq!(order.state(), OrderState::PartiallyFilled);

        order.apply_fill(7);
        assert_eq!(order.state(), OrderState::Completed);
        assert_eq!(order.remaining_quantity(), 0);

        // over-fill stays completed
        order.apply_fill(2);
        assert_eq!(order.state(), OrderState::Completed);
        assert_eq!(order.remaining_quantity(), -2);
    }

    #[test]
    fn test_rejected_order_ignores_fill_recompute() {
        let mut order = create_test_order();

        order.reject();
        order.recompute_state(false);

        assert_eq!(order.state(), OrderState::Rejected);
        assert_eq!(order.remaining_quantity(), 0);
    }

    #[test]
    fn test_apply_replace() {
        let mut order = create_test_order();
        order.recompute_state(true);
        order.apply_fill(5);

        order.mark_replace_pending();
        order.apply_replace(OrderId::new(101), -2);

        assert_eq!(order.id(), OrderId::new(101));
        assert_eq!(order.total_quantity(), 8);
        assert_eq!(order.remaining_quantity(), 3);
        assert_eq!(order.filled_quantity(), 5);
        assert_eq!(order.state(), OrderState::ReplacePending);

        order.recompute_state(true);
        assert_eq!(order.state(), OrderState::PartiallyFilled);
    }

    #[test]
    fn test_state_helpers() {
        assert!(OrderState::NewPending.is_pending());
        assert!(OrderState::ReplacePending.is_pending());
        assert!(!OrderState::Active.is_pending());
        assert!(OrderState::Rejected.is_terminal());
        assert!(!OrderState::Completed.is_terminal());

        assert!(OrderState::Active.accepts_replace());
        assert!(OrderState::Completed.accepts_replace());
        assert!(!OrderState::NewPending.accepts_replace());
        assert!(!OrderState::ReplacePending.accepts_replace());
        assert!(!OrderState::Rejected.accepts_replace());

        assert_eq!(OrderState::ReplacePending.to_string(), "replace_pending");
    }
}
