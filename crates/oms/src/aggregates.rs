//! Portfolio-level exposure aggregates
//!
//! All figures are updated incrementally by the manager as orders change
//! state; nothing here is recomputed from the order index.

use common::{notional, Price, Quantity, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One decimal figure per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideValues {
    pub bid: Decimal,
    pub offer: Decimal,
}

impl SideValues {
    pub fn get(&self, side: Side) -> Decimal {
        match side {
            Side::Bid => self.bid,
            Side::Offer => self.offer,
        }
    }

    pub fn add(&mut self, side: Side, value: Decimal) {
        match side {
            Side::Bid => self.bid += value,
            Side::Offer => self.offer += value,
        }
    }
}

/// Range the pending order value of one side can settle into
///
/// `min` assumes every outstanding replace resolves to its smaller quantity,
/// `max` to its larger one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingValueBounds {
    pub min: Decimal,
    pub max: Decimal,
}

/// Point-in-time copy of every aggregate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    pub net_filled_quantity: Quantity,
    pub confirmed_order_value: SideValues,
    pub pending_order_value: SideValues,
    pub pending_value_min: SideValues,
    pub pending_value_max: SideValues,
}

/// Running aggregates owned by the order manager
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    net_filled_quantity: Quantity,
    confirmed_order_value: SideValues,
    pending_order_value: SideValues,
    pending_value_min: SideValues,
    pending_value_max: SideValues,
}

impl Aggregates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signed filled quantity, bids positive
    pub fn net_filled_quantity(&self) -> Quantity {
        self.net_filled_quantity
    }

    pub fn confirmed_order_value(&self, side: Side) -> Decimal {
        self.confirmed_order_value.get(side)
    }

    pub fn pending_order_value(&self, side: Side) -> Decimal {
        self.pending_order_value.get(side)
    }

    pub fn pending_value_bounds(&self, side: Side) -> PendingValueBounds {
        PendingValueBounds {
            min: self.pending_value_min.get(side),
            max: self.pending_value_max.get(side),
        }
    }

    pub fn snapshot(&self) -> AggregateSnapshot {
        AggregateSnapshot {
            net_filled_quantity: self.net_filled_quantity,
            confirmed_order_value: self.confirmed_order_value,
            pending_order_value: self.pending_order_value,
            pending_value_min: self.pending_value_min,
            pending_value_max: self.pending_value_max,
        }
    }

    /// Add `value` to the confirmed order value of `side` (negative removes)
    pub fn adjust_confirmed(&mut self, side: Side, value: Decimal) {
        self.confirmed_order_value.add(side, value);
        debug!(
            side = %side,
            delta = %value,
            confirmed = %self.confirmed_order_value.get(side),
            "Confirmed order value updated"
        );
    }

    /// Apply a fill to the net position and the confirmed value
    pub fn record_fill(&mut self, side: Side, price: Price, quantity: Quantity) {
        self.net_filled_quantity += side.sign() * quantity;
        self.adjust_confirmed(side, -notional(price, quantity));
    }

    /// An order with `remaining` left moves into a pending replace of `delta`
    pub fn open_pending(&mut self, side: Side, price: Price, remaining: Quantity, delta: Quantity) {
        self.shift_pending(side, price, remaining, delta, Decimal::ONE);
    }

    /// The pending replace of an order with `remaining` left is resolved
    pub fn close_pending(&mut self, side: Side, price: Price, remaining: Quantity, delta: Quantity) {
        self.shift_pending(side, price, remaining, delta, Decimal::NEGATIVE_ONE);
    }

    /// A fill of `quantity` landed on an order with a replace outstanding
    pub fn fill_while_pending(&mut self, side: Side, price: Price, quantity: Quantity) {
        let value = notional(price, quantity);
        self.pending_order_value.add(side, -value);
        self.pending_value_min.add(side, -value);
        self.pending_value_max.add(side, -value);
    }

    fn shift_pending(
        &mut self,
        side: Side,
        price: Price,
        remaining: Quantity,
        delta: Quantity,
        direction: Decimal,
    ) {
        let replaced = remaining + delta;
        self.pending_order_value
            .add(side, direction * notional(price, remaining));
        self.pending_value_min
            .add(side, direction * notional(price, remaining.min(replaced)));
        self.pending_value_max
            .add(side, direction * notional(price, remaining.max(replaced)));
        debug!(
            side = %side,
            pending = %self.pending_order_value.get(side),
            "Pending order value updated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_values_are_independent() {
        let mut values = SideValues::default();
        values.add(Side::Bid, dec!(100));
        values.add(Side::Offer, dec!(-40));
        values.add(Side::Bid, dec!(5.5));

        assert_eq!(values.get(Side::Bid), dec!(105.5));
        assert_eq!(values.get(Side::Offer), dec!(-40));
    }

    #[test]
    fn test_record_fill_signs_by_side() {
        let mut aggregates = Aggregates::new();

        aggregates.record_fill(Side::Bid, dec!(10), 7);
        aggregates.record_fill(Side::Offer, dec!(20), 3);

        assert_eq!(aggregates.net_filled_quantity(), 4);
        assert_eq!(aggregates.confirmed_order_value(Side::Bid), dec!(-70));
        assert_eq!(aggregates.confirmed_order_value(Side::Offer), dec!(-60));
    }

    #[test]
    fn test_pending_bounds_follow_delta_sign() {
        let mut aggregates = Aggregates::new();

        aggregates.open_pending(Side::Bid, dec!(10), 5, 3);
        aggregates.open_pending(Side::Bid, dec!(2), 4, -4);

        assert_eq!(aggregates.pending_order_value(Side::Bid), dec!(58));
        assert_eq!(
            aggregates.pending_value_bounds(Side::Bid),
            PendingValueBounds { min: dec!(50), max: dec!(88) }
        );
        assert_eq!(aggregates.pending_order_value(Side::Offer), Decimal::ZERO);
    }

    #[test]
    fn test_fill_while_pending_then_close_returns_to_zero() {
        let mut aggregates = Aggregates::new();

        aggregates.open_pending(Side::Offer, dec!(3), 10, -6);
        aggregates.fill_while_pending(Side::Offer, dec!(3), 4);
        assert_eq!(aggregates.pending_order_value(Side::Offer), dec!(18));

        aggregates.close_pending(Side::Offer, dec!(3), 6, -6);

        let snapshot = aggregates.snapshot();
        assert_eq!(snapshot.pending_order_value, SideValues::default());
        assert_eq!(snapshot.pending_value_min, SideValues::default());
        assert_eq!(snapshot.pending_value_max, SideValues::default());
    }
}
