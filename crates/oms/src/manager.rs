//! Order Manager - event handling for the order lifecycle
//!
//! The manager owns every tracked order, the index of outstanding replace
//! requests and the exposure aggregates. Each handler either applies its
//! whole effect or returns an error having changed nothing.

use std::collections::HashMap;

use common::{notional, OrderId, Price, Quantity, Side};
use config::OmsConfig;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::aggregates::{AggregateSnapshot, Aggregates, PendingValueBounds};
use crate::error::{Result, TrackerError};
use crate::event::OrderEvent;
use crate::metrics::TrackerMetrics;
use crate::types::{Order, OrderState, PendingReplace};

/// Order Manager - tracks orders and exposure from client and market events
///
/// Not internally synchronized: handlers take `&mut self`. Share it across
/// threads behind a mutex.
#[derive(Debug, Default)]
pub struct OrderManager {
    /// Orders keyed by the id the market currently knows them by
    orders: HashMap<OrderId, Order>,
    /// Outstanding replaces keyed by the order's pre-replace id
    pending_replaces: HashMap<OrderId, PendingReplace>,
    aggregates: Aggregates,
    strict_validation: bool,
    metrics: TrackerMetrics,
}

impl OrderManager {
    /// Create an empty OrderManager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an OrderManager sized for `capacity` orders
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            orders: HashMap::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Create an OrderManager from the `tracker` config section
    pub fn from_config(config: &OmsConfig) -> Self {
        Self {
            strict_validation: config.strict_validation,
            ..Self::with_capacity(config.initial_capacity)
        }
    }

    /// Apply one event through the matching handler
    pub fn apply(&mut self, event: OrderEvent) -> Result<()> {
        match event {
            OrderEvent::InsertOrderRequest {
                id,
                side,
                price,
                quantity,
            } => self.on_insert_order_request(id, side, price, quantity),
            OrderEvent::ReplaceOrderRequest {
                old_id,
                new_id,
                delta_quantity,
            } => self.on_replace_order_request(old_id, new_id, delta_quantity),
            OrderEvent::RequestAcknowledged { id } => self.on_request_acknowledged(id),
            OrderEvent::RequestRejected { id } => self.on_request_rejected(id),
            OrderEvent::OrderFilled { id, quantity_filled } => {
                self.on_order_filled(id, quantity_filled)
            }
        }
    }

    /// Client sent a new order to the market
    ///
    /// The order is tracked as `NewPending`; it contributes no value until
    /// acknowledged.
    pub fn on_insert_order_request(
        &mut self,
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<()> {
        let result = self.insert_order(id, side, price, quantity);
        self.finish("insert", id, result)
    }

    /// Client asked to change the quantity of `old_id` by `delta_quantity`
    ///
    /// Exactly one acknowledgment or rejection addressed to `old_id` must
    /// follow. Fills addressed to `old_id` are still applied meanwhile.
    pub fn on_replace_order_request(
        &mut self,
        old_id: OrderId,
        new_id: OrderId,
        delta_quantity: Quantity,
    ) -> Result<()> {
        let result = self.replace_order(old_id, new_id, delta_quantity);
        self.finish("replace", old_id, result)
    }

    /// Market accepted the outstanding insert or replace of `id`
    pub fn on_request_acknowledged(&mut self, id: OrderId) -> Result<()> {
        let result = self.acknowledge(id);
        self.finish("acknowledge", id, result)
    }

    /// Market refused the outstanding insert or replace of `id`
    pub fn on_request_rejected(&mut self, id: OrderId) -> Result<()> {
        let result = self.reject(id);
        self.finish("reject", id, result)
    }

    /// Market executed `quantity_filled` of order `id`
    ///
    /// Accepted in any state but `Rejected`, including while a request is
    /// pending. Fills beyond the remaining quantity are tolerated.
    pub fn on_order_filled(&mut self, id: OrderId, quantity_filled: Quantity) -> Result<()> {
        let result = self.fill(id, quantity_filled);
        self.finish("fill", id, result)
    }

    /// Signed filled quantity across all orders, bids positive
    pub fn net_filled_quantity(&self) -> Quantity {
        self.aggregates.net_filled_quantity()
    }

    /// Value of acknowledged, non-pending orders on `side`
    pub fn confirmed_order_value(&self, side: Side) -> Decimal {
        self.aggregates.confirmed_order_value(side)
    }

    /// Value of the remaining quantity of orders on `side` with a replace outstanding
    pub fn pending_order_value(&self, side: Side) -> Decimal {
        self.aggregates.pending_order_value(side)
    }

    /// Range the pending order value on `side` settles into once every
    /// outstanding replace is resolved
    pub fn pending_order_value_bounds(&self, side: Side) -> PendingValueBounds {
        self.aggregates.pending_value_bounds(side)
    }

    pub fn snapshot(&self) -> AggregateSnapshot {
        self.aggregates.snapshot()
    }

    /// Get an order by its current id
    pub fn get_order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    /// All tracked orders, in no particular order
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Outstanding replace for the order currently known as `id`
    pub fn pending_replace(&self, id: OrderId) -> Option<&PendingReplace> {
        self.pending_replaces.get(&id)
    }

    pub fn pending_replace_count(&self) -> usize {
        self.pending_replaces.len()
    }

    fn insert_order(
        &mut self,
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<()> {
        if self.strict_validation {
            if quantity <= 0 {
                return Err(TrackerError::InvalidOrder(format!(
                    "order {} quantity must be greater than 0, got {}",
                    id, quantity
                )));
            }
            if price <= Decimal::ZERO {
                return Err(TrackerError::InvalidOrder(format!(
                    "order {} price must be greater than 0, got {}",
                    id, price
                )));
            }
        }

        if self.is_id_taken(id) {
            return Err(TrackerError::DuplicateOrderId(id));
        }

        self.orders.insert(id, Order::new(id, side, price, quantity));

        info!(order_id = %id, side = %side, price = %price, quantity, "Order insert requested");
        Ok(())
    }

    fn replace_order(
        &mut self,
        old_id: OrderId,
        new_id: OrderId,
        delta_quantity: Quantity,
    ) -> Result<()> {
        let state = self.order(old_id)?.state();
        if !state.accepts_replace() {
            return Err(TrackerError::InvalidStateForRequest { id: old_id, state });
        }
        if new_id != old_id && self.is_id_taken(new_id) {
            return Err(TrackerError::DuplicateOrderId(new_id));
        }

        let order = self.order_mut(old_id)?;
        order.mark_replace_pending();
        let (side, price, remaining) = (order.side(), order.price(), order.remaining_quantity());

        self.pending_replaces.insert(
            old_id,
            PendingReplace {
                new_id,
                delta_quantity,
            },
        );

        // quantity is uncertain until the market answers
        self.aggregates
            .adjust_confirmed(side, -notional(price, remaining));
        self.aggregates
            .open_pending(side, price, remaining, delta_quantity);

        info!(
            order_id = %old_id,
            new_id = %new_id,
            delta_quantity,
            "Order replace requested"
        );
        Ok(())
    }

    fn acknowledge(&mut self, id: OrderId) -> Result<()> {
        match self.order(id)?.state() {
            OrderState::NewPending => {
                let order = self.order_mut(id)?;
                order.recompute_state(true);
                let (side, value, state) = (order.side(), order.remaining_value(), order.state());

                self.aggregates.adjust_confirmed(side, value);

                info!(order_id = %id, state = %state, "Order insert acknowledged");
                Ok(())
            }
            OrderState::ReplacePending => {
                let pending = self.pending_for(id)?;
                if pending.new_id != id && self.orders.contains_key(&pending.new_id) {
                    return Err(TrackerError::DuplicateOrderId(pending.new_id));
                }

                let mut order = self
                    .orders
                    .remove(&id)
                    .ok_or(TrackerError::OrderNotFound(id))?;
                self.pending_replaces.remove(&id);

                let (side, price) = (order.side(), order.price());
                self.aggregates.close_pending(
                    side,
                    price,
                    order.remaining_quantity(),
                    pending.delta_quantity,
                );

                order.apply_replace(pending.new_id, pending.delta_quantity);
                order.recompute_state(true);
                self.aggregates.adjust_confirmed(side, order.remaining_value());

                info!(
                    order_id = %id,
                    new_id = %pending.new_id,
                    state = %order.state(),
                    remaining = order.remaining_quantity(),
                    "Order replace acknowledged"
                );

                // old id is retired; the order is only reachable by its new id
                self.orders.insert(pending.new_id, order);
                Ok(())
            }
            state => Err(TrackerError::InvalidStateForConfirmation { id, state }),
        }
    }

    fn reject(&mut self, id: OrderId) -> Result<()> {
        match self.order(id)?.state() {
            OrderState::NewPending => {
                self.order_mut(id)?.reject();

                info!(order_id = %id, "Order insert rejected");
                Ok(())
            }
            OrderState::ReplacePending => {
                let pending = self.pending_for(id)?;
                let order = self
                    .orders
                    .get_mut(&id)
                    .ok_or(TrackerError::OrderNotFound(id))?;
                self.pending_replaces.remove(&id);

                order.recompute_state(true);
                let (side, price, remaining, state) = (
                    order.side(),
                    order.price(),
                    order.remaining_quantity(),
                    order.state(),
                );

                self.aggregates
                    .close_pending(side, price, remaining, pending.delta_quantity);
                self.aggregates
                    .adjust_confirmed(side, notional(price, remaining));

                info!(order_id = %id, state = %state, "Order replace rejected");
                Ok(())
            }
            state => Err(TrackerError::InvalidStateForConfirmation { id, state }),
        }
    }

    fn fill(&mut self, id: OrderId, quantity_filled: Quantity) -> Result<()> {
        if self.strict_validation && quantity_filled <= 0 {
            return Err(TrackerError::InvalidOrder(format!(
                "fill for order {} must be greater than 0, got {}",
                id, quantity_filled
            )));
        }

        let order = self
            .orders
            .get_mut(&id)
            .ok_or(TrackerError::OrderNotFound(id))?;
        if order.state() == OrderState::Rejected {
            return Err(TrackerError::FillOnRejectedOrder(id));
        }

        let replace_pending = order.state() == OrderState::ReplacePending;
        order.apply_fill(quantity_filled);
        let (side, price) = (order.side(), order.price());

        self.aggregates.record_fill(side, price, quantity_filled);
        if replace_pending {
            self.aggregates
                .fill_while_pending(side, price, quantity_filled);
        }

        info!(
            order_id = %id,
            quantity_filled,
            filled = order.filled_quantity(),
            remaining = order.remaining_quantity(),
            state = %order.state(),
            "Order filled"
        );
        Ok(())
    }

    /// Live id, or reserved as the target of an outstanding replace
    fn is_id_taken(&self, id: OrderId) -> bool {
        self.orders.contains_key(&id)
            || self.pending_replaces.values().any(|p| p.new_id == id)
    }

    fn order(&self, id: OrderId) -> Result<&Order> {
        self.orders.get(&id).ok_or(TrackerError::OrderNotFound(id))
    }

    fn order_mut(&mut self, id: OrderId) -> Result<&mut Order> {
        self.orders.get_mut(&id).ok_or(TrackerError::OrderNotFound(id))
    }

    fn pending_for(&self, id: OrderId) -> Result<PendingReplace> {
        self.pending_replaces.get(&id).copied().ok_or_else(|| {
            TrackerError::Internal(format!(
                "order {} is replace pending without a pending replace record",
                id
            ))
        })
    }

    fn finish(&self, event: &'static str, id: OrderId, result: Result<()>) -> Result<()> {
        match &result {
            Ok(()) => {
                self.metrics.record_event(event);
                self.metrics
                    .set_index_sizes(self.orders.len(), self.pending_replaces.len());
            }
            Err(err) => {
                warn!(event, order_id = %id, error = %err, "Event refused");
                self.metrics.record_error(event, err.kind());
            }
        }
        result
    }
}
