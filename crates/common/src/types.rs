//! Common types used across the order tracker
//!
//! This module provides the fundamental domain types shared by the
//! tracking core and its configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Limit price of an order
pub type Price = Decimal;

/// Order quantity in contracts.
///
/// Signed: replace deltas can be negative and remaining quantity may dip
/// below zero when fills race ahead of a quantity-increasing replace.
pub type Quantity = i64;

/// Identifier under which the market knows an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl OrderId {
    /// Create an OrderId from its raw value
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::str::FromStr for OrderId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| Error::invalid_input(format!("invalid order id '{}': {}", s, e)))
    }
}

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order
    Bid,
    /// Sell order
    Offer,
}

impl Side {
    /// Both sides, bid first
    pub const ALL: [Side; 2] = [Side::Bid, Side::Offer];

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Bid => Side::Offer,
            Side::Offer => Side::Bid,
        }
    }

    /// Returns true if this is a bid
    pub fn is_bid(&self) -> bool {
        matches!(self, Side::Bid)
    }

    /// Returns true if this is an offer
    pub fn is_offer(&self) -> bool {
        matches!(self, Side::Offer)
    }

    /// Sign applied to filled quantity in net position terms
    pub fn sign(&self) -> Quantity {
        match self {
            Side::Bid => 1,
            Side::Offer => -1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Bid => write!(f, "bid"),
            Side::Offer => write!(f, "offer"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = Error;

    /// Accepts the single-character market codes as well as the full names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "b" | "bid" | "buy" => Ok(Side::Bid),
            "o" | "offer" | "sell" => Ok(Side::Offer),
            _ => Err(Error::invalid_input(format!("unknown side: {}", s))),
        }
    }
}

/// Notional value of `quantity` contracts at `price`
pub fn notional(price: Price, quantity: Quantity) -> Decimal {
    price * Decimal::from(quantity)
}
