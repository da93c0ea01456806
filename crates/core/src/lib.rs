//! Meltemi Core - Selection, cart and pricing engine.
//!
//! This crate holds the storefront's entire purchase logic:
//! - [`catalog`] - Variant/collection model and default fallbacks
//! - [`selection`] - Option derivation with cascading resets
//! - [`cart`] - Ordered cart lines with merge-on-add
//! - [`pricing`] - Coupon, shipping and VAT arithmetic
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no async. Everything here runs to completion given its inputs, which is
//! what lets the storefront, the CLI and the test suites share one engine.
//!
//! Monetary amounts are `rust_decimal::Decimal` throughout; rounding to two
//! decimals happens only at display time (see [`types::money`]), never inside
//! a computation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod pricing;
pub mod selection;
pub mod types;

pub use cart::{Cart, CartLine, LineKey};
pub use catalog::{CatalogError, Collection, ResolvedVariant, Variant};
pub use pricing::{Coupon, DeliveryMethod, PaymentMethod, Quote, ShippingConfig};
pub use selection::{Resolution, Selection, SelectionAction};
pub use types::*;
