//! Mealdeal
//!
//! Mealdeal finds the cheapest way to pay for a fast-food order. Given a cart
//! and the restaurant's menu, promotions and coupon book, it enumerates every
//! applicable deal, searches for the cheapest combination that buys each
//! ordered unit exactly once, and proposes bounded upgrades that add a few
//! unordered items for a small premium.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod deals;
pub mod fixtures;
pub mod names;
pub mod optimizer;
pub mod prelude;
pub mod prices;
pub mod receipt;
pub mod solvers;
pub mod upgrades;
pub mod utils;
