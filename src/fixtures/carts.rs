//! Cart Fixtures

use serde::Deserialize;

/// Carts file
#[derive(Debug, Deserialize)]
pub struct CartsFixture {
    /// Named carts
    #[serde(default)]
    pub carts: Vec<CartFixture>,
}

/// One cart
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart name
    pub name: String,

    /// Lines in order
    #[serde(default)]
    pub lines: Vec<CartLineFixture>,
}

/// One cart line, referencing a menu item by name
#[derive(Debug, Deserialize)]
pub struct CartLineFixture {
    /// Menu item name
    pub item: String,

    /// Units ordered
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}
