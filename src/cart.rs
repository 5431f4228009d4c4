//! Cart

use std::collections::BTreeMap;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{catalog::MenuItem, prices::times};

/// Errors related to cart construction.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A line's currency differs from the cart currency (index, line currency, cart currency).
    #[error("Line {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// A line was added with a quantity of zero.
    #[error("Line {0} has zero quantity")]
    ZeroQuantity(usize),
}

/// One ordered item and how many of it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine<'a> {
    name: String,
    price: Money<'a, Currency>,
    quantity: u32,
    combos: BTreeMap<String, Money<'a, Currency>>,
}

impl<'a> OrderLine<'a> {
    /// Create a line with no combo tiers.
    pub fn new(name: impl Into<String>, price: Money<'a, Currency>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
            combos: BTreeMap::new(),
        }
    }

    /// Create a line for `quantity` units of a menu item, inheriting its combo tiers.
    pub fn from_menu_item(item: &MenuItem<'a>, quantity: u32) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price,
            quantity,
            combos: item.combos.clone(),
        }
    }

    /// Attach a combo tier price.
    #[must_use]
    pub fn with_combo(mut self, code: impl Into<String>, price: Money<'a, Currency>) -> Self {
        self.combos.insert(code.into(), price);
        self
    }

    /// Item name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price
    pub fn price(&self) -> Money<'a, Currency> {
        self.price
    }

    /// Units ordered
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Combo price by tier code
    pub fn combos(&self) -> &BTreeMap<String, Money<'a, Currency>> {
        &self.combos
    }

    /// Unit price times quantity.
    pub fn total(&self) -> Money<'a, Currency> {
        times(self.price, self.quantity)
    }
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    lines: Vec<OrderLine<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Create a cart with the given lines.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if a line is priced in another currency or has
    /// zero quantity.
    pub fn with_lines(
        lines: impl Into<Vec<OrderLine<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let lines = lines.into();

        lines.iter().enumerate().try_for_each(|(i, line)| {
            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity(i));
            }

            let mismatch = std::iter::once(&line.price)
                .chain(line.combos.values())
                .find(|price| price.currency() != currency);

            match mismatch {
                Some(price) => Err(CartError::CurrencyMismatch(
                    i,
                    price.currency().iso_alpha_code,
                    currency.iso_alpha_code,
                )),
                None => Ok(()),
            }
        })?;

        Ok(Cart { lines, currency })
    }

    /// Naive total: every line at its unit price.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        let minor = self
            .lines
            .iter()
            .map(|line| line.total().to_minor_units())
            .sum();

        Money::from_minor(minor, self.currency)
    }

    /// Iterate over the lines in order.
    pub fn iter(&self) -> impl Iterator<Item = &OrderLine<'a>> {
        self.lines.iter()
    }

    /// Get a line by index.
    pub fn get(&self, idx: usize) -> Option<&OrderLine<'a>> {
        self.lines.get(idx)
    }

    /// Lines in order.
    pub fn lines(&self) -> &[OrderLine<'a>] {
        &self.lines
    }

    /// Quantity of every line, by index.
    pub fn quantities(&self) -> Vec<u32> {
        self.lines.iter().map(OrderLine::quantity).collect()
    }

    /// Number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
