//! Coupons Catalog

use std::fmt;

use rusty_money::{Money, iso::Currency};

use crate::names::{self, is_drink};

/// Two units of one item for a flat price.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoForOneCoupon<'a> {
    /// Coupon name
    pub name: String,

    /// Code printed on the coupon
    pub code: String,

    /// Target item name
    pub item: String,

    /// Price for two units
    pub price: Money<'a, Currency>,
}

impl TwoForOneCoupon<'_> {
    /// Whether the coupon targets an ordered item.
    pub fn targets(&self, name: &str) -> bool {
        names::matches(name, &self.item)
    }

    /// Display label, `name (code)`.
    pub fn label(&self) -> String {
        coupon_label(&self.name, &self.code)
    }
}

/// One position in a fixed bundle.
#[derive(Debug, Clone, PartialEq)]
pub enum BundleSlot<'a> {
    /// A specific item, matched by fuzzy name.
    Item(String),

    /// Any drink whose unit price does not exceed `max_price`.
    Drink {
        /// Most expensive drink the slot accepts
        max_price: Money<'a, Currency>,
    },
}

impl BundleSlot<'_> {
    /// Whether an ordered item can fill this slot.
    pub fn accepts(&self, name: &str, unit_price: &Money<'_, Currency>) -> bool {
        match self {
            BundleSlot::Item(item) => names::matches(name, item),
            BundleSlot::Drink { max_price } => {
                is_drink(name) && unit_price.to_minor_units() <= max_price.to_minor_units()
            }
        }
    }
}

impl fmt::Display for BundleSlot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleSlot::Item(item) => f.write_str(item),
            BundleSlot::Drink { max_price } => write!(f, "drink up to {max_price}"),
        }
    }
}

/// A fixed set of items for a flat price.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleCoupon<'a> {
    /// Coupon name
    pub name: String,

    /// Code printed on the coupon
    pub code: String,

    /// Bundle price regardless of how many slots the order fills
    pub price: Money<'a, Currency>,

    /// Slots, filled in order
    pub slots: Vec<BundleSlot<'a>>,
}

impl BundleCoupon<'_> {
    /// Display label, `name (code)`.
    pub fn label(&self) -> String {
        coupon_label(&self.name, &self.code)
    }
}

/// Coupon enum
#[derive(Debug, Clone, PartialEq)]
pub enum Coupon<'a> {
    /// Two units of one item for a flat price
    TwoForOne(TwoForOneCoupon<'a>),

    /// Fixed bundle for a flat price
    FixedBundle(BundleCoupon<'a>),
}

impl<'a> Coupon<'a> {
    /// Coupon code.
    pub fn code(&self) -> &str {
        match self {
            Coupon::TwoForOne(coupon) => &coupon.code,
            Coupon::FixedBundle(coupon) => &coupon.code,
        }
    }

    /// Every price this coupon quotes, including drink slot caps.
    pub(crate) fn prices(&self) -> impl Iterator<Item = &Money<'a, Currency>> {
        let no_slots: &[BundleSlot<'a>] = Default::default();
        let (price, slots) = match self {
            Coupon::TwoForOne(coupon) => (&coupon.price, no_slots),
            Coupon::FixedBundle(coupon) => (&coupon.price, coupon.slots.as_slice()),
        };

        std::iter::once(price).chain(slots.iter().filter_map(|slot| match slot {
            BundleSlot::Drink { max_price } => Some(max_price),
            BundleSlot::Item(_) => None,
        }))
    }
}

fn coupon_label(name: &str, code: &str) -> String {
    format!("{name} ({code})")
}
