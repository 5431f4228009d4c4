//! Coupon Fixtures

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    catalog::{BundleCoupon, BundleSlot, Coupon, TwoForOneCoupon},
    fixtures::FixtureError,
};

/// Prefix of a bundle slot that accepts any drink up to a price.
const DRINK_SLOT_PREFIX: &str = "drink:";

/// Coupons file
#[derive(Debug, Deserialize)]
pub struct CouponsFixture {
    /// Currency code for every price in the file
    pub currency: String,

    /// Coupons in catalog order
    #[serde(default)]
    pub coupons: Vec<CouponFixture>,
}

/// Coupon fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CouponFixture {
    /// Two units of one item for a flat price
    TwoForOne {
        /// Coupon name
        name: String,

        /// Printed code
        code: String,

        /// Target item
        item: String,

        /// Price in major units
        price: i64,
    },

    /// Fixed bundle for a flat price
    FixedBundle {
        /// Coupon name
        name: String,

        /// Printed code
        code: String,

        /// Price in major units
        price: i64,

        /// Item names, or `drink:<max price>`
        slots: Vec<String>,
    },
}

/// Parse a bundle slot: an item name, or `drink:<max price>` for any drink
/// up to that price.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidBundleSlot`] for an empty slot or a drink
/// slot whose price is not a whole number.
pub fn parse_bundle_slot<'a>(
    slot: &str,
    currency: &'static Currency,
) -> Result<BundleSlot<'a>, FixtureError> {
    let trimmed = slot.trim();

    if trimmed.is_empty() {
        return Err(FixtureError::InvalidBundleSlot(slot.to_string()));
    }

    match trimmed.strip_prefix(DRINK_SLOT_PREFIX) {
        Some(max) => {
            let max = max
                .trim()
                .parse::<i64>()
                .map_err(|_err| FixtureError::InvalidBundleSlot(slot.to_string()))?;

            Ok(BundleSlot::Drink {
                max_price: Money::from_major(max, currency),
            })
        }
        None => Ok(BundleSlot::Item(trimmed.to_string())),
    }
}

impl CouponFixture {
    /// Convert to a [`Coupon`] priced in `currency`
    ///
    /// # Errors
    ///
    /// Returns an error if a bundle slot is invalid.
    pub fn into_coupon<'a>(self, currency: &'static Currency) -> Result<Coupon<'a>, FixtureError> {
        match self {
            CouponFixture::TwoForOne {
                name,
                code,
                item,
                price,
            } => Ok(Coupon::TwoForOne(TwoForOneCoupon {
                name,
                code,
                item,
                price: Money::from_major(price, currency),
            })),
            CouponFixture::FixedBundle {
                name,
                code,
                price,
                slots,
            } => Ok(Coupon::FixedBundle(BundleCoupon {
                name,
                code,
                price: Money::from_major(price, currency),
                slots: slots
                    .iter()
                    .map(|slot| parse_bundle_slot(slot, currency))
                    .collect::<Result<_, _>>()?,
            })),
        }
    }
}

impl CouponsFixture {
    /// Convert every coupon in the file
    ///
    /// # Errors
    ///
    /// Returns an error if any coupon is invalid.
    pub fn into_coupons<'a>(
        self,
        currency: &'static Currency,
    ) -> Result<Vec<Coupon<'a>>, FixtureError> {
        self.coupons
            .into_iter()
            .map(|coupon| coupon.into_coupon(currency))
            .collect()
    }
}
