//! Catalogs
//!
//! Read-only inputs to an optimization run: the menu (with combo tiers), the
//! time-limited promotions and the coupon book. Each call borrows them for its
//! whole duration and never mutates them.

use rusty_money::{Money, iso::Currency};

pub mod coupons;
pub mod menu;
pub mod promotions;

pub use coupons::{BundleCoupon, BundleSlot, Coupon, TwoForOneCoupon};
pub use menu::{ComboTier, MenuCatalog, MenuCategory, MenuItem, TierSlot, TierSlotKind};
pub use promotions::{BuyAGetBFreePromotion, GroupItem, PickOnePromotion, Promotion};

/// Every price a catalog set quotes, for currency validation.
pub(crate) fn catalog_prices<'c, 'a>(
    menu: &'c MenuCatalog<'a>,
    promotions: &'c [Promotion<'a>],
    coupons: &'c [Coupon<'a>],
) -> impl Iterator<Item = &'c Money<'a, Currency>> {
    menu.prices()
        .chain(promotions.iter().flat_map(Promotion::prices))
        .chain(coupons.iter().flat_map(Coupon::prices))
}
