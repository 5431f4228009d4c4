//! Shared helpers for deal family tests.

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::Cart,
    catalog::{Coupon, MenuCatalog, Promotion},
};

use super::{Deal, DealContext};

pub(crate) type Generator<'a> = fn(&DealContext<'_, 'a>, &mut Vec<Deal<'a>>);

pub(crate) fn twd(major: i64) -> Money<'static, Currency> {
    Money::from_major(major, rusty_money::iso::TWD)
}

pub(crate) fn run<'a>(
    generate: Generator<'a>,
    cart: &Cart<'a>,
    menu: &MenuCatalog<'a>,
    promotions: &[Promotion<'a>],
    coupons: &[Coupon<'a>],
) -> Vec<Deal<'a>> {
    let ctx = DealContext {
        cart,
        menu,
        promotions,
        coupons,
    };

    let mut deals = Vec::new();
    generate(&ctx, &mut deals);
    deals
}

pub(crate) fn consumed(deal: &Deal<'_>) -> Vec<(usize, u32)> {
    deal.consumption.iter().collect()
}
