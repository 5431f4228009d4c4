//! Two-for-one coupons

use smallvec::smallvec;

use crate::catalog::Coupon;

use super::{Consumption, Deal, DealContext, Strategy};

/// For every two-for-one coupon and every line it targets with at least two
/// units ordered, one deal covering two of those units at the coupon price.
pub fn generate<'a>(ctx: &DealContext<'_, 'a>, out: &mut Vec<Deal<'a>>) {
    let coupons = ctx.coupons.iter().filter_map(|coupon| match coupon {
        Coupon::TwoForOne(coupon) => Some(coupon),
        Coupon::FixedBundle(_) => None,
    });

    for coupon in coupons {
        for (line, item) in ctx.cart.iter().enumerate() {
            if item.quantity() < 2 || !coupon.targets(item.name()) {
                continue;
            }

            let label = coupon.label();

            out.push(Deal {
                steps: smallvec![format!("{label} ×1 — {}", coupon.price)],
                label,
                cost: coupon.price,
                consumption: Consumption::from_occurrences([line, line]),
                extras: None,
                is_upgrade: false,
                strategy: Strategy::TwoForOne,
            });
        }
    }
}
