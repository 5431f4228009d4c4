//! Fixed bundle coupons

use smallvec::smallvec;

use crate::catalog::Coupon;

use super::{Consumption, Deal, DealContext, Strategy, slots};

/// Fewest slots an order must fill before a bundle is worth offering.
pub const MIN_MATCHED_SLOTS: usize = 2;

/// Fill each bundle's slots from the cart; bundles matching fewer than
/// [`MIN_MATCHED_SLOTS`] slots are discarded. The price is fixed however many
/// slots matched, and unmatched slots become extras.
pub fn generate<'a>(ctx: &DealContext<'_, 'a>, out: &mut Vec<Deal<'a>>) {
    let coupons = ctx.coupons.iter().filter_map(|coupon| match coupon {
        Coupon::FixedBundle(coupon) => Some(coupon),
        Coupon::TwoForOne(_) => None,
    });

    for coupon in coupons {
        let fill = slots::fill(&coupon.slots, ctx.cart, None, |slot, line| {
            slot.accepts(line.name(), &line.price())
        });

        if fill.matched_count() < MIN_MATCHED_SLOTS {
            continue;
        }

        let covered = fill
            .matched
            .iter()
            .filter_map(|line| ctx.cart.get(*line))
            .map(|line| line.name())
            .collect::<Vec<_>>()
            .join(" + ");

        let extras = (!fill.unmatched.is_empty()).then(|| {
            fill.unmatched
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        });

        let label = coupon.label();

        out.push(Deal {
            steps: smallvec![format!("{label} — {} (covers {covered})", coupon.price)],
            label,
            cost: coupon.price,
            consumption: Consumption::from_occurrences(fill.matched.iter().copied()),
            extras,
            is_upgrade: false,
            strategy: Strategy::FixedBundle,
        });
    }
}
