//! Single-item fallback: every line can always be bought one unit at a time.

use smallvec::smallvec;

use super::{Consumption, Deal, DealContext, Strategy};

/// One deal per order line at its unit price.
pub fn generate<'a>(ctx: &DealContext<'_, 'a>, out: &mut Vec<Deal<'a>>) {
    out.extend(ctx.cart.iter().enumerate().map(|(line, item)| Deal {
        label: format!("{} à la carte", item.name()),
        cost: item.price(),
        consumption: Consumption::from_occurrences([line]),
        steps: smallvec![format!("{} ×1 — {}", item.name(), item.price())],
        extras: None,
        is_upgrade: false,
        strategy: Strategy::Single { line },
    }));
}
