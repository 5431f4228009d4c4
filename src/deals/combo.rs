//! Combo meal tiers

use smallvec::smallvec;

use super::{Consumption, Deal, DealContext, Strategy, slots};

/// Fewest ordered units a combo must absorb: the main item and one side.
pub const MIN_OCCURRENCES: u32 = 2;

/// Label shared by combo deals and combo upgrade suggestions.
pub fn combo_label(main: &str, code: &str) -> String {
    format!("{main} {code} combo")
}

/// For every line with a tier mapping and every tier the menu defines, fill
/// the tier's side slots from the other lines. Unmatched slots are granted as
/// extras, which marks the deal as an upgrade.
pub fn generate<'a>(ctx: &DealContext<'_, 'a>, out: &mut Vec<Deal<'a>>) {
    for (main, item) in ctx.cart.iter().enumerate() {
        for (code, price) in item.combos() {
            let Some(tier) = ctx.menu.tier(code) else {
                continue;
            };

            let fill = slots::fill(&tier.slots, ctx.cart, Some(main), |slot, line| {
                slot.accepts(line.name())
            });

            let sides = fill.matched.iter().copied();
            let consumption = Consumption::from_occurrences(std::iter::once(main).chain(sides));

            if consumption.occurrences() < MIN_OCCURRENCES {
                continue;
            }

            let extras = (!fill.unmatched.is_empty()).then(|| {
                fill.unmatched
                    .iter()
                    .map(|slot| slot.description.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            });

            let includes = tier
                .slots
                .iter()
                .map(|slot| slot.description.as_str())
                .collect::<Vec<_>>()
                .join(" + ");

            let label = combo_label(item.name(), code);

            out.push(Deal {
                steps: smallvec![format!("{label} — {price} (includes {includes})")],
                label,
                cost: *price,
                consumption,
                is_upgrade: extras.is_some(),
                extras,
                strategy: Strategy::ComboTier,
            });
        }
    }
}
