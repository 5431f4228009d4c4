//! Pick-one-from-two-groups promotions

use smallvec::smallvec;

use crate::catalog::Promotion;

use super::{Consumption, Deal, DealContext, Strategy};

/// One deal per ordered pair of distinct lines where the first is in group A
/// and the second is in group B (or is any drink). The search decides how many
/// pairs to use.
pub fn generate<'a>(ctx: &DealContext<'_, 'a>, out: &mut Vec<Deal<'a>>) {
    let promotions = ctx.promotions.iter().filter_map(|promotion| match promotion {
        Promotion::PickOne(promotion) => Some(promotion),
        Promotion::BuyAGetBFree(_) => None,
    });

    for promotion in promotions {
        let lines = || ctx.cart.iter().enumerate();

        for (a, a_item) in lines().filter(|(_, item)| promotion.in_group_a(item.name())) {
            let partners =
                lines().filter(|(b, item)| *b != a && promotion.in_group_b(item.name()));

            for (b, b_item) in partners {
                out.push(Deal {
                    label: promotion.name.clone(),
                    cost: promotion.price,
                    consumption: Consumption::from_occurrences([a, b]),
                    steps: smallvec![format!(
                        "{} ({} + {}) — {}",
                        promotion.name,
                        a_item.name(),
                        b_item.name(),
                        promotion.price
                    )],
                    extras: None,
                    is_upgrade: false,
                    strategy: Strategy::PickOne,
                });
            }
        }
    }
}
