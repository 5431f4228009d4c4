//! Buy-A-get-B-free promotions
//!
//! Each deal pays for one group A line and takes one group B line free. A line
//! in both groups may pair with itself when at least two units are ordered.
//! An ordered small drink whose medium size is in group A can also be paid at
//! the medium price and paired, modelling an upgrade at the counter.

use rusty_money::{Money, iso::Currency};
use smallvec::smallvec;

use crate::{
    cart::OrderLine,
    catalog::{BuyAGetBFreePromotion, Promotion},
};

use super::{Consumption, Deal, DealContext, Strategy};

/// Generate every pairing for every buy-A-get-B-free promotion.
pub fn generate<'a>(ctx: &DealContext<'_, 'a>, out: &mut Vec<Deal<'a>>) {
    let promotions = ctx.promotions.iter().filter_map(|promotion| match promotion {
        Promotion::BuyAGetBFree(promotion) => Some(promotion),
        Promotion::PickOne(_) => None,
    });

    for promotion in promotions {
        direct_pairs(ctx, promotion, out);
        upgraded_pairs(ctx, promotion, out);
    }
}

fn direct_pairs<'a>(
    ctx: &DealContext<'_, 'a>,
    promotion: &BuyAGetBFreePromotion<'a>,
    out: &mut Vec<Deal<'a>>,
) {
    for (a, a_item) in ctx.cart.iter().enumerate() {
        if !promotion.in_group_a(a_item.name()) {
            continue;
        }

        let paid = format!("{} — {} ({} group A)", a_item.name(), a_item.price(), promotion.name);

        for (b, b_item) in ctx.cart.iter().enumerate() {
            if b != a && promotion.in_group_b(b_item.name()) {
                out.push(pair(promotion, a, b, a_item.price(), paid.clone(), b_item));
            }
        }

        if promotion.in_group_b(a_item.name()) && a_item.quantity() >= 2 {
            out.push(pair(promotion, a, a, a_item.price(), paid, a_item));
        }
    }
}

fn upgraded_pairs<'a>(
    ctx: &DealContext<'_, 'a>,
    promotion: &BuyAGetBFreePromotion<'a>,
    out: &mut Vec<Deal<'a>>,
) {
    for (a, small) in ctx.cart.iter().enumerate() {
        if promotion.in_group_a(small.name()) {
            continue;
        }

        let Some(medium) = promotion.medium_upgrade(small.name()) else {
            continue;
        };

        let paid = format!(
            "{} — {} ({} group A, upgraded from {})",
            medium.name,
            medium.price,
            promotion.name,
            small.name()
        );

        for (b, b_item) in ctx.cart.iter().enumerate() {
            if b != a && promotion.in_group_b(b_item.name()) {
                out.push(pair(promotion, a, b, medium.price, paid.clone(), b_item));
            }
        }

        if promotion.in_group_b(&medium.name) && small.quantity() >= 2 {
            let mut deal = pair(promotion, a, a, medium.price, paid, small);

            if let Some(free) = deal.steps.last_mut() {
                *free = format!(
                    "{} — free ({}, upgraded from {})",
                    medium.name,
                    promotion.name,
                    small.name()
                );
            }

            out.push(deal);
        }
    }
}

fn pair<'a>(
    promotion: &BuyAGetBFreePromotion<'a>,
    a: usize,
    b: usize,
    cost: Money<'a, Currency>,
    paid: String,
    free: &OrderLine<'_>,
) -> Deal<'a> {
    Deal {
        label: promotion.name.clone(),
        cost,
        consumption: Consumption::from_occurrences([a, b]),
        steps: smallvec![paid, format!("{} — free ({})", free.name(), promotion.name)],
        extras: None,
        is_upgrade: false,
        strategy: Strategy::BuyAGetBFree { a, b },
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::TWD;
    use testresult::TestResult;

    use crate::{
        cart::{Cart, OrderLine},
        catalog::{GroupItem, MenuCatalog},
        deals::test_support::{consumed, run, twd},
    };

    use super::*;

    fn promotion<'a>() -> Promotion<'a> {
        Promotion::BuyAGetBFree(BuyAGetBFreePromotion {
            name: "甜心卡".to_string(),
            group_a: vec![
                GroupItem::new("大麥克", twd(75)),
                GroupItem::new("雪碧(中)", twd(38)),
                GroupItem::new("蘋果派", twd(35)),
            ],
            group_b: vec![
                GroupItem::new("麥香雞", twd(48)),
                GroupItem::new("蘋果派", twd(35)),
            ],
        })
    }

    #[test]
    fn pays_a_and_frees_b() -> TestResult {
        let cart = Cart::with_lines(
            [
                OrderLine::new("大麥克", twd(75), 1),
                OrderLine::new("麥香雞", twd(48), 1),
            ],
            TWD,
        )?;

        let deals = run(generate, &cart, &MenuCatalog::default(), &[promotion()], &[]);

        assert_eq!(deals.len(), 1);
        let deal = deals.first().ok_or("expected a pairing")?;
        assert_eq!(deal.cost, twd(75));
        assert_eq!(consumed(deal), vec![(0, 1), (1, 1)]);
        assert_eq!(deal.strategy, Strategy::BuyAGetBFree { a: 0, b: 1 });
        assert_eq!(deal.steps.len(), 2);

        Ok(())
    }

    #[test]
    fn line_in_both_groups_pairs_with_itself() -> TestResult {
        let cart = Cart::with_lines([OrderLine::new("蘋果派", twd(35), 2)], TWD)?;

        let deals = run(generate, &cart, &MenuCatalog::default(), &[promotion()], &[]);

        assert_eq!(deals.len(), 1);
        let deal = deals.first().ok_or("expected a self pairing")?;
        assert_eq!(consumed(deal), vec![(0, 2)]);
        assert_eq!(deal.strategy, Strategy::BuyAGetBFree { a: 0, b: 0 });

        Ok(())
    }

    #[test]
    fn self_pairing_needs_two_units() -> TestResult {
        let cart = Cart::with_lines([OrderLine::new("蘋果派", twd(35), 1)], TWD)?;

        let deals = run(generate, &cart, &MenuCatalog::default(), &[promotion()], &[]);

        assert!(deals.is_empty());

        Ok(())
    }

    #[test]
    fn small_drink_upgrades_to_medium_price() -> TestResult {
        let cart = Cart::with_lines(
            [
                OrderLine::new("雪碧(小)", twd(33), 1),
                OrderLine::new("麥香雞", twd(48), 1),
            ],
            TWD,
        )?;

        let deals = run(generate, &cart, &MenuCatalog::default(), &[promotion()], &[]);

        assert_eq!(deals.len(), 1);
        let deal = deals.first().ok_or("expected an upgraded pairing")?;
        assert_eq!(deal.cost, twd(38));
        assert_eq!(consumed(deal), vec![(0, 1), (1, 1)]);

        Ok(())
    }
}
