//! Upgrades
//!
//! Add-on offers the cover search never produces because they buy items the
//! customer did not order: the missing half of a promotion pair, a second
//! unit for a two-for-one coupon, or the sides of a combo meal.

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::Cart,
    catalog::{
        BuyAGetBFreePromotion, Coupon, MenuCatalog, PickOnePromotion, Promotion, TwoForOneCoupon,
    },
    config::OptimizerConfig,
    deals::{DealContext, combo::combo_label},
    prices::{PriceError, times},
    receipt::{BundleOption, single_step},
};

/// An upgrade offer and the retail value of what it adds, when the menu
/// can price it.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeCandidate<'a> {
    /// The offer as shown to the customer
    pub option: BundleOption<'a>,

    /// What the added items cost bought on their own
    pub retail: Option<Money<'a, Currency>>,
}

impl UpgradeCandidate<'_> {
    /// Whether an offer flagged as an upgrade stays within the premium
    /// threshold over `best_minor` and, when the added items can be priced,
    /// costs no more over `best_minor` than those items would.
    /// Offers not flagged as upgrades are always kept.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the threshold cannot be computed.
    pub fn within_bounds(
        &self,
        best_minor: i64,
        config: &OptimizerConfig,
    ) -> Result<bool, PriceError> {
        if !self.option.is_upgrade {
            return Ok(true);
        }

        let total = self.option.total.to_minor_units();
        let threshold = config.upgrade_threshold_minor(best_minor, self.option.total.currency())?;

        if total > best_minor.saturating_add(threshold) {
            return Ok(false);
        }

        Ok(self
            .retail
            .is_none_or(|retail| total - best_minor <= retail.to_minor_units()))
    }
}

/// Every upgrade offer for the cart, before bounding.
pub fn suggest<'a>(
    ctx: &DealContext<'_, 'a>,
    config: &OptimizerConfig,
) -> Vec<UpgradeCandidate<'a>> {
    let offers = Offers {
        cart: ctx.cart,
        menu: ctx.menu,
        limit: config.suggestion_limit,
    };
    let mut out = Vec::new();

    for promotion in ctx.promotions {
        match promotion {
            Promotion::PickOne(promotion) => offers.pick_one(promotion, &mut out),
            Promotion::BuyAGetBFree(promotion) => offers.buy_a_get_b(promotion, &mut out),
        }
    }

    for coupon in ctx.coupons {
        if let Coupon::TwoForOne(coupon) = coupon {
            offers.second_unit(coupon, &mut out);
        }
    }

    offers.combos(&mut out);

    out
}

#[derive(Clone, Copy)]
struct Offers<'c, 'a> {
    cart: &'c Cart<'a>,
    menu: &'c MenuCatalog<'a>,
    limit: usize,
}

impl<'a> Offers<'_, 'a> {
    fn pick_one(&self, promotion: &PickOnePromotion<'a>, out: &mut Vec<UpgradeCandidate<'a>>) {
        let first_a = self.first_line(|name| promotion.in_group_a(name));
        let first_b = self.first_line(|name| promotion.in_group_b(name));

        match (first_a, first_b) {
            (Some(a), None) => out.extend(self.pick_one_add_drink(promotion, a)),
            (None, Some(b)) => {
                let Some(line) = self.cart.get(b) else {
                    return;
                };

                for item in promotion.group_a_by_price().into_iter().take(self.limit) {
                    let (mut steps, rest) = self.remainder(b, 1);

                    steps.insert(
                        0,
                        format!(
                            "{} ({} + {}) — {}",
                            promotion.name,
                            item.name,
                            line.name(),
                            promotion.price
                        ),
                    );

                    out.push(self.candidate(
                        format!("{} (add {})", promotion.name, item.name),
                        promotion.price.to_minor_units() + rest,
                        steps,
                        item.name.clone(),
                        true,
                        Some(item.price),
                    ));
                }
            }
            _ => {}
        }
    }

    fn pick_one_add_drink(
        &self,
        promotion: &PickOnePromotion<'a>,
        a: usize,
    ) -> Option<UpgradeCandidate<'a>> {
        let line = self.cart.get(a)?;
        let drink = self.menu.cheapest_drink();
        let drink_name = drink.map_or("a small drink", |drink| drink.name.as_str());
        let (mut steps, rest) = self.remainder(a, 1);

        steps.insert(
            0,
            format!(
                "{} ({} + {drink_name}) — {}",
                promotion.name,
                line.name(),
                promotion.price
            ),
        );

        Some(self.candidate(
            format!("{} (add {drink_name})", promotion.name),
            promotion.price.to_minor_units() + rest,
            steps,
            drink_name.to_string(),
            true,
            drink.map(|drink| drink.price),
        ))
    }

    fn buy_a_get_b(
        &self,
        promotion: &BuyAGetBFreePromotion<'a>,
        out: &mut Vec<UpgradeCandidate<'a>>,
    ) {
        let first_a = self.first_line(|name| promotion.in_group_a(name));
        let first_b = self.first_line(|name| promotion.in_group_b(name));
        let naive = self.cart.subtotal().to_minor_units();

        match (first_a, first_b) {
            (Some(a), None) => {
                let Some(line) = self.cart.get(a) else {
                    return;
                };

                for item in promotion.group_b.iter().take(self.limit) {
                    let mut steps = vec![format!(
                        "{}: buy {} get {} free",
                        promotion.name,
                        line.name(),
                        item.name
                    )];
                    steps.extend(
                        self.cart
                            .iter()
                            .map(|line| single_step(line, line.quantity())),
                    );

                    out.push(self.candidate(
                        format!("{} (free {})", promotion.name, item.name),
                        naive,
                        steps,
                        item.name.clone(),
                        true,
                        Some(item.price),
                    ));
                }
            }
            (None, Some(b)) => {
                let Some(line) = self.cart.get(b) else {
                    return;
                };

                for item in promotion.group_a_by_price().into_iter().take(self.limit) {
                    let (mut steps, rest) = self.remainder(b, 1);
                    let total = item.price.to_minor_units() + rest;

                    steps.insert(
                        0,
                        format!(
                            "{}: buy {} ({}) get {} free",
                            promotion.name,
                            item.name,
                            item.price,
                            line.name()
                        ),
                    );

                    out.push(self.candidate(
                        format!(
                            "{} (buy {} get {} free)",
                            promotion.name,
                            item.name,
                            line.name()
                        ),
                        total,
                        steps,
                        item.name.clone(),
                        total > naive,
                        Some(item.price),
                    ));
                }
            }
            _ => {}
        }
    }

    fn second_unit(&self, coupon: &TwoForOneCoupon<'a>, out: &mut Vec<UpgradeCandidate<'a>>) {
        let targeted = self
            .cart
            .iter()
            .enumerate()
            .filter(|(_, line)| line.quantity() == 1 && coupon.targets(line.name()));

        for (idx, line) in targeted {
            let (mut steps, rest) = self.remainder(idx, 1);
            let label = coupon.label();

            steps.insert(0, format!("{label} — {}", coupon.price));

            out.push(self.candidate(
                label,
                coupon.price.to_minor_units() + rest,
                steps,
                format!("{} ×1", line.name()),
                true,
                Some(line.price()),
            ));
        }
    }

    fn combos(&self, out: &mut Vec<UpgradeCandidate<'a>>) {
        for (main, line) in self.cart.iter().enumerate() {
            for (code, price) in line.combos() {
                let Some(tier) = self.menu.tier(code) else {
                    continue;
                };

                let missing: Vec<_> = tier
                    .slots
                    .iter()
                    .filter(|slot| {
                        !self
                            .cart
                            .iter()
                            .enumerate()
                            .any(|(idx, other)| idx != main && slot.accepts(other.name()))
                    })
                    .collect();

                if missing.is_empty() {
                    continue;
                }

                let retail = missing
                    .iter()
                    .map(|slot| {
                        slot.retail_price(self.menu)
                            .map(|price| price.to_minor_units())
                    })
                    .sum::<Option<i64>>()
                    .map(|minor| Money::from_minor(minor, self.cart.currency()));

                let extras = missing
                    .iter()
                    .map(|slot| slot.description.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");

                let includes = tier
                    .slots
                    .iter()
                    .map(|slot| slot.description.as_str())
                    .collect::<Vec<_>>()
                    .join(" + ");

                let label = combo_label(line.name(), code);
                let (mut steps, rest) = self.remainder(main, 1);

                steps.insert(0, format!("{label} — {price} (includes {includes})"));

                let mut candidate = self.candidate(
                    label,
                    price.to_minor_units() + rest,
                    steps,
                    extras,
                    true,
                    None,
                );
                candidate.retail = retail;

                out.push(candidate);
            }
        }
    }

    /// First line whose name satisfies `pred`.
    fn first_line(&self, pred: impl Fn(&str) -> bool) -> Option<usize> {
        self.cart.iter().position(|line| pred(line.name()))
    }

    /// Steps and cost of buying everything on its own, except `taken` units
    /// of line `skip`.
    fn remainder(&self, skip: usize, taken: u32) -> (Vec<String>, i64) {
        let mut steps = Vec::new();
        let mut total = 0;

        for (idx, line) in self.cart.iter().enumerate() {
            let count = if idx == skip {
                line.quantity().saturating_sub(taken)
            } else {
                line.quantity()
            };

            if count > 0 {
                steps.push(single_step(line, count));
                total += times(line.price(), count).to_minor_units();
            }
        }

        (steps, total)
    }

    fn candidate(
        &self,
        label: String,
        total_minor: i64,
        steps: Vec<String>,
        extras: String,
        is_upgrade: bool,
        retail: Option<Money<'a, Currency>>,
    ) -> UpgradeCandidate<'a> {
        UpgradeCandidate {
            option: BundleOption {
                label,
                total: Money::from_minor(total_minor, self.cart.currency()),
                steps,
                extras: Some(extras),
                is_upgrade,
                needs_split: false,
            },
            retail,
        }
    }
}
