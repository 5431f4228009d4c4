//! Deals
//!
//! A deal is any priced way of buying one or more ordered units: a plain
//! purchase, a coupon, a promotion pairing or a combo meal. Deals are plain
//! values recomputed on every run; the cover search only looks at their cost
//! and the units they consume.

use rusty_money::{Money, iso::Currency};
use smallvec::{SmallVec, smallvec};
use tracing::debug;

use crate::{
    cart::Cart,
    catalog::{Coupon, MenuCatalog, Promotion},
};

pub mod buy_a_get_b;
pub mod bundle;
pub mod combo;
pub mod pick_one;
pub mod single;
pub mod slots;
pub mod two_for_one;

#[cfg(test)]
pub(crate) mod test_support;

/// Which rule produced a deal, with the lines a summary needs to read back.
/// [`DealFamily`] is the data-free generator key for the same rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One unit of one line at its unit price
    Single {
        /// Line bought
        line: usize,
    },

    /// Two-for-one coupon
    TwoForOne,

    /// Fixed bundle coupon
    FixedBundle,

    /// Pick-one-from-two-groups promotion
    PickOne,

    /// Buy-A-get-B-free promotion
    BuyAGetBFree {
        /// Line paid for
        a: usize,

        /// Line given away
        b: usize,
    },

    /// Combo meal tier
    ComboTier,
}

impl Strategy {
    /// Whether this is the plain single-unit purchase.
    pub fn is_single(&self) -> bool {
        matches!(self, Strategy::Single { .. })
    }

    /// The family whose generator produces deals tagged with this strategy.
    pub fn family(&self) -> DealFamily {
        match self {
            Strategy::Single { .. } => DealFamily::Single,
            Strategy::TwoForOne => DealFamily::TwoForOne,
            Strategy::FixedBundle => DealFamily::FixedBundle,
            Strategy::PickOne => DealFamily::PickOne,
            Strategy::BuyAGetBFree { .. } => DealFamily::BuyAGetBFree,
            Strategy::ComboTier => DealFamily::ComboTier,
        }
    }
}

/// Multiset of order-line occurrences consumed by a deal, as `(line, count)`
/// pairs in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Consumption {
    counts: SmallVec<[(usize, u32); 4]>,
}

impl Consumption {
    /// Build from a list of consumed occurrences; repeated lines accumulate.
    pub fn from_occurrences(lines: impl IntoIterator<Item = usize>) -> Self {
        let mut counts: SmallVec<[(usize, u32); 4]> = smallvec![];

        for line in lines {
            match counts.iter_mut().find(|(existing, _)| *existing == line) {
                Some((_, count)) => *count += 1,
                None => counts.push((line, 1)),
            }
        }

        Self { counts }
    }

    /// `(line, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.counts.iter().copied()
    }

    /// Distinct lines consumed.
    pub fn lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.counts.iter().map(|(line, _)| *line)
    }

    /// Occurrences consumed from `line`.
    pub fn count(&self, line: usize) -> u32 {
        self.counts
            .iter()
            .find(|(existing, _)| *existing == line)
            .map_or(0, |(_, count)| *count)
    }

    /// Total occurrences consumed.
    pub fn occurrences(&self) -> u32 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Whether every consumed occurrence is still available.
    pub fn fits(&self, remaining: &[u32]) -> bool {
        self.counts
            .iter()
            .all(|(line, count)| remaining.get(*line).is_some_and(|left| left >= count))
    }

    /// Remove the consumed occurrences. Callers check [`Self::fits`] first.
    pub(crate) fn take(&self, remaining: &mut [u32]) {
        for (line, count) in &self.counts {
            if let Some(left) = remaining.get_mut(*line) {
                *left -= count;
            }
        }
    }

    /// Return occurrences removed by [`Self::take`].
    pub(crate) fn give_back(&self, remaining: &mut [u32]) {
        for (line, count) in &self.counts {
            if let Some(left) = remaining.get_mut(*line) {
                *left += count;
            }
        }
    }
}

/// A priced rule instance applicable to the current cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Deal<'a> {
    /// Label used when summarizing a cover
    pub label: String,

    /// Cost of one application
    pub cost: Money<'a, Currency>,

    /// Order-line occurrences consumed by one application
    pub consumption: Consumption,

    /// Human-readable steps, in order
    pub steps: SmallVec<[String; 2]>,

    /// Items granted that were not ordered
    pub extras: Option<String>,

    /// Whether applying this deal adds unordered items
    pub is_upgrade: bool,

    /// Rule that produced the deal
    pub strategy: Strategy,
}

/// Everything a deal family may read.
#[derive(Debug, Clone, Copy)]
pub struct DealContext<'c, 'a> {
    /// The cart being covered
    pub cart: &'c Cart<'a>,

    /// Menu and combo tiers
    pub menu: &'c MenuCatalog<'a>,

    /// Promotions
    pub promotions: &'c [Promotion<'a>],

    /// Coupons
    pub coupons: &'c [Coupon<'a>],
}

/// Independent rule families that produce deals, run in [`DealFamily::ALL`]
/// order. Each deal records its own [`Strategy`]; [`Strategy::family`] maps it
/// back here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealFamily {
    /// One deal per line at its unit price
    Single,

    /// Two-for-one coupons
    TwoForOne,

    /// Fixed bundle coupons
    FixedBundle,

    /// Pick-one-from-two-groups promotions
    PickOne,

    /// Buy-A-get-B-free promotions
    BuyAGetBFree,

    /// Combo meal tiers
    ComboTier,
}

impl DealFamily {
    /// Every family, in generation order.
    pub const ALL: [DealFamily; 6] = [
        DealFamily::Single,
        DealFamily::TwoForOne,
        DealFamily::FixedBundle,
        DealFamily::PickOne,
        DealFamily::BuyAGetBFree,
        DealFamily::ComboTier,
    ];

    /// Append every deal of this family that applies to the cart.
    pub fn generate<'a>(self, ctx: &DealContext<'_, 'a>, out: &mut Vec<Deal<'a>>) {
        match self {
            DealFamily::Single => single::generate(ctx, out),
            DealFamily::TwoForOne => two_for_one::generate(ctx, out),
            DealFamily::FixedBundle => bundle::generate(ctx, out),
            DealFamily::PickOne => pick_one::generate(ctx, out),
            DealFamily::BuyAGetBFree => buy_a_get_b::generate(ctx, out),
            DealFamily::ComboTier => combo::generate(ctx, out),
        }
    }
}

/// All deals for one cart, indexed by the lines they consume.
#[derive(Debug, Clone)]
pub struct DealCatalog<'a> {
    deals: Vec<Deal<'a>>,
    by_line: Vec<SmallVec<[usize; 8]>>,
}

impl<'a> DealCatalog<'a> {
    /// Run every deal family against the cart.
    pub fn build(ctx: &DealContext<'_, 'a>) -> Self {
        let mut deals = Vec::new();

        for family in DealFamily::ALL {
            let before = deals.len();
            family.generate(ctx, &mut deals);
            debug_assert!(
                deals
                    .iter()
                    .skip(before)
                    .all(|deal| deal.strategy.family() == family)
            );
            debug!(?family, count = deals.len() - before, "generated deals");
        }

        Self::from_deals(deals, ctx.cart.len())
    }

    /// Index an explicit list of deals for a cart with `line_count` lines.
    pub fn from_deals(deals: Vec<Deal<'a>>, line_count: usize) -> Self {
        let mut by_line: Vec<SmallVec<[usize; 8]>> = vec![SmallVec::new(); line_count];

        for (idx, deal) in deals.iter().enumerate() {
            for line in deal.consumption.lines() {
                if let Some(entry) = by_line.get_mut(line) {
                    entry.push(idx);
                }
            }
        }

        Self { deals, by_line }
    }

    /// Deal by index.
    pub fn get(&self, idx: usize) -> Option<&Deal<'a>> {
        self.deals.get(idx)
    }

    /// All deals in generation order.
    pub fn deals(&self) -> &[Deal<'a>] {
        &self.deals
    }

    /// Indexes of the deals that consume at least one occurrence of `line`.
    pub fn consuming(&self, line: usize) -> &[usize] {
        self.by_line
            .get(line)
            .map(|deals| deals.as_slice())
            .unwrap_or_default()
    }

    /// Index of the single-unit deal for `line`.
    pub fn single_for(&self, line: usize) -> Option<usize> {
        self.consuming(line).iter().copied().find(|idx| {
            self.deals
                .get(*idx)
                .is_some_and(|deal| deal.strategy == Strategy::Single { line })
        })
    }

    /// Number of lines the catalog was indexed for.
    pub fn line_count(&self) -> usize {
        self.by_line.len()
    }

    /// Number of deals.
    pub fn len(&self) -> usize {
        self.deals.len()
    }

    /// Check if there are no deals.
    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::TWD;
    use testresult::TestResult;

    use crate::fixtures::Fixture;

    use super::*;

    #[test]
    fn generated_deals_map_back_to_their_family() -> TestResult {
        let fixture = Fixture::from_set("mcdonalds")?;

        for named in fixture.carts() {
            let ctx = DealContext {
                cart: &named.cart,
                menu: fixture.menu(),
                promotions: fixture.promotions(),
                coupons: fixture.coupons(),
            };

            for family in DealFamily::ALL {
                let mut deals = Vec::new();
                family.generate(&ctx, &mut deals);

                assert!(
                    deals.iter().all(|deal| deal.strategy.family() == family),
                    "{}: {family:?} produced a foreign deal",
                    named.name
                );
            }
        }

        Ok(())
    }

    #[test]
    fn consumption_accumulates_repeated_lines() {
        let consumption = Consumption::from_occurrences([2, 0, 2]);

        assert_eq!(consumption.iter().collect::<Vec<_>>(), vec![(2, 2), (0, 1)]);
        assert_eq!(consumption.count(2), 2);
        assert_eq!(consumption.count(1), 0);
        assert_eq!(consumption.occurrences(), 3);
    }

    #[test]
    fn consumption_fits_take_and_give_back() {
        let consumption = Consumption::from_occurrences([0, 0, 1]);
        let mut remaining = vec![2, 1];

        assert!(consumption.fits(&remaining));

        consumption.take(&mut remaining);
        assert_eq!(remaining, vec![0, 0]);
        assert!(!consumption.fits(&remaining));

        consumption.give_back(&mut remaining);
        assert_eq!(remaining, vec![2, 1]);
    }

    #[test]
    fn consumption_does_not_fit_unknown_line() {
        let consumption = Consumption::from_occurrences([3]);

        assert!(!consumption.fits(&[1, 1]));
    }

    #[test]
    fn catalog_indexes_each_line_once_per_deal() {
        let deal = |occurrences: &[usize], strategy| Deal {
            label: String::new(),
            cost: Money::from_major(10, TWD),
            consumption: Consumption::from_occurrences(occurrences.iter().copied()),
            steps: SmallVec::new(),
            extras: None,
            is_upgrade: false,
            strategy,
        };

        let catalog = DealCatalog::from_deals(
            vec![
                deal(&[0], Strategy::Single { line: 0 }),
                deal(&[1], Strategy::Single { line: 1 }),
                deal(&[0, 0], Strategy::TwoForOne),
                deal(&[0, 1], Strategy::PickOne),
            ],
            2,
        );

        assert_eq!(catalog.consuming(0), &[0, 2, 3]);
        assert_eq!(catalog.consuming(1), &[1, 3]);
        assert_eq!(catalog.consuming(5), &[] as &[usize]);
        assert_eq!(catalog.single_for(1), Some(1));
        assert_eq!(catalog.len(), 4);
    }
}
