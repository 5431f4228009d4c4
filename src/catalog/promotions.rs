//! Promotions Catalog
//!
//! Time-limited promotions built from two item groups.

use rusty_money::{Money, iso::Currency};

use crate::names::{self, is_drink, matches_any_in_group};

/// A priced member of a promotion group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupItem<'a> {
    /// Item name as written in the promotion
    pub name: String,

    /// Price of the item under this promotion
    pub price: Money<'a, Currency>,
}

impl<'a> GroupItem<'a> {
    /// Create a group item.
    pub fn new(name: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Pick one item from group A and one from group B (or any drink) for a flat price.
#[derive(Debug, Clone, PartialEq)]
pub struct PickOnePromotion<'a> {
    /// Promotion name
    pub name: String,

    /// Group A items
    pub group_a: Vec<GroupItem<'a>>,

    /// Priced group B items
    pub group_b: Vec<GroupItem<'a>>,

    /// Group B items listed by name only
    pub group_b_names: Vec<String>,

    /// Flat price for the pair
    pub price: Money<'a, Currency>,
}

impl<'a> PickOnePromotion<'a> {
    /// Whether an ordered item belongs to group A.
    pub fn in_group_a(&self, name: &str) -> bool {
        self.group_a.iter().any(|item| names::matches(name, &item.name))
    }

    /// Whether an ordered item can be the group B pick. Any drink qualifies.
    pub fn in_group_b(&self, name: &str) -> bool {
        self.group_b.iter().any(|item| names::matches(name, &item.name))
            || matches_any_in_group(name, &self.group_b_names)
            || is_drink(name)
    }

    /// Group A items, cheapest first; ties keep catalog order.
    pub fn group_a_by_price(&self) -> Vec<&GroupItem<'a>> {
        by_price(&self.group_a)
    }
}

/// Buy an item from group A and get an item from group B free.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyAGetBFreePromotion<'a> {
    /// Promotion name
    pub name: String,

    /// Items that must be bought
    pub group_a: Vec<GroupItem<'a>>,

    /// Items given away
    pub group_b: Vec<GroupItem<'a>>,
}

impl<'a> BuyAGetBFreePromotion<'a> {
    /// Whether an ordered item belongs to group A.
    pub fn in_group_a(&self, name: &str) -> bool {
        self.group_a.iter().any(|item| names::matches(name, &item.name))
    }

    /// Whether an ordered item belongs to group B.
    pub fn in_group_b(&self, name: &str) -> bool {
        self.group_b.iter().any(|item| names::matches(name, &item.name))
    }

    /// The group A entry an ordered small drink could be upgraded to.
    pub fn medium_upgrade(&self, name: &str) -> Option<&GroupItem<'a>> {
        let medium = names::medium_variant(name)?;

        self.group_a
            .iter()
            .find(|item| names::matches(&medium, &item.name))
    }

    /// Group A items, cheapest first; ties keep catalog order.
    pub fn group_a_by_price(&self) -> Vec<&GroupItem<'a>> {
        by_price(&self.group_a)
    }
}

/// Promotion enum
#[derive(Debug, Clone, PartialEq)]
pub enum Promotion<'a> {
    /// Pick one from each of two groups at a flat price
    PickOne(PickOnePromotion<'a>),

    /// Buy from group A, get group B free
    BuyAGetBFree(BuyAGetBFreePromotion<'a>),
}

impl<'a> Promotion<'a> {
    /// Promotion name.
    pub fn name(&self) -> &str {
        match self {
            Promotion::PickOne(promotion) => &promotion.name,
            Promotion::BuyAGetBFree(promotion) => &promotion.name,
        }
    }

    /// Every price this promotion quotes.
    pub(crate) fn prices(&self) -> impl Iterator<Item = &Money<'a, Currency>> {
        let (flat, groups) = match self {
            Promotion::PickOne(promotion) => (
                Some(&promotion.price),
                [promotion.group_a.as_slice(), promotion.group_b.as_slice()],
            ),
            Promotion::BuyAGetBFree(promotion) => (
                None,
                [promotion.group_a.as_slice(), promotion.group_b.as_slice()],
            ),
        };

        flat.into_iter().chain(
            groups
                .into_iter()
                .flat_map(|group| group.iter().map(|item| &item.price)),
        )
    }
}

fn by_price<'c, 'a>(items: &'c [GroupItem<'a>]) -> Vec<&'c GroupItem<'a>> {
    let mut sorted: Vec<_> = items.iter().collect();
    sorted.sort_by_key(|item| item.price.to_minor_units());
    sorted
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::TWD;

    use super::*;

    fn pick_one<'a>() -> PickOnePromotion<'a> {
        PickOnePromotion {
            name: "1+1=50".to_string(),
            group_a: vec![
                GroupItem::new("吉事漢堡", Money::from_major(50, TWD)),
                GroupItem::new("麥香魚", Money::from_major(49, TWD)),
            ],
            group_b: vec![GroupItem::new("蘋果派", Money::from_major(35, TWD))],
            group_b_names: vec!["小薯".to_string()],
            price: Money::from_major(50, TWD),
        }
    }

    fn buy_a_get_b<'a>() -> BuyAGetBFreePromotion<'a> {
        BuyAGetBFreePromotion {
            name: "甜心卡".to_string(),
            group_a: vec![
                GroupItem::new("雪碧(中)", Money::from_major(38, TWD)),
                GroupItem::new("大麥克", Money::from_major(75, TWD)),
            ],
            group_b: vec![GroupItem::new("麥香雞", Money::from_major(48, TWD))],
        }
    }

    #[test]
    fn pick_one_group_b_accepts_any_drink() {
        let promotion = pick_one();

        assert!(promotion.in_group_a("麥香魚"));
        assert!(promotion.in_group_b("蘋果派"));
        assert!(promotion.in_group_b("小薯"));
        assert!(promotion.in_group_b("可樂(小)"));
        assert!(!promotion.in_group_b("大麥克"));
    }

    #[test]
    fn group_a_by_price_sorts_cheapest_first() {
        let promotion = pick_one();

        let names: Vec<_> = promotion
            .group_a_by_price()
            .into_iter()
            .map(|item| item.name.as_str())
            .collect();

        assert_eq!(names, vec!["麥香魚", "吉事漢堡"]);
    }

    #[test]
    fn medium_upgrade_finds_group_a_variant() {
        let promotion = buy_a_get_b();

        let upgrade = promotion.medium_upgrade("雪碧(小)").map(|item| item.name.as_str());

        assert_eq!(upgrade, Some("雪碧(中)"));
        assert!(promotion.medium_upgrade("大麥克").is_none());
        assert!(promotion.medium_upgrade("紅茶(小)").is_none());
    }

    #[test]
    fn prices_include_flat_price_and_groups() {
        let pick = Promotion::PickOne(pick_one());
        let bogo = Promotion::BuyAGetBFree(buy_a_get_b());

        assert_eq!(pick.prices().count(), 4);
        assert_eq!(bogo.prices().count(), 3);
        assert_eq!(bogo.name(), "甜心卡");
    }
}
