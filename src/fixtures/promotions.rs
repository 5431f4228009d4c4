//! Promotion Fixtures

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::catalog::{BuyAGetBFreePromotion, GroupItem, PickOnePromotion, Promotion};

/// Promotions file
#[derive(Debug, Deserialize)]
pub struct PromotionsFixture {
    /// Currency code for every price in the file
    pub currency: String,

    /// Promotions in catalog order
    #[serde(default)]
    pub promotions: Vec<PromotionFixture>,
}

/// Priced group member
#[derive(Debug, Deserialize)]
pub struct GroupItemFixture {
    /// Item name
    pub name: String,

    /// Price in major units
    pub price: i64,
}

/// Promotion fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionFixture {
    /// Pick one from each group for a flat price
    PickOne {
        /// Promotion name
        name: String,

        /// Flat price in major units
        price: i64,

        /// Group A
        #[serde(default)]
        group_a: Vec<GroupItemFixture>,

        /// Priced group B entries
        #[serde(default)]
        group_b: Vec<GroupItemFixture>,

        /// Group B entries listed by name only
        #[serde(default)]
        group_b_names: Vec<String>,
    },

    /// Buy from group A, get group B free
    BuyAGetBFree {
        /// Promotion name
        name: String,

        /// Group A
        #[serde(default)]
        group_a: Vec<GroupItemFixture>,

        /// Group B
        #[serde(default)]
        group_b: Vec<GroupItemFixture>,
    },
}

fn group<'a>(items: Vec<GroupItemFixture>, currency: &'static Currency) -> Vec<GroupItem<'a>> {
    items
        .into_iter()
        .map(|item| GroupItem::new(item.name, Money::from_major(item.price, currency)))
        .collect()
}

impl PromotionFixture {
    /// Convert to a [`Promotion`] priced in `currency`
    pub fn into_promotion<'a>(self, currency: &'static Currency) -> Promotion<'a> {
        match self {
            PromotionFixture::PickOne {
                name,
                price,
                group_a,
                group_b,
                group_b_names,
            } => Promotion::PickOne(PickOnePromotion {
                name,
                group_a: group(group_a, currency),
                group_b: group(group_b, currency),
                group_b_names,
                price: Money::from_major(price, currency),
            }),
            PromotionFixture::BuyAGetBFree {
                name,
                group_a,
                group_b,
            } => Promotion::BuyAGetBFree(BuyAGetBFreePromotion {
                name,
                group_a: group(group_a, currency),
                group_b: group(group_b, currency),
            }),
        }
    }
}

impl PromotionsFixture {
    /// Convert every promotion in the file
    pub fn into_promotions<'a>(self, currency: &'static Currency) -> Vec<Promotion<'a>> {
        self.promotions
            .into_iter()
            .map(|promotion| promotion.into_promotion(currency))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::TWD;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn promotions_fixture_converts_both_kinds() -> TestResult {
        let fixture: PromotionsFixture = serde_norway::from_str(
            "currency: TWD
promotions:
  - type: pick_one
    name: 超值選
    price: 99
    group_a:
      - name: 麥香雞
        price: 55
    group_b_names: [薯條(小)]
  - type: buy_a_get_b_free
    name: 買大送小
    group_a:
      - name: 可樂(中)
        price: 38
    group_b:
      - name: 蛋捲冰淇淋
        price: 20
",
        )?;

        let promotions = fixture.into_promotions(TWD);

        assert_eq!(promotions.len(), 2);

        let Some(Promotion::PickOne(pick_one)) = promotions.first() else {
            return Err("expected a pick-one promotion".into());
        };
        assert_eq!(pick_one.price, Money::from_major(99, TWD));
        assert!(pick_one.group_b.is_empty());
        assert!(pick_one.in_group_b("薯條(小)"));

        let Some(Promotion::BuyAGetBFree(buy_a)) = promotions.get(1) else {
            return Err("expected a buy-A-get-B promotion".into());
        };
        assert_eq!(buy_a.name, "買大送小");
        assert!(buy_a.in_group_b("蛋捲冰淇淋"));

        Ok(())
    }

    #[test]
    fn unknown_promotion_type_is_rejected() {
        let result: Result<PromotionsFixture, _> = serde_norway::from_str(
            "currency: TWD\npromotions:\n  - type: mystery\n    name: x\n",
        );

        assert!(result.is_err());
    }
}
